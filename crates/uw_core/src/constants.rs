pub const LEFT_LEANING_OUTLETS: &[&str] = &[
    "The New York Times",
    "The Guardian",
    "CNN",
    "MSNBC",
    "The Washington Post",
    "Reuters",
];

pub const RIGHT_LEANING_OUTLETS: &[&str] = &[
    "Fox News",
    "The Wall Street Journal",
    "New York Post",
    "The Times (UK)",
    "The National Review",
    "The Telegraph",
];

pub const CENTER_OUTLETS: &[&str] = &["Associated Press", "BBC News", "NPR"];

/// Topics summarized on every briefing cycle.
pub const TOPICS: &[&str] = &[
    "Ukraine Frontline Developments",
    "US Politics & Aid for Ukraine",
    "Russian Domestic Affairs & War Impact",
    "Global Diplomacy & Ukraine",
    "Israel-Gaza Conflict & Global Tensions",
];

pub fn topics() -> Vec<String> {
    TOPICS.iter().map(|t| t.to_string()).collect()
}
