use std::sync::Arc;

use tokio::sync::Mutex;
use uw_core::{GenerativeModel, TimelineDataPoint};
use uw_inference::briefing::Briefer;
use uw_inference::focus::FocusController;

pub struct AppState {
    pub briefer: Briefer,
    pub focus: FocusController,
    pub topics: Vec<String>,
    /// Filled by the first successful timeline fetch and served from then on.
    pub timeline: Mutex<Option<Vec<TimelineDataPoint>>>,
}

impl AppState {
    pub fn new(model: Arc<dyn GenerativeModel>, topics: Vec<String>) -> Self {
        let briefer = Briefer::new(model);
        Self {
            focus: FocusController::new(briefer.clone()),
            briefer,
            topics,
            timeline: Mutex::new(None),
        }
    }
}
