//! Prompts sent to the text model.
//!
//! The briefing prompt and [`crate::parser`] share a tiny text protocol: the
//! model writes the summary, then each separator below followed by its part.
//! Bump [`PROTOCOL_VERSION`] whenever a separator or the part order changes.

use uw_core::Leaning;

pub const PROTOCOL_VERSION: u32 = 1;

pub const PULL_QUOTE_SEPARATOR: &str = "|||---PULL_QUOTE---|||";
pub const IMAGE_PROMPT_SEPARATOR: &str = "|||---IMAGE_PROMPT---|||";
pub const PERSPECTIVES_JSON_SEPARATOR: &str = "|||---PERSPECTIVES_JSON---|||";

/// Days covered by the coverage timeline.
pub const TIMELINE_DAYS: u32 = 30;

fn outlets(leaning: Leaning) -> String {
    leaning.outlets().join(", ")
}

pub fn summary_prompt(topic: &str) -> String {
    format!(
        r#"
You are an expert, unbiased news analyst. Your task is to synthesize information from various news sources to provide a neutral, balanced summary, and also provide analysis on how different media leanings cover specific points.

Here is a list of news outlets and their general political leanings:
- Left-Leaning: {left}
- Right-Leaning: {right}
- Centrist: {center}

Topic to Summarize: "{topic}"

Instructions for your output:
Your output MUST be in a specific structure with three parts separated by unique separators.

PART 1: THE SUMMARY
1. Search for recent news articles (last 7 days) on the topic.
2. Write a concise, factual, and unbiased summary of 3-4 paragraphs.

PART 2: THE PULL QUOTE & IMAGE PROMPT
1. After the summary, insert the separator: '{pull_quote}'.
2. After this separator, write the single most impactful sentence from your summary as a "pull quote".
3. After the pull quote, insert the separator: '{image_prompt}'.
4. After this separator, write a short, neutral prompt for an image generation AI that visually represents the summary's key theme.

PART 3: PERSPECTIVES JSON
1. After the image prompt, insert the final separator: '{perspectives}'.
2. After this final separator, you MUST provide a JSON array of "highlights" and nothing else.
3. For 2-4 key phrases or sentences in your summary that are likely to be framed differently by various media, create a highlight object.
4. Each highlight object must have two keys:
   - "textToHighlight": The exact string from your summary to be highlighted.
   - "perspectives": An object with three keys: "left", "center", and "right". Each value is a brief (1-2 sentences) explanation of how that media leaning typically frames or reports on the "textToHighlight".

Example of the complete output structure:
[Your 3-4 paragraph summary is here...]
{pull_quote}
[The single most important sentence from the summary]
{image_prompt}
[Your image generation prompt here]
{perspectives}
[
  {{
    "textToHighlight": "the recent delivery of F-16 fighter jets",
    "perspectives": {{
      "left": "Reporting often emphasizes the defensive nature of the jets and the international coalition's role in supporting Ukrainian sovereignty.",
      "center": "Focuses on the technical capabilities of the aircraft, the training timeline for pilots, and the potential impact on battlefield dynamics.",
      "right": "Coverage may question the slow pace of delivery and argue for more aggressive military aid to achieve a decisive outcome."
    }}
  }}
]
"#,
        left = outlets(Leaning::LeftLeaning),
        right = outlets(Leaning::RightLeaning),
        center = outlets(Leaning::Center),
        topic = topic,
        pull_quote = PULL_QUOTE_SEPARATOR,
        image_prompt = IMAGE_PROMPT_SEPARATOR,
        perspectives = PERSPECTIVES_JSON_SEPARATOR,
    )
}

pub fn focus_prompt(leaning: Leaning) -> String {
    format!(
        r#"
You are an expert, unbiased news analyst.
Your task is to analyze the recent coverage of the war in Ukraine from a specific group of media outlets and summarize their primary focus.

Media Group to Analyze: {leaning}
Outlets in this group: {outlets}

Instructions:
1. Using Google Search, analyze news articles published in the last 7 days from the outlets listed above.
2. Identify the main narratives, recurring themes, and key points of emphasis in their coverage of the war in Ukraine.
3. Synthesize your findings into a concise, objective summary of 2-3 paragraphs. Do not inject your own opinions. The summary should strictly reflect the focus of the specified media group.
4. Your response should ONLY be the summary text.
"#,
        leaning = leaning,
        outlets = outlets(leaning),
    )
}

pub fn coverage_stats_prompt() -> String {
    r#"
You are a media analyst. Using Google Search, estimate what share of foreign-affairs news coverage published in the last 7 days by major US outlets, and by major EU outlets, was about the war in Ukraine.

Respond ONLY with a JSON object of the form {"us": <number>, "eu": <number>} where each number is a percentage between 0 and 100. Do not add any other text.
"#
    .to_string()
}

pub fn coverage_timeline_prompt(days: u32) -> String {
    format!(
        r#"
You are a media analyst. Using Google Search, estimate for each of the last {days} days what share of foreign-affairs news coverage by major US outlets, and by major EU outlets, was about the war in Ukraine.

Respond ONLY with a JSON array ordered from oldest to newest, one element per day, each of the form {{"date": "YYYY-MM-DD", "us": <number>, "eu": <number>}} where each number is a percentage between 0 and 100. Do not add any other text.
"#,
        days = days,
    )
}
