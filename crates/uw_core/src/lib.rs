pub mod constants;
pub mod error;
pub mod logging;
pub mod models;
pub mod render;
pub mod state;
pub mod types;

pub use error::{Error, Result};
pub use models::{GeneratedImage, GenerativeModel, GroundingChunk, ImageRequest, TextRequest, TextResponse};
pub use state::FetchState;
pub use types::{CoverageStats, Highlight, Leaning, Perspective, Source, SummaryData, TimelineDataPoint};
