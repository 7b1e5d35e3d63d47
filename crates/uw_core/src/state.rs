use serde::{Deserialize, Serialize};

use crate::Result;

/// Lifecycle of one independently loaded region (briefing list, focus panel, coverage chart).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum FetchState<T> {
    #[default]
    Idle,
    Loading,
    Success(T),
    Error(String),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchState<U> {
        match self {
            FetchState::Idle => FetchState::Idle,
            FetchState::Loading => FetchState::Loading,
            FetchState::Success(data) => FetchState::Success(f(data)),
            FetchState::Error(message) => FetchState::Error(message),
        }
    }
}

impl<T> From<Result<T>> for FetchState<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => FetchState::Success(data),
            Err(e) => FetchState::Error(e.to_string()),
        }
    }
}
