use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use uw_core::{FetchState, Leaning};

use crate::briefing::Briefer;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FocusSnapshot {
    pub selected: Option<Leaning>,
    pub state: FetchState<String>,
}

#[derive(Debug, Default)]
struct FocusInner {
    selected: Option<Leaning>,
    state: FetchState<String>,
    /// Bumped on every selection change; responses from older generations are dropped.
    generation: u64,
    in_flight: Option<CancellationToken>,
}

impl FocusInner {
    fn snapshot(&self) -> FocusSnapshot {
        FocusSnapshot {
            selected: self.selected,
            state: self.state.clone(),
        }
    }

    fn reset(&mut self) {
        if let Some(token) = self.in_flight.take() {
            token.cancel();
        }
        self.generation += 1;
        self.selected = None;
        self.state = FetchState::Idle;
    }
}

/// Drives the leaning focus panel: `Idle -> Loading -> Success | Error`.
///
/// Selecting the active leaning again closes the panel without a request.
/// A new selection cancels the one still in flight. Fetches run on their own
/// task, so a caller that stops waiting never leaves the panel loading.
#[derive(Debug)]
pub struct FocusController {
    briefer: Briefer,
    inner: Arc<Mutex<FocusInner>>,
}

impl FocusController {
    pub fn new(briefer: Briefer) -> Self {
        Self {
            briefer,
            inner: Arc::new(Mutex::new(FocusInner::default())),
        }
    }

    pub async fn snapshot(&self) -> FocusSnapshot {
        self.inner.lock().await.snapshot()
    }

    pub async fn close(&self) -> FocusSnapshot {
        let mut inner = self.inner.lock().await;
        inner.reset();
        inner.snapshot()
    }

    pub async fn select(&self, leaning: Leaning) -> FocusSnapshot {
        let (generation, task) = {
            let mut inner = self.inner.lock().await;
            if inner.selected == Some(leaning) {
                inner.reset();
                return inner.snapshot();
            }
            inner.reset();
            let token = CancellationToken::new();
            inner.selected = Some(leaning);
            inner.state = FetchState::Loading;
            inner.in_flight = Some(token.clone());
            let task = tokio::spawn(fetch_focus(
                self.briefer.clone(),
                self.inner.clone(),
                leaning,
                inner.generation,
                token,
            ));
            (inner.generation, task)
        };

        if let Err(e) = task.await {
            let mut inner = self.inner.lock().await;
            if inner.generation == generation {
                inner.state = FetchState::Error(format!("Focus summary task failed: {}", e));
                inner.in_flight = None;
            }
        }
        self.snapshot().await
    }
}

async fn fetch_focus(
    briefer: Briefer,
    inner: Arc<Mutex<FocusInner>>,
    leaning: Leaning,
    generation: u64,
    token: CancellationToken,
) {
    let outcome = tokio::select! {
        _ = token.cancelled() => None,
        result = briefer.fetch_focus_summary(leaning) => Some(result),
    };

    let mut inner = inner.lock().await;
    match outcome {
        Some(result) if inner.generation == generation => {
            inner.state = result.into();
            inner.in_flight = None;
        }
        _ => tracing::debug!("Discarding superseded focus summary for {}", leaning),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::briefing::tests::{MockModel, Reply};
    use async_trait::async_trait;
    use std::sync::atomic::Ordering;
    use std::time::Duration;
    use tokio::sync::Notify;
    use uw_core::{GeneratedImage, GenerativeModel, ImageRequest, Result, TextRequest, TextResponse};

    /// Never answers for the left-leaning group, answers the center once released
    /// and the right immediately.
    #[derive(Debug, Default)]
    struct GatedModel {
        left_started: Notify,
        center_started: Notify,
        center_release: Notify,
    }

    #[async_trait]
    impl GenerativeModel for GatedModel {
        fn name(&self) -> &str {
            "gated"
        }

        async fn generate_text(&self, request: &TextRequest) -> Result<TextResponse> {
            if request.prompt.contains("Media Group to Analyze: Left-Leaning") {
                self.left_started.notify_one();
                std::future::pending::<()>().await;
            }
            if request.prompt.contains("Media Group to Analyze: Center") {
                self.center_started.notify_one();
                self.center_release.notified().await;
                return Ok(TextResponse {
                    text: Some("Center focus.".to_string()),
                    grounding_chunks: vec![],
                });
            }
            Ok(TextResponse {
                text: Some("Right-leaning focus.".to_string()),
                grounding_chunks: vec![],
            })
        }

        async fn generate_images(&self, _request: &ImageRequest) -> Result<Vec<GeneratedImage>> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn test_select_loads_summary() {
        let controller = FocusController::new(Briefer::new(Arc::new(MockModel::new(Reply::Text(" Focus. ".to_string())))));
        assert_eq!(controller.snapshot().await, FocusSnapshot::default());

        let snapshot = controller.select(Leaning::Center).await;
        assert_eq!(snapshot.selected, Some(Leaning::Center));
        assert_eq!(snapshot.state, FetchState::Success("Focus.".to_string()));
    }

    #[tokio::test]
    async fn test_reselecting_active_leaning_toggles_off() {
        let model = Arc::new(MockModel::new(Reply::Text("Focus.".to_string())));
        let controller = FocusController::new(Briefer::new(model.clone()));

        controller.select(Leaning::Center).await;
        let snapshot = controller.select(Leaning::Center).await;

        assert_eq!(snapshot, FocusSnapshot { selected: None, state: FetchState::Idle });
        assert_eq!(model.text_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_is_scoped_to_focus_state() {
        let controller = FocusController::new(Briefer::new(Arc::new(MockModel::new(Reply::Fail("quota".to_string())))));
        let snapshot = controller.select(Leaning::RightLeaning).await;
        assert_eq!(snapshot.selected, Some(Leaning::RightLeaning));
        assert_eq!(snapshot.state, FetchState::Error("quota".to_string()));
    }

    #[tokio::test]
    async fn test_superseded_selection_is_discarded() {
        let model = Arc::new(GatedModel::default());
        let controller = Arc::new(FocusController::new(Briefer::new(model.clone())));

        let pending = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.select(Leaning::LeftLeaning).await })
        };
        model.left_started.notified().await;
        assert!(controller.snapshot().await.state.is_loading());

        let latest = controller.select(Leaning::RightLeaning).await;
        assert_eq!(latest.selected, Some(Leaning::RightLeaning));
        assert_eq!(latest.state, FetchState::Success("Right-leaning focus.".to_string()));

        let stale = pending.await.unwrap();
        assert_eq!(stale.selected, Some(Leaning::RightLeaning));
        assert_eq!(controller.snapshot().await, latest);
    }

    #[tokio::test]
    async fn test_close_cancels_in_flight_request() {
        let model = Arc::new(GatedModel::default());
        let controller = Arc::new(FocusController::new(Briefer::new(model.clone())));

        let pending = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.select(Leaning::LeftLeaning).await })
        };
        model.left_started.notified().await;

        assert_eq!(controller.close().await, FocusSnapshot::default());
        assert_eq!(pending.await.unwrap(), FocusSnapshot::default());
    }

    #[tokio::test]
    async fn test_abandoned_select_still_completes() {
        let model = Arc::new(GatedModel::default());
        let controller = Arc::new(FocusController::new(Briefer::new(model.clone())));

        let pending = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.select(Leaning::Center).await })
        };
        model.center_started.notified().await;
        pending.abort();
        assert!(pending.await.unwrap_err().is_cancelled());
        assert!(controller.snapshot().await.state.is_loading());

        model.center_release.notify_one();
        let mut snapshot = controller.snapshot().await;
        for _ in 0..200 {
            if !snapshot.state.is_loading() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
            snapshot = controller.snapshot().await;
        }
        assert_eq!(
            snapshot,
            FocusSnapshot {
                selected: Some(Leaning::Center),
                state: FetchState::Success("Center focus.".to_string()),
            }
        );

        let next = controller.select(Leaning::RightLeaning).await;
        assert_eq!(next.state, FetchState::Success("Right-leaning focus.".to_string()));
    }
}
