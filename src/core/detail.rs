use crate::domain::model::EventDetail;
use crate::domain::ports::EventApi;
use crate::utils::error::EventHubError;
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Clone, Default)]
pub struct DetailState {
    pub event: Option<EventDetail>,
    pub is_loading: bool,
    pub error: Option<Arc<EventHubError>>,
}

/// 單一活動詳細頁面
pub struct DetailViewModel {
    api: Arc<dyn EventApi>,
    state: watch::Sender<DetailState>,
}

impl DetailViewModel {
    pub fn new(api: Arc<dyn EventApi>) -> Self {
        let (state, _) = watch::channel(DetailState::default());
        Self { api, state }
    }

    pub fn subscribe(&self) -> watch::Receiver<DetailState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> DetailState {
        self.state.borrow().clone()
    }

    pub async fn load(&self, event_id: i64) {
        self.state.send_modify(|s| {
            s.is_loading = true;
            s.error = None;
        });

        match self.api.get_event_details(event_id).await {
            Ok(dto) => {
                let detail = EventDetail::from(&dto);
                tracing::debug!("Loaded details for event {}", event_id);
                self.state.send_modify(|s| {
                    s.event = Some(detail);
                    s.is_loading = false;
                });
            }
            Err(e) => {
                tracing::warn!("⚠️ Failed to load event {}: {}", event_id, e);
                let error = Arc::new(e);
                self.state.send_modify(|s| {
                    s.event = None;
                    s.is_loading = false;
                    s.error = Some(error);
                });
            }
        }
    }
}
