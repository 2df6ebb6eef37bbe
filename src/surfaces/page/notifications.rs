use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub kind: NotificationKind,
}

/// How many past notifications a board remembers.
pub const HISTORY_LIMIT: usize = 32;

#[derive(Debug, Default)]
struct BoardState {
    live: Option<Notification>,
    shown: VecDeque<Notification>,
}

/// Transient status notifications for one page.
///
/// At most one notification is live. A new one replaces the current one, and
/// each notification dismisses itself after the display window unless it has
/// already been replaced.
#[derive(Debug, Clone)]
pub struct NotificationBoard {
    display: Duration,
    state: Arc<Mutex<BoardState>>,
}

impl NotificationBoard {
    #[must_use]
    pub fn new(display: Duration) -> Self {
        Self {
            display,
            state: Arc::new(Mutex::new(BoardState::default())),
        }
    }

    pub async fn show(&self, message: impl Into<String>, kind: NotificationKind) -> Uuid {
        let notification = Notification {
            id: Uuid::new_v4(),
            message: message.into(),
            kind,
        };
        let id = notification.id;

        {
            let mut state = self.state.lock().await;
            if state.shown.len() == HISTORY_LIMIT {
                state.shown.pop_front();
            }
            state.shown.push_back(notification.clone());
            state.live = Some(notification);
        }

        let state = Arc::clone(&self.state);
        let display = self.display;
        tokio::spawn(async move {
            tokio::time::sleep(display).await;
            let mut state = state.lock().await;
            if state.live.as_ref().is_some_and(|n| n.id == id) {
                state.live = None;
                debug!(%id, "Notification dismissed");
            }
        });

        id
    }

    /// The notification currently on screen.
    pub async fn current(&self) -> Option<Notification> {
        self.state.lock().await.live.clone()
    }

    /// The most recent notifications, oldest first, at most [`HISTORY_LIMIT`].
    pub async fn history(&self) -> Vec<Notification> {
        self.state.lock().await.shown.iter().cloned().collect()
    }
}
