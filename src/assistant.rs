use crate::advisor::assistant_reply;
use crate::models::{ChatMessage, ChatRole};
use crate::store::DataStore;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};
use uuid::Uuid;

/// Session chat thread. The user message lands immediately; the assistant
/// reply is scheduled after a fixed delay. Only one reply timer is ever in
/// flight: a newer message aborts the pending one before scheduling its own.
#[derive(Clone)]
pub struct ChatThread {
    store: Arc<DataStore>,
    history: Arc<Mutex<Vec<ChatMessage>>>,
    pending_reply: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl ChatThread {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self {
            store,
            history: Arc::new(Mutex::new(Vec::new())),
            pending_reply: Arc::new(Mutex::new(None)),
        }
    }

    pub async fn send(&self, text: &str, reply_delay: Duration) -> ChatMessage {
        let user_message = ChatMessage {
            id: Uuid::new_v4().to_string(),
            role: ChatRole::User,
            text: text.to_string(),
            sent_at: Utc::now(),
        };

        {
            let mut history = self.history.lock().await;
            history.push(user_message.clone());
        }

        let mut pending = self.pending_reply.lock().await;
        if let Some(stale) = pending.take() {
            stale.abort();
            tracing::debug!("aborted stale assistant reply timer");
        }

        let store = self.store.clone();
        let history = self.history.clone();
        let prompt = text.to_string();
        *pending = Some(tokio::spawn(async move {
            sleep(reply_delay).await;
            let reply = ChatMessage {
                id: Uuid::new_v4().to_string(),
                role: ChatRole::Assistant,
                text: assistant_reply(&store, &prompt),
                sent_at: Utc::now(),
            };
            let mut history = history.lock().await;
            history.push(reply);
        }));

        user_message
    }

    pub async fn history(&self) -> Vec<ChatMessage> {
        self.history.lock().await.clone()
    }
}
