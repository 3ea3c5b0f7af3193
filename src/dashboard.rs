use crate::assistant::ChatThread;
use crate::errors::{AppError, AppResult};
use crate::models::{
    AppSettings, AuditRow, CallAnalysisView, CallListItem, ChatMessage, DashboardView,
    ManagerFilter, ModuleKind, PeriodFilter, PulseCard, TranscriptionProgress, ViewState,
};
use crate::session;
use crate::store::DataStore;
use crate::transcription::TranscriptionSimulator;
use crate::views;
use std::path::Path;
use std::sync::{Arc, RwLock};
use tokio::sync::watch;
use tokio::time::Duration;

/// Facade over the data store, view state and the simulated flows. Render
/// operations are thin calls into the pure per-module renderers; the facade
/// only adds the session gate and state bookkeeping.
#[derive(Clone)]
pub struct DashboardCore {
    store: Arc<DataStore>,
    settings: Arc<RwLock<AppSettings>>,
    view: Arc<RwLock<ViewState>>,
    chat: ChatThread,
    transcription: Arc<TranscriptionSimulator>,
}

impl DashboardCore {
    pub fn new() -> AppResult<Self> {
        Self::with_store(DataStore::sample(), AppSettings::default())
    }

    pub fn with_store(store: DataStore, settings: AppSettings) -> AppResult<Self> {
        let store = Arc::new(store);
        // the demo playback always lands on the first recorded call
        let demo_call_id = store.calls().first().map(|call| call.id);

        Ok(Self {
            chat: ChatThread::new(store.clone()),
            transcription: Arc::new(TranscriptionSimulator::new(demo_call_id)),
            store,
            settings: Arc::new(RwLock::new(settings)),
            view: Arc::new(RwLock::new(ViewState::default())),
        })
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    // ─── Session & View State ───────────────────────────────────────────────

    pub fn login(&self, username: &str, password: &str) -> AppResult<ViewState> {
        let settings = self.get_settings()?;
        let state = session::authenticate(&settings, username, password)?;
        self.replace_view(state)?;
        Ok(state)
    }

    pub fn logout(&self) -> AppResult<ViewState> {
        let state = session::logout();
        self.replace_view(state)?;
        Ok(state)
    }

    pub fn view_state(&self) -> AppResult<ViewState> {
        let view = self
            .view
            .read()
            .map_err(|_| AppError::Internal("view state lock poisoned".to_string()))?;
        Ok(*view)
    }

    pub fn switch_module(&self, module: ModuleKind) -> AppResult<ViewState> {
        let next = self.view_state()?.with_module(module);
        self.replace_view(next)?;
        Ok(next)
    }

    pub fn set_period_filter(&self, period: PeriodFilter) -> AppResult<ViewState> {
        let next = self.view_state()?.with_period(period);
        self.replace_view(next)?;
        Ok(next)
    }

    pub fn set_manager_filter(&self, filter: ManagerFilter) -> AppResult<ViewState> {
        if let ManagerFilter::Id(manager_id) = filter {
            if self.store.manager_by_id(manager_id).is_none() {
                return Err(AppError::NotFound(format!(
                    "Manager {} not found",
                    manager_id
                )));
            }
        }
        let next = self.view_state()?.with_manager(filter);
        self.replace_view(next)?;
        Ok(next)
    }

    fn replace_view(&self, next: ViewState) -> AppResult<()> {
        let mut view = self
            .view
            .write()
            .map_err(|_| AppError::Internal("view state lock poisoned".to_string()))?;
        *view = next;
        Ok(())
    }

    fn logged_in_state(&self) -> AppResult<ViewState> {
        let state = self.view_state()?;
        if !state.logged_in {
            return Err(AppError::AuthFailed("login required".to_string()));
        }
        Ok(state)
    }

    // ─── Module Renderers ───────────────────────────────────────────────────

    pub fn render_dashboard(&self) -> AppResult<DashboardView> {
        let state = self.logged_in_state()?;
        Ok(views::dashboard::render(&self.store, &state))
    }

    pub fn render_audit(&self) -> AppResult<Vec<AuditRow>> {
        let state = self.logged_in_state()?;
        Ok(views::audit::render(&self.store, &state))
    }

    pub fn render_calls_history(&self) -> AppResult<Vec<CallListItem>> {
        self.logged_in_state()?;
        Ok(views::calls::render_history(&self.store))
    }

    pub fn open_call_analysis(&self, call_id: u32) -> AppResult<CallAnalysisView> {
        self.logged_in_state()?;
        views::calls::render_analysis(&self.store, call_id)
    }

    pub fn render_pulse(&self) -> AppResult<Vec<PulseCard>> {
        let state = self.logged_in_state()?;
        Ok(views::pulse::render(&self.store, &state))
    }

    // ─── Simulated Flows ────────────────────────────────────────────────────

    pub async fn start_transcription(&self, upload: &Path) -> AppResult<()> {
        self.logged_in_state()?;
        let settings = self.get_settings()?;
        self.transcription
            .start(
                upload,
                Duration::from_millis(settings.transcription_step_ms),
                Duration::from_millis(settings.transcription_settle_ms),
            )
            .await;
        Ok(())
    }

    pub fn transcription_progress(&self) -> watch::Receiver<TranscriptionProgress> {
        self.transcription.subscribe()
    }

    pub async fn cancel_transcription(&self) -> AppResult<()> {
        self.logged_in_state()?;
        self.transcription.cancel().await;
        Ok(())
    }

    pub async fn send_chat_message(&self, text: &str) -> AppResult<ChatMessage> {
        self.logged_in_state()?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation("empty chat message".to_string()));
        }
        let settings = self.get_settings()?;
        Ok(self
            .chat
            .send(trimmed, Duration::from_millis(settings.chat_reply_delay_ms))
            .await)
    }

    pub async fn chat_history(&self) -> AppResult<Vec<ChatMessage>> {
        self.logged_in_state()?;
        Ok(self.chat.history().await)
    }

    // ─── Settings ───────────────────────────────────────────────────────────

    pub fn get_settings(&self) -> AppResult<AppSettings> {
        let settings = self
            .settings
            .read()
            .map_err(|_| AppError::Internal("settings lock poisoned".to_string()))?;
        Ok(settings.clone())
    }

    pub fn update_settings(&self, update: serde_json::Value) -> AppResult<AppSettings> {
        let current = self.get_settings()?;
        let mut merged = serde_json::to_value(current)?;
        merge_json(&mut merged, update);
        let next: AppSettings = serde_json::from_value(merged)?;

        let mut settings = self
            .settings
            .write()
            .map_err(|_| AppError::Internal("settings lock poisoned".to_string()))?;
        *settings = next.clone();
        Ok(next)
    }
}

fn merge_json(base: &mut serde_json::Value, update: serde_json::Value) {
    match (base, update) {
        (serde_json::Value::Object(base_map), serde_json::Value::Object(update_map)) => {
            for (key, value) in update_map {
                merge_json(
                    base_map.entry(key).or_insert(serde_json::Value::Null),
                    value,
                );
            }
        }
        (slot, value) => *slot = value,
    }
}
