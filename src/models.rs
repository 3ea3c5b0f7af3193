use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ─── Domain Records ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ManagerStatus {
    Potential,
    Cold,
    Optimism,
}

impl ManagerStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Potential => "potential",
            Self::Cold => "cold",
            Self::Optimism => "optimism",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manager {
    pub id: u32,
    pub name: String,
    pub health_score: u8,
    pub status: ManagerStatus,
    pub emoji: String,
}

/// Pipeline phase of a deal. Codes outside the known set are carried through
/// verbatim and label as themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DealStage {
    Negotiation,
    Presentation,
    Tender,
    Lost,
    #[serde(untagged)]
    Other(String),
}

impl DealStage {
    pub fn slug(&self) -> &str {
        match self {
            Self::Negotiation => "negotiation",
            Self::Presentation => "presentation",
            Self::Tender => "tender",
            Self::Lost => "lost",
            Self::Other(code) => code,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Negotiation => "Переговоры",
            Self::Presentation => "Презентация",
            Self::Tender => "Тендер",
            Self::Lost => "Проиграна",
            Self::Other(code) => code,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: u32,
    pub title: String,
    pub manager_id: u32,
    pub amount: i64,
    pub stage: DealStage,
    pub health_positive: Vec<String>,
    pub health_negative: Vec<String>,
    pub last_contact: String,
    pub probability: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Positive => "Позитивный",
            Self::Neutral => "Нейтральный",
            Self::Negative => "Негативный",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallScores {
    pub politeness: u8,
    pub understanding: u8,
    pub solution: u8,
    pub closing: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRecord {
    pub id: u32,
    pub filename: String,
    pub manager_id: u32,
    pub client: String,
    pub duration: String,
    pub date: NaiveDate,
    pub transcript: String,
    pub quality_score: u8,
    pub scores: CallScores,
    pub sentiment: Sentiment,
    pub key_phrases: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealStats {
    pub without_tasks: u32,
    pub overdue_tasks: u32,
    pub stuck_deals: u32,
    pub lost_deals: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSnapshot {
    pub plan_month: i64,
    pub fact_current: i64,
    pub potential: i64,
    pub deficit: i64,
    pub days_left: u32,
    pub deal_stats: DealStats,
}

// ─── Chat ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

// ─── View State ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModuleKind {
    Dashboard,
    Audit,
    Calls,
    Pulse,
    Assistant,
}

impl ModuleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Audit => "audit",
            Self::Calls => "calls",
            Self::Pulse => "pulse",
            Self::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PeriodFilter {
    Month,
    Quarter,
    Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ManagerFilter {
    All,
    Id(u32),
}

/// Immutable view-state value. Transitions return a new value; renderers
/// only ever borrow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub module: ModuleKind,
    pub period: PeriodFilter,
    pub manager: ManagerFilter,
    pub logged_in: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            module: ModuleKind::Dashboard,
            period: PeriodFilter::Month,
            manager: ManagerFilter::All,
            logged_in: false,
        }
    }
}

impl ViewState {
    pub fn with_module(self, module: ModuleKind) -> Self {
        Self { module, ..self }
    }

    pub fn with_period(self, period: PeriodFilter) -> Self {
        Self { period, ..self }
    }

    pub fn with_manager(self, manager: ManagerFilter) -> Self {
        Self { manager, ..self }
    }

    pub fn with_login(self, logged_in: bool) -> Self {
        Self { logged_in, ..self }
    }
}

// ─── Settings ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppSettings {
    pub login_username: String,
    pub login_password: String,
    pub chat_reply_delay_ms: u64,
    pub transcription_step_ms: u64,
    pub transcription_settle_ms: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            login_username: "admin".to_string(),
            login_password: "admin".to_string(),
            chat_reply_delay_ms: 1_000,
            transcription_step_ms: 800,
            transcription_settle_ms: 500,
        }
    }
}

// ─── Display Models ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HealthBand {
    High,
    Medium,
    Low,
}

impl HealthBand {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerCard {
    pub manager_id: u32,
    pub name: String,
    pub emoji: String,
    pub health_score: u8,
    pub health_band: HealthBand,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub plan_month: String,
    pub fact_current: String,
    pub potential: String,
    pub deficit: String,
    pub completion_percent: u32,
    pub days_left: u32,
    pub stats: DealStats,
    pub managers: Vec<ManagerCard>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRow {
    pub deal_id: u32,
    pub title: String,
    pub manager_name: String,
    pub amount: String,
    pub stage_slug: String,
    pub stage_label: String,
    pub probability: u8,
    pub health_positive: Vec<String>,
    pub health_negative: Vec<String>,
    pub last_contact: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallListItem {
    pub call_id: u32,
    pub filename: String,
    pub quality_score: u8,
    pub quality_max: u8,
    pub manager_name: String,
    pub client: String,
    pub duration: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QualityGrade {
    Excellent,
    Good,
    Fair,
}

impl QualityGrade {
    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Отлично",
            Self::Good => "Хорошо",
            Self::Fair => "Удовлетворительно",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreMetric {
    Politeness,
    Understanding,
    Solution,
    Closing,
}

impl ScoreMetric {
    pub fn label(self) -> &'static str {
        match self {
            Self::Politeness => "Вежливость",
            Self::Understanding => "Понимание потребностей",
            Self::Solution => "Предложение решения",
            Self::Closing => "Закрытие на следующий шаг",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreMeter {
    pub metric: ScoreMetric,
    pub value: u8,
    pub max: u8,
    pub percent: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Speaker {
    Agent,
    Client,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptLine {
    pub speaker: Option<Speaker>,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub icon: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallAnalysisView {
    pub call_id: u32,
    pub manager_name: String,
    pub client: String,
    pub duration: String,
    pub date: NaiveDate,
    pub quality_score: u8,
    pub quality_grade: QualityGrade,
    pub quality_label: String,
    pub meters: Vec<ScoreMeter>,
    pub transcript: Vec<TranscriptLine>,
    pub sentiment: Sentiment,
    pub sentiment_label: String,
    pub key_phrases: Vec<String>,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PulseCard {
    pub deal_id: u32,
    pub title: String,
    pub manager_name: String,
    pub probability: u8,
    pub probability_band: HealthBand,
    pub amount: String,
    pub stage_label: String,
    pub last_contact: String,
    pub action_plan: Vec<String>,
}

// ─── Simulated Transcription ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TranscriptionPhase {
    Idle,
    Running,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptionProgress {
    pub phase: TranscriptionPhase,
    pub percent: u8,
    pub status: String,
    pub result_call_id: Option<u32>,
}

impl Default for TranscriptionProgress {
    fn default() -> Self {
        Self {
            phase: TranscriptionPhase::Idle,
            percent: 0,
            status: String::new(),
            result_call_id: None,
        }
    }
}
