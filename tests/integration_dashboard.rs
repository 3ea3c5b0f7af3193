use sales_command_center_lib::models::{ManagerFilter, ModuleKind, TranscriptionPhase};
use sales_command_center_lib::{AppError, DashboardCore};
use std::io::Write;
use tokio::time::Duration;

#[test]
fn tracing_initializes_into_a_log_directory() {
    let log_dir = tempfile::tempdir().expect("temp log dir");
    sales_command_center_lib::init_tracing(log_dir.path()).expect("init tracing");
    assert!(log_dir.path().exists());
}

#[test]
fn session_gate_guards_every_module() {
    let core = DashboardCore::new().expect("core");

    assert!(matches!(
        core.login("admin", "wrong"),
        Err(AppError::AuthFailed(_))
    ));
    assert!(matches!(
        core.render_pulse(),
        Err(AppError::AuthFailed(_))
    ));

    let state = core.login("admin", "admin").expect("login");
    assert!(state.logged_in);

    let dashboard = core.render_dashboard().expect("dashboard");
    assert_eq!(dashboard.completion_percent, 52);
    assert_eq!(dashboard.plan_month, "3\u{a0}560\u{a0}000 ₽");
    assert_eq!(dashboard.managers.len(), 4);

    let audit = core.render_audit().expect("audit");
    assert_eq!(audit.len(), 5);

    let calls = core.render_calls_history().expect("calls");
    assert_eq!(calls.len(), 2);

    let pulse = core.render_pulse().expect("pulse");
    assert_eq!(pulse.len(), 5);
}

#[test]
fn manager_filter_flows_through_deal_views() {
    let core = DashboardCore::new().expect("core");
    core.login("admin", "admin").expect("login");
    core.switch_module(ModuleKind::Audit).expect("switch");
    core.set_manager_filter(ManagerFilter::Id(1))
        .expect("filter");

    let audit = core.render_audit().expect("audit");
    let ids = audit.iter().map(|row| row.deal_id).collect::<Vec<_>>();
    assert_eq!(ids, vec![1, 5]);

    let pulse = core.render_pulse().expect("pulse");
    assert_eq!(pulse.len(), 2);
    assert!(pulse.iter().all(|card| card.manager_name == "Иван"));

    // dashboard manager grid ignores the deal filter
    let dashboard = core.render_dashboard().expect("dashboard");
    assert_eq!(dashboard.managers.len(), 4);
}

#[tokio::test(start_paused = true)]
async fn chat_reply_lands_after_the_delay_with_live_figures() {
    let core = DashboardCore::new().expect("core");
    core.login("admin", "admin").expect("login");

    let user_message = core
        .send_chat_message("сделай анализ сделок")
        .await
        .expect("send message");
    assert_eq!(core.chat_history().await.expect("history").len(), 1);

    tokio::time::sleep(Duration::from_millis(1_100)).await;

    let history = core.chat_history().await.expect("history");
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].id, user_message.id);

    let expected_total: i64 = core
        .store()
        .deals()
        .iter()
        .take(5)
        .map(|deal| deal.amount)
        .sum();
    assert!(history[1]
        .text
        .contains(&sales_command_center_lib::filters::format_currency(
            expected_total
        )));
}

#[tokio::test(start_paused = true)]
async fn empty_chat_message_is_rejected() {
    let core = DashboardCore::new().expect("core");
    core.login("admin", "admin").expect("login");

    let result = core.send_chat_message("   ").await;
    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(core.chat_history().await.expect("history").is_empty());
}

#[tokio::test(start_paused = true)]
async fn upload_plays_the_fixed_pipeline_and_opens_the_demo_call() {
    let core = DashboardCore::new().expect("core");
    core.login("admin", "admin").expect("login");

    let mut upload = tempfile::NamedTempFile::new().expect("temp upload");
    upload
        .write_all(b"not really audio")
        .expect("write upload fixture");

    let mut progress = core.transcription_progress();
    core.start_transcription(upload.path())
        .await
        .expect("start transcription");

    let result_call_id = {
        let done = progress
            .wait_for(|update| update.phase == TranscriptionPhase::Done)
            .await
            .expect("pipeline completes");
        done.result_call_id.expect("result call id")
    };

    let analysis = core
        .open_call_analysis(result_call_id)
        .expect("analysis view");
    assert_eq!(analysis.call_id, 1);
    assert_eq!(analysis.quality_score, 18);
    assert_eq!(analysis.quality_label, "Отлично");
    assert_eq!(analysis.recommendations.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn settings_patch_reaches_the_simulated_flows() {
    let core = DashboardCore::new().expect("core");
    core.login("admin", "admin").expect("login");
    core.update_settings(serde_json::json!({
        "transcriptionStepMs": 10,
        "transcriptionSettleMs": 5,
        "chatReplyDelayMs": 20
    }))
    .expect("settings update");

    let mut progress = core.transcription_progress();
    core.start_transcription(std::path::Path::new("demo.mp3"))
        .await
        .expect("start transcription");

    progress
        .wait_for(|update| update.phase == TranscriptionPhase::Done)
        .await
        .expect("fast pipeline completes");

    core.send_chat_message("кп").await.expect("send message");
    tokio::time::sleep(Duration::from_millis(30)).await;
    let history = core.chat_history().await.expect("history");
    assert_eq!(history.len(), 2);
    assert!(history[1].text.contains("Коммерческое предложение"));
}
