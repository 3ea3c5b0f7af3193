use crate::models::{TranscriptionPhase, TranscriptionProgress};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};

/// Fixed playback script: (percent, status line), one step per interval.
pub const TRANSCRIPTION_STEPS: &[(u8, &str)] = &[
    (20, "Загрузка файла..."),
    (40, "Обработка аудио..."),
    (60, "Распознавание речи..."),
    (80, "Анализ качества звонка..."),
    (100, "Готово!"),
];

/// Plays the canned transcription timeline and publishes progress over a
/// watch channel. The uploaded file only triggers the playback; its content
/// is never inspected. Starting a new run aborts the previous one so stale
/// ticks cannot land after a re-upload.
pub struct TranscriptionSimulator {
    progress: Arc<watch::Sender<TranscriptionProgress>>,
    task: Mutex<Option<JoinHandle<()>>>,
    result_call_id: Option<u32>,
}

impl TranscriptionSimulator {
    pub fn new(result_call_id: Option<u32>) -> Self {
        let (sender, _) = watch::channel(TranscriptionProgress::default());
        Self {
            progress: Arc::new(sender),
            task: Mutex::new(None),
            result_call_id,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<TranscriptionProgress> {
        self.progress.subscribe()
    }

    pub async fn start(&self, upload: &Path, step_delay: Duration, settle_delay: Duration) {
        let mut task = self.task.lock().await;
        if let Some(previous) = task.take() {
            previous.abort();
            tracing::debug!("aborted stale transcription playback");
        }

        tracing::info!(file = %upload.display(), "starting transcription playback");
        let sender = self.progress.clone();
        let result_call_id = self.result_call_id;

        *task = Some(tokio::spawn(async move {
            for (percent, status) in TRANSCRIPTION_STEPS {
                let _ = sender.send(TranscriptionProgress {
                    phase: TranscriptionPhase::Running,
                    percent: *percent,
                    status: (*status).to_string(),
                    result_call_id: None,
                });
                sleep(step_delay).await;
            }

            sleep(settle_delay).await;
            let _ = sender.send(TranscriptionProgress {
                phase: TranscriptionPhase::Done,
                percent: 100,
                status: "Готово!".to_string(),
                result_call_id,
            });
        }));
    }

    pub async fn cancel(&self) {
        let mut task = self.task.lock().await;
        if let Some(handle) = task.take() {
            handle.abort();
        }
        let _ = self.progress.send(TranscriptionProgress::default());
    }
}

#[cfg(test)]
mod tests {
    use super::{TranscriptionSimulator, TRANSCRIPTION_STEPS};
    use crate::models::TranscriptionPhase;
    use std::path::Path;
    use tokio::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn playback_walks_the_script_and_publishes_the_result() {
        let simulator = TranscriptionSimulator::new(Some(1));
        let mut progress = simulator.subscribe();

        simulator
            .start(
                Path::new("upload.mp3"),
                Duration::from_millis(800),
                Duration::from_millis(500),
            )
            .await;

        let mut seen = Vec::new();
        loop {
            progress.changed().await.expect("progress channel open");
            let current = progress.borrow_and_update().clone();
            seen.push((current.percent, current.phase));
            if current.phase == TranscriptionPhase::Done {
                assert_eq!(current.result_call_id, Some(1));
                break;
            }
        }

        let percents = seen.iter().map(|(p, _)| *p).collect::<Vec<_>>();
        assert_eq!(percents, vec![20, 40, 60, 80, 100, 100]);
        assert_eq!(seen.len(), TRANSCRIPTION_STEPS.len() + 1);
    }

    #[tokio::test(start_paused = true)]
    async fn restarting_aborts_the_previous_playback() {
        let simulator = TranscriptionSimulator::new(Some(1));
        let mut progress = simulator.subscribe();

        simulator
            .start(
                Path::new("first.mp3"),
                Duration::from_millis(800),
                Duration::from_millis(500),
            )
            .await;
        simulator
            .start(
                Path::new("second.mp3"),
                Duration::from_millis(800),
                Duration::from_millis(500),
            )
            .await;

        let mut done_count = 0;
        while progress.changed().await.is_ok() {
            let current = progress.borrow_and_update().clone();
            if current.phase == TranscriptionPhase::Done {
                done_count += 1;
                break;
            }
        }
        assert_eq!(done_count, 1);

        // the aborted run must not produce a second completion
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(!progress.has_changed().expect("progress channel open"));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_resets_progress_to_idle() {
        let simulator = TranscriptionSimulator::new(Some(1));
        let mut progress = simulator.subscribe();

        simulator
            .start(
                Path::new("upload.mp3"),
                Duration::from_millis(800),
                Duration::from_millis(500),
            )
            .await;
        progress.changed().await.expect("first step");
        simulator.cancel().await;

        progress.changed().await.expect("reset notification");
        let current = progress.borrow_and_update().clone();
        assert_eq!(current.phase, TranscriptionPhase::Idle);
        assert_eq!(current.percent, 0);
    }
}
