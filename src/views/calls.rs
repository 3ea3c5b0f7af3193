use crate::advisor::call_recommendations;
use crate::errors::{AppError, AppResult};
use crate::models::{
    CallAnalysisView, CallListItem, CallRecord, QualityGrade, ScoreMeter, ScoreMetric, Speaker,
    TranscriptLine,
};
use crate::store::DataStore;

const AGENT_LABEL: &str = "Менеджер:";
const CLIENT_LABEL: &str = "Клиент:";

pub fn render_history(store: &DataStore) -> Vec<CallListItem> {
    store
        .calls()
        .iter()
        .map(|call| CallListItem {
            call_id: call.id,
            filename: call.filename.clone(),
            quality_score: call.quality_score,
            quality_max: 20,
            manager_name: store.manager_name(call.manager_id).to_string(),
            client: call.client.clone(),
            duration: call.duration.clone(),
            date: call.date,
        })
        .collect()
}

pub fn render_analysis(store: &DataStore, call_id: u32) -> AppResult<CallAnalysisView> {
    let call = store
        .call_by_id(call_id)
        .ok_or_else(|| AppError::NotFound(format!("Call {} not found", call_id)))?;

    let grade = quality_grade(call.quality_score);

    Ok(CallAnalysisView {
        call_id: call.id,
        manager_name: store.manager_name(call.manager_id).to_string(),
        client: call.client.clone(),
        duration: call.duration.clone(),
        date: call.date,
        quality_score: call.quality_score,
        quality_grade: grade,
        quality_label: grade.label().to_string(),
        meters: score_meters(call),
        transcript: segment_transcript(&call.transcript),
        sentiment: call.sentiment,
        sentiment_label: call.sentiment.label().to_string(),
        key_phrases: call.key_phrases.clone(),
        recommendations: call_recommendations(call),
    })
}

pub fn quality_grade(score: u8) -> QualityGrade {
    if score >= 16 {
        QualityGrade::Excellent
    } else if score >= 12 {
        QualityGrade::Good
    } else {
        QualityGrade::Fair
    }
}

fn score_meters(call: &CallRecord) -> Vec<ScoreMeter> {
    [
        (ScoreMetric::Politeness, call.scores.politeness),
        (ScoreMetric::Understanding, call.scores.understanding),
        (ScoreMetric::Solution, call.scores.solution),
        (ScoreMetric::Closing, call.scores.closing),
    ]
    .into_iter()
    .map(|(metric, value)| ScoreMeter {
        metric,
        value,
        max: 5,
        percent: u32::from(value) * 100 / 5,
    })
    .collect()
}

/// Splits the flat transcript into sentences and tags the speaker where an
/// utterance opens with the dialog label. Continuation sentences keep no
/// speaker of their own.
pub fn segment_transcript(transcript: &str) -> Vec<TranscriptLine> {
    transcript
        .split(". ")
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .map(|sentence| {
            if let Some(rest) = sentence.strip_prefix(AGENT_LABEL) {
                TranscriptLine {
                    speaker: Some(Speaker::Agent),
                    text: rest.trim().to_string(),
                }
            } else if let Some(rest) = sentence.strip_prefix(CLIENT_LABEL) {
                TranscriptLine {
                    speaker: Some(Speaker::Client),
                    text: rest.trim().to_string(),
                }
            } else {
                TranscriptLine {
                    speaker: None,
                    text: sentence.to_string(),
                }
            }
        })
        .collect()
}
