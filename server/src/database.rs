//! # Redis
//!
//! All per-visitor state.
//!
//! ## Requirements
//!
//! - Fast lookups keyed by session id
//! - Small values, no relations worth a SQL schema
//! - Telemetry writes must never block a page
//!
//! ## Keys
//!
//! - `progress:{session_id}`: hash, field = course-prefixed module key,
//!   value = JSON [`ProgressRecord`]
//! - `events`: list of JSON [`StoredEvent`], newest first
//! - `quiz:correct:{session_id}:{module_key}`: set of question ids the
//!   session has answered correctly
//! - `quiz:attempts:{session_id}`: list of JSON [`QuizAttempt`], newest
//!   first
use std::{
    collections::{HashMap, HashSet},
    time::Duration,
};

use chrono::{DateTime, Utc};
use redis::{
    AsyncCommands, Client,
    aio::{ConnectionManager, ConnectionManagerConfig},
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

const EVENTS_KEY: &str = "events";

pub async fn init_redis(redis_url: &str) -> ConnectionManager {
    let config = ConnectionManagerConfig::new()
        .set_number_of_retries(1)
        .set_connection_timeout(Duration::from_millis(100));

    let client = Client::open(redis_url).unwrap();
    let connection_manager = client
        .get_connection_manager_with_config(config)
        .await
        .unwrap();

    connection_manager
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub completed: bool,
    pub last_accessed_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StoredEvent {
    pub session_id: String,
    pub event_type: String,
    pub module_slug: Option<String>,
    pub page: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuizAttempt {
    pub session_id: String,
    pub module_key: String,
    pub question_id: String,
    pub selected: String,
    pub correct: bool,
    pub created_at: DateTime<Utc>,
}

fn progress_key(session_id: &str) -> String {
    format!("progress:{session_id}")
}

fn correct_key(session_id: &str, module_key: &str) -> String {
    format!("quiz:correct:{session_id}:{module_key}")
}

fn attempts_key(session_id: &str) -> String {
    format!("quiz:attempts:{session_id}")
}

pub async fn fetch_progress(
    mut conn: ConnectionManager,
    session_id: &str,
) -> Result<HashMap<String, ProgressRecord>, AppError> {
    let raw: HashMap<String, String> = conn.hgetall(progress_key(session_id)).await?;

    let mut records = HashMap::with_capacity(raw.len());
    for (module_key, value) in raw {
        records.insert(module_key, serde_json::from_str(&value)?);
    }

    Ok(records)
}

/// Upsert one module's progress. Completion is sticky: once a module has
/// been completed, later visits never clear the flag.
pub async fn upsert_progress(
    mut conn: ConnectionManager,
    session_id: &str,
    module_key: &str,
    completed: bool,
) -> Result<(), AppError> {
    let key = progress_key(session_id);

    let previous: Option<String> = conn.hget(&key, module_key).await?;
    let record = merge_progress(previous.as_deref(), completed);

    let _: () = conn
        .hset(&key, module_key, serde_json::to_string(&record)?)
        .await?;

    Ok(())
}

fn merge_progress(previous: Option<&str>, completed: bool) -> ProgressRecord {
    let already_completed = previous
        .and_then(|value| serde_json::from_str::<ProgressRecord>(value).ok())
        .is_some_and(|record| record.completed);

    ProgressRecord {
        completed: completed || already_completed,
        last_accessed_at: Utc::now(),
    }
}

pub async fn store_event(mut conn: ConnectionManager, event: &StoredEvent) -> Result<(), AppError> {
    let _: () = conn.lpush(EVENTS_KEY, serde_json::to_string(event)?).await?;

    Ok(())
}

pub async fn correct_question_ids(
    mut conn: ConnectionManager,
    session_id: &str,
    module_key: &str,
) -> Result<HashSet<String>, AppError> {
    let ids: Vec<String> = conn.smembers(correct_key(session_id, module_key)).await?;

    Ok(ids.into_iter().collect())
}

pub async fn store_attempt(
    mut conn: ConnectionManager,
    attempt: &QuizAttempt,
) -> Result<(), AppError> {
    if attempt.correct {
        let _: () = conn
            .sadd(
                correct_key(&attempt.session_id, &attempt.module_key),
                &attempt.question_id,
            )
            .await?;
    }

    let _: () = conn
        .lpush(
            attempts_key(&attempt.session_id),
            serde_json::to_string(attempt)?,
        )
        .await?;

    Ok(())
}

pub async fn ping(mut conn: ConnectionManager) -> Result<(), AppError> {
    let _: String = redis::cmd("PING").query_async(&mut conn).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::merge_progress;

    #[test]
    fn completion_is_sticky() {
        let completed = merge_progress(None, true);
        assert!(completed.completed);

        let stored = serde_json::to_string(&completed).unwrap();
        let revisited = merge_progress(Some(&stored), false);
        assert!(revisited.completed);
    }

    #[test]
    fn fresh_records_start_incomplete() {
        assert!(!merge_progress(None, false).completed);
    }

    #[test]
    fn unreadable_previous_record_is_ignored() {
        assert!(!merge_progress(Some("not json"), false).completed);
        assert!(merge_progress(Some("not json"), true).completed);
    }
}
