use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    content::module_key,
    database::{self, QuizAttempt, StoredEvent},
    error::AppError,
    state::AppState,
    utils::{next_question, required},
};

#[derive(Deserialize)]
pub struct SessionQuery {
    session_id: Option<String>,
}

#[derive(Deserialize)]
pub struct EventPayload {
    session_id: Option<String>,
    event_type: Option<String>,
    module_slug: Option<String>,
    page: Option<String>,
}

#[derive(Deserialize)]
pub struct ProgressPayload {
    session_id: Option<String>,
    /// Course-prefixed module key, `<course_slug>:<module_slug>`.
    module_slug: Option<String>,
    #[serde(default)]
    completed: bool,
}

#[derive(Deserialize)]
pub struct QuizSubmission {
    session_id: Option<String>,
    question_id: Option<String>,
    selected: Option<String>,
}

pub async fn health_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    database::ping(state.redis.clone()).await?;

    Ok(Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
        "database": "connected",
    })))
}

pub async fn courses_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "success",
        "data": state.catalog.summaries(),
    }))
}

pub async fn course_handler(
    State(state): State<Arc<AppState>>,
    Path(course_slug): Path<String>,
) -> Result<Json<Value>, AppError> {
    let course = state
        .catalog
        .course(&course_slug)
        .ok_or(AppError::NotFound("Course"))?;

    Ok(Json(json!({
        "status": "success",
        "data": course,
    })))
}

pub async fn module_handler(
    State(state): State<Arc<AppState>>,
    Path((course_slug, module_slug)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let course = state
        .catalog
        .course(&course_slug)
        .ok_or(AppError::NotFound("Course"))?;
    let module = state
        .catalog
        .module(&course_slug, &module_slug)
        .ok_or(AppError::NotFound("Module"))?;

    let next_module = state.catalog.next_module(&course_slug, &module_slug);
    let questions = state.catalog.quiz(&course_slug, &module_slug);

    Ok(Json(json!({
        "status": "success",
        "data": {
            "course": &course.meta,
            "module": module,
            "next_module": next_module,
            "has_quiz": !questions.is_empty(),
        },
    })))
}

pub async fn get_progress_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<Value>, AppError> {
    let session_id = required(query.session_id, "session_id required")?;

    let records = database::fetch_progress(state.redis.clone(), &session_id).await?;

    Ok(Json(json!({
        "status": "success",
        "data": records,
    })))
}

pub async fn upsert_progress_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ProgressPayload>,
) -> Result<Json<Value>, AppError> {
    let session_id = required(payload.session_id, "session_id and module_slug are required")?;
    let module_key = required(payload.module_slug, "session_id and module_slug are required")?;

    database::upsert_progress(state.redis.clone(), &session_id, &module_key, payload.completed)
        .await?;

    Ok(Json(json!({ "status": "success" })))
}

pub async fn event_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<EventPayload>,
) -> Result<Json<Value>, AppError> {
    let session_id = required(payload.session_id, "session_id and event_type are required")?;
    let event_type = required(payload.event_type, "session_id and event_type are required")?;

    let event = StoredEvent {
        session_id,
        event_type,
        module_slug: payload.module_slug,
        page: payload.page,
        created_at: Utc::now(),
    };

    database::store_event(state.redis.clone(), &event).await?;

    Ok(Json(json!({ "status": "success" })))
}

pub async fn quiz_next_handler(
    State(state): State<Arc<AppState>>,
    Path((course_slug, module_slug)): Path<(String, String)>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<Value>, AppError> {
    let session_id = required(query.session_id, "session_id required")?;

    let questions = state.catalog.quiz(&course_slug, &module_slug);
    if questions.is_empty() {
        return Ok(Json(json!({
            "status": "success",
            "data": null,
            "completed": true,
            "remaining": 0,
            "total": 0,
        })));
    }

    let key = module_key(&course_slug, &module_slug);
    let correct_ids =
        database::correct_question_ids(state.redis.clone(), &session_id, &key).await?;
    let status = next_question(questions, &correct_ids);

    match status.next {
        Some(question) => Ok(Json(json!({
            "status": "success",
            "data": {
                "id": question.id,
                "prompt": question.prompt,
                "options": &question.options,
            },
            "completed": false,
            "remaining": status.remaining,
            "total": status.total,
        }))),
        None => Ok(Json(json!({
            "status": "success",
            "data": null,
            "completed": true,
            "remaining": 0,
            "total": status.total,
        }))),
    }
}

pub async fn quiz_submit_handler(
    State(state): State<Arc<AppState>>,
    Path((course_slug, module_slug)): Path<(String, String)>,
    Json(payload): Json<QuizSubmission>,
) -> Result<Json<Value>, AppError> {
    let message = "session_id, question_id and selected are required";
    let session_id = required(payload.session_id, message)?;
    let question_id = required(payload.question_id, message)?;
    let selected = required(payload.selected, message)?;

    let question = state
        .catalog
        .question(&course_slug, &module_slug, &question_id)
        .ok_or(AppError::NotFound("Question"))?;
    let correct = selected == question.correct;

    let attempt = QuizAttempt {
        session_id,
        module_key: module_key(&course_slug, &module_slug),
        question_id,
        selected,
        correct,
        created_at: Utc::now(),
    };

    database::store_attempt(state.redis.clone(), &attempt).await?;

    Ok(Json(json!({
        "status": "success",
        "data": {
            "correct": correct,
            "help": question.help,
        },
    })))
}
