// src/api/handlers.rs
// HTTP handlers for status, courses, and persona chat

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use tracing::{debug, info};

use super::error::{ApiError, ApiResult};
use super::state::AppState;
use super::types::{
    ChatRequest, ChatResponse, CollaborateRequest, CollaborateResponse, CourseListResponse,
    StatusResponse,
};
use crate::catalog::CourseRecord;
use crate::config::ChatFailureMode;
use crate::persona::Persona;

/// Health check
pub async fn root_handler() -> Json<StatusResponse> {
    Json(StatusResponse::running())
}

pub async fn list_courses_handler(State(state): State<AppState>) -> Json<CourseListResponse> {
    Json(CourseListResponse {
        courses: state.catalog.list_courses(),
    })
}

pub async fn get_course_handler(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> ApiResult<Json<CourseRecord>> {
    let course = state.catalog.get_course(&course_id).map_err(|e| {
        debug!(course_id = %course_id, "Course lookup missed");
        ApiError::from(e)
    })?;
    Ok(Json(course.clone()))
}

pub async fn professor_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<Json<ChatResponse>> {
    let Json(request) = payload?;
    chat(&state, Persona::Professor, request).await
}

pub async fn coach_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<Json<ChatResponse>> {
    let Json(request) = payload?;
    chat(&state, Persona::Coach, request).await
}

async fn chat(
    state: &AppState,
    persona: Persona,
    request: ChatRequest,
) -> ApiResult<Json<ChatResponse>> {
    info!(persona = %persona, message_bytes = request.message.len(), "Chat request");

    let result = state
        .personas
        .run_persona(
            persona,
            &request.message,
            request.course_context.as_deref(),
            request.viewed_courses_context.as_deref(),
        )
        .await;

    let response = match (result, state.failure_mode) {
        (Ok(text), _) => text,
        (Err(e), ChatFailureMode::Degrade) => persona.fallback(&e.to_string()),
        (Err(e), ChatFailureMode::Error) => return Err(ApiError::internal(e.to_string())),
    };

    Ok(Json(ChatResponse {
        response,
        agent_type: persona,
    }))
}

/// Professor explains, Coach follows up with an exercise. Always degrades on failure.
pub async fn collaborate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CollaborateRequest>, JsonRejection>,
) -> ApiResult<Json<CollaborateResponse>> {
    let Json(request) = payload?;
    info!(message_bytes = request.message.len(), "Collaborative session request");

    let reply = state
        .personas
        .collaborate(&request.message, request.course_context.as_deref())
        .await;

    Ok(Json(CollaborateResponse {
        professor_response: reply.professor,
        coach_response: reply.coach,
        collaboration: reply.collaboration,
    }))
}

pub async fn not_found_handler() -> ApiError {
    ApiError::not_found("Not Found")
}
