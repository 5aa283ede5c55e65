//! HTTP API endpoint handlers.
//!
//! Caller identity arrives in the `x-user-id` header, set by the upstream
//! auth layer after session verification; no credential checks happen here.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};

use crate::{
    domain::{MessageBody, UserId},
    infrastructure::dto::http::{InboxEntryDto, MessageDto, SendMessageRequest},
    ui::state::AppState,
    usecase::{
        GetHistoryUseCase, GetInboxUseCase, HistoryError, SendMessageError, SendMessageUseCase,
    },
};

/// Header carrying the authenticated caller's user id.
pub const USER_ID_HEADER: &str = "x-user-id";

type ErrorResponse = (StatusCode, Json<serde_json::Value>);

fn error_response(status: StatusCode, message: &str) -> ErrorResponse {
    (status, Json(serde_json::json!({ "error": message })))
}

fn authenticated_user(headers: &HeaderMap) -> Result<UserId, ErrorResponse> {
    let raw = headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            error_response(
                StatusCode::UNAUTHORIZED,
                "missing or unreadable x-user-id header",
            )
        })?;
    UserId::new(raw.to_string())
        .map_err(|e| error_response(StatusCode::UNAUTHORIZED, &e.to_string()))
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// POST /api/chats/send/{id} — send a message to the user in the path.
///
/// Returns the persisted message with 201. Validation failures are 400;
/// a storage failure is 500 and nothing was sent.
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Path(recipient_id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<MessageDto>), ErrorResponse> {
    let sender_id = authenticated_user(&headers)?;
    let recipient_id = UserId::new(recipient_id)
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, &e.to_string()))?;
    let body = MessageBody::new(request.message)
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, &e.to_string()))?;

    let usecase = SendMessageUseCase::new(
        state.repository.clone(),
        state.users.clone(),
        state.dispatcher.clone(),
    );
    match usecase.execute(sender_id, recipient_id, body).await {
        Ok(message) => Ok((StatusCode::CREATED, Json(MessageDto::from(&message)))),
        Err(
            e @ (SendMessageError::InvalidParticipants(_) | SendMessageError::InvalidMessage(_)),
        ) => Err(error_response(StatusCode::BAD_REQUEST, &e.to_string())),
        Err(e @ SendMessageError::Storage(_)) => {
            tracing::error!("send failed: {}", e);
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error",
            ))
        }
    }
}

/// GET /api/chats/{id} — messages between the caller and the user in the
/// path, oldest first. An empty array when no conversation exists yet;
/// viewing never creates one.
pub async fn history(
    State(state): State<Arc<AppState>>,
    Path(other_user_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Vec<MessageDto>>, ErrorResponse> {
    let user_id = authenticated_user(&headers)?;
    let other_user_id = UserId::new(other_user_id)
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, &e.to_string()))?;

    let usecase = GetHistoryUseCase::new(state.repository.clone());
    match usecase.execute(user_id, other_user_id).await {
        Ok(messages) => Ok(Json(messages.iter().map(MessageDto::from).collect())),
        Err(e @ HistoryError::InvalidParticipants(_)) => {
            Err(error_response(StatusCode::BAD_REQUEST, &e.to_string()))
        }
        Err(e @ HistoryError::Storage(_)) => {
            tracing::error!("history failed: {}", e);
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error",
            ))
        }
    }
}

/// GET /api/chats — the caller's conversations with previews, most recently
/// active first.
pub async fn inbox(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<InboxEntryDto>>, ErrorResponse> {
    let user_id = authenticated_user(&headers)?;

    let usecase = GetInboxUseCase::new(state.repository.clone());
    match usecase.execute(user_id).await {
        Ok(entries) => Ok(Json(entries.iter().map(InboxEntryDto::from).collect())),
        Err(e) => {
            tracing::error!("inbox failed: {}", e);
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error",
            ))
        }
    }
}
