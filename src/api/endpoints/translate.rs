//! `POST /api/translate` — translate AI-generated content into the
//! caller's preferred language.
//!
//! Looks up the patient profile for the language, sends the content to
//! the AI service, and returns the translated JSON. The source content is
//! never mutated — toggling between original and translated views is a
//! pure client concern.

use axum::extract::{Multipart, State};
use axum::{Extension, Json};
use serde::Serialize;

use crate::ai::{self, AiPart};
use crate::api::error::ApiError;
use crate::api::types::{ApiContext, SessionContext};
use crate::db;

use super::collect_form;

#[derive(Serialize)]
pub struct TranslateResponse {
    pub message: String,
    pub content: serde_json::Value,
}

pub async fn translate(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<SessionContext>,
    multipart: Multipart,
) -> Result<Json<TranslateResponse>, ApiError> {
    let form = collect_form(multipart).await?;
    let Some(content) = form.get("content") else {
        return Err(ApiError::BadRequest("Content not provided".into()));
    };

    let profile = {
        let conn = ctx
            .db
            .lock()
            .map_err(|_| ApiError::Internal("db lock".into()))?;
        db::get_patient_profile(&conn, &session.user_id)?
    }
    .ok_or_else(|| ApiError::NotFound("Patient profile not found".into()))?;

    let prompt = ai::prompts::translation_prompt(&profile.preferred_language, content);
    let client = ctx.ai.clone();
    let raw = tokio::task::spawn_blocking(move || client.generate(&[AiPart::Text(prompt)]))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    let translated: serde_json::Value = ai::parse_response(&raw)?;

    Ok(Json(TranslateResponse {
        message: "Content translated successfully".into(),
        content: translated,
    }))
}
