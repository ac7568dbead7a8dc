//! `POST /api/medical-doc` — generalized medical-document reading.
//!
//! Same AI boundary as the prescription lens but nothing is persisted;
//! the analysis goes straight back to the caller.

use axum::extract::{Multipart, State};
use axum::{Extension, Json};
use base64::Engine;
use serde::Serialize;

use crate::ai::{self, AiPart, DocumentAnalysis};
use crate::api::error::ApiError;
use crate::api::types::{ApiContext, SessionContext};

use super::collect_form;

#[derive(Serialize)]
pub struct MedicalDocResponse {
    pub message: String,
    pub content: DocumentAnalysis,
}

pub async fn analyze(
    State(ctx): State<ApiContext>,
    Extension(_session): Extension<SessionContext>,
    multipart: Multipart,
) -> Result<Json<MedicalDocResponse>, ApiError> {
    let form = collect_form(multipart).await?;
    let file = form
        .file("img_file")
        .ok_or_else(|| ApiError::BadRequest("Image file not found".into()))?;

    let parts = vec![
        AiPart::InlineData {
            mime_type: file.content_type.clone(),
            data_base64: base64::engine::general_purpose::STANDARD.encode(&file.bytes),
        },
        AiPart::Text(ai::prompts::document_prompt()),
    ];

    let client = ctx.ai.clone();
    let raw = tokio::task::spawn_blocking(move || client.generate(&parts))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;
    let analysis: DocumentAnalysis = ai::parse_response(&raw)?;

    Ok(Json(MedicalDocResponse {
        message: "Medical document analyzed successfully".into(),
        content: analysis,
    }))
}
