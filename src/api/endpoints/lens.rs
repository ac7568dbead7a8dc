//! `POST /api/lens` — prescription reading.
//!
//! A scoped unit of work: analyze with the AI vision service, upload the
//! image to object storage, persist the Prescription. The AI call comes
//! first, so a declared analysis failure aborts before anything durable
//! exists; a persistence failure after a successful upload triggers the
//! compensating delete of the artifact.

use axum::extract::{Multipart, State};
use axum::{Extension, Json};
use base64::Engine;
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::ai::{self, AiPart, PrescriptionAnalysis};
use crate::api::error::ApiError;
use crate::api::types::{ApiContext, SessionContext};
use crate::db;
use crate::models::Prescription;
use crate::storage;

use super::collect_form;

const STORAGE_FOLDER: &str = "prescriptions";

#[derive(Serialize)]
pub struct LensResponse {
    pub message: String,
    pub content: PrescriptionAnalysis,
}

pub async fn analyze(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<SessionContext>,
    multipart: Multipart,
) -> Result<Json<LensResponse>, ApiError> {
    let form = collect_form(multipart).await?;
    let file = form
        .file("img_file")
        .ok_or_else(|| ApiError::BadRequest("Image file not found".into()))?;

    let mime_type = file.content_type.clone();
    let data_base64 = base64::engine::general_purpose::STANDARD.encode(&file.bytes);

    // 1. Analyze. A declared error ("not a prescription") aborts here,
    //    before any upload or write.
    let client = ctx.ai.clone();
    let parts = vec![
        AiPart::InlineData {
            mime_type: mime_type.clone(),
            data_base64,
        },
        AiPart::Text(ai::prompts::prescription_prompt()),
    ];
    let raw = tokio::task::spawn_blocking(move || client.generate(&parts))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;
    let analysis: PrescriptionAnalysis = ai::parse_response(&raw)?;

    // 2. Upload the image.
    let data_uri = storage::to_data_uri(&mime_type, &file.bytes);
    let store = ctx.store.clone();
    let uploaded =
        tokio::task::spawn_blocking(move || store.upload(&data_uri, STORAGE_FOLDER))
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))??;

    // 3. Persist. On failure the uploaded artifact must not outlive the
    //    missing record — delete it before reporting the error.
    let content =
        serde_json::to_string(&analysis).map_err(|e| ApiError::Internal(e.to_string()))?;
    let now = Utc::now();
    let prescription = Prescription {
        id: Uuid::new_v4(),
        image_url: uploaded.url.clone(),
        content,
        prescription_of: session.user_id,
        created_at: now,
        updated_at: now,
    };

    let persisted = {
        let conn = ctx
            .db
            .lock()
            .map_err(|_| ApiError::Internal("db lock".into()))?;
        db::insert_prescription(&conn, &prescription)
    };

    if let Err(db_err) = persisted {
        tracing::warn!(object_id = %uploaded.object_id, "Prescription persist failed, removing artifact");
        let store = ctx.store.clone();
        let object_id = uploaded.object_id.clone();
        match tokio::task::spawn_blocking(move || store.delete(&object_id)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!(error = %e, "Failed to delete orphaned artifact"),
            Err(e) => tracing::error!(error = %e, "Artifact cleanup task failed"),
        }
        return Err(db_err.into());
    }

    Ok(Json(LensResponse {
        message: "Prescription analyzed successfully".into(),
        content: analysis,
    }))
}
