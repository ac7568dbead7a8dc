//! `POST /api/coach` — AI-generated lifestyle coaching plan.
//!
//! validate → call AI → persist the plan as a HealthRecommendation →
//! respond with the plan itself.

use axum::extract::{Multipart, State};
use axum::{Extension, Json};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::ai::{self, AiPart, CoachingPlan};
use crate::api::error::ApiError;
use crate::api::types::{ApiContext, SessionContext};
use crate::db;
use crate::models::HealthRecommendation;

use super::{collect_form, FormFields};

const FILL_ALL_FIELDS: &str = "Please fill all the fields";

#[derive(Serialize)]
pub struct CoachResponse {
    pub success: bool,
    pub content: CoachingPlan,
    pub message: String,
}

fn positive_number(form: &FormFields, name: &str) -> Result<u32, ApiError> {
    let value: u32 = form
        .get(name)
        .ok_or_else(|| ApiError::BadRequest(FILL_ALL_FIELDS.into()))?
        .parse()
        .map_err(|_| ApiError::BadRequest(FILL_ALL_FIELDS.into()))?;
    if value == 0 {
        return Err(ApiError::BadRequest(FILL_ALL_FIELDS.into()));
    }
    Ok(value)
}

pub async fn generate(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<SessionContext>,
    multipart: Multipart,
) -> Result<Json<CoachResponse>, ApiError> {
    let form = collect_form(multipart).await?;

    let age = positive_number(&form, "age")?;
    let height = positive_number(&form, "height")?;
    let weight = positive_number(&form, "weight")?;
    let (Some(gender), Some(disease)) = (form.get("gender"), form.get("disease")) else {
        return Err(ApiError::BadRequest(FILL_ALL_FIELDS.into()));
    };

    let prompt = ai::prompts::coaching_prompt(age, gender, height, weight, disease);
    let client = ctx.ai.clone();
    let raw = tokio::task::spawn_blocking(move || client.generate(&[AiPart::Text(prompt)]))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    let plan: CoachingPlan = ai::parse_response(&raw)?;
    let content =
        serde_json::to_string(&plan).map_err(|e| ApiError::Internal(e.to_string()))?;

    let now = Utc::now();
    {
        let conn = ctx
            .db
            .lock()
            .map_err(|_| ApiError::Internal("db lock".into()))?;
        db::insert_recommendation(
            &conn,
            &HealthRecommendation {
                id: Uuid::new_v4(),
                content,
                recommendation_for: session.user_id,
                created_at: now,
                updated_at: now,
            },
        )?;
    }

    Ok(Json(CoachResponse {
        success: true,
        content: plan,
        message: "Health recommendation generated successfully".into(),
    }))
}
