//! `POST /api/user` — registration.
//!
//! Persists the User and its role profile as one unit of work: for an
//! invalid payload neither document exists afterwards.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use pbkdf2::password_hash::rand_core::OsRng;
use pbkdf2::password_hash::{PasswordHasher, SaltString};
use pbkdf2::Pbkdf2;
use serde::Serialize;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db;
use crate::db::RoleProfile;
use crate::models::*;

use super::{collect_form, FormFields};

const DEFAULT_LANGUAGE: &str = "english";

#[derive(Serialize)]
pub struct RegisteredUser {
    pub name: String,
    pub email: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: RegisteredUser,
}

fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Pbkdf2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::Internal(format!("password hashing failed: {e}")))
}

fn build_profile(role: Role, user_id: Uuid, form: &FormFields) -> Result<RoleProfile, ApiError> {
    let now = Utc::now();
    let preferred_language = form
        .get("preferred_language")
        .unwrap_or(DEFAULT_LANGUAGE)
        .to_string();

    match role {
        Role::Patient => Ok(RoleProfile::Patient(Patient {
            id: Uuid::new_v4(),
            user_id,
            preferred_language,
            created_at: now,
            updated_at: now,
        })),
        Role::HealthcareProvider => {
            let (Some(license_id), Some(specialization), Some(organization)) = (
                form.get("license_id"),
                form.get("specialization"),
                form.get("associated_organization"),
            ) else {
                return Err(ApiError::BadRequest("All fields are required.".into()));
            };
            let years_of_experience: u32 = form
                .get("years_of_experience")
                .unwrap_or("0")
                .parse()
                .map_err(|_| ApiError::BadRequest("Invalid years of experience.".into()))?;

            Ok(RoleProfile::Provider(HealthcareProvider {
                id: Uuid::new_v4(),
                user_id,
                license_id: license_id.into(),
                specialization: specialization.into(),
                associated_organization: organization.into(),
                years_of_experience,
                preferred_language,
                booking_link: String::new(),
                created_at: now,
                updated_at: now,
            }))
        }
        Role::Ngo => {
            let (Some(organization_name), Some(area_of_focus)) =
                (form.get("organization_name"), form.get("area_of_focus"))
            else {
                return Err(ApiError::BadRequest("All fields are required.".into()));
            };

            Ok(RoleProfile::Ngo(Ngo {
                id: Uuid::new_v4(),
                contact_person_id: user_id,
                organization_name: organization_name.into(),
                area_of_focus: area_of_focus.into(),
                created_at: now,
                updated_at: now,
            }))
        }
    }
}

pub async fn register(
    State(ctx): State<ApiContext>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let form = collect_form(multipart).await?;

    let (Some(name), Some(email), Some(password), Some(role_raw), Some(phone)) = (
        form.get("name"),
        form.get("email"),
        form.get("password"),
        form.get("role"),
        form.get("phone_number"),
    ) else {
        return Err(ApiError::BadRequest("All fields are required.".into()));
    };

    let role: Role = role_raw
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid role specified.".into()))?;

    let address: Address = serde_json::from_str(form.get("address").unwrap_or("{}"))
        .map_err(|_| ApiError::BadRequest("Invalid address.".into()))?;

    let password_owned = password.to_string();
    let password_hash =
        tokio::task::spawn_blocking(move || hash_password(&password_owned))
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))??;

    let now = Utc::now();
    let user = User {
        id: Uuid::new_v4(),
        fullname: name.into(),
        email: email.into(),
        password_hash,
        role,
        phone: phone.into(),
        address,
        created_at: now,
        updated_at: now,
    };
    let profile = build_profile(role, user.id, &form)?;

    {
        let mut conn = ctx
            .db
            .lock()
            .map_err(|_| ApiError::Internal("db lock".into()))?;

        if db::find_user_by_email(&conn, &user.email)?.is_some() {
            return Err(ApiError::BadRequest(
                "User with this email already exists.".into(),
            ));
        }
        db::create_user_with_profile(&mut conn, &user, &profile)?;
    }

    tracing::info!(role = %role, "Registered new user");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully.".into(),
            user: RegisteredUser {
                name: user.fullname,
                email: user.email,
            },
        }),
    ))
}
