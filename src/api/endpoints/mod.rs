//! HTTP endpoint handlers, one module per resource.

pub mod coach;
pub mod events;
pub mod lens;
pub mod medical_doc;
pub mod pages;
pub mod providers;
pub mod register;
pub mod reports;
pub mod translate;

use std::collections::HashMap;

use axum::extract::Multipart;
use serde::Serialize;

use crate::api::error::ApiError;

/// Generic `{message, success}` acknowledgement body.
#[derive(Serialize)]
pub struct AckResponse {
    pub message: String,
    pub success: bool,
}

impl AckResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            success: true,
        }
    }
}

/// A binary form field (an uploaded document or image).
pub(crate) struct UploadedFile {
    pub field_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Collected multipart form: text fields by name plus uploaded files.
pub(crate) struct FormFields {
    text: HashMap<String, String>,
    files: Vec<UploadedFile>,
}

impl FormFields {
    /// A present, non-blank text field. Blank values count as missing so
    /// required-field checks treat `""` and absence the same way.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.text
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files.iter().find(|f| f.field_name == name)
    }
}

/// Drain a multipart request into `FormFields`.
pub(crate) async fn collect_form(mut multipart: Multipart) -> Result<FormFields, ApiError> {
    let mut text = HashMap::new();
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed form data: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if field.file_name().is_some() {
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Malformed form data: {e}")))?
                .to_vec();
            files.push(UploadedFile {
                field_name: name,
                content_type,
                bytes,
            });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Malformed form data: {e}")))?;
            text.insert(name, value);
        }
    }

    Ok(FormFields { text, files })
}
