//! Object storage boundary.
//!
//! The core sends a data-URI-encoded binary payload plus a logical folder
//! name and receives a durable retrieval URL, stored verbatim on the
//! owning record. `delete` is the compensating action for the
//! analyze → upload → persist unit of work: when the persistence step
//! fails after a successful upload, the artifact must be removed again.

use std::sync::Mutex;

use base64::Engine;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage service unreachable: {0}")]
    Connection(String),

    #[error("Failed to upload to object storage: HTTP {status}")]
    Upstream { status: u16, body: String },

    #[error("Storage response parsing failed: {0}")]
    ResponseParsing(String),

    #[error("HTTP client error: {0}")]
    Http(String),
}

/// A durably stored artifact. `object_id` is the handle for deletion;
/// `url` is what gets persisted on the owning record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredObject {
    pub object_id: String,
    pub url: String,
}

/// Client for the external object-storage service. Callers run these on a
/// blocking thread.
pub trait ObjectStore: Send + Sync {
    fn upload(&self, data_uri: &str, folder: &str) -> Result<StoredObject, StorageError>;
    fn delete(&self, object_id: &str) -> Result<(), StorageError>;
}

/// Assemble the data-URI form the storage service ingests.
pub fn to_data_uri(mime_type: &str, bytes: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime_type};base64,{encoded}")
}

// ── HTTP implementation ─────────────────────────────────────

#[derive(Serialize)]
struct UploadRequest<'a> {
    file: &'a str,
    folder: &'a str,
}

#[derive(Deserialize)]
struct UploadResponse {
    public_id: String,
    secure_url: String,
}

/// HTTP client for a Cloudinary-style unsigned upload endpoint.
pub struct HttpObjectStore {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpObjectStore {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    fn map_send_error(&self, e: reqwest::Error) -> StorageError {
        if e.is_connect() {
            StorageError::Connection(self.base_url.clone())
        } else {
            StorageError::Http(e.to_string())
        }
    }
}

impl ObjectStore for HttpObjectStore {
    fn upload(&self, data_uri: &str, folder: &str) -> Result<StoredObject, StorageError> {
        let url = format!("{}/upload", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&UploadRequest {
                file: data_uri,
                folder,
            })
            .send()
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(StorageError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: UploadResponse = response
            .json()
            .map_err(|e| StorageError::ResponseParsing(e.to_string()))?;

        Ok(StoredObject {
            object_id: parsed.public_id,
            url: parsed.secure_url,
        })
    }

    fn delete(&self, object_id: &str) -> Result<(), StorageError> {
        let url = format!("{}/destroy", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "public_id": object_id }))
            .send()
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(StorageError::Upstream {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

// ── Mock implementation for tests ───────────────────────────

/// Mock object store — records uploads and deletions for assertions.
#[derive(Default)]
pub struct MockObjectStore {
    uploads: Mutex<Vec<StoredObject>>,
    deleted: Mutex<Vec<String>>,
    fail_uploads: bool,
}

impl MockObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose uploads always fail.
    pub fn failing() -> Self {
        Self {
            fail_uploads: true,
            ..Self::default()
        }
    }

    pub fn uploads(&self) -> Vec<StoredObject> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

impl ObjectStore for MockObjectStore {
    fn upload(&self, _data_uri: &str, folder: &str) -> Result<StoredObject, StorageError> {
        if self.fail_uploads {
            return Err(StorageError::Upstream {
                status: 500,
                body: "mock upload failure".into(),
            });
        }
        let object_id = format!("{folder}/{}", uuid::Uuid::new_v4());
        let object = StoredObject {
            url: format!("https://storage.test/{object_id}.jpg"),
            object_id,
        };
        self.uploads.lock().unwrap().push(object.clone());
        Ok(object)
    }

    fn delete(&self, object_id: &str) -> Result<(), StorageError> {
        self.deleted.lock().unwrap().push(object_id.to_string());
        Ok(())
    }
}
