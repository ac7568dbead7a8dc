use std::sync::OnceLock;

use regex::Regex;
use serde::de::DeserializeOwned;

use super::schemas::AiPayload;
use super::AiError;

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| Regex::new(r"```json\s*|\s*```").unwrap())
}

/// Strip the markdown code-fence markers the service sometimes wraps
/// around its JSON payload.
pub fn strip_fences(raw: &str) -> String {
    fence_regex().replace_all(raw.trim(), "").into_owned()
}

/// Parse a raw AI response into the expected schema variant.
///
/// Fails closed: empty responses, non-JSON text, schema mismatches, and
/// service-declared errors all become structured `AiError`s — partially
/// parsed data never reaches the caller.
pub fn parse_response<T>(raw: &str) -> Result<T, AiError>
where
    T: DeserializeOwned + AiPayload,
{
    if raw.trim().is_empty() {
        return Err(AiError::EmptyResponse);
    }

    let cleaned = strip_fences(raw);
    let value: serde_json::Value =
        serde_json::from_str(&cleaned).map_err(|e| AiError::JsonParsing(e.to_string()))?;
    let payload: T =
        serde_json::from_value(value).map_err(|e| AiError::SchemaMismatch(e.to_string()))?;

    if let Some(message) = payload.declared_error() {
        return Err(AiError::Declared(message));
    }
    Ok(payload)
}
