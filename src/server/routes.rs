//! HTTP handlers for the document API.
//!
//! Handlers translate requests into [`SectionEditor`] calls. Core calls do
//! blocking file I/O, so they run on the blocking thread pool.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use homepage_core::{EditError, SectionEditor};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use super::error::ApiError;
use super::sections::{KnownSection, SectionShape};
use super::AppState;

// ============================================================================
// Responses
// ============================================================================

/// Success envelope shared by all API responses.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<String>,
}

impl ApiResponse {
    fn data(message: impl Into<String>, data: Value) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
            data: Some(data),
            timestamp: None,
        })
    }

    fn done(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
            data: None,
            timestamp: Some(now()),
        })
    }

    fn done_with(message: impl Into<String>, data: Value) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
            data: Some(data),
            timestamp: Some(now()),
        })
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    success: bool,
    message: &'static str,
    timestamp: String,
    config_exists: bool,
    version: &'static str,
}

/// Full-document save response
#[derive(Debug, Serialize)]
pub struct SaveResponse {
    success: bool,
    message: &'static str,
    backup: Option<String>,
    timestamp: String,
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

// ============================================================================
// Helpers
// ============================================================================

/// Runs a core operation on the blocking thread pool.
async fn with_editor<T, F>(editor: &Arc<SectionEditor>, op: F) -> Result<T, ApiError>
where
    F: FnOnce(&SectionEditor) -> Result<T, EditError> + Send + 'static,
    T: Send + 'static,
{
    let editor = Arc::clone(editor);
    tokio::task::spawn_blocking(move || op(&editor))
        .await
        .map_err(|e| ApiError::Internal(format!("Task join error: {}", e)))?
        .map_err(ApiError::from)
}

fn known_section(segment: &str) -> Result<KnownSection, ApiError> {
    KnownSection::parse(segment)
        .ok_or_else(|| ApiError::NotFound(format!("Unknown section '{}'", segment)))
}

fn require_shape(section: KnownSection, shape: SectionShape) -> Result<(), ApiError> {
    if section.shape() == shape {
        return Ok(());
    }
    let hint = match section.shape() {
        SectionShape::List => "edit individual items instead",
        SectionShape::Scalar => "replace the whole section instead",
    };
    Err(ApiError::MethodNotAllowed(format!(
        "{} does not support this method; {}",
        section.label(),
        hint
    )))
}

fn parse_index(raw: &str) -> Result<usize, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid index '{}'", raw)))
}

/// Unwraps a JSON body, turning parse failures into 400s.
fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {}", e.body_text())))
}

/// Like [`json_body`], but also rejects empty values (`null`, `false`, `0`,
/// `""`, `[]`, `{}`).
fn non_empty_body(
    payload: Result<Json<Value>, JsonRejection>,
    what: &str,
) -> Result<Value, ApiError> {
    let value = json_body(payload)?;
    if is_empty(&value) {
        return Err(ApiError::BadRequest(format!("Please provide {}", what)));
    }
    Ok(value)
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// `GET /api/health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        message: "Service is running",
        timestamp: now(),
        config_exists: state.editor.document_exists(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /api/config`
pub async fn get_config(State(state): State<AppState>) -> Result<Json<ApiResponse>, ApiError> {
    let doc = with_editor(&state.editor, |editor| editor.load_document()).await?;

    match doc {
        Some(doc) => Ok(ApiResponse::data("Config loaded", Value::Object(doc))),
        None => Err(ApiError::NotFound("Config file not found".to_string())),
    }
}

/// `POST /api/config`
pub async fn save_config(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SaveResponse>, ApiError> {
    let doc = match non_empty_body(payload, "a valid JSON config object")? {
        Value::Object(doc) => doc,
        _ => {
            return Err(ApiError::BadRequest(
                "Config must be a JSON object".to_string(),
            ))
        }
    };

    let backup = with_editor(&state.editor, move |editor| editor.save_document(&doc)).await?;

    Ok(Json(SaveResponse {
        success: true,
        message: "Config saved",
        backup: backup
            .as_deref()
            .and_then(|p| p.file_name())
            .map(|name| name.to_string_lossy().into_owned()),
        timestamp: now(),
    }))
}

/// `POST /api/login`
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let body = json_body(payload)?;
    let Some(attempt) = body.get("password") else {
        return Err(ApiError::BadRequest("Please provide a password".to_string()));
    };

    if attempt.as_str().is_some_and(|p| state.login.verify(p)) {
        tracing::info!("Admin login succeeded");
        Ok(Json(ApiResponse {
            success: true,
            message: "Login successful".to_string(),
            data: None,
            timestamp: None,
        }))
    } else {
        Err(ApiError::Unauthorized("Wrong password".to_string()))
    }
}

/// `GET /api/{section}`
pub async fn get_section(
    State(state): State<AppState>,
    Path(segment): Path<String>,
) -> Result<Json<ApiResponse>, ApiError> {
    let section = known_section(&segment)?;

    let value = with_editor(&state.editor, move |editor| editor.get_section(section.key()))
        .await?
        .unwrap_or_else(|| section.empty_value());

    Ok(ApiResponse::data(format!("{} loaded", section.label()), value))
}

/// `PUT /api/{section}`
pub async fn replace_section(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let section = known_section(&segment)?;
    require_shape(section, SectionShape::Scalar)?;
    let value = non_empty_body(payload, &format!("{} data", section.label().to_lowercase()))?;

    with_editor(&state.editor, move |editor| {
        editor.replace_section(section.key(), value)
    })
    .await?;

    Ok(ApiResponse::done(format!("{} updated", section.label())))
}

/// `POST /api/{section}`
pub async fn add_item(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let section = known_section(&segment)?;
    require_shape(section, SectionShape::List)?;
    let item = json_body(payload)?;
    if item.get("name").is_none() {
        return Err(ApiError::BadRequest(format!(
            "Please provide a {} name",
            section.item_label().to_lowercase()
        )));
    }

    let index = with_editor(&state.editor, move |editor| {
        editor.append_item(section.key(), item)
    })
    .await?;

    Ok(ApiResponse::done_with(
        format!("{} added", section.item_label()),
        Value::from(index),
    ))
}

/// `PUT /api/{section}/{index}`
pub async fn update_item(
    State(state): State<AppState>,
    Path((segment, raw_index)): Path<(String, String)>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let section = known_section(&segment)?;
    require_shape(section, SectionShape::List)?;
    let index = parse_index(&raw_index)?;
    let item = non_empty_body(
        payload,
        &format!("{} data", section.item_label().to_lowercase()),
    )?;

    with_editor(&state.editor, move |editor| {
        editor.replace_item(section.key(), index, item)
    })
    .await?;

    Ok(ApiResponse::done(format!(
        "{} {} updated",
        section.item_label(),
        index
    )))
}

/// `DELETE /api/{section}/{index}`
pub async fn delete_item(
    State(state): State<AppState>,
    Path((segment, raw_index)): Path<(String, String)>,
) -> Result<Json<ApiResponse>, ApiError> {
    let section = known_section(&segment)?;
    require_shape(section, SectionShape::List)?;
    let index = parse_index(&raw_index)?;

    let removed = with_editor(&state.editor, move |editor| {
        editor.remove_item(section.key(), index)
    })
    .await?;

    Ok(ApiResponse::done_with(
        format!("{} deleted", section.item_label()),
        removed,
    ))
}

/// Fallback for paths that match neither a route nor a static file.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("The requested resource does not exist".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_empty() {
        for value in [json!(null), json!(false), json!(0), json!(0.0), json!(""), json!([]), json!({})] {
            assert!(is_empty(&value), "{} should be empty", value);
        }
        for value in [json!(true), json!(1), json!("x"), json!([0]), json!({"a": null})] {
            assert!(!is_empty(&value), "{} should not be empty", value);
        }
    }

    #[test]
    fn test_parse_index() {
        assert_eq!(parse_index("0").unwrap(), 0);
        assert_eq!(parse_index("12").unwrap(), 12);
        assert!(matches!(parse_index("-1"), Err(ApiError::BadRequest(_))));
        assert!(matches!(parse_index("one"), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn test_require_shape() {
        assert!(require_shape(KnownSection::Skills, SectionShape::List).is_ok());
        assert!(matches!(
            require_shape(KnownSection::Skills, SectionShape::Scalar),
            Err(ApiError::MethodNotAllowed(_))
        ));
        assert!(matches!(
            require_shape(KnownSection::Profile, SectionShape::List),
            Err(ApiError::MethodNotAllowed(_))
        ));
    }
}
