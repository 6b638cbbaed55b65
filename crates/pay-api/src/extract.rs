//! # Body Extraction
//!
//! Lenient request-body extractor. JSON and urlencoded forms both become a
//! `serde_json::Value`; other content types yield an empty object so that
//! field validation, not parsing, rejects them.

use crate::error::ApiError;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap},
    Form,
};
use serde_json::{Map, Value};

/// Request body as loosely-typed JSON
#[derive(Debug, Clone, PartialEq)]
pub struct JsonBody(pub Value);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    Other,
}

impl BodyKind {
    fn of(headers: &HeaderMap) -> Self {
        let Some(mime) = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(|v| v.trim().to_ascii_lowercase())
        else {
            return BodyKind::Other;
        };

        let is_json = mime == "application/json"
            || (mime.starts_with("application/") && mime.ends_with("+json"));

        if is_json {
            BodyKind::Json
        } else if mime == "application/x-www-form-urlencoded" {
            BodyKind::Form
        } else {
            BodyKind::Other
        }
    }
}

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match BodyKind::of(req.headers()) {
            BodyKind::Json => {
                let bytes = Bytes::from_request(req, state)
                    .await
                    .map_err(|rejection| ApiError::Internal(rejection.body_text()))?;
                parse_json(&bytes).map(JsonBody)
            }
            BodyKind::Form => {
                let Form(fields) = Form::<Vec<(String, String)>>::from_request(req, state)
                    .await
                    .map_err(|rejection| ApiError::Internal(rejection.body_text()))?;
                Ok(JsonBody(Value::Object(fold_form_fields(fields))))
            }
            BodyKind::Other => Ok(JsonBody(Value::Object(Map::new()))),
        }
    }
}

/// Build an object from urlencoded pairs. Bracketed keys nest, so
/// `customerDetails[name]=Asha` becomes `{"customerDetails": {"name": "Asha"}}`.
/// A repeated key keeps its last value.
fn fold_form_fields(fields: Vec<(String, String)>) -> Map<String, Value> {
    let mut object = Map::new();
    for (key, value) in fields {
        let path = form_key_path(&key);
        insert_nested(&mut object, &path, value);
    }
    object
}

/// Split `a[b][c]` into `["a", "b", "c"]`. Keys that are not well-formed
/// bracket paths stay flat.
fn form_key_path(key: &str) -> Vec<&str> {
    let Some(open) = key.find('[') else {
        return vec![key];
    };
    if open == 0 || !key.ends_with(']') {
        return vec![key];
    }

    let mut path = vec![&key[..open]];
    path.extend(key[open + 1..key.len() - 1].split("]["));

    let well_formed = path
        .iter()
        .all(|segment| !segment.is_empty() && !segment.contains(['[', ']']));
    if well_formed {
        path
    } else {
        vec![key]
    }
}

fn insert_nested(object: &mut Map<String, Value>, path: &[&str], value: String) {
    match path {
        [] => {}
        [last] => {
            object.insert(last.to_string(), Value::String(value));
        }
        [head, rest @ ..] => {
            let child = object
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !child.is_object() {
                *child = Value::Object(Map::new());
            }
            if let Value::Object(child) = child {
                insert_nested(child, rest, value);
            }
        }
    }
}

/// Parse a JSON body. Empty bodies are `{}`; only objects and arrays are
/// accepted at the top level.
fn parse_json(bytes: &[u8]) -> Result<Value, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }

    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| ApiError::InvalidJson(e.to_string()))?;

    match value {
        Value::Object(_) | Value::Array(_) => Ok(value),
        other => Err(ApiError::InvalidJson(format!(
            "top-level value must be an object or array, got {}",
            other
        ))),
    }
}
