use std::{collections::HashMap, convert::Infallible};

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form,
};
use serde_json::Value;

/// Flat field map of a request body, read from JSON or from a url-encoded form.
///
/// Extraction never fails: a body that cannot be read is an empty payload, and the
/// handlers then report the fields they needed as missing.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Payload(HashMap<String, String>);

impl Payload {
    /// Raw value of a field.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Raw value of a field, only if it is non-blank.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|value| !value.trim().is_empty())
    }

    /// Top-level members of a JSON object. Strings are kept as-is, numbers and
    /// booleans by their JSON text; nulls, arrays and nested objects are skipped.
    pub fn from_json(body: &[u8]) -> Self {
        let Ok(Value::Object(members)) = serde_json::from_slice::<Value>(body) else {
            return Self::default();
        };

        members
            .into_iter()
            .filter_map(|(name, value)| {
                let value = match value {
                    Value::String(s) => s,
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    Value::Null | Value::Array(_) | Value::Object(_) => return None,
                };
                Some((name, value))
            })
            .collect()
    }
}

impl FromIterator<(String, String)> for Payload {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<S> FromRequest<S> for Payload
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .is_some_and(|ct| ct.contains("application/json"));

        if is_json {
            return Ok(match Bytes::from_request(req, state).await {
                Ok(body) => Self::from_json(&body),
                Err(rejection) => {
                    tracing::debug!(%rejection, "unreadable json body");
                    Self::default()
                }
            });
        }

        match Form::<HashMap<String, String>>::from_request(req, state).await {
            Ok(Form(fields)) => Ok(Self(fields)),
            Err(rejection) => {
                tracing::debug!(%rejection, "unreadable form body");
                Ok(Self::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;

    use super::*;

    async fn extract(content_type: Option<&str>, body: &'static str) -> Payload {
        let mut req = axum::http::Request::builder().method("POST").uri("/api");
        if let Some(ct) = content_type {
            req = req.header(CONTENT_TYPE, ct);
        }
        let req = req.body(Body::from(body)).unwrap();
        Payload::from_request(req, &()).await.unwrap()
    }

    #[tokio::test]
    async fn json_object() {
        let data = extract(
            Some("application/json; charset=utf-8"),
            r#"{"action":"book","participants":3,"date":"2025-06-01","extra":null}"#,
        )
        .await;
        assert_eq!(data.get("action"), Some("book"));
        assert_eq!(data.get("participants"), Some("3"));
        assert_eq!(data.get("date"), Some("2025-06-01"));
        assert_eq!(data.get("extra"), None);
    }

    #[tokio::test]
    async fn broken_json_is_empty() {
        assert_eq!(extract(Some("application/json"), "{not json").await, Payload::default());
        assert_eq!(extract(Some("application/json"), r#"["book"]"#).await, Payload::default());
        assert_eq!(extract(Some("application/json"), "\"book\"").await, Payload::default());
    }

    #[tokio::test]
    async fn url_encoded_form() {
        let data = extract(
            Some("application/x-www-form-urlencoded"),
            "action=contact&name=Jane+Doe&subject=Hi%21",
        )
        .await;
        assert_eq!(data.get("action"), Some("contact"));
        assert_eq!(data.get("name"), Some("Jane Doe"));
        assert_eq!(data.get("subject"), Some("Hi!"));
    }

    #[tokio::test]
    async fn no_content_type_is_empty() {
        assert_eq!(extract(None, "action=book").await, Payload::default());
    }

    #[test]
    fn blank_field_is_absent() {
        let data: Payload = [("name".to_string(), "  ".to_string())].into_iter().collect();
        assert_eq!(data.get("name"), Some("  "));
        assert_eq!(data.field("name"), None);
    }
}
