//! Error body returned by Amadeus resource endpoints
//!
//! Failed calls answer with `{"errors": [{status, code, title, detail, source}]}`.
//! Sub-errors are read field by field, so one oddly typed field never costs
//! the others.

use serde::Serialize;
use serde_json::Value;

/// Top-level error body of a failed resource call.
#[derive(Debug, Clone, Default)]
pub struct ApiErrorBody {
    pub errors: Vec<ApiErrorDetail>,
}

/// One structured sub-error reported by the upstream API.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApiErrorDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Value>,
}

impl ApiErrorDetail {
    /// Reads one element of the `errors` array.
    ///
    /// Numeric fields accept numbers or numeric strings. A bare string
    /// element is taken as the detail.
    pub fn from_value(value: &Value) -> Self {
        if let Value::String(detail) = value {
            return Self {
                detail: Some(detail.clone()),
                ..Self::default()
            };
        }

        Self {
            status: value
                .get("status")
                .and_then(integer)
                .and_then(|n| u16::try_from(n).ok()),
            code: value.get("code").and_then(integer),
            title: value.get("title").and_then(text),
            detail: value.get("detail").and_then(text),
            source: value.get("source").filter(|v| !v.is_null()).cloned(),
        }
    }

    /// Human-readable summary: the detail string, falling back to the title.
    pub fn summary(&self) -> &str {
        self.detail
            .as_deref()
            .or(self.title.as_deref())
            .unwrap_or_default()
    }
}

impl ApiErrorBody {
    /// Parses an error body, yielding no sub-errors when it has no `errors`
    /// array.
    pub fn parse(body: &[u8]) -> Self {
        let errors = serde_json::from_slice::<Value>(body)
            .ok()
            .and_then(|body| {
                body.get("errors")
                    .and_then(Value::as_array)
                    .map(|items| items.iter().map(ApiErrorDetail::from_value).collect())
            })
            .unwrap_or_default();

        Self { errors }
    }
}

fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_error_body() {
        let body = br#"{"errors":[{"status":400,"code":477,"title":"INVALID FORMAT","detail":"invalid date","source":{"parameter":"departureDate"}}]}"#;
        let parsed = ApiErrorBody::parse(body);

        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.errors[0].status, Some(400));
        assert_eq!(parsed.errors[0].code, Some(477));
        assert_eq!(parsed.errors[0].summary(), "invalid date");
        assert_eq!(
            parsed.errors[0].source,
            Some(json!({"parameter": "departureDate"}))
        );
    }

    #[test]
    fn test_string_status_keeps_detail() {
        let body = br#"{"errors":[{"status":"400","code":477,"title":"INVALID FORMAT","detail":"departureDate is invalid"}]}"#;
        let parsed = ApiErrorBody::parse(body);

        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.errors[0].status, Some(400));
        assert_eq!(parsed.errors[0].code, Some(477));
        assert_eq!(parsed.errors[0].summary(), "departureDate is invalid");
    }

    #[test]
    fn test_odd_fields_do_not_discard_siblings() {
        let body = json!({"errors": [
            {"status": "bad", "code": {"nested": true}, "title": "SYSTEM ERROR"},
            {"status": 400, "code": "32171", "detail": 42},
            "plain message",
            null
        ]})
        .to_string();
        let parsed = ApiErrorBody::parse(body.as_bytes());

        assert_eq!(parsed.errors.len(), 4);
        assert_eq!(parsed.errors[0].status, None);
        assert_eq!(parsed.errors[0].code, None);
        assert_eq!(parsed.errors[0].summary(), "SYSTEM ERROR");
        assert_eq!(parsed.errors[1].code, Some(32171));
        assert_eq!(parsed.errors[1].summary(), "42");
        assert_eq!(parsed.errors[2].summary(), "plain message");
        assert_eq!(parsed.errors[3], ApiErrorDetail::default());
    }

    #[test]
    fn test_parse_non_json_body() {
        let parsed = ApiErrorBody::parse(b"<html>Bad Gateway</html>");
        assert!(parsed.errors.is_empty());

        let parsed = ApiErrorBody::parse(br#"{"errors": "unavailable"}"#);
        assert!(parsed.errors.is_empty());
    }

    #[test]
    fn test_summary_falls_back_to_title() {
        let detail = ApiErrorDetail {
            title: Some("SYSTEM ERROR".to_string()),
            ..ApiErrorDetail::default()
        };
        assert_eq!(detail.summary(), "SYSTEM ERROR");
    }
}
