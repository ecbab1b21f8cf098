use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response body shared by every endpoint.
///
/// Successful responses carry `data` and an empty `errors` list. Failed
/// responses carry `data: null` and one or more messages.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Envelope<T> {
    pub data: Option<T>,
    pub errors: Vec<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
        }
    }
}

impl Envelope<()> {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            data: None,
            errors: vec![message.into()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ok_serializes_with_empty_errors() {
        let body = serde_json::to_value(Envelope::ok(json!({"id": 1}))).unwrap();
        assert_eq!(body, json!({"data": {"id": 1}, "errors": []}));
    }

    #[test]
    fn error_serializes_with_null_data() {
        let body = serde_json::to_value(Envelope::error("Unauthorized")).unwrap();
        assert_eq!(body, json!({"data": null, "errors": ["Unauthorized"]}));
    }
}
