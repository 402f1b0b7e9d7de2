use serde_json::Value;

/// What a failed Google API call told us about itself.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    pub status: Option<u16>,
    pub reason: Option<String>,
}

impl ApiFailure {
    pub fn from_status(status: u16) -> Self {
        ApiFailure {
            status: Some(status),
            reason: None,
        }
    }

    /// Reads `error.code` and `error.errors[0].reason` from a Google error body.
    pub fn from_json(body: &Value) -> Self {
        let error = body.get("error");
        let status = error
            .and_then(|error| error.get("code"))
            .and_then(Value::as_u64)
            .and_then(|code| u16::try_from(code).ok());
        let reason = error
            .and_then(|error| error.get("errors"))
            .and_then(|errors| errors.get(0))
            .and_then(|first| first.get("reason"))
            .and_then(Value::as_str)
            .map(str::to_string);

        ApiFailure { status, reason }
    }
}

impl std::fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.status, &self.reason) {
            (Some(status), Some(reason)) => write!(f, "HTTP {} ({})", status, reason),
            (Some(status), None) => write!(f, "HTTP {}", status),
            (None, Some(reason)) => write!(f, "{}", reason),
            (None, None) => write!(f, "no HTTP status"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_google_error_body() {
        let body = json!({
            "error": {
                "code": 403,
                "message": "The user's Drive storage quota has been exceeded.",
                "errors": [{ "domain": "usageLimits", "reason": "storageQuotaExceeded" }]
            }
        });

        let failure = ApiFailure::from_json(&body);

        assert_eq!(failure.status, Some(403));
        assert_eq!(failure.reason.as_deref(), Some("storageQuotaExceeded"));
        assert_eq!(failure.to_string(), "HTTP 403 (storageQuotaExceeded)");
    }

    #[test]
    fn test_from_body_without_details() {
        let failure = ApiFailure::from_json(&json!({ "error": { "code": 404 } }));
        assert_eq!(failure, ApiFailure::from_status(404));
    }

    #[test]
    fn test_from_unrelated_body() {
        assert_eq!(ApiFailure::from_json(&json!("oops")), ApiFailure::default());
        assert_eq!(ApiFailure::default().to_string(), "no HTTP status");
    }
}
