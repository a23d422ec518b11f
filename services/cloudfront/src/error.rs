use cfront_core::Error;
use http::StatusCode;
use serde::Deserialize;

/// Error answered by CloudFront for a non-success status.
///
/// Carried as the source of an [`ErrorKind::Service`](cfront_core::ErrorKind::Service)
/// error, use [`ServiceError::from_error`] to get it back.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message} (status: {status})")]
pub struct ServiceError {
    /// HTTP status of the response.
    pub status: StatusCode,
    /// Error code, e.g. `NoSuchDistribution`.
    pub code: String,
    /// `Sender` or `Receiver`.
    pub error_type: String,
    /// Human readable message.
    pub message: String,
    /// Request id from the body, or the `x-amz-request-id` header.
    pub request_id: Option<String>,
}

#[derive(Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct ErrorResponse {
    error: ErrorBody,
    request_id: Option<String>,
}

#[derive(Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct ErrorBody {
    #[serde(rename = "Type")]
    error_type: String,
    code: String,
    message: String,
}

impl ServiceError {
    /// Build from a non-success response.
    ///
    /// A body that isn't an `ErrorResponse` document is kept as the message.
    pub fn parse(status: StatusCode, body: &str, request_id: Option<&str>) -> Self {
        let fallback_code = || {
            status
                .canonical_reason()
                .unwrap_or("Unknown")
                .replace(' ', "")
        };

        match quick_xml::de::from_str::<ErrorResponse>(body) {
            Ok(resp) if !resp.error.code.is_empty() => Self {
                status,
                code: resp.error.code,
                error_type: resp.error.error_type,
                message: resp.error.message,
                request_id: resp
                    .request_id
                    .filter(|v| !v.is_empty())
                    .or_else(|| request_id.map(String::from)),
            },
            _ => Self {
                status,
                code: fallback_code(),
                error_type: if status.is_server_error() {
                    "Receiver".to_string()
                } else {
                    "Sender".to_string()
                },
                message: body.trim().to_string(),
                request_id: request_id.map(String::from),
            },
        }
    }

    /// Whether sending the same request again could succeed.
    pub fn is_retryable(&self) -> bool {
        self.status.is_server_error() || self.code == "Throttling"
    }

    /// Get the service error carried by `err`, if any.
    pub fn from_error(err: &Error) -> Option<&ServiceError> {
        err.downcast_source::<ServiceError>()
    }

    /// Wrap into a [`cfront_core::Error`] of kind `Service`.
    pub fn into_error(self) -> Error {
        let mut err = Error::service(self.to_string()).set_retryable(self.is_retryable());
        if let Some(request_id) = &self.request_id {
            err = err.with_context(format!("request_id: {request_id}"));
        }
        err.with_source(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfront_core::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_error_response() {
        let body = r#"<?xml version="1.0"?>
<ErrorResponse xmlns="http://cloudfront.amazonaws.com/doc/2010-11-01/">
   <Error>
      <Type>Sender</Type>
      <Code>NoSuchDistribution</Code>
      <Message>The specified distribution does not exist.</Message>
   </Error>
   <RequestId>0fd3e8d2-2e1b-11e0-8bb8-2b0a5a1c1a4a</RequestId>
</ErrorResponse>"#;

        let err = ServiceError::parse(StatusCode::NOT_FOUND, body, Some("header-id"));
        assert_eq!(
            err,
            ServiceError {
                status: StatusCode::NOT_FOUND,
                code: "NoSuchDistribution".to_string(),
                error_type: "Sender".to_string(),
                message: "The specified distribution does not exist.".to_string(),
                request_id: Some("0fd3e8d2-2e1b-11e0-8bb8-2b0a5a1c1a4a".to_string()),
            }
        );
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_parse_unstructured_body() {
        let err = ServiceError::parse(
            StatusCode::BAD_GATEWAY,
            "  upstream went away\n",
            Some("header-id"),
        );
        assert_eq!(err.code, "BadGateway");
        assert_eq!(err.error_type, "Receiver");
        assert_eq!(err.message, "upstream went away");
        assert_eq!(err.request_id.as_deref(), Some("header-id"));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_throttling_is_retryable() {
        let body = "<ErrorResponse><Error><Type>Sender</Type><Code>Throttling</Code>\
                    <Message>Rate exceeded</Message></Error></ErrorResponse>";
        let err = ServiceError::parse(StatusCode::BAD_REQUEST, body, None);
        assert_eq!(err.code, "Throttling");
        assert_eq!(err.request_id, None);
        assert!(err.is_retryable());
    }

    #[test]
    fn test_into_and_from_error() {
        let service_err = ServiceError::parse(
            StatusCode::FORBIDDEN,
            "<ErrorResponse><Error><Type>Sender</Type><Code>AccessDenied</Code>\
             <Message>Access denied.</Message></Error><RequestId>req-1</RequestId></ErrorResponse>",
            None,
        );

        let err = service_err.clone().into_error();
        assert_eq!(err.kind(), ErrorKind::Service);
        assert!(!err.is_retryable());
        assert_eq!(err.context(), &["request_id: req-1".to_string()]);
        assert_eq!(err.to_string(), "AccessDenied: Access denied. (status: 403 Forbidden)");
        assert_eq!(ServiceError::from_error(&err), Some(&service_err));

        assert_eq!(ServiceError::from_error(&Error::unexpected("boom")), None);
    }
}
