//! HTTP mapping of the client-facing error.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::application::error::GatewayError;

/// API error response. Always HTTP 400 with `{error, symbol}`.
#[derive(Debug)]
pub struct ApiError(GatewayError);

impl From<GatewayError> for ApiError {
    fn from(error: GatewayError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(self.0)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn renders_bad_request_json() {
        let response = ApiError::from(GatewayError::no_options("spy")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "No options available for this symbol");
        assert_eq!(body["symbol"], "spy");
    }
}
