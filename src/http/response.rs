//! Response mapping.
//!
//! # Responsibilities
//! - Map domain errors to HTTP status codes and fixed JSON bodies
//!
//! # Design Decisions
//! - Error bodies never echo request input

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::discovery::DiscoveryError;

/// JSON body of an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

impl IntoResponse for DiscoveryError {
    fn into_response(self) -> Response {
        match self {
            DiscoveryError::TenantNotFound(_) => {
                (StatusCode::NOT_FOUND, Json(ErrorBody::new("Tenant not found"))).into_response()
            }
        }
    }
}
