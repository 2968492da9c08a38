// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0
//! # LTI API error.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::consumer::error::ConsumerProviderError;
use crate::verifier::error::VerificationError;

/// LTI API operation errors.
#[derive(Debug, Error)]
pub enum LtiApiError {
    #[error("{0}.")]
    BadRequest(String),

    #[error("Invalid LTI launch request.")]
    Forbidden,

    #[error("internal server error: {0}")]
    InternalError(String),

    #[error(transparent)]
    ConsumerError {
        #[from]
        source: ConsumerProviderError,
    },

    /// Launch URL reconstruction failed.
    #[error(transparent)]
    UrlParse {
        #[from]
        source: url::ParseError,
    },

    #[error(transparent)]
    Verification {
        #[from]
        source: VerificationError,
    },
}

impl IntoResponse for LtiApiError {
    fn into_response(self) -> Response {
        error!("Error happened during request processing: {:#?}", self);

        let status_code = match self {
            LtiApiError::BadRequest(..) | LtiApiError::UrlParse { .. } => StatusCode::BAD_REQUEST,
            // Every verification failure is terminal and opaque to the
            // consumer: a launch either verifies or it does not.
            LtiApiError::Forbidden | LtiApiError::Verification { .. } => StatusCode::FORBIDDEN,
            LtiApiError::InternalError(..) | LtiApiError::ConsumerError { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (
            status_code,
            Json(json!({"error": {"code": status_code.as_u16(), "message": self.to_string()}})),
        )
            .into_response()
    }
}
