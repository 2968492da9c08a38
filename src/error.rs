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
//! # Error
//!
//! Diverse errors that can occur during LTI request processing (not the
//! API surface, which has its own error type).
use thiserror::Error;

use crate::consumer::error::ConsumerProviderError;
use crate::verifier::error::VerificationError;

/// LTI toolbox error.
#[derive(Debug, Error)]
pub enum LtiError {
    #[error(transparent)]
    ConsumerError {
        #[from]
        source: ConsumerProviderError,
    },

    #[error(transparent)]
    Verification {
        #[from]
        source: VerificationError,
    },

    #[error(transparent)]
    IO {
        #[from]
        source: std::io::Error,
    },

    /// Json serialization error.
    #[error("json serde error: {}", source)]
    JsonError {
        /// The source of the error.
        #[from]
        source: serde_json::Error,
    },

    /// Url parsing error.
    #[error(transparent)]
    UrlParse {
        #[from]
        source: url::ParseError,
    },
}
