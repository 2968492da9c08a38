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
//! Launch verification errors.
//!
//! Every failure is terminal for the request: verification is a
//! stateless, idempotent check and the consumer is responsible for
//! resubmitting.

use thiserror::Error;

use crate::consumer::error::ConsumerProviderError;
use crate::launch::error::LaunchParamsError;
use crate::oauth1::error::OAuth1Error;

/// Launch request verification error.
#[derive(Error, Debug)]
pub enum VerificationError {
    /// Consumer registry failure while resolving the consumer key.
    #[error(transparent)]
    ConsumerProvider(#[from] ConsumerProviderError),

    /// The supplied signature does not match the one computed over the
    /// registered shared secret.
    #[error("oauth signature mismatch")]
    InvalidSignature,

    /// Required LTI parameters are absent or unparseable for the
    /// declared message type.
    #[error(transparent)]
    MalformedParameters(#[from] LaunchParamsError),

    /// The request lacks the `oauth_consumer_key` parameter.
    #[error("missing oauth_consumer_key parameter")]
    MissingConsumerKey,

    /// OAuth1 base string could not be computed for the request.
    #[error(transparent)]
    Signature(#[from] OAuth1Error),

    /// The `oauth_timestamp` is outside the freshness window.
    #[error("oauth_timestamp {timestamp} outside the {window} second freshness window")]
    StaleRequest {
        /// The timestamp carried by the request.
        timestamp: i64,
        /// The configured window, in seconds.
        window: i64,
    },

    /// The consumer key is not present in the registry (or disabled).
    #[error("unknown consumer key: {0}")]
    UnknownConsumer(String),
}
