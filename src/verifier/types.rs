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

use async_trait::async_trait;
use axum::http::Method;
use derive_builder::Builder;
use url::Url;

use crate::launch::LtiLaunch;
use crate::service::ServiceState;
use crate::verifier::error::VerificationError;

/// The raw material of an incoming launch request, before verification.
#[derive(Builder, Clone, Debug)]
#[builder(setter(into))]
pub struct LaunchRequest {
    /// HTTP method the launch was sent with.
    #[builder(default = "Method::POST")]
    pub method: Method,

    /// Absolute URL the launch was sent to, exactly as the consumer
    /// signed it.
    pub url: Url,

    /// Decoded form (or query) pairs. Order and repeated names are
    /// preserved: every occurrence participates in the signature.
    pub params: Vec<(String, String)>,

    /// Referer header, when present. Only used as a last resort for
    /// origin URL reconstruction.
    #[builder(default)]
    pub referer: Option<Url>,
}

#[async_trait]
pub trait VerifierApi: Send + Sync + Clone {
    /// Verify an incoming launch request against the consumer registry.
    ///
    /// On success the returned [LtiLaunch] carries the resolved consumer
    /// and the validated parameters. Every failure is terminal and maps
    /// to one of the [VerificationError] reasons.
    async fn verify_launch(
        &self,
        state: &ServiceState,
        request: &LaunchRequest,
    ) -> Result<LtiLaunch, VerificationError>;
}
