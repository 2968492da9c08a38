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
use mockall::mock;

use crate::config::Config;
use crate::launch::LtiLaunch;
use crate::service::ServiceState;
use crate::verifier::VerifierApi;
use crate::verifier::error::VerificationError;
use crate::verifier::types::LaunchRequest;

mock! {
    pub LaunchVerifier {
        pub fn new(config: &Config) -> Result<Self, VerificationError>;
    }

    #[async_trait]
    impl VerifierApi for LaunchVerifier {
        async fn verify_launch(
            &self,
            state: &ServiceState,
            request: &LaunchRequest,
        ) -> Result<LtiLaunch, VerificationError>;
    }

    impl Clone for LaunchVerifier {
        fn clone(&self) -> Self;
    }
}
