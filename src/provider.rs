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
//! # Provider manager
//!
//! Provider manager provides access to the individual service providers.
//! This gives an easy interface for passing the overall manager down to
//! the individual providers that might need to call other providers while
//! also allowing an easy injection of mocked providers.
use derive_builder::Builder;
use mockall_double::double;

use crate::config::Config;
use crate::consumer::ConsumerApi;
#[double]
use crate::consumer::ConsumerProvider;
use crate::error::LtiError;
use crate::plugin_manager::PluginManager;
use crate::verifier::VerifierApi;
#[double]
use crate::verifier::LaunchVerifier;

/// Global provider manager.
#[derive(Builder, Clone)]
// It is necessary to use the owned pattern since otherwise builder invokes clone which immediately
// confuses mockall used in tests
#[builder(pattern = "owned")]
pub struct Provider {
    /// Configuration.
    pub config: Config,
    /// Consumer registry provider.
    consumer: ConsumerProvider,
    /// Launch request verifier.
    verifier: LaunchVerifier,
}

impl Provider {
    pub fn new(cfg: Config, plugin_manager: PluginManager) -> Result<Self, LtiError> {
        let consumer_provider = ConsumerProvider::new(&cfg, &plugin_manager)?;
        let verifier = LaunchVerifier::new(&cfg)?;

        Ok(Self {
            config: cfg,
            consumer: consumer_provider,
            verifier,
        })
    }

    /// Get the consumer registry provider.
    pub fn get_consumer_provider(&self) -> &impl ConsumerApi {
        &self.consumer
    }

    /// Get the launch request verifier.
    pub fn get_verifier(&self) -> &impl VerifierApi {
        &self.verifier
    }
}

#[cfg(test)]
impl Provider {
    pub fn mocked_builder() -> ProviderBuilder {
        let config = Config::default();
        let consumer_mock = crate::consumer::MockConsumerProvider::default();
        let verifier_mock = crate::verifier::MockLaunchVerifier::default();

        ProviderBuilder::default()
            .config(config)
            .consumer(consumer_mock)
            .verifier(verifier_mock)
    }
}
