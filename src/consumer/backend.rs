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
use dyn_clone::DynClone;

use crate::config::Config;
use crate::consumer::error::ConsumerProviderError;
use crate::consumer::types::Consumer;

pub mod memory;

#[async_trait]
pub trait ConsumerBackend: DynClone + Send + Sync + std::fmt::Debug {
    /// Set config.
    fn set_config(&mut self, config: Config);

    /// Find an enabled consumer by its key.
    async fn find_consumer_by_key<'a>(
        &self,
        key: &'a str,
    ) -> Result<Option<Consumer>, ConsumerProviderError>;

    /// Get a single consumer by key, enabled or not.
    async fn get_consumer<'a>(&self, key: &'a str)
    -> Result<Option<Consumer>, ConsumerProviderError>;

    /// List registered consumers.
    async fn list_consumers(&self) -> Result<Vec<Consumer>, ConsumerProviderError>;

    /// Persist a new consumer. The credentials are already filled in by
    /// the provider.
    async fn create_consumer(
        &self,
        consumer: Consumer,
    ) -> Result<Consumer, ConsumerProviderError>;

    /// Remove a consumer.
    async fn delete_consumer<'a>(&self, key: &'a str) -> Result<(), ConsumerProviderError>;

    /// Flip the enabled flag of a consumer.
    async fn set_consumer_enabled<'a>(
        &self,
        key: &'a str,
        enabled: bool,
    ) -> Result<(), ConsumerProviderError>;
}

dyn_clone::clone_trait_object!(ConsumerBackend);
