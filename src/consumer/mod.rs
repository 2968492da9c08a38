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

//! # Consumer registry provider
//!
//! The registry of LTI consumers this tool provider trusts. Each entry
//! pairs an OAuth1 consumer key with the shared secret the platform signs
//! launch requests with, plus descriptive metadata. The verification path
//! performs a single read per request; registry mutation is an
//! administrative concern that never races with verification.
//!
//! Lookups go through a backend driver so deployments can keep their
//! consumers wherever they already live (the built-in driver is an
//! in-memory map; database-backed drivers are registered through the
//! plugin manager).

use async_trait::async_trait;
use secrecy::SecretString;
use tracing::debug;
use validator::Validate;

pub mod backend;
pub mod error;
#[cfg(test)]
pub mod mock;
pub mod types;
#[cfg(test)]
pub use mock::MockConsumerProvider;

use crate::config::Config;
use crate::consumer::backend::{ConsumerBackend, memory::MemoryBackend};
use crate::consumer::error::ConsumerProviderError;
use crate::plugin_manager::PluginManager;

pub use types::{
    Consumer, ConsumerApi, ConsumerBuilder, ConsumerCreate, generate_consumer_key,
    generate_shared_secret,
};

#[derive(Clone, Debug)]
pub struct ConsumerProvider {
    backend_driver: Box<dyn ConsumerBackend>,
}

impl ConsumerProvider {
    pub fn new(
        config: &Config,
        plugin_manager: &PluginManager,
    ) -> Result<Self, ConsumerProviderError> {
        let mut backend_driver: Box<dyn ConsumerBackend> = if let Some(driver) =
            plugin_manager.get_consumer_backend(config.consumer.driver.clone())
        {
            driver.clone()
        } else {
            match config.consumer.driver.as_str() {
                "memory" => Box::new(MemoryBackend::default()),
                _ => {
                    return Err(ConsumerProviderError::UnsupportedDriver(
                        config.consumer.driver.clone(),
                    ));
                }
            }
        };
        backend_driver.set_config(config.clone());
        Ok(Self { backend_driver })
    }
}

#[async_trait]
impl ConsumerApi for ConsumerProvider {
    /// Find an enabled consumer by its OAuth1 consumer key.
    #[tracing::instrument(level = "info", skip(self))]
    async fn find_consumer_by_key<'a>(
        &self,
        key: &'a str,
    ) -> Result<Option<Consumer>, ConsumerProviderError> {
        self.backend_driver.find_consumer_by_key(key).await
    }

    /// Get a single consumer by key, enabled or not.
    #[tracing::instrument(level = "info", skip(self))]
    async fn get_consumer<'a>(&self, key: &'a str) -> Result<Consumer, ConsumerProviderError> {
        self.backend_driver
            .get_consumer(key)
            .await?
            .ok_or_else(|| ConsumerProviderError::ConsumerNotFound(key.into()))
    }

    /// List registered consumers.
    #[tracing::instrument(level = "info", skip(self))]
    async fn list_consumers(&self) -> Result<Vec<Consumer>, ConsumerProviderError> {
        self.backend_driver.list_consumers().await
    }

    /// Register a new consumer. Credentials left empty in the request are
    /// generated the same way the admin interface of the original
    /// implementation generated passports.
    #[tracing::instrument(level = "info", skip(self, consumer))]
    async fn create_consumer(
        &self,
        consumer: ConsumerCreate,
    ) -> Result<Consumer, ConsumerProviderError> {
        consumer.validate()?;

        let consumer_key = consumer
            .consumer_key
            .unwrap_or_else(generate_consumer_key);
        let shared_secret = consumer
            .shared_secret
            .unwrap_or_else(generate_shared_secret);
        debug!("Registering consumer {}", consumer_key);

        let mut builder = ConsumerBuilder::default();
        builder
            .consumer_key(consumer_key)
            .shared_secret(SecretString::from(shared_secret))
            .title(consumer.title.unwrap_or_default())
            .enabled(consumer.enabled.unwrap_or(true));
        if let Some(url) = consumer.url {
            builder.url(url);
        }

        self.backend_driver.create_consumer(builder.build()?).await
    }

    /// Remove a consumer from the registry.
    #[tracing::instrument(level = "info", skip(self))]
    async fn delete_consumer<'a>(&self, key: &'a str) -> Result<(), ConsumerProviderError> {
        self.backend_driver.delete_consumer(key).await
    }

    /// Enable or disable a consumer without dropping its credentials.
    #[tracing::instrument(level = "info", skip(self))]
    async fn set_consumer_enabled<'a>(
        &self,
        key: &'a str,
        enabled: bool,
    ) -> Result<(), ConsumerProviderError> {
        self.backend_driver.set_consumer_enabled(key, enabled).await
    }
}
