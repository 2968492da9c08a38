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
//! In-memory consumer registry backend.
//!
//! Suitable for tests, demos and deployments whose consumer set is
//! provisioned at process start. Anything that must survive a restart
//! belongs in a custom backend registered through the plugin manager.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::config::Config;
use crate::consumer::backend::ConsumerBackend;
use crate::consumer::error::ConsumerProviderError;
use crate::consumer::types::Consumer;

#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    consumers: Arc<RwLock<HashMap<String, Consumer>>>,
}

#[async_trait]
impl ConsumerBackend for MemoryBackend {
    fn set_config(&mut self, _config: Config) {}

    async fn find_consumer_by_key<'a>(
        &self,
        key: &'a str,
    ) -> Result<Option<Consumer>, ConsumerProviderError> {
        let consumers = self
            .consumers
            .read()
            .map_err(|_| ConsumerProviderError::LockPoisoned)?;
        Ok(consumers.get(key).filter(|c| c.enabled).cloned())
    }

    async fn get_consumer<'a>(
        &self,
        key: &'a str,
    ) -> Result<Option<Consumer>, ConsumerProviderError> {
        let consumers = self
            .consumers
            .read()
            .map_err(|_| ConsumerProviderError::LockPoisoned)?;
        Ok(consumers.get(key).cloned())
    }

    async fn list_consumers(&self) -> Result<Vec<Consumer>, ConsumerProviderError> {
        let consumers = self
            .consumers
            .read()
            .map_err(|_| ConsumerProviderError::LockPoisoned)?;
        Ok(consumers.values().cloned().collect())
    }

    async fn create_consumer(
        &self,
        consumer: Consumer,
    ) -> Result<Consumer, ConsumerProviderError> {
        let mut consumers = self
            .consumers
            .write()
            .map_err(|_| ConsumerProviderError::LockPoisoned)?;
        if consumers.contains_key(&consumer.consumer_key) {
            return Err(ConsumerProviderError::Conflict(
                consumer.consumer_key.clone(),
            ));
        }
        consumers.insert(consumer.consumer_key.clone(), consumer.clone());
        Ok(consumer)
    }

    async fn delete_consumer<'a>(&self, key: &'a str) -> Result<(), ConsumerProviderError> {
        let mut consumers = self
            .consumers
            .write()
            .map_err(|_| ConsumerProviderError::LockPoisoned)?;
        consumers
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| ConsumerProviderError::ConsumerNotFound(key.into()))
    }

    async fn set_consumer_enabled<'a>(
        &self,
        key: &'a str,
        enabled: bool,
    ) -> Result<(), ConsumerProviderError> {
        let mut consumers = self
            .consumers
            .write()
            .map_err(|_| ConsumerProviderError::LockPoisoned)?;
        match consumers.get_mut(key) {
            Some(consumer) => {
                consumer.enabled = enabled;
                Ok(())
            }
            None => Err(ConsumerProviderError::ConsumerNotFound(key.into())),
        }
    }
}
