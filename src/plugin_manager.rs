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
//! # Plugin manager
//!
//! A driver, also known as a backend, is an abstraction around the data
//! access needed by the consumer registry. The crate only ships a
//! `memory` driver; a deployment backed by a database registers its own
//! driver here and selects it with the `[consumer] driver` configuration
//! option.
//!
//! The [PluginManager] is responsible for picking the proper backend
//! driver for the provider.
use std::collections::HashMap;

use crate::consumer::backend::ConsumerBackend;

/// Plugin manager allowing to pass custom backend plugins implementing
/// the required trait during the service start.
#[derive(Clone, Default)]
pub struct PluginManager {
    /// Consumer registry backend plugins.
    consumer_backends: HashMap<String, Box<dyn ConsumerBackend>>,
}

impl PluginManager {
    /// Register a consumer registry backend.
    pub fn register_consumer_backend<S: AsRef<str>>(
        &mut self,
        name: S,
        plugin: Box<dyn ConsumerBackend>,
    ) {
        self.consumer_backends
            .insert(name.as_ref().to_string(), plugin);
    }

    /// Get a registered consumer registry backend.
    #[allow(clippy::borrowed_box)]
    pub fn get_consumer_backend<S: AsRef<str>>(
        &self,
        name: S,
    ) -> Option<&Box<dyn ConsumerBackend>> {
        self.consumer_backends.get(name.as_ref())
    }
}
