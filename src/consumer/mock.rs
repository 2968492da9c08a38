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
use crate::consumer::ConsumerApi;
use crate::consumer::error::ConsumerProviderError;
use crate::consumer::types::{Consumer, ConsumerCreate};
use crate::plugin_manager::PluginManager;

mock! {
    pub ConsumerProvider {
        pub fn new(cfg: &Config, plugin_manager: &PluginManager) -> Result<Self, ConsumerProviderError>;
    }

    #[async_trait]
    impl ConsumerApi for ConsumerProvider {
        async fn find_consumer_by_key<'a>(
            &self,
            key: &'a str,
        ) -> Result<Option<Consumer>, ConsumerProviderError>;

        async fn get_consumer<'a>(&self, key: &'a str) -> Result<Consumer, ConsumerProviderError>;

        async fn list_consumers(&self) -> Result<Vec<Consumer>, ConsumerProviderError>;

        async fn create_consumer(
            &self,
            consumer: ConsumerCreate,
        ) -> Result<Consumer, ConsumerProviderError>;

        async fn delete_consumer<'a>(&self, key: &'a str) -> Result<(), ConsumerProviderError>;

        async fn set_consumer_enabled<'a>(
            &self,
            key: &'a str,
            enabled: bool,
        ) -> Result<(), ConsumerProviderError>;
    }

    impl Clone for ConsumerProvider {
        fn clone(&self) -> Self;
    }
}
