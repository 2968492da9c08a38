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
//! # Service state
use axum::extract::FromRef;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::error::LtiError;
use crate::provider::Provider;

#[derive(FromRef)]
pub struct Service {
    /// Config file.
    pub config: Config,

    /// Service/resource Provider.
    #[from_ref(skip)]
    pub provider: Provider,
}

pub type ServiceState = Arc<Service>;

impl Service {
    pub fn new(cfg: Config, provider: Provider) -> Result<Self, LtiError> {
        Ok(Self {
            config: cfg,
            provider,
        })
    }

    pub async fn terminate(&self) -> Result<(), LtiError> {
        info!("Terminating the LTI provider service");
        Ok(())
    }
}
