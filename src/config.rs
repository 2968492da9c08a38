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

use config::{File, FileFormat};
use eyre::{Report, WrapErr};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize, Clone)]
pub struct Config {
    /// Global configuration options.
    #[serde(rename = "DEFAULT")]
    pub default: Option<DefaultSection>,

    /// Consumer registry related configuration.
    #[serde(default)]
    pub consumer: ConsumerSection,

    /// OAuth1 request verification configuration.
    #[serde(default)]
    pub oauth: OauthSection,
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct DefaultSection {
    /// Debug logging.
    pub debug: Option<bool>,
    /// Public endpoint the provider is reachable at. When set, launch
    /// URLs are reconstructed against it instead of the Host header.
    pub public_endpoint: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ConsumerSection {
    /// Consumer registry backend driver. The crate ships a `memory`
    /// driver; other drivers must be registered through the plugin
    /// manager under the name configured here.
    #[serde(default = "default_memory_driver")]
    pub driver: String,
}

impl Default for ConsumerSection {
    fn default() -> Self {
        Self {
            driver: default_memory_driver(),
        }
    }
}

/// OAuth1 verification options.
#[derive(Debug, Deserialize, Clone)]
pub struct OauthSection {
    /// Freshness window (in seconds) for the `oauth_timestamp` of a
    /// launch request. Requests with a timestamp further than this from
    /// the provider clock, in either direction, are rejected as stale.
    /// Nonce replay is not tracked; the window bounds the replay surface.
    #[serde(default = "default_timestamp_window")]
    pub timestamp_window: i64,
}

impl Default for OauthSection {
    fn default() -> Self {
        Self {
            timestamp_window: default_timestamp_window(),
        }
    }
}

fn default_memory_driver() -> String {
    "memory".into()
}

fn default_timestamp_window() -> i64 {
    3600
}

impl Config {
    pub fn new(path: PathBuf) -> Result<Self, Report> {
        let mut builder = config::Config::builder();

        if std::path::Path::new(&path).is_file() {
            builder = builder.add_source(File::from(path).format(FileFormat::Ini));
        }

        builder.try_into()
    }
}

impl TryFrom<config::ConfigBuilder<config::builder::DefaultState>> for Config {
    type Error = Report;
    fn try_from(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, Self::Error> {
        let mut builder = builder;
        builder = builder
            .set_default("consumer.driver", "memory")?
            .set_default("oauth.timestamp_window", "3600")?;

        builder
            .build()
            .wrap_err("Failed to read configuration file")?
            .try_deserialize()
            .wrap_err("Failed to parse configuration file")
    }
}
