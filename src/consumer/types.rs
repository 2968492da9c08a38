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
use derive_builder::Builder;
use rand::Rng;
use secrecy::SecretString;
use serde::Deserialize;
use url::Url;
use validator::Validate;

use crate::consumer::error::ConsumerProviderError;

/// A registered LTI consumer: the credentials a tool consumer (an LMS)
/// uses to sign launch requests towards this provider, together with
/// descriptive metadata.
#[derive(Builder, Clone, Debug, Validate)]
#[builder(setter(strip_option, into))]
pub struct Consumer {
    /// The OAuth1 consumer key identifying the platform. Unique across
    /// the registry.
    #[validate(length(min = 1, max = 255))]
    pub consumer_key: String,

    /// The shared secret used to sign launch requests. Never logged and
    /// never serialized.
    pub shared_secret: SecretString,

    /// Human readable title describing the consumer.
    #[builder(default)]
    pub title: String,

    /// URL of the consumer site, used for origin URL reconstruction.
    #[builder(default)]
    pub url: Option<Url>,

    /// Disabled consumers are invisible to the verification lookup.
    #[builder(default = "true")]
    pub enabled: bool,
}

/// Consumer creation data. Missing credentials are generated server-side.
#[derive(Builder, Clone, Debug, Default, Deserialize, Validate)]
#[builder(setter(strip_option, into), default)]
pub struct ConsumerCreate {
    /// The OAuth1 consumer key. Generated when absent.
    #[validate(length(min = 1, max = 255))]
    pub consumer_key: Option<String>,

    /// The shared secret. Generated when absent.
    #[validate(length(min = 1, max = 255))]
    pub shared_secret: Option<String>,

    /// Human readable title describing the consumer.
    #[validate(length(max = 255))]
    pub title: Option<String>,

    /// URL of the consumer site.
    pub url: Option<Url>,

    /// Whether the consumer is enabled. Defaults to true.
    pub enabled: Option<bool>,
}

const CONSUMER_KEY_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const SHARED_SECRET_CHARS: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!#$%&*+-=?@^_";

fn random_string(chars: &[u8], length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| chars[rng.gen_range(0..chars.len())] as char)
        .collect()
}

/// Generate a random consumer key (20 to 29 uppercase alphanumerics).
pub fn generate_consumer_key() -> String {
    let length = rand::thread_rng().gen_range(20..30);
    random_string(CONSUMER_KEY_CHARS, length)
}

/// Generate a random shared secret (40 to 59 chars).
pub fn generate_shared_secret() -> String {
    let length = rand::thread_rng().gen_range(40..60);
    random_string(SHARED_SECRET_CHARS, length)
}

#[async_trait]
pub trait ConsumerApi: Send + Sync + Clone {
    /// Find an enabled consumer by its OAuth1 consumer key. This is the
    /// verification-path lookup: disabled consumers are not returned.
    async fn find_consumer_by_key<'a>(
        &self,
        key: &'a str,
    ) -> Result<Option<Consumer>, ConsumerProviderError>;

    /// Get a single consumer by key, enabled or not.
    async fn get_consumer<'a>(&self, key: &'a str) -> Result<Consumer, ConsumerProviderError>;

    /// List registered consumers.
    async fn list_consumers(&self) -> Result<Vec<Consumer>, ConsumerProviderError>;

    /// Register a new consumer, generating missing credentials.
    async fn create_consumer(
        &self,
        consumer: ConsumerCreate,
    ) -> Result<Consumer, ConsumerProviderError>;

    /// Remove a consumer from the registry.
    async fn delete_consumer<'a>(&self, key: &'a str) -> Result<(), ConsumerProviderError>;

    /// Enable or disable a consumer without dropping its credentials.
    async fn set_consumer_enabled<'a>(
        &self,
        key: &'a str,
        enabled: bool,
    ) -> Result<(), ConsumerProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_consumer_key() {
        for _ in 0..32 {
            let key = generate_consumer_key();
            assert!((20..30).contains(&key.len()));
            assert!(
                key.chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
            );
        }
    }

    #[test]
    fn test_generate_shared_secret() {
        for _ in 0..32 {
            let secret = generate_shared_secret();
            assert!((40..60).contains(&secret.len()));
            assert!(
                secret
                    .chars()
                    .all(|c| SHARED_SECRET_CHARS.contains(&(c as u8)))
            );
        }
    }
}
