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

//! # Launch request verifier
//!
//! Validates an OAuth1-signed LTI launch request against the consumer
//! registry: the parameter set is checked against the LTI vocabulary, the
//! consumer is resolved by its key, the HMAC-SHA1 signature is recomputed
//! over the normalized request and compared in constant time, and the
//! timestamp is checked against the configured freshness window.
//!
//! Verification is stateless and idempotent: each request is verified
//! exactly once and every failure is terminal, reported as a structured
//! [VerificationError] for the surrounding view to render.

use async_trait::async_trait;
use chrono::Utc;
use secrecy::ExposeSecret;
use tracing::{debug, warn};

pub mod error;
#[cfg(test)]
pub mod mock;
pub mod types;

pub use error::VerificationError;
pub use types::{LaunchRequest, LaunchRequestBuilder, VerifierApi};
#[cfg(test)]
pub use mock::MockLaunchVerifier;

use crate::config::Config;
use crate::consumer::ConsumerApi;
use crate::launch::error::LaunchParamsError;
use crate::launch::{LaunchParams, LtiLaunch};
use crate::oauth1::{
    SIGNATURE_METHOD_HMAC_SHA1, sign_hmac_sha1, signature_base_string, verify_hmac_sha1,
};
use crate::service::ServiceState;

/// Secret used to keep the rejection of an unknown consumer key as
/// expensive as a signature mismatch, so the lookup outcome does not leak
/// through timing.
const DUMMY_CLIENT_SECRET: &str = "dummy_client_sec_123456";

/// Nonce length bounds accepted on the wire.
const NONCE_MIN_LENGTH: usize = 5;
const NONCE_MAX_LENGTH: usize = 50;

#[derive(Clone, Debug)]
pub struct LaunchVerifier {
    config: Config,
}

impl LaunchVerifier {
    pub fn new(config: &Config) -> Result<Self, VerificationError> {
        Ok(Self {
            config: config.clone(),
        })
    }
}

fn require<'p>(params: &'p LaunchParams, name: &str) -> Result<&'p str, VerificationError> {
    params
        .get(name)
        .ok_or_else(|| LaunchParamsError::MissingParam(name.into()).into())
}

fn invalid_value(param: &str, value: &str) -> VerificationError {
    LaunchParamsError::InvalidValue {
        param: param.into(),
        value: value.into(),
    }
    .into()
}

#[async_trait]
impl VerifierApi for LaunchVerifier {
    /// Verify an incoming launch request against the consumer registry.
    #[tracing::instrument(level = "info", skip(self, state, request))]
    async fn verify_launch(
        &self,
        state: &ServiceState,
        request: &LaunchRequest,
    ) -> Result<LtiLaunch, VerificationError> {
        let params = LaunchParams::try_from_pairs(request.params.iter().cloned())?;

        let consumer_key = params
            .get("oauth_consumer_key")
            .ok_or(VerificationError::MissingConsumerKey)?;

        let signature = require(&params, "oauth_signature")?;
        let signature_method = require(&params, "oauth_signature_method")?;
        if signature_method != SIGNATURE_METHOD_HMAC_SHA1 {
            return Err(invalid_value("oauth_signature_method", signature_method));
        }
        let raw_timestamp = require(&params, "oauth_timestamp")?;
        let timestamp: i64 = raw_timestamp
            .parse()
            .map_err(|_| invalid_value("oauth_timestamp", raw_timestamp))?;
        let nonce = require(&params, "oauth_nonce")?;
        if !(NONCE_MIN_LENGTH..=NONCE_MAX_LENGTH).contains(&nonce.len()) {
            return Err(invalid_value("oauth_nonce", nonce));
        }
        if let Some(version) = params.get("oauth_version") {
            if version != "1.0" {
                return Err(invalid_value("oauth_version", version));
            }
        }

        let base_string =
            signature_base_string(request.method.as_str(), &request.url, &request.params)?;

        let consumer = match state
            .provider
            .get_consumer_provider()
            .find_consumer_by_key(consumer_key)
            .await?
        {
            Some(consumer) => consumer,
            None => {
                // Burn the same HMAC the real check would, then reject.
                let _ = sign_hmac_sha1(&base_string, DUMMY_CLIENT_SECRET, "");
                debug!("Launch request for unknown consumer key {}", consumer_key);
                return Err(VerificationError::UnknownConsumer(consumer_key.into()));
            }
        };

        if !verify_hmac_sha1(
            &base_string,
            consumer.shared_secret.expose_secret(),
            "",
            signature,
        ) {
            debug!(
                "Signature mismatch for consumer key {} (nonce = {})",
                consumer_key, nonce
            );
            return Err(VerificationError::InvalidSignature);
        }

        let window = self.config.oauth.timestamp_window;
        if (Utc::now().timestamp() - timestamp).abs() > window {
            warn!(
                "Stale launch request (ts = {}, consumer_key = {}, nonce = {})",
                timestamp, consumer_key, nonce
            );
            return Err(VerificationError::StaleRequest { timestamp, window });
        }

        debug!("Verified launch request for consumer key {}", consumer_key);
        Ok(LtiLaunch::new(consumer, params, request.referer.clone()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::Method;
    use chrono::Utc;
    use secrecy::SecretString;
    use tracing_test::traced_test;
    use url::Url;

    use super::*;
    use crate::consumer::{Consumer, ConsumerBuilder, MockConsumerProvider};
    use crate::launch::MessageType;
    use crate::oauth1::RequestSigner;
    use crate::provider::Provider;
    use crate::service::Service;

    const LAUNCH_URL: &str = "https://provider.example/launch";

    fn demo_consumer() -> Consumer {
        ConsumerBuilder::default()
            .consumer_key("demo")
            .shared_secret(SecretString::from("s3cr3t"))
            .title("Demo LMS")
            .build()
            .unwrap()
    }

    fn registry_with_demo() -> MockConsumerProvider {
        let mut consumer_mock = MockConsumerProvider::default();
        consumer_mock
            .expect_find_consumer_by_key()
            .returning(|key: &'_ str| {
                Ok((key == "demo").then(demo_consumer))
            });
        consumer_mock
    }

    fn state_with(consumer_mock: MockConsumerProvider) -> ServiceState {
        let provider = Provider::mocked_builder()
            .consumer(consumer_mock)
            .build()
            .unwrap();
        Arc::new(Service::new(Config::default(), provider).unwrap())
    }

    fn lti_parameters() -> Vec<(String, String)> {
        vec![
            ("lti_message_type".into(), "basic-lti-launch-request".into()),
            ("lti_version".into(), "LTI-1p0".into()),
            ("resource_link_id".into(), "abc123".into()),
            ("roles".into(), "Instructor".into()),
        ]
    }

    fn signed_request(params: Vec<(String, String)>) -> LaunchRequest {
        let url = Url::parse(LAUNCH_URL).unwrap();
        let signed = RequestSigner::new("demo", "s3cr3t")
            .sign("POST", &url, &params)
            .unwrap();
        LaunchRequestBuilder::default()
            .method(Method::POST)
            .url(url)
            .params(signed)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_verify_valid_launch() {
        let state = state_with(registry_with_demo());
        let verifier = LaunchVerifier::new(&Config::default()).unwrap();

        let launch = verifier
            .verify_launch(&state, &signed_request(lti_parameters()))
            .await
            .unwrap();

        assert_eq!("demo", launch.consumer().consumer_key);
        assert_eq!(MessageType::BasicLaunchRequest, launch.message_type());
        assert!(launch.is_instructor());
    }

    #[tokio::test]
    async fn test_verify_order_independent() {
        let state = state_with(registry_with_demo());
        let verifier = LaunchVerifier::new(&Config::default()).unwrap();

        let mut request = signed_request(lti_parameters());
        request.params.reverse();
        assert!(verifier.verify_launch(&state, &request).await.is_ok());
    }

    #[tokio::test]
    #[traced_test]
    async fn test_verify_truncated_signature() {
        let state = state_with(registry_with_demo());
        let verifier = LaunchVerifier::new(&Config::default()).unwrap();

        let mut request = signed_request(lti_parameters());
        for (key, value) in request.params.iter_mut() {
            if key == "oauth_signature" {
                value.pop();
            }
        }
        match verifier.verify_launch(&state, &request).await {
            Err(VerificationError::InvalidSignature) => {}
            _ => panic!("truncated signature must not verify"),
        }
    }

    #[tokio::test]
    async fn test_verify_tampered_parameter() {
        let state = state_with(registry_with_demo());
        let verifier = LaunchVerifier::new(&Config::default()).unwrap();

        let mut request = signed_request(lti_parameters());
        for (key, value) in request.params.iter_mut() {
            if key == "roles" {
                *value = "Administrator".into();
            }
        }
        match verifier.verify_launch(&state, &request).await {
            Err(VerificationError::InvalidSignature) => {}
            _ => panic!("no parameter tampering survives verification"),
        }
    }

    #[tokio::test]
    async fn test_verify_wrong_secret() {
        let state = state_with(registry_with_demo());
        let verifier = LaunchVerifier::new(&Config::default()).unwrap();

        let url = Url::parse(LAUNCH_URL).unwrap();
        let signed = RequestSigner::new("demo", "not-the-registered-secret")
            .sign("POST", &url, &lti_parameters())
            .unwrap();
        let request = LaunchRequestBuilder::default()
            .url(url)
            .params(signed)
            .build()
            .unwrap();
        match verifier.verify_launch(&state, &request).await {
            Err(VerificationError::InvalidSignature) => {}
            _ => panic!("signature computed with another secret must not verify"),
        }
    }

    #[tokio::test]
    async fn test_verify_unknown_consumer() {
        let state = state_with(registry_with_demo());
        let verifier = LaunchVerifier::new(&Config::default()).unwrap();

        let url = Url::parse(LAUNCH_URL).unwrap();
        let signed = RequestSigner::new("stranger", "s3cr3t")
            .sign("POST", &url, &lti_parameters())
            .unwrap();
        let request = LaunchRequestBuilder::default()
            .url(url)
            .params(signed)
            .build()
            .unwrap();
        match verifier.verify_launch(&state, &request).await {
            Err(VerificationError::UnknownConsumer(key)) => assert_eq!("stranger", key),
            _ => panic!("unknown consumer key must be rejected"),
        }
    }

    #[tokio::test]
    async fn test_verify_missing_consumer_key() {
        let state = state_with(MockConsumerProvider::default());
        let verifier = LaunchVerifier::new(&Config::default()).unwrap();

        let request = LaunchRequestBuilder::default()
            .url(Url::parse(LAUNCH_URL).unwrap())
            .params(lti_parameters())
            .build()
            .unwrap();
        match verifier.verify_launch(&state, &request).await {
            Err(VerificationError::MissingConsumerKey) => {}
            _ => panic!("request without oauth_consumer_key must be rejected"),
        }
    }

    #[tokio::test]
    async fn test_verify_stale_timestamp() {
        let state = state_with(registry_with_demo());
        let verifier = LaunchVerifier::new(&Config::default()).unwrap();

        let url = Url::parse(LAUNCH_URL).unwrap();
        let signed = RequestSigner::new("demo", "s3cr3t")
            .sign_at(
                "POST",
                &url,
                &lti_parameters(),
                Utc::now().timestamp() - 7200,
                "a-unique-nonce",
            )
            .unwrap();
        let request = LaunchRequestBuilder::default()
            .url(url)
            .params(signed)
            .build()
            .unwrap();
        match verifier.verify_launch(&state, &request).await {
            Err(VerificationError::StaleRequest { window, .. }) => assert_eq!(3600, window),
            _ => panic!("timestamp outside the freshness window must be rejected"),
        }
    }

    #[tokio::test]
    async fn test_verify_invalid_launch_param() {
        let state = state_with(MockConsumerProvider::default());
        let verifier = LaunchVerifier::new(&Config::default()).unwrap();

        let mut params = lti_parameters();
        params.push(("invalid_param".into(), "hello!".into()));
        let request = signed_request(params);
        match verifier.verify_launch(&state, &request).await {
            Err(VerificationError::MalformedParameters(LaunchParamsError::InvalidParam(
                param,
            ))) => assert_eq!("invalid_param", param),
            _ => panic!("invalid launch param must be rejected"),
        }
    }

    #[tokio::test]
    async fn test_verify_unsupported_signature_method() {
        let state = state_with(MockConsumerProvider::default());
        let verifier = LaunchVerifier::new(&Config::default()).unwrap();

        let mut request = signed_request(lti_parameters());
        for (key, value) in request.params.iter_mut() {
            if key == "oauth_signature_method" {
                *value = "PLAINTEXT".into();
            }
        }
        match verifier.verify_launch(&state, &request).await {
            Err(VerificationError::MalformedParameters(LaunchParamsError::InvalidValue {
                param,
                ..
            })) => assert_eq!("oauth_signature_method", param),
            _ => panic!("non HMAC-SHA1 signature methods are not supported"),
        }
    }

    #[tokio::test]
    async fn test_verify_query_parameters_participate() {
        // Moodle-style launch URLs carry query parameters; they are part
        // of the signed parameter set.
        let state = state_with(registry_with_demo());
        let verifier = LaunchVerifier::new(&Config::default()).unwrap();

        let url = Url::parse("https://provider.example/launch?id=42").unwrap();
        let signed = RequestSigner::new("demo", "s3cr3t")
            .sign("POST", &url, &lti_parameters())
            .unwrap();
        let request = LaunchRequestBuilder::default()
            .url(url)
            .params(signed)
            .build()
            .unwrap();
        assert!(verifier.verify_launch(&state, &request).await.is_ok());

        let tampered_url = Url::parse("https://provider.example/launch?id=43").unwrap();
        let mut tampered = request.clone();
        tampered.url = tampered_url;
        match verifier.verify_launch(&state, &tampered).await {
            Err(VerificationError::InvalidSignature) => {}
            _ => panic!("query string tampering must not survive verification"),
        }
    }
}
