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

//! # OAuth1 signature core
//!
//! The RFC 5849 subset LTI 1.0/1.1 launch verification depends on:
//! parameter normalization, signature base-string construction and
//! HMAC-SHA1 signing over a shared secret. Interoperability lives and
//! dies on the normalization details (the OAuth percent-encode set,
//! alphabetical ordering after encoding, repeated parameter names, query
//! parameters folded into the parameter set), because the diverse LMS
//! implementations in the wild encode their form bodies differently.
//!
//! The [RequestSigner] covers the consumer side of the handshake and is
//! what downstream test suites use to build signed launch fixtures.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::Utc;
use hmac::{Hmac, Mac};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use secrecy::{ExposeSecret, SecretString};
use sha1::Sha1;
use subtle::ConstantTimeEq;
use url::Url;
use uuid::Uuid;

pub mod error;

pub use error::OAuth1Error;

type HmacSha1 = Hmac<Sha1>;

/// The only signature method the LTI 1.0/1.1 domain uses.
pub const SIGNATURE_METHOD_HMAC_SHA1: &str = "HMAC-SHA1";

/// Per RFC 5849 section 3.6 only ALPHA / DIGIT / `-` / `.` / `_` / `~`
/// stay unencoded.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a string with the OAuth encode set.
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, OAUTH_ENCODE_SET).to_string()
}

/// Base string URI per RFC 5849 section 3.4.1.2: lowercase scheme and
/// host, default ports elided, query and fragment stripped. The `url`
/// crate already normalizes case and default ports at parse time.
pub fn normalized_url(url: &Url) -> Result<String, OAuth1Error> {
    let host = url
        .host_str()
        .ok_or_else(|| OAuth1Error::MissingHost(url.to_string()))?;
    let port = url
        .port()
        .map(|port| format!(":{port}"))
        .unwrap_or_default();
    Ok(format!("{}://{}{}{}", url.scheme(), host, port, url.path()))
}

/// Construct the signature base string for a request.
///
/// `params` are the decoded body/authorization parameters; query
/// parameters of `url` are folded in, `oauth_signature` is excluded, and
/// every occurrence of a repeated name participates.
pub fn signature_base_string(
    method: &str,
    url: &Url,
    params: &[(String, String)],
) -> Result<String, OAuth1Error> {
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| (percent_encode(&key), percent_encode(&value)))
        .chain(
            params
                .iter()
                .filter(|(key, _)| key != "oauth_signature")
                .map(|(key, value)| (percent_encode(key), percent_encode(value))),
        )
        .collect();
    // RFC 5849 section 3.4.1.3.2: sort by encoded name, then value.
    pairs.sort();

    let normalized = pairs
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    Ok(format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(&normalized_url(url)?),
        percent_encode(&normalized)
    ))
}

fn hmac_sha1_digest(base_string: &str, consumer_secret: &str, token_secret: &str) -> [u8; 20] {
    let key = format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    );
    let mut mac =
        HmacSha1::new_from_slice(key.as_bytes()).expect("hmac accepts keys of any length");
    mac.update(base_string.as_bytes());
    mac.finalize().into_bytes().into()
}

/// Compute the base64 HMAC-SHA1 signature of a base string. LTI launches
/// are two-legged OAuth1, so the token secret is usually empty.
pub fn sign_hmac_sha1(base_string: &str, consumer_secret: &str, token_secret: &str) -> String {
    STANDARD.encode(hmac_sha1_digest(base_string, consumer_secret, token_secret))
}

/// Verify a supplied base64 signature against the secret in constant
/// time. Undecodable or wrong-length signatures can not match anything
/// and are rejected outright.
pub fn verify_hmac_sha1(
    base_string: &str,
    consumer_secret: &str,
    token_secret: &str,
    provided_signature: &str,
) -> bool {
    let expected = hmac_sha1_digest(base_string, consumer_secret, token_secret);
    match STANDARD.decode(provided_signature) {
        Ok(provided) if provided.len() == expected.len() => {
            bool::from(expected.ct_eq(&provided))
        }
        _ => false,
    }
}

/// Consumer-side signer producing the OAuth1 parameters of a launch
/// request. The provider only verifies; this exists for test fixtures
/// and for tools that need to emit launches (e.g. a sandbox consumer).
#[derive(Clone, Debug)]
pub struct RequestSigner {
    consumer_key: String,
    consumer_secret: SecretString,
}

impl RequestSigner {
    pub fn new<K: Into<String>, S: Into<SecretString>>(consumer_key: K, consumer_secret: S) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
        }
    }

    /// Sign `params` for a launch of `url`, stamping the current time and
    /// a random nonce. Returns the full parameter list including the
    /// `oauth_*` parameters and the signature.
    pub fn sign(
        &self,
        method: &str,
        url: &Url,
        params: &[(String, String)],
    ) -> Result<Vec<(String, String)>, OAuth1Error> {
        self.sign_at(
            method,
            url,
            params,
            Utc::now().timestamp(),
            &Uuid::new_v4().simple().to_string(),
        )
    }

    /// Sign with an explicit timestamp and nonce.
    pub fn sign_at(
        &self,
        method: &str,
        url: &Url,
        params: &[(String, String)],
        timestamp: i64,
        nonce: &str,
    ) -> Result<Vec<(String, String)>, OAuth1Error> {
        let mut signed: Vec<(String, String)> = params.to_vec();
        signed.push(("oauth_version".into(), "1.0".into()));
        signed.push((
            "oauth_signature_method".into(),
            SIGNATURE_METHOD_HMAC_SHA1.into(),
        ));
        signed.push(("oauth_consumer_key".into(), self.consumer_key.clone()));
        signed.push(("oauth_timestamp".into(), timestamp.to_string()));
        signed.push(("oauth_nonce".into(), nonce.into()));

        let base_string = signature_base_string(method, url, &signed)?;
        let signature = sign_hmac_sha1(&base_string, self.consumer_secret.expose_secret(), "");
        signed.push(("oauth_signature".into(), signature));
        Ok(signed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_percent_encode() {
        assert_eq!("abcABC123", percent_encode("abcABC123"));
        assert_eq!("-._~", percent_encode("-._~"));
        assert_eq!("%20", percent_encode(" "));
        assert_eq!("%25", percent_encode("%"));
        assert_eq!("a%2Bb", percent_encode("a+b"));
        assert_eq!("%26%3D%2A", percent_encode("&=*"));
        assert_eq!("%E2%98%83", percent_encode("\u{2603}"));
    }

    #[test]
    fn test_normalized_url() {
        let url = Url::parse("HTTP://Example.COM:80/launch?foo=bar#frag").unwrap();
        assert_eq!("http://example.com/launch", normalized_url(&url).unwrap());

        let url = Url::parse("https://example.com:8443/lti/launch").unwrap();
        assert_eq!(
            "https://example.com:8443/lti/launch",
            normalized_url(&url).unwrap()
        );
    }

    // The reference HMAC-SHA1 example from the original OAuth Core 1.0
    // specification (photos.example.net).
    #[test]
    fn test_reference_vector() {
        let url = Url::parse("http://photos.example.net/photos?file=vacation.jpg&size=original")
            .unwrap();
        let params = pairs(&[
            ("oauth_consumer_key", "dpf43f3p2l4k3l03"),
            ("oauth_token", "nnch734d00sl2jdk"),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", "1191242096"),
            ("oauth_nonce", "kllo9940pd9333jh"),
            ("oauth_version", "1.0"),
        ]);

        let base_string = signature_base_string("GET", &url, &params).unwrap();
        assert_eq!(
            "GET&http%3A%2F%2Fphotos.example.net%2Fphotos&file%3Dvacation.jpg%26\
             oauth_consumer_key%3Ddpf43f3p2l4k3l03%26oauth_nonce%3Dkllo9940pd9333jh%26\
             oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1191242096%26\
             oauth_token%3Dnnch734d00sl2jdk%26oauth_version%3D1.0%26size%3Doriginal",
            base_string
        );

        let signature = sign_hmac_sha1(&base_string, "kd94hf93k423kf44", "pfkkdhi9sl3r4s00");
        assert_eq!("tR3+Ty81lMeYAr/Fid0kMTYa/WM=", signature);
        assert!(verify_hmac_sha1(
            &base_string,
            "kd94hf93k423kf44",
            "pfkkdhi9sl3r4s00",
            &signature
        ));
    }

    #[test]
    fn test_base_string_order_independent() {
        let url = Url::parse("https://provider.example/launch").unwrap();
        let forward = pairs(&[("b", "2"), ("a", "1"), ("c", "3")]);
        let backward = pairs(&[("c", "3"), ("a", "1"), ("b", "2")]);
        assert_eq!(
            signature_base_string("POST", &url, &forward).unwrap(),
            signature_base_string("POST", &url, &backward).unwrap()
        );
    }

    #[test]
    fn test_base_string_repeated_parameters() {
        let url = Url::parse("https://provider.example/launch").unwrap();
        let base_string =
            signature_base_string("POST", &url, &pairs(&[("a", "2"), ("a", "1")])).unwrap();
        // Repeated names sort by value and all occurrences survive.
        assert!(base_string.ends_with(&percent_encode("a=1&a=2")));
    }

    #[test]
    fn test_base_string_excludes_signature() {
        let url = Url::parse("https://provider.example/launch").unwrap();
        let with_signature = pairs(&[("a", "1"), ("oauth_signature", "xxx")]);
        let without = pairs(&[("a", "1")]);
        assert_eq!(
            signature_base_string("POST", &url, &with_signature).unwrap(),
            signature_base_string("POST", &url, &without).unwrap()
        );
    }

    #[test]
    fn test_sign_and_verify_roundtrip() {
        let url = Url::parse("https://provider.example/launch").unwrap();
        let signer = RequestSigner::new("demo", "s3cr3t");
        let signed = signer
            .sign("POST", &url, &pairs(&[("resource_link_id", "abc123")]))
            .unwrap();

        let signature = signed
            .iter()
            .find(|(key, _)| key == "oauth_signature")
            .map(|(_, value)| value.clone())
            .unwrap();
        let base_string = signature_base_string("POST", &url, &signed).unwrap();
        assert!(verify_hmac_sha1(&base_string, "s3cr3t", "", &signature));

        // A different secret must not verify.
        assert!(!verify_hmac_sha1(&base_string, "other", "", &signature));

        // A truncated signature must not verify.
        let truncated = &signature[..signature.len() - 1];
        assert!(!verify_hmac_sha1(&base_string, "s3cr3t", "", truncated));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        assert!(!verify_hmac_sha1("base", "secret", "", "not base64 !!"));
        assert!(!verify_hmac_sha1("base", "secret", "", ""));
    }
}
