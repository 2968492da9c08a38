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
//! # LTI launch dispatch
//!
//! The HTTP surface of the toolbox. An application implements
//! [LtiLaunchView] for its launch endpoint and mounts the router built by
//! [launch_router] wherever its consumers point their launches:
//!
//! - a verified launch is handed to [LtiLaunchView::on_valid] together
//!   with the typed [LtiLaunch];
//! - a rejected launch goes to [LtiLaunchView::on_invalid] with the
//!   verification failure reason, answered with HTTP 403 unless the view
//!   overrides it.
//!
//! Each request is verified exactly once; there is no retry, the
//! launching consumer is responsible for resubmission.
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Extension, Router,
    extract::{OriginalUri, RawForm, State},
    http::{HeaderMap, Method, Uri, header},
    response::{IntoResponse, Response},
    routing::post,
};
use url::Url;

pub mod error;

pub use error::LtiApiError;

use crate::launch::LtiLaunch;
use crate::service::ServiceState;
use crate::verifier::{LaunchRequest, LaunchRequestBuilder, VerifierApi};
use crate::verifier::error::VerificationError;

/// Extension points of a launch endpoint.
///
/// Verification is already done when either method runs; the view only
/// decides what the HTTP response looks like.
#[async_trait]
pub trait LtiLaunchView: Send + Sync + 'static {
    /// Process a verified LTI launch request.
    async fn on_valid(&self, state: &ServiceState, launch: LtiLaunch) -> Response;

    /// Process a launch request that failed verification.
    async fn on_invalid(&self, _state: &ServiceState, error: VerificationError) -> Response {
        LtiApiError::from(error).into_response()
    }
}

/// Build a router serving LTI launches at its root, dispatching to the
/// given view. The LTI 1.0 spec permits GET launches next to the usual
/// form POST, so both methods are routed.
pub fn launch_router<V: LtiLaunchView>(view: V) -> Router<ServiceState> {
    Router::new()
        .route("/", post(launch::<V>).get(launch::<V>))
        .layer(Extension(Arc::new(view)))
}

#[tracing::instrument(name = "api::lti_launch", level = "debug", skip_all)]
async fn launch<V: LtiLaunchView>(
    State(state): State<ServiceState>,
    Extension(view): Extension<Arc<V>>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    RawForm(body): RawForm,
) -> Response {
    let request = match build_launch_request(&state, method, &uri, &headers, &body) {
        Ok(request) => request,
        Err(error) => return error.into_response(),
    };

    match state
        .provider
        .get_verifier()
        .verify_launch(&state, &request)
        .await
    {
        Ok(launch) => view.on_valid(&state, launch).await,
        Err(error) => view.on_invalid(&state, error).await,
    }
}

/// Rebuild the [LaunchRequest] the consumer signed: the absolute launch
/// URL against the configured public endpoint (falling back to the Host
/// header) and the decoded parameter pairs.
fn build_launch_request(
    state: &ServiceState,
    method: Method,
    uri: &Uri,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<LaunchRequest, LtiApiError> {
    let base = state
        .config
        .default
        .as_ref()
        .and_then(|dflt| dflt.public_endpoint.clone())
        .or_else(|| {
            headers
                .get(header::HOST)
                .and_then(|header| header.to_str().map(|val| format!("http://{val}")).ok())
        })
        .unwrap_or_else(|| "http://localhost".to_string());

    // `RawForm` reads the query string on GET, so the query must not stay
    // in the URL too or its pairs would be signed twice.
    let target = if method == Method::GET {
        uri.path().to_string()
    } else {
        uri.to_string()
    };
    let url = Url::parse(&format!("{}{}", base.trim_end_matches('/'), target))?;

    let params: Vec<(String, String)> = url::form_urlencoded::parse(body)
        .into_owned()
        .collect();

    let referer = headers
        .get(header::REFERER)
        .and_then(|referer| referer.to_str().ok())
        .and_then(|referer| Url::parse(referer).ok());

    let mut builder = LaunchRequestBuilder::default();
    builder.method(method).url(url).params(params);
    if let Some(referer) = referer {
        builder.referer(referer);
    }
    builder
        .build()
        .map_err(|err| LtiApiError::InternalError(err.to_string()))
}
