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

//! # Launch parameter vocabulary and validation
//!
//! LTI 1.0/1.1 fixes the set of parameter names a launch request may
//! carry; anything outside the vocabulary (except the `custom_` and
//! `ext_` extension namespaces) is a malformed request. The required set
//! depends on the declared `lti_message_type`: a Content-Item selection
//! request drops the resource-link parameters and requires the
//! deep-linking ones instead.

use std::collections::BTreeMap;

use crate::launch::error::LaunchParamsError;
use crate::launch::types::CONTENT_ITEM_SELECTION_REQUEST;

pub const LAUNCH_PARAMS_REQUIRED: &[&str] =
    &["lti_message_type", "lti_version", "resource_link_id"];

const LAUNCH_PARAMS_RECOMMENDED: &[&str] = &[
    "context_id",
    "context_label",
    "context_title",
    "context_type",
    "launch_presentation_css_url",
    "launch_presentation_document_target",
    "launch_presentation_height",
    "launch_presentation_locale",
    "launch_presentation_return_url",
    "launch_presentation_width",
    "lis_person_contact_email_primary",
    "lis_person_name_family",
    "lis_person_name_full",
    "lis_person_name_given",
    "resource_link_description",
    "resource_link_title",
    "roles",
    "role_scope_mentor",
    "tool_consumer_info_product_family_code",
    "tool_consumer_info_version",
    "tool_consumer_instance_contact_email",
    "tool_consumer_instance_description",
    "tool_consumer_instance_guid",
    "tool_consumer_instance_name",
    "tool_consumer_instance_url",
    "user_id",
    "user_image",
];

const LAUNCH_PARAMS_LIS: &[&str] = &[
    "lis_course_offering_sourcedid",
    "lis_course_section_sourcedid",
    "lis_outcome_service_url",
    "lis_person_sourcedid",
    "lis_result_sourcedid",
];

const LAUNCH_PARAMS_RETURN_URL: &[&str] =
    &["lti_errorlog", "lti_errormsg", "lti_log", "lti_msg"];

const LAUNCH_PARAMS_OAUTH: &[&str] = &[
    "oauth_callback",
    "oauth_consumer_key",
    "oauth_nonce",
    "oauth_signature",
    "oauth_signature_method",
    "oauth_timestamp",
    "oauth_token",
    "oauth_version",
];

/// Parameters whose value is a comma-separated list.
pub const LAUNCH_PARAMS_IS_LIST: &[&str] = &[
    "accept_media_types",
    "accept_presentation_document_targets",
    "context_type",
    "role_scope_mentor",
    "roles",
];

const LAUNCH_PARAMS_CANVAS: &[&str] = &["selection_directive", "text"];

const CONTENT_PARAMS_REQUEST: &[&str] = &[
    "accept_copy_advice",
    "accept_media_types",
    "accept_multiple",
    "accept_presentation_document_targets",
    "accept_unsigned",
    "auto_create",
    "can_confirm",
    "content_item_return_url",
    "data",
    "title",
];

const CONTENT_PARAMS_RESPONSE: &[&str] = &[
    "content_items",
    "lti_errorlog",
    "lti_errormsg",
    "lti_log",
    "lti_msg",
];

const REGISTRATION_PARAMS: &[&str] = &["reg_key", "reg_password", "tc_profile_url"];

pub const SELECTION_PARAMS_REQUIRED: &[&str] = &[
    "lti_message_type",
    "lti_version",
    "accept_media_types",
    "accept_presentation_document_targets",
    "content_item_return_url",
];

const SELECTION_PARAMS_SHOULD_NOT_BE_PASSED: &[&str] = &[
    "resource_link_id",
    "resource_link_title",
    "resource_link_description",
    "launch_presentation_return_url",
    "lis_result_sourcedid",
];

fn in_vocabulary(param: &str) -> bool {
    [
        CONTENT_PARAMS_REQUEST,
        CONTENT_PARAMS_RESPONSE,
        LAUNCH_PARAMS_CANVAS,
        LAUNCH_PARAMS_LIS,
        LAUNCH_PARAMS_OAUTH,
        LAUNCH_PARAMS_RECOMMENDED,
        LAUNCH_PARAMS_REQUIRED,
        LAUNCH_PARAMS_RETURN_URL,
        REGISTRATION_PARAMS,
    ]
    .iter()
    .any(|set| set.contains(&param))
}

/// The params of an LTI request. Strictly enforces that params are valid
/// LTI params for the declared message type; the `custom_` and `ext_`
/// namespaces are always allowed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LaunchParams {
    params: BTreeMap<String, String>,
}

impl LaunchParams {
    /// Build and validate launch params from decoded form pairs. The last
    /// occurrence of a repeated name wins (every occurrence still counts
    /// for signature purposes, which operate on the raw pairs).
    pub fn try_from_pairs<I>(pairs: I) -> Result<Self, LaunchParamsError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let params: BTreeMap<String, String> = pairs.into_iter().collect();
        let selection = params
            .get("lti_message_type")
            .is_some_and(|message_type| message_type == CONTENT_ITEM_SELECTION_REQUEST);

        for param in params.keys() {
            if !Self::valid_param(param, selection) {
                return Err(LaunchParamsError::InvalidParam(param.clone()));
            }
        }
        for required in Self::required_params(selection) {
            if !params.contains_key(*required) {
                return Err(LaunchParamsError::MissingParam((*required).into()));
            }
        }

        Ok(Self { params })
    }

    fn valid_param(param: &str, selection: bool) -> bool {
        if param.starts_with("custom_") || param.starts_with("ext_") {
            return true;
        }
        if selection && SELECTION_PARAMS_SHOULD_NOT_BE_PASSED.contains(&param) {
            return false;
        }
        in_vocabulary(param)
    }

    fn required_params(selection: bool) -> &'static [&'static str] {
        if selection {
            SELECTION_PARAMS_REQUIRED
        } else {
            LAUNCH_PARAMS_REQUIRED
        }
    }

    /// Get a parameter value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Get a comma-separated list parameter, items trimmed.
    pub fn get_list(&self, name: &str) -> Vec<String> {
        self.get(name)
            .map(|value| {
                value
                    .split(',')
                    .map(|item| item.trim().to_string())
                    .filter(|item| !item.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Iterate over the parameters in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// URL encoded representation of the parameter list.
    pub fn urlencoded(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.params {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}
