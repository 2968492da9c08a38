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

//! # LTI launch wrapper
//!
//! [LtiLaunch] wraps the validated parameters of a verified launch
//! request and exposes typed accessors over them: the message type, the
//! user roles, course information, and the format quirks of the two
//! dominant consumer implementations (Moodle and Open edX) that a tool
//! regularly has to branch on.

use std::collections::HashSet;

use url::Url;

pub mod error;
pub mod params;
pub mod types;

pub use error::LaunchParamsError;
pub use params::LaunchParams;
pub use types::{ContentItemRequest, CourseInfo, LtiRole, MessageType};

use crate::consumer::Consumer;

/// A verified LTI launch request.
#[derive(Clone, Debug)]
pub struct LtiLaunch {
    consumer: Consumer,
    params: LaunchParams,
    referer: Option<Url>,
}

impl LtiLaunch {
    pub fn new(consumer: Consumer, params: LaunchParams, referer: Option<Url>) -> Self {
        Self {
            consumer,
            params,
            referer,
        }
    }

    /// The consumer that initiated the launch request.
    pub fn consumer(&self) -> &Consumer {
        &self.consumer
    }

    /// The validated launch parameters.
    pub fn params(&self) -> &LaunchParams {
        &self.params
    }

    /// Retrieve an LTI parameter value given its name.
    pub fn get_param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    /// The declared `lti_message_type`.
    pub fn message_type(&self) -> MessageType {
        MessageType::from(self.get_param("lti_message_type").unwrap_or_default())
    }

    /// The declared `lti_version`.
    pub fn lti_version(&self) -> Option<&str> {
        self.get_param("lti_version")
    }

    /// The launching user id, when the consumer sent one.
    pub fn user_id(&self) -> Option<&str> {
        self.get_param("user_id")
    }

    /// Normalized (lowercased) role tokens as sent by the consumer,
    /// including the ones that map to no recognized role.
    pub fn raw_roles(&self) -> Vec<String> {
        self.params
            .get_list("roles")
            .iter()
            .map(|role| role.to_lowercase())
            .collect()
    }

    /// Recognized roles of the authenticated user. Deduplicated,
    /// order-independent; unrecognized tokens are ignored.
    pub fn roles(&self) -> HashSet<LtiRole> {
        self.params
            .get_list("roles")
            .iter()
            .filter_map(|token| LtiRole::parse(token))
            .collect()
    }

    /// Whether the user holds any of the given roles.
    pub fn has_any_of_roles(&self, roles: &[LtiRole]) -> bool {
        let present = self.roles();
        roles.iter().any(|role| present.contains(role))
    }

    /// Whether the launching user teaches the course.
    pub fn is_instructor(&self) -> bool {
        self.has_any_of_roles(&[LtiRole::Instructor, LtiRole::Teacher])
    }

    /// Whether the launching user administers the platform.
    pub fn is_administrator(&self) -> bool {
        self.has_any_of_roles(&[LtiRole::Administrator])
    }

    /// Whether the launching user takes the course.
    pub fn is_learner(&self) -> bool {
        self.has_any_of_roles(&[LtiRole::Learner, LtiRole::Student])
    }

    /// Whether the launching user may edit the tool content.
    pub fn can_edit_content(&self) -> bool {
        self.has_any_of_roles(&[
            LtiRole::Administrator,
            LtiRole::ContentDeveloper,
            LtiRole::Instructor,
            LtiRole::Teacher,
        ])
    }

    /// The context title, defaulting to the context id.
    pub fn context_title(&self) -> Option<&str> {
        self.get_param("context_title")
            .or_else(|| self.get_param("context_id"))
    }

    /// The resource link title, defaulting to the resource link id.
    pub fn resource_link_title(&self) -> Option<&str> {
        self.get_param("resource_link_title")
            .or_else(|| self.get_param("resource_link_id"))
    }

    /// Check if the launch request comes from Open edX, whose context ids
    /// follow the `course-v1:<school>+<course>+<run>` convention.
    pub fn is_edx_format(&self) -> bool {
        self.edx_course_parts().is_some()
    }

    /// Check if the launch request comes from Moodle.
    pub fn is_moodle_format(&self) -> bool {
        self.get_param("tool_consumer_info_product_family_code")
            .is_some_and(|family| family.eq_ignore_ascii_case("moodle"))
    }

    fn edx_course_parts(&self) -> Option<&str> {
        let context_id = self.get_param("context_id")?;
        let rest = context_id.strip_prefix("course-v")?;
        let (version, course) = rest.split_once(':')?;
        if version.len() == 1 && version.chars().all(|c| c.is_ascii_digit()) {
            Some(course)
        } else {
            None
        }
    }

    /// Course information carried by the launch request. Open edX encodes
    /// school, course and run in the context id; everything else falls
    /// back to the instance name and context title.
    pub fn course_info(&self) -> CourseInfo {
        if let Some(course) = self.edx_course_parts() {
            let mut parts = course.split('+');
            return CourseInfo {
                school_name: parts.next().map(Into::into),
                course_name: parts.next().map(Into::into),
                course_run: parts.next().map(Into::into),
            };
        }

        CourseInfo {
            school_name: self
                .get_param("tool_consumer_instance_name")
                .map(Into::into),
            course_name: self.get_param("context_title").map(Into::into),
            course_run: None,
        }
    }

    /// Best-effort reconstruction of the page the launch originated from,
    /// built from the consumer site URL and the context id for the
    /// consumer implementations whose URL layout is known, with the
    /// request referer as a last resort.
    pub fn origin_url(&self) -> Option<Url> {
        let base = self
            .consumer
            .url
            .as_ref()
            .map(|url| url.as_str().trim_end_matches('/').to_string());

        if let (Some(base), Some(context_id)) = (&base, self.get_param("context_id")) {
            if self.is_moodle_format() {
                return Url::parse(&format!("{base}/course/view.php?id={context_id}")).ok();
            }
            if self.is_edx_format() {
                return Url::parse(&format!("{base}/course/{context_id}")).ok();
            }
        }

        self.referer.clone()
    }

    /// The Content-Item selection settings of a deep-linking request, or
    /// None when the message type is not `ContentItemSelectionRequest`.
    pub fn content_item_request(&self) -> Option<ContentItemRequest> {
        if self.message_type() != MessageType::ContentItemSelectionRequest {
            return None;
        }
        Some(ContentItemRequest {
            accept_media_types: self.params.get_list("accept_media_types"),
            accept_presentation_document_targets: self
                .params
                .get_list("accept_presentation_document_targets"),
            content_item_return_url: self
                .get_param("content_item_return_url")
                .and_then(|url| Url::parse(url).ok()),
            accept_multiple: self.bool_param("accept_multiple"),
            accept_unsigned: self.bool_param("accept_unsigned"),
            auto_create: self.bool_param("auto_create"),
            title: self.get_param("title").map(Into::into),
            text: self.get_param("text").map(Into::into),
            data: self.get_param("data").map(Into::into),
        })
    }

    /// The selected content items of a `ContentItemSelection` message, or
    /// None when absent or not JSON.
    pub fn content_items(&self) -> Option<serde_json::Value> {
        if self.message_type() != MessageType::ContentItemSelection {
            return None;
        }
        self.get_param("content_items")
            .and_then(|items| serde_json::from_str(items).ok())
    }

    fn bool_param(&self, name: &str) -> bool {
        self.get_param(name)
            .is_some_and(|value| value.eq_ignore_ascii_case("true"))
    }
}
