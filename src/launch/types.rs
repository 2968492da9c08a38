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

use std::fmt;

use url::Url;

pub const BASIC_LAUNCH_REQUEST: &str = "basic-lti-launch-request";
pub const CONTENT_ITEM_SELECTION_REQUEST: &str = "ContentItemSelectionRequest";
pub const CONTENT_ITEM_SELECTION: &str = "ContentItemSelection";

/// The `lti_message_type` of a launch request.
///
/// Consumers are not required to restrict this field, so unrecognized
/// values pass through as an opaque string instead of failing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MessageType {
    /// A regular resource launch.
    BasicLaunchRequest,
    /// A Content-Item (deep linking) selection request.
    ContentItemSelectionRequest,
    /// The selection response of a Content-Item flow.
    ContentItemSelection,
    /// Anything else the consumer decided to send.
    Unknown(String),
}

impl From<&str> for MessageType {
    fn from(value: &str) -> Self {
        match value {
            BASIC_LAUNCH_REQUEST => Self::BasicLaunchRequest,
            CONTENT_ITEM_SELECTION_REQUEST => Self::ContentItemSelectionRequest,
            CONTENT_ITEM_SELECTION => Self::ContentItemSelection,
            other => Self::Unknown(other.into()),
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BasicLaunchRequest => f.write_str(BASIC_LAUNCH_REQUEST),
            Self::ContentItemSelectionRequest => f.write_str(CONTENT_ITEM_SELECTION_REQUEST),
            Self::ContentItemSelection => f.write_str(CONTENT_ITEM_SELECTION),
            Self::Unknown(other) => f.write_str(other),
        }
    }
}

/// Recognized LTI user roles.
///
/// The `roles` launch parameter is a comma-separated list mixing plain
/// handles (`Instructor`) with LIS URNs
/// (`urn:lti:role:ims/lis/Instructor`). Tokens that map to none of the
/// known roles are ignored, per the leniency the spec requires towards
/// non-conformant consumers.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LtiRole {
    Administrator,
    ContentDeveloper,
    Instructor,
    Learner,
    Mentor,
    Staff,
    Student,
    Teacher,
    TeachingAssistant,
}

impl LtiRole {
    /// Parse a single role token, URN-prefixed or not, case-insensitive.
    pub fn parse(token: &str) -> Option<Self> {
        // `urn:lti:role:ims/lis/Instructor` and the plain `Instructor`
        // both end on the same handle.
        let handle = token.rsplit('/').next().unwrap_or(token).trim();
        match handle.to_ascii_lowercase().as_str() {
            "administrator" => Some(Self::Administrator),
            "contentdeveloper" => Some(Self::ContentDeveloper),
            "instructor" => Some(Self::Instructor),
            "learner" => Some(Self::Learner),
            "mentor" => Some(Self::Mentor),
            "staff" => Some(Self::Staff),
            "student" => Some(Self::Student),
            "teacher" => Some(Self::Teacher),
            "teachingassistant" => Some(Self::TeachingAssistant),
            _ => None,
        }
    }
}

/// Course information extracted from the launch context parameters.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CourseInfo {
    pub school_name: Option<String>,
    pub course_name: Option<String>,
    pub course_run: Option<String>,
}

/// The Content-Item selection settings of a deep-linking request.
///
/// Only present when the launch `lti_message_type` is
/// `ContentItemSelectionRequest`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContentItemRequest {
    /// Media types the consumer accepts, most preferred first.
    pub accept_media_types: Vec<String>,
    /// Document targets the consumer can present items in.
    pub accept_presentation_document_targets: Vec<String>,
    /// Where the selection response must be POSTed back to.
    pub content_item_return_url: Option<Url>,
    /// Whether more than one item may be returned.
    pub accept_multiple: bool,
    /// Whether unsigned responses are acceptable.
    pub accept_unsigned: bool,
    /// Whether the item should be persisted without further confirmation.
    pub auto_create: bool,
    /// Default title suggested by the consumer.
    pub title: Option<String>,
    /// Default text suggested by the consumer.
    pub text: Option<String>,
    /// Opaque value to round-trip back in the response.
    pub data: Option<String>,
}
