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
//! Launch parameter errors.

use thiserror::Error;

/// Launch parameter validation error.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LaunchParamsError {
    /// The parameter is outside the LTI launch vocabulary for the
    /// declared message type.
    #[error("{0} is not a valid launch param")]
    InvalidParam(String),

    /// The parameter is present but its value is unusable for the
    /// declared message type.
    #[error("invalid value for param {param}: {value}")]
    InvalidValue { param: String, value: String },

    /// A parameter required for the declared message type is absent.
    #[error("missing param: {0}")]
    MissingParam(String),
}
