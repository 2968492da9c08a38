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
//! OAuth1 signature errors.

use thiserror::Error;

/// OAuth1 signature computation error.
#[derive(Error, Debug)]
pub enum OAuth1Error {
    /// The launch URL has no host to normalize the base string against.
    #[error("launch url {0} has no host")]
    MissingHost(String),
}
