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
//! Consumer registry provider errors.

use thiserror::Error;

use crate::consumer::types::ConsumerBuilderError;

/// Consumer registry provider error.
#[derive(Error, Debug)]
pub enum ConsumerProviderError {
    /// A consumer with the same key is already registered.
    #[error("consumer with key {0} is already registered")]
    Conflict(String),

    /// Consumer is not present in the registry.
    #[error("consumer with key {0} not found")]
    ConsumerNotFound(String),

    /// The registry store lock was poisoned by a panicking writer.
    #[error("consumer store lock poisoned")]
    LockPoisoned,

    /// Structures builder error.
    #[error(transparent)]
    StructBuilder(#[from] ConsumerBuilderError),

    /// The configured backend driver is neither built-in nor registered
    /// in the plugin manager.
    #[error("unsupported consumer registry driver {0}")]
    UnsupportedDriver(String),

    /// Request validation error.
    #[error("consumer validation failed: {source}")]
    Validation {
        /// The source of the error.
        #[from]
        source: validator::ValidationErrors,
    },
}
