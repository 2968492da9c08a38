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

//! # LTI toolbox
//!
//! Reusable building blocks to implement an LTI (Learning Tools
//! Interoperability) Tool Provider in Rust.
//!
//! LTI 1.0/1.1 launch requests are plain HTTP form POSTs signed with
//! OAuth1 (HMAC-SHA1) using a shared secret that the tool provider and
//! the tool consumer (the LMS: Moodle, Open edX, Canvas, ...) agreed upon
//! out of band. This crate covers the provider side of that handshake:
//!
//! - a [consumer] registry holding the credentials of the platforms that
//!   are allowed to launch the tool, behind a pluggable backend driver;
//! - an [oauth1] signature core implementing the RFC 5849 parameter
//!   normalization, base-string construction and HMAC-SHA1 signing that
//!   launch verification depends on;
//! - [launch] parameter validation and a typed wrapper exposing the
//!   message type, user roles, course information and the quirks of the
//!   dominant consumer implementations;
//! - a [verifier] turning an incoming request into either a verified
//!   launch or a structured rejection reason;
//! - an [api] layer with an axum router factory and a view trait with
//!   `on_valid`/`on_invalid` extension points for the embedding
//!   application.
//!
//! LTI 1.3 / LTI Advantage (JWT-based) launches are out of scope, as is a
//! general-purpose OAuth1 implementation: only the signature-verification
//! subset that LTI 1.0/1.1 requires is provided.

pub mod api;
pub mod config;
pub mod consumer;
pub mod error;
pub mod launch;
pub mod oauth1;
pub mod plugin_manager;
pub mod provider;
pub mod service;
pub mod verifier;
