// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Core components for calling signed cloud APIs.
//!
//! This crate provides the foundational types and traits for the ocirest ecosystem.
//! Service crates build on it to sign requests and classify responses.
//!
//! ## Overview
//!
//! - **Context**: A container for the ports a call goes through: transport
//!   ([`HttpSend`]), body codec ([`Codec`]), file reading ([`FileRead`]) and
//!   environment access ([`Env`]).
//! - **Credential loading**: [`ProvideCredential`] and [`ProvideCredentialChain`].
//! - **Signing view**: [`SigningRequest`] splits `http::request::Parts` into the
//!   pieces a signer needs and puts them back afterwards.
//!
//! ## Example
//!
//! ```no_run
//! use async_trait::async_trait;
//! use bytes::Bytes;
//! use ocirest_core::{Context, HttpSend, TransportError, TransportOptions};
//!
//! #[derive(Debug)]
//! struct Offline;
//!
//! #[async_trait]
//! impl HttpSend for Offline {
//!     async fn http_send(
//!         &self,
//!         _req: http::Request<Bytes>,
//!         _opts: &TransportOptions,
//!     ) -> Result<http::Response<Bytes>, TransportError> {
//!         Err(TransportError::Timeout)
//!     }
//! }
//!
//! let ctx = Context::new().with_http_send(Offline);
//! ```
//!
//! ## Utilities
//!
//! - [`case`]: snake/camel key conversion for structured bodies
//! - [`hash`]: base64 and SHA256 helpers
//! - [`time`]: HTTP date handling
//! - [`utils`]: data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod case;
pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::Codec;
pub use context::Context;
pub use context::Env;
pub use context::FileRead;
pub use context::HttpSend;
pub use context::NoopCodec;
pub use context::NoopEnv;
pub use context::NoopFileRead;
pub use context::NoopHttpSend;
pub use context::OsEnv;
pub use context::StaticEnv;
pub use context::TransportError;
pub use context::TransportOptions;

mod error;
pub use error::{Error, ErrorKind, Result};

mod api;
pub use api::{ProvideCredential, ProvideCredentialChain};
mod request;
pub use request::SigningRequest;
