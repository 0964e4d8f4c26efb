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

//! Oracle Cloud Infrastructure request signing and call execution.
//!
//! This crate signs requests with the OCI HTTP signature scheme and runs
//! them through the ports of an [`ocirest_core::Context`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use ocirest_core::{Context, OsEnv, ProvideCredential};
//! use ocirest_codec_serde_json::SerdeJsonCodec;
//! use ocirest_file_read_tokio::TokioFileRead;
//! use ocirest_http_send_reqwest::ReqwestHttpSend;
//! use ocirest_oracle::{Client, DefaultCredentialProvider, RequestSpec};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let ctx = Context::new()
//!     .with_file_read(TokioFileRead)
//!     .with_http_send(ReqwestHttpSend::default())
//!     .with_codec(SerdeJsonCodec)
//!     .with_env(OsEnv);
//!
//! let cred = DefaultCredentialProvider::new()
//!     .provide_credential(&ctx)
//!     .await?
//!     .ok_or_else(|| anyhow::anyhow!("no oracle credential found"))?;
//!
//! let client = Client::new(ctx);
//! let resp = client
//!     .execute(
//!         &cred,
//!         RequestSpec::get("https://iaas.{region}.oraclecloud.com")
//!             .with_path("/20160918/instances")
//!             .with_query("compartmentId", cred.tenancy.clone()),
//!     )
//!     .await?;
//! println!("request id: {:?}", resp.metadata.request_id());
//! # Ok(())
//! # }
//! ```
//!
//! ## Credential Sources
//!
//! - [`EnvCredentialProvider`]: `OCI_*` environment variables
//! - [`ConfigFileCredentialProvider`]: `~/.oci/config`
//! - [`StaticCredentialProvider`]: a credential built in memory
//! - [`DefaultCredentialProvider`]: environment, then config file

mod constants;

mod body;
pub use body::Body;
mod config;
pub use config::Config;
mod credential;
pub use credential::Credential;
mod sign_request;
pub use sign_request::{is_write_method, signed_headers, string_to_sign, RequestSigner};
mod policy;
pub use policy::{HeaderExtraction, ResponsePolicy, SuccessCodes};
mod request;
pub use request::{RequestBody, RequestSpec};
mod response;
pub use response::{CallError, Metadata, Payload, Response};
pub mod classify;
mod client;
pub use client::Client;

mod provide_credential;
pub use provide_credential::*;
