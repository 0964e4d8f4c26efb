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

//! Reqwest-based transport for ocirest.
//!
//! Pooling, TLS and default timeouts are configured on the `reqwest::Client`
//! handed to [`ReqwestHttpSend::new`].

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use ocirest_core::{HttpSend, TransportError, TransportOptions};
use reqwest::{Client, Request};

/// Transport port backed by a `reqwest::Client`.
#[derive(Debug, Default, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(
        &self,
        req: http::Request<Bytes>,
        opts: &TransportOptions,
    ) -> Result<http::Response<Bytes>, TransportError> {
        let mut req =
            Request::try_from(req).map_err(|e| TransportError::RequestFailed(e.to_string()))?;
        if let Some(timeout) = opts.timeout {
            *req.timeout_mut() = Some(timeout);
        }

        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(classify_send_error)?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout
                } else {
                    TransportError::ReceiveFailed(e.to_string())
                }
            })?;
        Ok(http::Response::from_parts(parts, bs))
    }
}

fn classify_send_error(e: reqwest::Error) -> TransportError {
    log::debug!("transport error: {e:?}");

    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_connect() {
        TransportError::ConnectFailed(e.to_string())
    } else if e.is_body() || e.is_decode() {
        TransportError::ReceiveFailed(e.to_string())
    } else {
        TransportError::RequestFailed(e.to_string())
    }
}
