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

use crate::classify::{classify, is_json_media_type};
use crate::constants::APPLICATION_JSON;
use crate::request::{RequestBody, RequestSpec};
use crate::response::{CallError, Response};
use crate::sign_request::is_write_method;
use crate::{Body, Credential, RequestSigner};
use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderName, HeaderValue};
use log::debug;
use ocirest_core::case::keys_to_camel;
use ocirest_core::{Context, Result};
use serde_json::Value;

/// Client executes [`RequestSpec`]s: resolve, serialize, sign, send, classify.
///
/// Cloning is cheap and a client can be shared across tasks.
#[derive(Debug, Clone)]
pub struct Client {
    ctx: Context,
    signer: RequestSigner,
}

impl Client {
    /// Create a new client over the ports in `ctx`.
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
            signer: RequestSigner::new(),
        }
    }

    /// Replace the signer, e.g. with one pinned to a fixed time.
    pub fn with_signer(mut self, signer: RequestSigner) -> Self {
        self.signer = signer;
        self
    }

    /// Ports used by this client.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Execute a call.
    ///
    /// Transport failures come back as [`CallError::Transport`] without
    /// metadata; replies outside the policy's success codes come back as
    /// [`CallError::Service`].
    pub async fn execute(
        &self,
        cred: &Credential,
        spec: RequestSpec,
    ) -> std::result::Result<Response, CallError> {
        let RequestSpec {
            method,
            headers,
            body,
            policy,
            options,
            ..
        } = &spec;

        let url = spec.url(&cred.region);
        debug!("executing {method} {url}");

        // A null content-type counts as unset. The value picked here drives
        // both body encoding and the signed header.
        let content_type = spec.content_type().unwrap_or(APPLICATION_JSON);
        let body = self.encode_body(body, content_type)?;

        let mut req = http::Request::builder()
            .method(method.clone())
            .uri(url.as_str())
            .body(())
            .map_err(ocirest_core::Error::from)?;
        for (name, value) in headers {
            if name == CONTENT_TYPE.as_str() && value.is_none() {
                continue;
            }
            req.headers_mut().insert(
                HeaderName::from_bytes(name.as_bytes()).map_err(ocirest_core::Error::from)?,
                HeaderValue::from_str(value.as_deref().unwrap_or_default())
                    .map_err(ocirest_core::Error::from)?,
            );
        }
        if !req.headers().contains_key(CONTENT_TYPE)
            && (is_write_method(method) || !body.is_empty())
        {
            req.headers_mut().insert(
                CONTENT_TYPE,
                HeaderValue::from_str(content_type).map_err(ocirest_core::Error::from)?,
            );
        }

        let (mut parts, ()) = req.into_parts();
        self.signer.sign(&mut parts, &body, cred)?;

        let req = http::Request::from_parts(parts, body.into_bytes());
        let resp = self.ctx.http_send(req, options).await?;

        classify(&self.ctx, resp, policy)
    }

    fn encode_body(&self, body: &RequestBody, content_type: &str) -> Result<Body> {
        if body.is_empty() {
            return Ok(Body::Empty);
        }

        let body = match body {
            RequestBody::Empty => Body::Empty,
            RequestBody::Json(Value::String(text)) if !is_json_media_type(content_type) => {
                Body::Bytes(Bytes::from(text.clone()))
            }
            RequestBody::Json(value) => Body::Bytes(self.ctx.encode(&keys_to_camel(value.clone()))?),
            RequestBody::Text(text) => Body::Bytes(Bytes::from(text.clone())),
            RequestBody::Raw(raw) => raw.clone(),
        };
        Ok(body)
    }
}
