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

use crate::constants::{APPLICATION_JSON, REQUEST_TARGET, X_CONTENT_SHA256};
use crate::{Body, Credential};
use http::header::{AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, DATE, HOST};
use http::request::Parts;
use http::{HeaderName, HeaderValue, Method};
use log::debug;
use ocirest_core::hash::{base64_encode, base64_sha256_chunks};
use ocirest_core::time::{format_http_date, now, DateTime};
use ocirest_core::{Error, Result, SigningRequest};
use rsa::signature::{SignatureEncoding, Signer};
use std::fmt::Write;

/// Headers signed on every request, in signing order.
const GENERIC_HEADERS: [&str; 3] = ["date", REQUEST_TARGET, "host"];
/// Headers additionally signed on requests carrying a body, in signing order.
const BODY_HEADERS: [&str; 3] = ["content-length", "content-type", X_CONTENT_SHA256];

/// RequestSigner that implements Oracle Cloud Infrastructure API signing.
///
/// - [Oracle Cloud Infrastructure API Signing](https://docs.oracle.com/en-us/iaas/Content/API/Concepts/signingrequests.htm)
///
/// Signing is synchronous and keeps no state between calls. The `date` header
/// is taken from the wall clock on every call unless the signer is pinned
/// with [`RequestSigner::with_time`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSigner {
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer using the current time.
    pub fn new() -> Self {
        Self { time: None }
    }

    /// Pin the time used for the `date` header.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Sign the request in place.
    ///
    /// `date` and `host` are filled in when missing. Requests with a write
    /// method also get `content-type` (defaulting to `application/json`),
    /// `content-length` and `x-content-sha256` computed from `body`.
    /// Finally the `authorization` header is set.
    pub fn sign(&self, req: &mut Parts, body: &Body, cred: &Credential) -> Result<()> {
        let mut signing_req = SigningRequest::build(req)?;

        if !signing_req.headers.contains_key(DATE) {
            let date = format_http_date(self.time.unwrap_or_else(now));
            signing_req
                .headers
                .insert(DATE, HeaderValue::from_str(&date)?);
        }
        if !signing_req.headers.contains_key(HOST) {
            let host = HeaderValue::from_str(signing_req.authority.as_str())?;
            signing_req.headers.insert(HOST, host);
        }

        let with_body = is_write_method(&signing_req.method);
        if with_body {
            if !signing_req.headers.contains_key(CONTENT_TYPE) {
                signing_req
                    .headers
                    .insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
            }
            signing_req
                .headers
                .insert(CONTENT_LENGTH, HeaderValue::from(body.len()));
            signing_req.headers.insert(
                HeaderName::from_static(X_CONTENT_SHA256),
                HeaderValue::from_str(&base64_sha256_chunks(body.chunks()))?,
            );
        }

        let signed_headers = signed_headers(with_body);
        let string_to_sign = string_to_sign(&signing_req, &signed_headers)?;
        debug!("string to sign: {string_to_sign}");

        let signature = cred
            .signing_key()
            .try_sign(string_to_sign.as_bytes())
            .map_err(|e| Error::unexpected(format!("failed to sign request: {e}")))?;

        let mut authorization = HeaderValue::from_str(&format!(
            "Signature algorithm=\"rsa-sha256\",headers=\"{}\",keyId=\"{}\",signature=\"{}\",version=\"1\"",
            signed_headers.join(" "),
            cred.key_id(),
            base64_encode(&signature.to_bytes()),
        ))?;
        authorization.set_sensitive(true);
        signing_req.headers.insert(AUTHORIZATION, authorization);

        signing_req.apply(req)
    }
}

/// Whether requests with this method carry a signed body.
pub fn is_write_method(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}

/// Names of the signed headers, in the order the protocol mandates.
pub fn signed_headers(with_body: bool) -> Vec<&'static str> {
    let mut names = GENERIC_HEADERS.to_vec();
    if with_body {
        names.extend(BODY_HEADERS);
    }
    names
}

/// Construct string to sign.
///
/// # Format
///
/// ```text
///   "date: {Date}" + "\n"
/// + "(request-target): {verb} {path}[?{query}]" + "\n"
/// + "host: {Host}"
/// [ + "\n" + "content-length: {Length}"
///   + "\n" + "content-type: {Type}"
///   + "\n" + "x-content-sha256: {Digest}" ]
/// ```
pub fn string_to_sign(req: &SigningRequest, signed_headers: &[&str]) -> Result<String> {
    let mut f = String::with_capacity(256);

    for (idx, name) in signed_headers.iter().enumerate() {
        if idx > 0 {
            f.push('\n');
        }

        if *name == REQUEST_TARGET {
            write!(
                f,
                "{REQUEST_TARGET}: {} {}",
                req.method.as_str().to_lowercase(),
                req.request_target()
            )?;
        } else {
            let value = req.headers.get(*name).ok_or_else(|| {
                Error::request_invalid(format!("header {name} is required for signing"))
            })?;
            write!(f, "{name}: {}", value.to_str()?)?;
        }
    }

    Ok(f)
}
