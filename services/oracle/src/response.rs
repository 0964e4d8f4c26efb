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

use crate::constants::OPC_REQUEST_ID_KEY;
use bytes::Bytes;
use ocirest_core::TransportError;
use serde_json::Value;
use std::collections::BTreeMap;

/// Headers captured from a reply.
///
/// `opc_request_id` is always present; it is `None` when the service did not
/// send the correlation header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata(BTreeMap<String, Option<String>>);

impl Metadata {
    pub(crate) fn new(request_id: Option<String>) -> Self {
        let mut map = BTreeMap::new();
        map.insert(OPC_REQUEST_ID_KEY.to_string(), request_id);
        Self(map)
    }

    pub(crate) fn insert(&mut self, key: impl Into<String>, value: Option<String>) {
        self.0.insert(key.into(), value);
    }

    /// The `opc-request-id` of the call, if the service sent one.
    pub fn request_id(&self) -> Option<&str> {
        self.get(OPC_REQUEST_ID_KEY)
    }

    /// Value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.as_deref())
    }

    /// Whether `key` was captured, even without a value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of captured entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing was captured. Never true for metadata built from a reply.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate entries sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }
}

/// Decoded reply body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// A JSON body, keys converted to `snake_case`.
    Json(Value),
    /// Any other body, as received.
    Raw(Bytes),
}

impl Payload {
    /// The JSON value, if this is a JSON payload.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(v) => Some(v),
            Payload::Raw(_) => None,
        }
    }
}

/// A successful reply.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Decoded body, `None` when the body was empty.
    pub data: Option<Payload>,
    /// Captured headers.
    pub metadata: Metadata,
}

/// Why a call failed.
#[derive(thiserror::Error, Debug)]
pub enum CallError {
    /// The service answered with a status outside the success criteria.
    #[error("service returned status {status}")]
    Service {
        /// HTTP status code.
        status: u16,
        /// Decoded error body.
        body: Option<Payload>,
        /// Captured headers.
        metadata: Metadata,
    },
    /// No reply was received.
    #[error("transport failed: {0}")]
    Transport(#[from] TransportError),
    /// The call failed before sending or while decoding.
    #[error(transparent)]
    Local(#[from] ocirest_core::Error),
}

impl CallError {
    /// Metadata of the reply; only service errors have one.
    pub fn metadata(&self) -> Option<&Metadata> {
        match self {
            CallError::Service { metadata, .. } => Some(metadata),
            _ => None,
        }
    }

    /// HTTP status of the reply, for service errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            CallError::Service { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the call failed below HTTP.
    pub fn is_transport(&self) -> bool {
        matches!(self, CallError::Transport(_))
    }
}
