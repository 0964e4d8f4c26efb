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

use crate::constants::{QUERY_ENCODE_SET, REGION_PLACEHOLDER};
use crate::{Body, ResponsePolicy};
use http::Method;
use ocirest_core::TransportOptions;
use percent_encoding::utf8_percent_encode;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

/// Body of a [`RequestSpec`].
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// A structured body with `snake_case` keys, converted to `camelCase` on send.
    Json(Value),
    /// Text sent as it is.
    Text(String),
    /// Bytes sent as they are, possibly fragmented.
    Raw(Body),
}

impl RequestBody {
    /// Whether nothing will be sent: no body, `null`, `{}`, `[]` or zero bytes.
    pub fn is_empty(&self) -> bool {
        match self {
            RequestBody::Empty => true,
            RequestBody::Json(Value::Null) => true,
            RequestBody::Json(Value::Object(map)) => map.is_empty(),
            RequestBody::Json(Value::Array(values)) => values.is_empty(),
            RequestBody::Json(_) => false,
            RequestBody::Text(s) => s.is_empty(),
            RequestBody::Raw(b) => b.is_empty(),
        }
    }
}

impl From<Value> for RequestBody {
    fn from(v: Value) -> Self {
        RequestBody::Json(v)
    }
}

impl From<String> for RequestBody {
    fn from(s: String) -> Self {
        RequestBody::Text(s)
    }
}

impl From<&str> for RequestBody {
    fn from(s: &str) -> Self {
        RequestBody::Text(s.to_string())
    }
}

impl From<Body> for RequestBody {
    fn from(b: Body) -> Self {
        RequestBody::Raw(b)
    }
}

/// Definition of a single API call.
///
/// Built by value and consumed by [`crate::Client::execute`]:
///
/// ```
/// use ocirest_oracle::{RequestSpec, ResponsePolicy};
/// use serde_json::json;
///
/// let spec = RequestSpec::post("https://iaas.{region}.oraclecloud.com")
///     .with_path("/20160918/vcns")
///     .with_query("limit", "10")
///     .with_body(json!({"compartment_id": "ocid1.compartment.oc1..aaaa"}))
///     .with_policy(ResponsePolicy::new().with_all_headers());
///
/// assert_eq!(
///     spec.url("us-ashburn-1"),
///     "https://iaas.us-ashburn-1.oraclecloud.com/20160918/vcns?limit=10"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub(crate) method: Method,
    pub(crate) base_url: String,
    pub(crate) path: String,
    pub(crate) headers: BTreeMap<String, Option<String>>,
    pub(crate) query: BTreeMap<String, Option<String>>,
    pub(crate) body: RequestBody,
    pub(crate) policy: ResponsePolicy,
    pub(crate) options: TransportOptions,
}

impl RequestSpec {
    /// Create a new request for `method` against `base_url`.
    ///
    /// `base_url` may contain `{region}`, replaced with the credential's region.
    pub fn new(method: Method, base_url: impl Into<String>) -> Self {
        Self {
            method,
            base_url: base_url.into(),
            path: String::new(),
            headers: BTreeMap::new(),
            query: BTreeMap::new(),
            body: RequestBody::Empty,
            policy: ResponsePolicy::default(),
            options: TransportOptions::default(),
        }
    }

    /// Create a `GET` request.
    pub fn get(base_url: impl Into<String>) -> Self {
        Self::new(Method::GET, base_url)
    }

    /// Create a `POST` request.
    pub fn post(base_url: impl Into<String>) -> Self {
        Self::new(Method::POST, base_url)
    }

    /// Create a `PUT` request.
    pub fn put(base_url: impl Into<String>) -> Self {
        Self::new(Method::PUT, base_url)
    }

    /// Create a `PATCH` request.
    pub fn patch(base_url: impl Into<String>) -> Self {
        Self::new(Method::PATCH, base_url)
    }

    /// Create a `DELETE` request.
    pub fn delete(base_url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, base_url)
    }

    /// Set the path appended to the base URL.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Set a query parameter.
    pub fn with_query(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_query_opt(key, Some(value.into()))
    }

    /// Set a query parameter if `value` is `Some`.
    ///
    /// `None` is dropped: the call leaves the spec unchanged.
    pub fn with_query_opt(mut self, key: impl Into<String>, value: Option<String>) -> Self {
        if let Some(v) = value {
            self.query.insert(key.into(), Some(v));
        }
        self
    }

    /// Set a query parameter, keeping `None` as a bare key without value.
    pub fn with_query_nullable(mut self, key: impl Into<String>, value: Option<String>) -> Self {
        self.query.insert(key.into(), value);
        self
    }

    /// Set many query parameters; `None` entries are dropped.
    pub fn with_queries<I, K>(self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<String>)>,
        K: Into<String>,
    {
        params
            .into_iter()
            .fold(self, |spec, (k, v)| spec.with_query_opt(k, v))
    }

    /// Set a header. Names are case-insensitive.
    pub fn with_header(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_header_opt(name, Some(value.into()))
    }

    /// Set a header if `value` is `Some`.
    ///
    /// `None` is dropped: the call leaves the spec unchanged.
    pub fn with_header_opt(mut self, name: impl Into<String>, value: Option<String>) -> Self {
        if let Some(v) = value {
            self.headers.insert(name.into().to_ascii_lowercase(), Some(v));
        }
        self
    }

    /// Set a header, keeping `None` to send it with an empty value.
    pub fn with_header_nullable(mut self, name: impl Into<String>, value: Option<String>) -> Self {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value);
        self
    }

    /// Set many headers; `None` entries are dropped.
    pub fn with_headers<I, K>(self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<String>)>,
        K: Into<String>,
    {
        headers
            .into_iter()
            .fold(self, |spec, (k, v)| spec.with_header_opt(k, v))
    }

    /// Replace the body.
    pub fn with_body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = body.into();
        self
    }

    /// Replace the response policy.
    pub fn with_policy(mut self, policy: ResponsePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Ask the transport to give up after `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = Some(timeout);
        self
    }

    /// HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Headers as they will be sent, lowercased names.
    pub fn headers(&self) -> &BTreeMap<String, Option<String>> {
        &self.headers
    }

    /// Query parameters, sorted by key.
    pub fn query(&self) -> &BTreeMap<String, Option<String>> {
        &self.query
    }

    /// Request body.
    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    /// Response policy.
    pub fn policy(&self) -> &ResponsePolicy {
        &self.policy
    }

    /// The `content-type` header, if set to a value.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get("content-type")
            .and_then(|v| v.as_deref())
    }

    /// Resolve the full URL for `region`.
    ///
    /// The query string is only appended when at least one parameter exists.
    pub fn url(&self, region: &str) -> String {
        let base = self.base_url.replace(REGION_PLACEHOLDER, region);
        let mut url = base.trim_end_matches('/').to_string();

        if !self.path.is_empty() {
            if !self.path.starts_with('/') {
                url.push('/');
            }
            url.push_str(&self.path);
        }

        if let Some(query) = self.query_string() {
            url.push('?');
            url.push_str(&query);
        }
        url
    }

    fn query_string(&self) -> Option<String> {
        if self.query.is_empty() {
            return None;
        }

        let pairs: Vec<String> = self
            .query
            .iter()
            .map(|(k, v)| {
                let k = utf8_percent_encode(k, &QUERY_ENCODE_SET);
                match v {
                    Some(v) => format!("{k}={}", utf8_percent_encode(v, &QUERY_ENCODE_SET)),
                    None => k.to_string(),
                }
            })
            .collect();
        Some(pairs.join("&"))
    }
}
