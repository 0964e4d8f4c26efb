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

//! Turn a raw reply into a [`Response`] or a [`CallError`].

use crate::constants::{APPLICATION_JSON, OPC_REQUEST_ID, OPC_REQUEST_ID_KEY};
use crate::policy::{HeaderExtraction, ResponsePolicy};
use crate::response::{CallError, Metadata, Payload, Response};
use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::HeaderMap;
use log::debug;
use ocirest_core::case::keys_to_snake;
use ocirest_core::Context;

/// Classify `resp` against `policy`.
pub fn classify(
    ctx: &Context,
    resp: http::Response<Bytes>,
    policy: &ResponsePolicy,
) -> Result<Response, CallError> {
    let (parts, body) = resp.into_parts();
    let status = parts.status.as_u16();

    let metadata = extract_metadata(&parts.headers, policy.headers());
    let data = decode_body(ctx, &parts.headers, body)?;

    let success = policy.is_success(status);
    debug!(
        "classified response: status={status} success={success} request_id={:?}",
        metadata.request_id()
    );

    if success {
        Ok(Response {
            status,
            data,
            metadata,
        })
    } else {
        Err(CallError::Service {
            status,
            body: data,
            metadata,
        })
    }
}

/// Build metadata from response headers.
///
/// Multi-valued headers are joined with `", "` in the order received. Values
/// that are not visible ASCII are kept lossily.
pub fn extract_metadata(headers: &HeaderMap, mode: &HeaderExtraction) -> Metadata {
    let mut metadata = Metadata::new(header_value(headers, OPC_REQUEST_ID));

    match mode {
        HeaderExtraction::CorrelationOnly => {}
        HeaderExtraction::All => {
            for name in headers.keys() {
                if name.as_str() == OPC_REQUEST_ID {
                    continue;
                }
                metadata.insert(name.as_str(), header_value(headers, name.as_str()));
            }
        }
        HeaderExtraction::Only(names) => {
            for name in names {
                let name = name.to_ascii_lowercase();
                if name == OPC_REQUEST_ID || name == OPC_REQUEST_ID_KEY {
                    continue;
                }
                if let Some(value) = header_value(headers, &name) {
                    metadata.insert(name, Some(value));
                }
            }
        }
    }

    metadata
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let values: Vec<_> = headers
        .get_all(name)
        .iter()
        .map(|v| String::from_utf8_lossy(v.as_bytes()))
        .collect();
    if values.is_empty() {
        return None;
    }
    Some(values.join(", "))
}

/// Decode the reply body according to its `content-type`.
///
/// JSON bodies have their keys converted to `snake_case`; empty bodies are `None`.
pub fn decode_body(
    ctx: &Context,
    headers: &HeaderMap,
    body: Bytes,
) -> Result<Option<Payload>, CallError> {
    if body.is_empty() {
        return Ok(None);
    }

    if is_json(headers) {
        let value = ctx.decode(&body)?;
        Ok(Some(Payload::Json(keys_to_snake(value))))
    } else {
        Ok(Some(Payload::Raw(body)))
    }
}

/// Whether the media type of `content-type` is `application/json`, ignoring
/// case and parameters.
pub(crate) fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(is_json_media_type)
}

pub(crate) fn is_json_media_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|media| media.trim().eq_ignore_ascii_case(APPLICATION_JSON))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocirest_codec_serde_json::SerdeJsonCodec;
    use ocirest_core::ErrorKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use test_case::test_case;

    fn ctx() -> Context {
        Context::new().with_codec(SerdeJsonCodec)
    }

    fn reply(status: u16, headers: &[(&str, &str)], body: &'static [u8]) -> http::Response<Bytes> {
        let mut builder = http::Response::builder().status(status);
        for (k, v) in headers {
            builder = builder.header(*k, *v);
        }
        builder
            .body(Bytes::from_static(body))
            .expect("response must be valid")
    }

    #[test_case("application/json", true)]
    #[test_case("Application/JSON", true ; "case insensitive")]
    #[test_case("application/json; charset=utf-8", true ; "with parameters")]
    #[test_case("text/plain", false)]
    #[test_case("application/jsonl", false)]
    fn test_is_json_media_type(ct: &str, expected: bool) {
        assert_eq!(is_json_media_type(ct), expected);
    }

    #[test]
    fn test_accepted_is_success() {
        let resp = reply(
            202,
            &[("opc-request-id", "req-1"), ("content-type", "application/json")],
            b"{\"workRequestId\":\"wr-1\"}",
        );
        let out = classify(&ctx(), resp, &ResponsePolicy::new()).expect("must succeed");

        assert_eq!(out.status, 202);
        assert_eq!(out.metadata.request_id(), Some("req-1"));
        assert_eq!(out.metadata.len(), 1);
        assert_eq!(
            out.data,
            Some(Payload::Json(json!({"work_request_id": "wr-1"})))
        );
    }

    #[test]
    fn test_bad_request_is_service_error() {
        let resp = reply(
            400,
            &[("opc-request-id", "req-2"), ("content-type", "application/json")],
            b"{\"code\":\"InvalidParameter\",\"message\":\"bad\"}",
        );
        let err = classify(&ctx(), resp, &ResponsePolicy::new()).unwrap_err();

        match err {
            CallError::Service {
                status,
                body,
                metadata,
            } => {
                assert_eq!(status, 400);
                assert_eq!(metadata.request_id(), Some("req-2"));
                assert_eq!(
                    body,
                    Some(Payload::Json(
                        json!({"code": "InvalidParameter", "message": "bad"})
                    ))
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_request_id_is_none() {
        let resp = reply(204, &[], b"");
        let out = classify(&ctx(), resp, &ResponsePolicy::new()).expect("must succeed");
        assert!(out.metadata.contains_key(OPC_REQUEST_ID_KEY));
        assert_eq!(out.metadata.request_id(), None);
        assert_eq!(out.data, None);
    }

    #[test]
    fn test_all_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("opc-request-id", "req-3".parse().unwrap());
        headers.insert("etag", "e1".parse().unwrap());
        headers.append("x-multi", "first".parse().unwrap());
        headers.append("x-multi", "second".parse().unwrap());

        let md = extract_metadata(&headers, &HeaderExtraction::All);
        let keys: Vec<&str> = md.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["etag", "opc_request_id", "x-multi"]);
        assert_eq!(md.get("x-multi"), Some("first, second"));
        assert_eq!(md.request_id(), Some("req-3"));

        let md = extract_metadata(&headers, &HeaderExtraction::Only(vec!["X-Multi".into()]));
        assert_eq!(md.get("x-multi"), Some("first, second"));
    }

    #[test]
    fn test_only_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("opc-request-id", "req-4".parse().unwrap());
        headers.insert("etag", "e1".parse().unwrap());
        headers.insert("opc-next-page", "p2".parse().unwrap());

        let md = extract_metadata(
            &headers,
            &HeaderExtraction::Only(vec!["ETag".to_string(), "x-missing".to_string()]),
        );
        assert_eq!(md.len(), 2);
        assert_eq!(md.get("etag"), Some("e1"));
        assert!(!md.contains_key("x-missing"));
        assert!(!md.contains_key("opc-next-page"));
    }

    #[test]
    fn test_raw_body() {
        let resp = reply(200, &[("content-type", "text/plain")], b"hello");
        let out = classify(&ctx(), resp, &ResponsePolicy::new()).expect("must succeed");
        assert_eq!(out.data, Some(Payload::Raw(Bytes::from_static(b"hello"))));
    }

    #[test]
    fn test_empty_json_body_is_none() {
        let resp = reply(200, &[("content-type", "application/json")], b"");
        let out = classify(&ctx(), resp, &ResponsePolicy::new()).expect("must succeed");
        assert_eq!(out.data, None);
    }

    #[test]
    fn test_invalid_json_is_local_error() {
        let resp = reply(200, &[("content-type", "application/json")], b"{not json");
        let err = classify(&ctx(), resp, &ResponsePolicy::new()).unwrap_err();
        match err {
            CallError::Local(e) => assert_eq!(e.kind(), ErrorKind::Codec),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
