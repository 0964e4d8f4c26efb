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

//! Key case conversion between the caller-facing `snake_case` and the
//! `camelCase` used on the wire.
//!
//! Only object keys are rewritten; values, including `null`, are left as they are.
//!
//! ```
//! use ocirest_core::case::keys_to_camel;
//! use serde_json::json;
//!
//! let body = keys_to_camel(json!({"purge_type": "NORMAL", "channel_ids": ["channel-1"]}));
//! assert_eq!(body, json!({"purgeType": "NORMAL", "channelIds": ["channel-1"]}));
//! ```

use serde_json::Value;

/// Convert a `snake_case` identifier into `camelCase`.
///
/// Empty segments are dropped, so runs of underscores collapse and leading or
/// trailing underscores disappear. The first segment is kept as-is, every
/// following one gets its first letter uppercased.
pub fn snake_to_camel(s: &str) -> String {
    let mut out = String::with_capacity(s.len());

    for (idx, seg) in s.split('_').filter(|v| !v.is_empty()).enumerate() {
        if idx == 0 {
            out.push_str(seg);
            continue;
        }

        let mut chars = seg.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }

    out
}

/// Convert a `camelCase` (or `PascalCase`) identifier into `snake_case`.
///
/// Two passes run in order:
///
/// 1. `_` goes between a lowercase letter or digit and a following uppercase letter.
/// 2. `_` goes before the last letter of an uppercase run when that letter starts
///    a capitalized word, so `VCNValue` splits as `VCN_Value`.
///
/// The result is lowercased. Wire names depend on this exact heuristic.
pub fn camel_to_snake(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();

    let mut first = Vec::with_capacity(chars.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            let prev = chars[i - 1];
            if prev.is_ascii_lowercase() || prev.is_ascii_digit() {
                first.push('_');
            }
        }
        first.push(c);
    }

    let mut out = String::with_capacity(first.len() + 4);
    for (i, &c) in first.iter().enumerate() {
        if i > 0
            && c.is_ascii_uppercase()
            && first[i - 1].is_ascii_uppercase()
            && first.get(i + 1).is_some_and(|n| n.is_ascii_lowercase())
        {
            out.push('_');
        }
        out.push(c);
    }

    out.to_lowercase()
}

/// Rewrite every object key in `value` from `snake_case` to `camelCase`.
pub fn keys_to_camel(value: Value) -> Value {
    convert_keys(value, snake_to_camel)
}

/// Rewrite every object key in `value` from `camelCase` to `snake_case`.
pub fn keys_to_snake(value: Value) -> Value {
    convert_keys(value, camel_to_snake)
}

fn convert_keys(value: Value, f: fn(&str) -> String) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (f(&k), convert_keys(v, f)))
                .collect(),
        ),
        Value::Array(values) => {
            Value::Array(values.into_iter().map(|v| convert_keys(v, f)).collect())
        }
        v => v,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case("purge_type", "purgeType")]
    #[test_case("channel_ids", "channelIds")]
    #[test_case("display_name", "displayName")]
    #[test_case("a__b", "aB" ; "collapses runs")]
    #[test_case("_leading_and_trailing_", "leadingAndTrailing" ; "strips edges")]
    #[test_case("already", "already")]
    #[test_case("", "" ; "empty")]
    #[test_case("vcn_id", "vcnId")]
    #[test_case("is_IPv6", "isIPv6" ; "keeps rest of segment")]
    fn test_snake_to_camel(input: &str, expected: &str) {
        assert_eq!(snake_to_camel(input), expected);
    }

    #[test_case("purgeType", "purge_type")]
    #[test_case("channelIds", "channel_ids")]
    #[test_case("VCNValue", "vcn_value" ; "acronym before word")]
    #[test_case("opcRequestId", "opc_request_id")]
    #[test_case("ipv6CidrBlocks", "ipv6_cidr_blocks")]
    #[test_case("isHTTP2Enabled", "is_http2_enabled")]
    #[test_case("ABCDeFGHi", "abc_de_fg_hi" ; "multiple runs")]
    #[test_case("lifecycle_state", "lifecycle_state" ; "already snake")]
    #[test_case("ID", "id")]
    #[test_case("", "" ; "empty")]
    fn test_camel_to_snake(input: &str, expected: &str) {
        assert_eq!(camel_to_snake(input), expected);
    }

    #[test]
    fn test_roundtrip_is_lossy_for_acronyms() {
        let snake = camel_to_snake("VCNValue");
        assert_eq!(snake_to_camel(&snake), "vcnValue");
    }

    #[test]
    fn test_keys_to_camel_nested() {
        let input = json!({
            "purge_type": "NORMAL",
            "channel_ids": ["channel-1", "channel-2"],
            "freeform_tags": {"cost_center": "R&D"},
            "defined_tags": null,
            "rules": [{"rule_name": "a_b", "max_age": 3}]
        });

        let expected = json!({
            "purgeType": "NORMAL",
            "channelIds": ["channel-1", "channel-2"],
            "freeformTags": {"costCenter": "R&D"},
            "definedTags": null,
            "rules": [{"ruleName": "a_b", "maxAge": 3}]
        });

        assert_eq!(keys_to_camel(input), expected);
    }

    #[test]
    fn test_keys_to_snake_nested() {
        let input = json!({"items": [{"lifecycleState": "ACTIVE", "timeCreated": null}]});
        let expected = json!({"items": [{"lifecycle_state": "ACTIVE", "time_created": null}]});

        assert_eq!(keys_to_snake(input), expected);
    }

    #[test]
    fn test_scalars_pass_through() {
        assert_eq!(keys_to_snake(json!("someValue")), json!("someValue"));
        assert_eq!(keys_to_camel(json!(42)), json!(42));
        assert_eq!(keys_to_camel(Value::Null), Value::Null);
        assert_eq!(keys_to_camel(json!("")), json!(""));
    }

    proptest! {
        #[test]
        fn prop_camel_to_snake_is_idempotent(s in "[A-Za-z0-9_]{0,24}") {
            let once = camel_to_snake(&s);
            prop_assert_eq!(camel_to_snake(&once), once);
        }

        #[test]
        fn prop_snake_to_camel_has_no_underscores(s in "[a-z0-9_]{0,24}") {
            prop_assert!(!snake_to_camel(&s).contains('_'));
        }
    }
}
