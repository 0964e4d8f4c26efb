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

//! serde_json-based body codec for ocirest.
//!
//! ```
//! use ocirest_codec_serde_json::SerdeJsonCodec;
//! use ocirest_core::Context;
//! use serde_json::json;
//!
//! let ctx = Context::new().with_codec(SerdeJsonCodec);
//! let bs = ctx.encode(&json!({"purgeType": "NORMAL"})).unwrap();
//! assert_eq!(bs.as_ref(), br#"{"purgeType":"NORMAL"}"#);
//! ```

use bytes::Bytes;
use ocirest_core::{Codec, Error, Result};
use serde_json::Value;

/// Codec port backed by `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeJsonCodec;

impl Codec for SerdeJsonCodec {
    fn encode(&self, value: &Value) -> Result<Bytes> {
        serde_json::to_vec(value)
            .map(Bytes::from)
            .map_err(|e| Error::codec("failed to encode json body").with_source(e))
    }

    fn decode(&self, bytes: &[u8]) -> Result<Value> {
        serde_json::from_slice(bytes)
            .map_err(|e| Error::codec(format!("failed to decode json body: {e}")).with_source(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocirest_core::ErrorKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_decode() -> Result<()> {
        let v = SerdeJsonCodec.decode(br#"{"code":"NotAuthorizedOrNotFound","message":"nope"}"#)?;
        assert_eq!(
            v,
            json!({"code": "NotAuthorizedOrNotFound", "message": "nope"})
        );
        Ok(())
    }

    #[test]
    fn test_decode_malformed() {
        let err = SerdeJsonCodec.decode(b"{\"code\":").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Codec);
    }

    #[test]
    fn test_encode_array() -> Result<()> {
        let bs = SerdeJsonCodec.encode(&json!(["channel-1", "channel-2"]))?;
        assert_eq!(bs.as_ref(), br#"["channel-1","channel-2"]"#);
        Ok(())
    }
}
