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

//! Hash related utils.

use crate::Error;
use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use sha2::Digest;
use sha2::Sha256;

/// Base64 encode
pub fn base64_encode(content: &[u8]) -> String {
    BASE64_STANDARD.encode(content)
}

/// Base64 decode
pub fn base64_decode(content: &str) -> crate::Result<Vec<u8>> {
    BASE64_STANDARD
        .decode(content)
        .map_err(|e| Error::unexpected("base64 decode failed").with_source(e))
}

/// Base64 encoded SHA256 hash.
pub fn base64_sha256(content: &[u8]) -> String {
    base64_encode(Sha256::digest(content).as_slice())
}

/// Base64 encoded SHA256 hash over content split into several chunks.
///
/// The digest equals the one of the concatenated chunks, without
/// concatenating them first.
pub fn base64_sha256_chunks<'a>(chunks: impl IntoIterator<Item = &'a [u8]>) -> String {
    let mut h = Sha256::new();
    for chunk in chunks {
        h.update(chunk);
    }

    base64_encode(h.finalize().as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_sha256_empty() {
        assert_eq!(
            base64_sha256(b""),
            "47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU="
        );
    }

    #[test]
    fn test_base64_sha256_chunks_matches_whole() {
        let whole = base64_sha256(b"{\"purgeType\":\"NORMAL\"}");
        let chunks: [&[u8]; 3] = [b"{\"purge", b"Type\":\"NOR", b"MAL\"}"];
        assert_eq!(base64_sha256_chunks(chunks), whole);
    }

    #[test]
    fn test_base64_roundtrip() {
        let encoded = base64_encode(b"ocid1.tenancy.oc1..aaaa");
        assert_eq!(
            base64_decode(&encoded).expect("must decode"),
            b"ocid1.tenancy.oc1..aaaa"
        );
        assert!(base64_decode("not base64!").is_err());
    }
}
