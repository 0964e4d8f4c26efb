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

use bytes::{Bytes, BytesMut};

/// Bytes that go over the wire, possibly handed over as several fragments.
///
/// Fragments are never concatenated for signing: length and digest are
/// computed across them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Body {
    /// No body at all.
    #[default]
    Empty,
    /// A single contiguous buffer.
    Bytes(Bytes),
    /// A body split into fragments, sent in order.
    Fragments(Vec<Bytes>),
}

impl Body {
    /// Total length in bytes.
    pub fn len(&self) -> usize {
        match self {
            Body::Empty => 0,
            Body::Bytes(bs) => bs.len(),
            Body::Fragments(fs) => fs.iter().map(Bytes::len).sum(),
        }
    }

    /// Whether the body carries no bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate the body fragment by fragment.
    pub fn chunks(&self) -> impl Iterator<Item = &[u8]> {
        let fragments: &[Bytes] = match self {
            Body::Empty => &[],
            Body::Bytes(bs) => std::slice::from_ref(bs),
            Body::Fragments(fs) => fs,
        };
        fragments.iter().map(|b| b.as_ref())
    }

    /// Collapse the body into one buffer for the transport.
    pub fn into_bytes(self) -> Bytes {
        match self {
            Body::Empty => Bytes::new(),
            Body::Bytes(bs) => bs,
            Body::Fragments(fs) => {
                let mut buf = BytesMut::with_capacity(fs.iter().map(Bytes::len).sum());
                for f in fs {
                    buf.extend_from_slice(&f);
                }
                buf.freeze()
            }
        }
    }
}

impl From<Bytes> for Body {
    fn from(bs: Bytes) -> Self {
        Body::Bytes(bs)
    }
}

impl From<Vec<u8>> for Body {
    fn from(bs: Vec<u8>) -> Self {
        Body::Bytes(Bytes::from(bs))
    }
}

impl From<String> for Body {
    fn from(s: String) -> Self {
        Body::Bytes(Bytes::from(s))
    }
}

impl From<&'static str> for Body {
    fn from(s: &'static str) -> Self {
        Body::Bytes(Bytes::from_static(s.as_bytes()))
    }
}

impl From<Vec<Bytes>> for Body {
    fn from(fs: Vec<Bytes>) -> Self {
        Body::Fragments(fs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragmented_len_and_bytes() {
        let body = Body::from(vec![
            Bytes::from_static(b"{\"name\":"),
            Bytes::from_static("\"caf\u{e9}\"".as_bytes()),
            Bytes::new(),
            Bytes::from_static(b"}"),
        ]);

        assert_eq!(body.len(), 16);
        assert_eq!(body.chunks().count(), 4);
        assert_eq!(body.into_bytes(), Bytes::from("{\"name\":\"caf\u{e9}\"}"));
    }

    #[test]
    fn test_empty() {
        assert!(Body::Empty.is_empty());
        assert!(Body::from(Vec::<Bytes>::new()).is_empty());
        assert_eq!(Body::Empty.chunks().count(), 0);
        assert_eq!(Body::Empty.into_bytes(), Bytes::new());
    }
}
