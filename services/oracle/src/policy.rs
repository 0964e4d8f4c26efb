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

use std::collections::BTreeSet;

/// Status codes a call treats as success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuccessCodes {
    /// An explicit set of codes.
    Set(BTreeSet<u16>),
    /// An inclusive range of codes.
    Range(u16, u16),
}

impl SuccessCodes {
    /// Whether `status` is a success code.
    pub fn contains(&self, status: u16) -> bool {
        match self {
            SuccessCodes::Set(codes) => codes.contains(&status),
            SuccessCodes::Range(start, end) => (*start..=*end).contains(&status),
        }
    }
}

impl Default for SuccessCodes {
    fn default() -> Self {
        SuccessCodes::Range(200, 299)
    }
}

impl<const N: usize> From<[u16; N]> for SuccessCodes {
    fn from(codes: [u16; N]) -> Self {
        SuccessCodes::Set(BTreeSet::from(codes))
    }
}

/// Which response headers end up in the call metadata.
///
/// The `opc-request-id` correlation header is captured in every mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HeaderExtraction {
    /// Nothing beyond the correlation header.
    #[default]
    CorrelationOnly,
    /// Every response header.
    All,
    /// Only the listed headers, matched case-insensitively.
    Only(Vec<String>),
}

/// How a raw reply is judged and what is kept from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponsePolicy {
    success: SuccessCodes,
    headers: HeaderExtraction,
}

impl ResponsePolicy {
    /// Create the default policy: 2xx is success, only the correlation header is kept.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the success criteria.
    pub fn with_success(mut self, success: impl Into<SuccessCodes>) -> Self {
        self.success = success.into();
        self
    }

    /// Replace the header extraction mode.
    pub fn with_headers(mut self, headers: HeaderExtraction) -> Self {
        self.headers = headers;
        self
    }

    /// Keep every response header.
    pub fn with_all_headers(self) -> Self {
        self.with_headers(HeaderExtraction::All)
    }

    /// Keep only the given response headers.
    pub fn with_only_headers<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_headers(HeaderExtraction::Only(
            names.into_iter().map(Into::into).collect(),
        ))
    }

    /// Whether `status` counts as success.
    pub fn is_success(&self, status: u16) -> bool {
        self.success.contains(status)
    }

    /// Success criteria.
    pub fn success(&self) -> &SuccessCodes {
        &self.success
    }

    /// Header extraction mode.
    pub fn headers(&self) -> &HeaderExtraction {
        &self.headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(200, true)]
    #[test_case(202, true ; "accepted")]
    #[test_case(299, true ; "upper bound")]
    #[test_case(199, false)]
    #[test_case(300, false)]
    #[test_case(404, false)]
    fn test_default_success(status: u16, expected: bool) {
        assert_eq!(ResponsePolicy::new().is_success(status), expected);
    }

    #[test]
    fn test_success_set() {
        let policy = ResponsePolicy::new().with_success([200, 204]);
        assert!(policy.is_success(204));
        assert!(!policy.is_success(202));
    }

    #[test]
    fn test_success_range() {
        let policy = ResponsePolicy::new().with_success(SuccessCodes::Range(200, 404));
        assert!(policy.is_success(404));
        assert!(!policy.is_success(409));
    }

    #[test]
    fn test_header_modes() {
        assert_eq!(
            ResponsePolicy::new().headers(),
            &HeaderExtraction::CorrelationOnly
        );
        assert_eq!(
            ResponsePolicy::new().with_all_headers().headers(),
            &HeaderExtraction::All
        );
        assert_eq!(
            ResponsePolicy::new().with_only_headers(["ETag"]).headers(),
            &HeaderExtraction::Only(vec!["ETag".to_string()])
        );
    }
}
