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

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

/// Default config path for oracle services.
pub const ORACLE_CONFIG_PATH: &str = "~/.oci/config";
/// Default profile name
pub const ORACLE_DEFAULT_PROFILE: &str = "DEFAULT";

// Environment variables for Oracle Cloud Infrastructure
pub const ORACLE_USER: &str = "OCI_USER";
pub const ORACLE_TENANCY: &str = "OCI_TENANCY";
pub const ORACLE_REGION: &str = "OCI_REGION";
pub const ORACLE_KEY_FILE: &str = "OCI_KEY_FILE";
pub const ORACLE_FINGERPRINT: &str = "OCI_FINGERPRINT";
pub const ORACLE_PASS_PHRASE: &str = "OCI_PASS_PHRASE";
pub const ORACLE_CONFIG_FILE: &str = "OCI_CONFIG_FILE";
pub const ORACLE_PROFILE: &str = "OCI_PROFILE";

/// Placeholder substituted with the credential's region in base URLs.
pub const REGION_PLACEHOLDER: &str = "{region}";

/// Response header carrying the id used to trace a call end to end.
pub const OPC_REQUEST_ID: &str = "opc-request-id";
/// Metadata key the correlation header is always stored under.
pub const OPC_REQUEST_ID_KEY: &str = "opc_request_id";

pub const X_CONTENT_SHA256: &str = "x-content-sha256";
pub const REQUEST_TARGET: &str = "(request-target)";
pub const APPLICATION_JSON: &str = "application/json";

/// AsciiSet for query parameters: everything but `A-Za-z0-9-._~` is encoded.
pub static QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
