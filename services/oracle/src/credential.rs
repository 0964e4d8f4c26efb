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

use ocirest_core::{Error, Result};
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs1v15::{SigningKey, VerifyingKey};
use rsa::pkcs8::DecodePrivateKey;
use rsa::sha2::Sha256;
use rsa::signature::Keypair;
use rsa::RsaPrivateKey;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Credential that holds the API signing key for Oracle Cloud Infrastructure.
///
/// The private key is parsed once, when the credential is built; a credential
/// that exists is always able to sign. Clones share the parsed key.
#[derive(Clone)]
pub struct Credential {
    /// TenancyID for Oracle Cloud Infrastructure.
    pub tenancy: String,
    /// UserID for Oracle Cloud Infrastructure.
    pub user: String,
    /// Fingerprint of the API Key.
    pub fingerprint: String,
    /// Region the calls are sent to, e.g. `us-ashburn-1`.
    pub region: String,
    key: Arc<SigningKey<Sha256>>,
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("tenancy", &self.tenancy)
            .field("user", &self.user)
            .field("fingerprint", &self.fingerprint)
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

impl Credential {
    /// Build a credential from an unencrypted PEM private key.
    ///
    /// Both PKCS#8 (`BEGIN PRIVATE KEY`) and PKCS#1 (`BEGIN RSA PRIVATE KEY`)
    /// encodings are accepted. The content must hold exactly one PEM entry.
    pub fn new(
        tenancy: impl Into<String>,
        user: impl Into<String>,
        fingerprint: impl Into<String>,
        region: impl Into<String>,
        private_key_pem: &str,
    ) -> Result<Self> {
        ensure_single_entry(private_key_pem)?;

        let key = RsaPrivateKey::from_pkcs8_pem(private_key_pem)
            .or_else(|_| RsaPrivateKey::from_pkcs1_pem(private_key_pem))
            .map_err(|e| Error::credential_invalid(format!("failed to parse private key: {e}")))?;

        Ok(Self::from_key(tenancy, user, fingerprint, region, key))
    }

    /// Build a credential from a passphrase protected PKCS#8 PEM private key.
    pub fn new_encrypted(
        tenancy: impl Into<String>,
        user: impl Into<String>,
        fingerprint: impl Into<String>,
        region: impl Into<String>,
        private_key_pem: &str,
        pass_phrase: &str,
    ) -> Result<Self> {
        ensure_single_entry(private_key_pem)?;

        let key = RsaPrivateKey::from_pkcs8_encrypted_pem(private_key_pem, pass_phrase.as_bytes())
            .map_err(|e| {
                Error::credential_invalid(format!("failed to decrypt private key: {e}"))
            })?;

        Ok(Self::from_key(tenancy, user, fingerprint, region, key))
    }

    fn from_key(
        tenancy: impl Into<String>,
        user: impl Into<String>,
        fingerprint: impl Into<String>,
        region: impl Into<String>,
        key: RsaPrivateKey,
    ) -> Self {
        Self {
            tenancy: tenancy.into(),
            user: user.into(),
            fingerprint: fingerprint.into(),
            region: region.into(),
            key: Arc::new(SigningKey::<Sha256>::new(key)),
        }
    }

    /// The `keyId` used in the `Authorization` header: `<tenancy>/<user>/<fingerprint>`.
    pub fn key_id(&self) -> String {
        format!("{}/{}/{}", self.tenancy, self.user, self.fingerprint)
    }

    /// The public half of the signing key, for verifying signatures.
    pub fn verifying_key(&self) -> VerifyingKey<Sha256> {
        self.key.verifying_key()
    }

    pub(crate) fn signing_key(&self) -> &SigningKey<Sha256> {
        &self.key
    }
}

fn ensure_single_entry(pem: &str) -> Result<()> {
    match pem.matches("-----BEGIN ").count() {
        1 => Ok(()),
        0 => Err(Error::credential_invalid(
            "private key is not PEM encoded: no entry found",
        )),
        n => Err(Error::credential_invalid(format!(
            "private key must hold exactly one PEM entry, found {n}"
        ))),
    }
}
