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

use crate::constants::*;
use ini::Ini;
use log::debug;
use ocirest_core::utils::Redact;
use ocirest_core::{Context, Error, Result};
use std::fmt::{Debug, Formatter};

/// Config for Oracle Cloud Infrastructure services.
///
/// Every field is optional; credential providers decide which combination
/// is enough to build a [`crate::Credential`].
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// UserID for Oracle Cloud Infrastructure.
    pub user: Option<String>,
    /// TenancyID for Oracle Cloud Infrastructure.
    pub tenancy: Option<String>,
    /// Region for Oracle Cloud Infrastructure.
    pub region: Option<String>,
    /// Private key file path for Oracle Cloud Infrastructure.
    pub key_file: Option<String>,
    /// Fingerprint for the key_file.
    pub fingerprint: Option<String>,
    /// Passphrase of the private key, if it is encrypted.
    pub pass_phrase: Option<String>,
    /// Config file path to load credentials.
    pub config_file: Option<String>,
    /// Profile name in the config file.
    pub profile: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("user", &self.user)
            .field("tenancy", &self.tenancy)
            .field("region", &self.region)
            .field("key_file", &self.key_file)
            .field("fingerprint", &self.fingerprint)
            .field("pass_phrase", &Redact::from(&self.pass_phrase))
            .field("config_file", &self.config_file)
            .field("profile", &self.profile)
            .finish()
    }
}

impl Config {
    /// Load config from environment variables.
    pub fn from_env(ctx: &Context) -> Self {
        Self {
            user: ctx.env_var(ORACLE_USER),
            tenancy: ctx.env_var(ORACLE_TENANCY),
            region: ctx.env_var(ORACLE_REGION),
            key_file: ctx.env_var(ORACLE_KEY_FILE),
            fingerprint: ctx.env_var(ORACLE_FINGERPRINT),
            pass_phrase: ctx.env_var(ORACLE_PASS_PHRASE),
            config_file: ctx.env_var(ORACLE_CONFIG_FILE),
            profile: ctx.env_var(ORACLE_PROFILE),
        }
    }

    /// Load config from an Oracle config file.
    ///
    /// Returns `Ok(None)` if the file cannot be read or the profile is
    /// absent, an error if the file is not valid INI.
    pub async fn from_config_file(ctx: &Context, path: &str, profile: &str) -> Result<Option<Self>> {
        let content = match ctx.file_read_as_string(path).await {
            Ok(content) => content,
            Err(err) => {
                debug!("oracle config file not readable at {path}: {err}");
                return Ok(None);
            }
        };
        Self::parse(&content, path, profile)
    }

    fn parse(content: &str, path: &str, profile: &str) -> Result<Option<Self>> {
        let ini = Ini::load_from_str(content).map_err(|e| {
            Error::config_invalid(format!("failed to parse config file {path}")).with_source(e)
        })?;
        let Some(section) = ini.section(Some(profile)) else {
            return Ok(None);
        };

        let get = |key: &str| section.get(key).map(|s| s.trim().to_string());
        Ok(Some(Self {
            user: get("user"),
            tenancy: get("tenancy"),
            region: get("region"),
            key_file: get("key_file"),
            fingerprint: get("fingerprint"),
            pass_phrase: get("pass_phrase"),
            config_file: Some(path.to_string()),
            profile: Some(profile.to_string()),
        }))
    }
}
