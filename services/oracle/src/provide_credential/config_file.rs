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

use super::load_credential;
use crate::constants::{
    ORACLE_CONFIG_FILE, ORACLE_CONFIG_PATH, ORACLE_DEFAULT_PROFILE, ORACLE_PROFILE,
};
use crate::{Config, Credential};
use async_trait::async_trait;
use log::debug;
use ocirest_core::{Context, Error, ProvideCredential, Result};

/// ConfigFileCredentialProvider loads credentials from Oracle config file (~/.oci/config).
///
/// The config file path and profile name can be overridden using environment variables:
/// - `OCI_CONFIG_FILE`: Override the config file path
/// - `OCI_PROFILE`: Override the profile name (default is "DEFAULT")
///
/// A missing file or profile means "no credential here". A profile pointing
/// at an unreadable or invalid key is an error.
#[derive(Debug, Default, Clone)]
pub struct ConfigFileCredentialProvider {
    config_file: Option<String>,
    profile: Option<String>,
}

impl ConfigFileCredentialProvider {
    /// Create a new ConfigFileCredentialProvider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read this file unless `OCI_CONFIG_FILE` is set.
    pub fn with_config_file(mut self, path: impl Into<String>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Use this profile unless `OCI_PROFILE` is set.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }
}

#[async_trait]
impl ProvideCredential for ConfigFileCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let config_file = ctx
            .env_var(ORACLE_CONFIG_FILE)
            .or_else(|| self.config_file.clone())
            .unwrap_or_else(|| ORACLE_CONFIG_PATH.to_string());
        let profile = ctx
            .env_var(ORACLE_PROFILE)
            .or_else(|| self.profile.clone())
            .unwrap_or_else(|| ORACLE_DEFAULT_PROFILE.to_string());

        let path = ctx
            .expand_home_dir(&config_file)
            .ok_or_else(|| Error::config_invalid("failed to expand home directory"))?;

        let Some(cfg) = Config::from_config_file(ctx, &path, &profile).await? else {
            debug!("no profile {profile} in oracle config file {path}");
            return Ok(None);
        };

        debug!("loading credential from config file {path}, profile {profile}");
        load_credential(ctx, &cfg).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocirest_core::{ErrorKind, StaticEnv};
    use ocirest_file_read_tokio::TokioFileRead;
    use std::collections::HashMap;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().expect("tempfile must be created");
        f.write_all(content.as_bytes()).expect("config must be written");
        f
    }

    fn config(key_file: &str) -> String {
        format!(
            "[DEFAULT]\n\
             user=ocid1.user.oc1..aaaa\n\
             fingerprint=20:3b:97:13\n\
             key_file={key_file}\n\
             tenancy=ocid1.tenancy.oc1..bbbb\n\
             region=us-ashburn-1\n\
             \n\
             [OTHER]\n\
             user=ocid1.user.oc1..cccc\n\
             fingerprint=aa:bb\n\
             key_file={key_file}\n\
             tenancy=ocid1.tenancy.oc1..bbbb\n\
             region=sa-saopaulo-1\n"
        )
    }

    fn ctx(envs: HashMap<String, String>) -> Context {
        Context::new().with_file_read(TokioFileRead).with_env(StaticEnv {
            home_dir: Some(env!("CARGO_MANIFEST_DIR").into()),
            envs,
        })
    }

    #[tokio::test]
    async fn test_config_file_credential_provider() -> anyhow::Result<()> {
        let file = write_config(&config("~/testdata/private_key.pem"));
        let path = file.path().to_string_lossy().to_string();

        let cred = ConfigFileCredentialProvider::new()
            .with_config_file(&path)
            .provide_credential(&ctx(HashMap::new()))
            .await?
            .expect("credential must be loaded");
        assert_eq!(cred.user, "ocid1.user.oc1..aaaa");
        assert_eq!(cred.region, "us-ashburn-1");
        Ok(())
    }

    #[tokio::test]
    async fn test_config_file_credential_provider_env_overrides() -> anyhow::Result<()> {
        let file = write_config(&config("~/testdata/private_key.pem"));
        let envs = HashMap::from([
            (
                ORACLE_CONFIG_FILE.to_string(),
                file.path().to_string_lossy().to_string(),
            ),
            (ORACLE_PROFILE.to_string(), "OTHER".to_string()),
        ]);

        let cred = ConfigFileCredentialProvider::new()
            .with_config_file("/does/not/exist")
            .provide_credential(&ctx(envs))
            .await?
            .expect("credential must be loaded");
        assert_eq!(cred.region, "sa-saopaulo-1");
        Ok(())
    }

    #[tokio::test]
    async fn test_config_file_credential_provider_file_not_found() -> anyhow::Result<()> {
        let cred = ConfigFileCredentialProvider::new()
            .with_config_file("~/testdata/no_such_config")
            .provide_credential(&ctx(HashMap::new()))
            .await?;
        assert!(cred.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_config_file_credential_provider_profile_not_found() -> anyhow::Result<()> {
        let file = write_config(&config("~/testdata/private_key.pem"));

        let cred = ConfigFileCredentialProvider::new()
            .with_config_file(file.path().to_string_lossy())
            .with_profile("MISSING")
            .provide_credential(&ctx(HashMap::new()))
            .await?;
        assert!(cred.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_config_file_credential_provider_bad_key() {
        let file = write_config(&config("~/Cargo.toml"));

        let err = ConfigFileCredentialProvider::new()
            .with_config_file(file.path().to_string_lossy())
            .provide_credential(&ctx(HashMap::new()))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
    }
}
