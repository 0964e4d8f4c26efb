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

//! Integration tests for ProvideCredentialChain with Oracle Cloud Infrastructure

use async_trait::async_trait;
use ocirest_core::{Context, ErrorKind, ProvideCredential, ProvideCredentialChain, Result, StaticEnv};
use ocirest_file_read_tokio::TokioFileRead;
use ocirest_oracle::{
    ConfigFileCredentialProvider, Credential, EnvCredentialProvider, StaticCredentialProvider,
};
use std::collections::HashMap;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const PEM: &str = include_str!("../testdata/private_key.pem");

/// Mock provider that tracks how many times it was called
#[derive(Debug)]
struct CountingProvider {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl ProvideCredential for CountingProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _ctx: &Context) -> Result<Option<Self::Credential>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(None)
    }
}

fn ctx(envs: HashMap<String, String>) -> Context {
    Context::new().with_file_read(TokioFileRead).with_env(StaticEnv {
        home_dir: None,
        envs,
    })
}

#[tokio::test]
async fn test_chain_falls_through_to_static() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let calls = Arc::new(AtomicUsize::new(0));

    let chain = ProvideCredentialChain::new()
        .push(EnvCredentialProvider::new())
        .push(CountingProvider {
            calls: calls.clone(),
        })
        .push(StaticCredentialProvider::from_pem(
            "static_tenancy",
            "static_user",
            "static_fingerprint",
            "ap-osaka-1",
            PEM,
        )?)
        .push(CountingProvider {
            calls: calls.clone(),
        });

    let cred = chain
        .provide_credential(&ctx(HashMap::new()))
        .await?
        .expect("static credential must be returned");
    assert_eq!(cred.user, "static_user");
    assert_eq!(cred.region, "ap-osaka-1");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn test_chain_recovers_from_broken_config_file() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut config = tempfile::NamedTempFile::new()?;
    write!(
        config,
        "[DEFAULT]\nuser=u\ntenancy=t\nfingerprint=f\nregion=r\nkey_file=/definitely/missing.pem\n"
    )?;

    let broken = ConfigFileCredentialProvider::new().with_config_file(config.path().to_string_lossy());
    let err = broken
        .provide_credential(&ctx(HashMap::new()))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CredentialInvalid);

    let chain = ProvideCredentialChain::new()
        .push(broken)
        .push(StaticCredentialProvider::from_pem("t", "u", "f", "r", PEM)?);
    let cred = chain.provide_credential(&ctx(HashMap::new())).await?;
    assert!(cred.is_some());
    Ok(())
}

#[tokio::test]
async fn test_chain_reports_broken_config_when_nothing_else_found() -> anyhow::Result<()> {
    let mut config = tempfile::NamedTempFile::new()?;
    // The config file doubles as a key file that is not PEM.
    let key_file = config.path().display().to_string();
    write!(
        config,
        "[DEFAULT]\nuser=u\ntenancy=t\nfingerprint=f\nregion=r\nkey_file={key_file}\n"
    )?;

    let chain = ProvideCredentialChain::new()
        .push(EnvCredentialProvider::new())
        .push(ConfigFileCredentialProvider::new().with_config_file(config.path().to_string_lossy()));

    let err = chain
        .provide_credential(&ctx(HashMap::new()))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
    Ok(())
}
