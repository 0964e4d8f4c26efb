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

//! Calls against a real tenancy, enabled with `OCIREST_ORACLE_TEST=on`.

use std::env;

use anyhow::Result;
use log::warn;
use ocirest_codec_serde_json::SerdeJsonCodec;
use ocirest_core::{Context, OsEnv, ProvideCredential};
use ocirest_file_read_tokio::TokioFileRead;
use ocirest_http_send_reqwest::ReqwestHttpSend;
use ocirest_oracle::{CallError, Client, Credential, DefaultCredentialProvider, RequestSpec};

async fn init_client() -> Option<(Client, Credential)> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    if env::var("OCIREST_ORACLE_TEST").ok().as_deref() != Some("on") {
        return None;
    }

    let ctx = Context::new()
        .with_file_read(TokioFileRead)
        .with_http_send(ReqwestHttpSend::default())
        .with_codec(SerdeJsonCodec)
        .with_env(OsEnv);

    let cred = DefaultCredentialProvider::new()
        .provide_credential(&ctx)
        .await
        .expect("load credential must success")
        .expect("credential must be configured");

    Some((Client::new(ctx), cred))
}

#[tokio::test]
async fn test_list_regions() -> Result<()> {
    let Some((client, cred)) = init_client().await else {
        warn!("OCIREST_ORACLE_TEST is not set, skipped");
        return Ok(());
    };

    let resp = client
        .execute(
            &cred,
            RequestSpec::get("https://identity.{region}.oraclecloud.com")
                .with_path("/20160918/regions"),
        )
        .await?;

    assert_eq!(resp.status, 200);
    assert!(resp.metadata.request_id().is_some());
    Ok(())
}

#[tokio::test]
async fn test_get_missing_instance() -> Result<()> {
    let Some((client, cred)) = init_client().await else {
        warn!("OCIREST_ORACLE_TEST is not set, skipped");
        return Ok(());
    };

    let err = client
        .execute(
            &cred,
            RequestSpec::get("https://iaas.{region}.oraclecloud.com")
                .with_path("/20160918/instances/ocid1.instance.oc1..doesnotexist"),
        )
        .await
        .unwrap_err();

    match err {
        CallError::Service {
            status, metadata, ..
        } => {
            assert!(status == 400 || status == 404, "got status {status}");
            assert!(metadata.request_id().is_some());
        }
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}
