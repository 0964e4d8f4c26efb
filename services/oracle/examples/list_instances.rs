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

//! List compute instances in a compartment.
//!
//! ```shell
//! RUST_LOG=debug cargo run --example list_instances -- <compartment-ocid>
//! ```

use anyhow::{anyhow, Result};
use log::info;
use ocirest_codec_serde_json::SerdeJsonCodec;
use ocirest_core::{Context, OsEnv, ProvideCredential};
use ocirest_file_read_tokio::TokioFileRead;
use ocirest_http_send_reqwest::ReqwestHttpSend;
use ocirest_oracle::{
    CallError, Client, DefaultCredentialProvider, Payload, RequestSpec, ResponsePolicy,
};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let compartment = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow!("usage: list_instances <compartment-ocid>"))?;

    let ctx = Context::new()
        .with_file_read(TokioFileRead)
        .with_http_send(ReqwestHttpSend::default())
        .with_codec(SerdeJsonCodec)
        .with_env(OsEnv);

    let cred = DefaultCredentialProvider::new()
        .provide_credential(&ctx)
        .await?
        .ok_or_else(|| anyhow!("no credential in OCI_* env vars or ~/.oci/config"))?;
    info!("using credential {cred:?}");

    let spec = RequestSpec::get("https://iaas.{region}.oraclecloud.com")
        .with_path("/20160918/instances")
        .with_query("compartmentId", compartment)
        .with_query("limit", "20")
        .with_policy(ResponsePolicy::new().with_only_headers(["opc-next-page"]));

    match Client::new(ctx).execute(&cred, spec).await {
        Ok(resp) => {
            println!("request id: {:?}", resp.metadata.request_id());
            println!("next page: {:?}", resp.metadata.get("opc-next-page"));
            if let Some(Payload::Json(instances)) = resp.data {
                println!("{}", serde_json::to_string_pretty(&instances)?);
            }
        }
        Err(CallError::Service {
            status, metadata, ..
        }) => {
            println!(
                "service error {status}, request id: {:?}",
                metadata.request_id()
            );
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
