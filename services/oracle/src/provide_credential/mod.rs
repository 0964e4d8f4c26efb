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

mod config_file;
pub use config_file::ConfigFileCredentialProvider;
mod default;
pub use default::DefaultCredentialProvider;
mod env;
pub use env::EnvCredentialProvider;
mod static_;
pub use static_::StaticCredentialProvider;

use crate::{Config, Credential};
use log::debug;
use ocirest_core::{Context, Error, Result};

/// Build a credential from `cfg`, reading the key file through the file port.
///
/// Returns `Ok(None)` when a required field is missing.
async fn load_credential(ctx: &Context, cfg: &Config) -> Result<Option<Credential>> {
    let (Some(tenancy), Some(user), Some(fingerprint), Some(region), Some(key_file)) = (
        &cfg.tenancy,
        &cfg.user,
        &cfg.fingerprint,
        &cfg.region,
        &cfg.key_file,
    ) else {
        debug!("incomplete oracle config, skipping: {cfg:?}");
        return Ok(None);
    };

    let key_file = ctx
        .expand_home_dir(key_file)
        .ok_or_else(|| Error::config_invalid("failed to expand home directory"))?;
    let pem = ctx.file_read_as_string(&key_file).await.map_err(|e| {
        Error::credential_invalid(format!("failed to read key file {key_file}")).with_source(e)
    })?;

    let cred = match &cfg.pass_phrase {
        Some(pass_phrase) => {
            Credential::new_encrypted(tenancy, user, fingerprint, region, &pem, pass_phrase)?
        }
        None => Credential::new(tenancy, user, fingerprint, region, &pem)?,
    };
    Ok(Some(cred))
}
