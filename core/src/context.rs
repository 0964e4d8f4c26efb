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

use crate::{Error, Result};
use bytes::Bytes;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Context holds the ports a call goes through: the network transport, the
/// body codec, and the file and environment access used while loading
/// credentials.
///
/// ## Important
///
/// ocirest provides NO default implementations. Any unconfigured component
/// uses a no-op implementation that returns errors or empty values when called.
///
/// ## Example
///
/// ```
/// use ocirest_core::{Context, OsEnv};
///
/// let ctx = Context::new().with_env(OsEnv);
/// ```
#[derive(Clone)]
pub struct Context {
    fs: Arc<dyn FileRead>,
    http: Arc<dyn HttpSend>,
    codec: Arc<dyn Codec>,
    env: Arc<dyn Env>,
}

impl Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("fs", &self.fs)
            .field("http", &self.http)
            .field("codec", &self.codec)
            .field("env", &self.env)
            .finish()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Create a new Context with no-op implementations.
    ///
    /// ```
    /// use ocirest_core::Context;
    ///
    /// let ctx = Context::new();
    /// // ctx.with_http_send(my_transport)
    /// //    .with_codec(my_codec)
    /// //    .with_file_read(my_file_reader);
    /// ```
    pub fn new() -> Self {
        Self {
            fs: Arc::new(NoopFileRead),
            http: Arc::new(NoopHttpSend),
            codec: Arc::new(NoopCodec),
            env: Arc::new(NoopEnv),
        }
    }

    /// Replace the file reader implementation.
    pub fn with_file_read(mut self, fs: impl FileRead) -> Self {
        self.fs = Arc::new(fs);
        self
    }

    /// Replace the transport implementation.
    pub fn with_http_send(mut self, http: impl HttpSend) -> Self {
        self.http = Arc::new(http);
        self
    }

    /// Replace the body codec implementation.
    pub fn with_codec(mut self, codec: impl Codec) -> Self {
        self.codec = Arc::new(codec);
        self
    }

    /// Replace the environment implementation.
    pub fn with_env(mut self, env: impl Env) -> Self {
        self.env = Arc::new(env);
        self
    }

    /// Read the file content entirely in `Vec<u8>`.
    #[inline]
    pub async fn file_read(&self, path: &str) -> Result<Vec<u8>> {
        self.fs.file_read(path).await
    }

    /// Read the file content entirely in `String`.
    pub async fn file_read_as_string(&self, path: &str) -> Result<String> {
        let bytes = self.file_read(path).await?;
        Ok(String::from_utf8_lossy(&bytes).to_string())
    }

    /// Send http request and return the raw response.
    #[inline]
    pub async fn http_send(
        &self,
        req: http::Request<Bytes>,
        opts: &TransportOptions,
    ) -> std::result::Result<http::Response<Bytes>, TransportError> {
        self.http.http_send(req, opts).await
    }

    /// Encode a structured value into wire bytes.
    #[inline]
    pub fn encode(&self, value: &Value) -> Result<Bytes> {
        self.codec.encode(value)
    }

    /// Decode wire bytes into a structured value.
    #[inline]
    pub fn decode(&self, bytes: &[u8]) -> Result<Value> {
        self.codec.decode(bytes)
    }

    /// Get the home directory of the current user.
    #[inline]
    pub fn home_dir(&self) -> Option<PathBuf> {
        self.env.home_dir()
    }

    /// Expand `~` in input path.
    ///
    /// - If path not starts with `~/` or `~\\`, returns `Some(path)` directly.
    /// - Otherwise, replace `~` with home dir instead.
    /// - If home_dir is not found, returns `None`.
    pub fn expand_home_dir(&self, path: &str) -> Option<String> {
        if !path.starts_with("~/") && !path.starts_with("~\\") {
            Some(path.to_string())
        } else {
            self.home_dir()
                .map(|home| path.replacen('~', &home.to_string_lossy(), 1))
        }
    }

    /// Get the environment variable.
    #[inline]
    pub fn env_var(&self, key: &str) -> Option<String> {
        self.env.var(key)
    }
}

/// FileRead is used to read the file content entirely in `Vec<u8>`.
///
/// Credential providers use it to read config files and private keys.
#[async_trait::async_trait]
pub trait FileRead: Debug + Send + Sync + 'static {
    /// Read the file content entirely in `Vec<u8>`.
    async fn file_read(&self, path: &str) -> Result<Vec<u8>>;
}

/// Per-call hints handed to the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportOptions {
    /// Upper bound for the whole exchange, if the caller wants one.
    pub timeout: Option<Duration>,
}

/// A failure below the HTTP layer: no status line or headers were received.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The connection could not be established.
    #[error("connect failed: {0}")]
    ConnectFailed(String),
    /// The request could not be sent.
    #[error("request failed: {0}")]
    RequestFailed(String),
    /// The response could not be read.
    #[error("receive failed: {0}")]
    ReceiveFailed(String),
    /// The exchange did not complete in time.
    #[error("timed out")]
    Timeout,
}

/// HttpSend is the transport port.
///
/// Timeouts, connection pooling and retries are the implementation's business;
/// every error it returns is treated as terminal for the call.
#[async_trait::async_trait]
pub trait HttpSend: Debug + Send + Sync + 'static {
    /// Send http request and return the response.
    async fn http_send(
        &self,
        req: http::Request<Bytes>,
        opts: &TransportOptions,
    ) -> std::result::Result<http::Response<Bytes>, TransportError>;
}

/// Codec is the body serialization port.
///
/// Failures must be reported as [`crate::ErrorKind::Codec`].
pub trait Codec: Debug + Send + Sync + 'static {
    /// Encode a value into bytes.
    fn encode(&self, value: &Value) -> Result<Bytes>;

    /// Decode bytes into a value.
    fn decode(&self, bytes: &[u8]) -> Result<Value>;
}

/// Permits parameterizing environment access.
pub trait Env: Debug + Send + Sync + 'static {
    /// Get an environment variable.
    ///
    /// - Returns `Some(v)` if the environment variable is found and is valid utf-8.
    /// - Returns `None` if the environment variable is not found or value is invalid.
    fn var(&self, key: &str) -> Option<String>;

    /// Return the path to the users home dir, returns `None` if any error occurs.
    fn home_dir(&self) -> Option<PathBuf>;
}

/// Implements Env for the OS context.
#[derive(Debug, Copy, Clone)]
pub struct OsEnv;

impl Env for OsEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var_os(key)?.into_string().ok()
    }

    #[cfg(not(windows))]
    fn home_dir(&self) -> Option<PathBuf> {
        #[allow(deprecated)]
        std::env::home_dir()
    }

    #[cfg(windows)]
    fn home_dir(&self) -> Option<PathBuf> {
        std::env::var_os("USERPROFILE")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }
}

/// StaticEnv provides a static env environment.
///
/// This is useful for testing or for providing a fixed environment.
#[derive(Debug, Clone, Default)]
pub struct StaticEnv {
    /// The home directory to use.
    pub home_dir: Option<PathBuf>,
    /// The environment variables to use.
    pub envs: HashMap<String, String>,
}

impl Env for StaticEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.envs.get(key).cloned()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home_dir.clone()
    }
}

/// NoopFileRead is a no-op implementation that always returns an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFileRead;

#[async_trait::async_trait]
impl FileRead for NoopFileRead {
    async fn file_read(&self, _path: &str) -> Result<Vec<u8>> {
        Err(Error::unexpected(
            "file reading not supported: no file reader configured",
        ))
    }
}

/// NoopHttpSend is a no-op implementation that always fails to connect.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHttpSend;

#[async_trait::async_trait]
impl HttpSend for NoopHttpSend {
    async fn http_send(
        &self,
        _req: http::Request<Bytes>,
        _opts: &TransportOptions,
    ) -> std::result::Result<http::Response<Bytes>, TransportError> {
        Err(TransportError::ConnectFailed(
            "no transport configured".to_string(),
        ))
    }
}

/// NoopCodec is a no-op implementation that always returns a codec error.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCodec;

impl Codec for NoopCodec {
    fn encode(&self, _value: &Value) -> Result<Bytes> {
        Err(Error::codec("encoding not supported: no codec configured"))
    }

    fn decode(&self, _bytes: &[u8]) -> Result<Value> {
        Err(Error::codec("decoding not supported: no codec configured"))
    }
}

/// NoopEnv is a no-op implementation that always returns None/empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEnv;

impl Env for NoopEnv {
    fn var(&self, _key: &str) -> Option<String> {
        None
    }

    fn home_dir(&self) -> Option<PathBuf> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[tokio::test]
    async fn test_noop_ports() {
        let ctx = Context::new();

        let err = ctx.file_read("/etc/hosts").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unexpected);

        let err = ctx.decode(b"{}").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Codec);

        let req = http::Request::new(Bytes::new());
        let err = ctx
            .http_send(req, &TransportOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::ConnectFailed(_)));
    }

    #[test]
    fn test_expand_home_dir() {
        let ctx = Context::new().with_env(StaticEnv {
            home_dir: Some(PathBuf::from("/home/opc")),
            envs: HashMap::new(),
        });

        assert_eq!(
            ctx.expand_home_dir("~/.oci/config").as_deref(),
            Some("/home/opc/.oci/config")
        );
        assert_eq!(
            ctx.expand_home_dir("/etc/oci/config").as_deref(),
            Some("/etc/oci/config")
        );
        assert_eq!(Context::new().expand_home_dir("~/.oci/config"), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_os_env_home_dir() {
        let home = std::env::var_os("HOME").filter(|v| !v.is_empty());
        if let Some(home) = home {
            assert_eq!(OsEnv.home_dir(), Some(PathBuf::from(home)));
        }

        let ctx = Context::new().with_env(OsEnv);
        assert_eq!(ctx.home_dir(), OsEnv.home_dir());
    }
}
