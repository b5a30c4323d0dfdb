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

use crate::command::is_list_command;
use crate::constants::*;
use crate::{Command, Config, Credential, Params, RequestSigner};
use bytes::Bytes;
use cloudstack_core::utils::redact_query;
use cloudstack_core::{Context, Error, ProvideCredential, Result, SigningCredential};
use log::debug;
use once_cell::sync::OnceCell;
use serde_json::Value;
use std::sync::Arc;

/// Client for the CloudStack management API.
///
/// Cloning is cheap and clones share the discovered page size.
#[derive(Clone, Debug)]
pub struct Client {
    ctx: Context,
    base_url: Arc<str>,
    signer: RequestSigner,
    pub(crate) page_size: Arc<OnceCell<usize>>,
}

impl Client {
    /// Create a new client.
    ///
    /// Trailing `/` are stripped from `base_url`.
    pub fn new(ctx: Context, base_url: &str, api_key: &str, secret_key: &str) -> Self {
        Self::with_credential(ctx, base_url, Credential::new(api_key, secret_key))
    }

    fn with_credential(ctx: Context, base_url: &str, credential: Credential) -> Self {
        Self {
            ctx,
            base_url: Arc::from(base_url.trim_end_matches('/')),
            signer: RequestSigner::new(credential),
            page_size: Arc::new(OnceCell::new()),
        }
    }

    /// Create a new client from a [`Config`], every field must be set.
    pub fn from_config(ctx: Context, config: &Config) -> Result<Self> {
        let Some(base_url) = &config.base_url else {
            return Err(Error::config_invalid("base_url is required"));
        };
        let (Some(api_key), Some(secret_key)) = (&config.api_key, &config.secret_key) else {
            return Err(Error::config_invalid("api_key and secret_key are required"));
        };

        Ok(Self::new(ctx, base_url, api_key, secret_key))
    }

    /// Create a new client, loading its credential from `provider`.
    pub async fn from_provider(
        ctx: Context,
        base_url: &str,
        provider: impl ProvideCredential<Credential = Credential>,
    ) -> Result<Self> {
        let credential = provider.provide_credential(&ctx).await?;
        let Some(credential) = credential.filter(|c| c.is_valid()) else {
            return Err(Error::credential_invalid(format!(
                "no valid credential found by {provider:?}"
            )));
        };

        Ok(Self::with_credential(ctx, base_url, credential))
    }

    /// The normalized base url, without trailing `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The page size discovered so far, if any.
    pub fn page_size(&self) -> Option<usize> {
        self.page_size.get().copied()
    }

    /// Issue exactly one signed `GET` for `command` and decode the JSON body.
    ///
    /// `params` is not modified. A non-success status fails with
    /// [`ErrorKind::ResponseStatus`](cloudstack_core::ErrorKind::ResponseStatus),
    /// keeping the raw body for inspection.
    pub async fn execute(&self, command: &str, params: &Params) -> Result<Value> {
        let url = self.signer.build_url(&self.base_url, command, params)?;
        debug!(
            "sending request: {}",
            redact_query(&url, &[PARAM_API_KEY, PARAM_SIGNATURE])
        );

        let req = http::Request::get(url.as_str()).body(Bytes::new())?;
        let resp = self.ctx.http_send_as_string(req).await?;

        let status = resp.status();
        let body = resp.into_body();
        if !status.is_success() {
            debug!("{command} failed with status {status}");
            return Err(
                Error::response_status(format!("{command} failed with status {status}"))
                    .with_response(status, body),
            );
        }

        serde_json::from_str(&body).map_err(|e| {
            Error::decode(format!("{command} returned a body that is not json")).with_source(e)
        })
    }

    /// Run any command, paginating it when its name starts with `list`.
    pub async fn request_command(&self, command: &str, params: Params) -> Result<Value> {
        if is_list_command(command) {
            self.aggregate(command, &params).await
        } else {
            self.execute(command, &params).await
        }
    }

    /// Run a known command.
    pub async fn request(&self, command: Command, params: Params) -> Result<Value> {
        self.request_command(command.as_str(), params).await
    }

    pub async fn list_configurations(&self, params: Params) -> Result<Value> {
        self.request(Command::ListConfigurations, params).await
    }

    pub async fn list_domains(&self, params: Params) -> Result<Value> {
        self.request(Command::ListDomains, params).await
    }

    pub async fn list_domain_children(&self, params: Params) -> Result<Value> {
        self.request(Command::ListDomainChildren, params).await
    }

    pub async fn list_zones(&self, params: Params) -> Result<Value> {
        self.request(Command::ListZones, params).await
    }

    pub async fn list_pods(&self, params: Params) -> Result<Value> {
        self.request(Command::ListPods, params).await
    }

    pub async fn list_clusters(&self, params: Params) -> Result<Value> {
        self.request(Command::ListClusters, params).await
    }

    pub async fn list_hosts(&self, params: Params) -> Result<Value> {
        self.request(Command::ListHosts, params).await
    }

    pub async fn list_system_vms(&self, params: Params) -> Result<Value> {
        self.request(Command::ListSystemVms, params).await
    }

    pub async fn list_routers(&self, params: Params) -> Result<Value> {
        self.request(Command::ListRouters, params).await
    }

    pub async fn list_virtual_machines(&self, params: Params) -> Result<Value> {
        self.request(Command::ListVirtualMachines, params).await
    }

    pub async fn list_capacity(&self, params: Params) -> Result<Value> {
        self.request(Command::ListCapacity, params).await
    }

    pub async fn list_alerts(&self, params: Params) -> Result<Value> {
        self.request(Command::ListAlerts, params).await
    }

    pub async fn list_events(&self, params: Params) -> Result<Value> {
        self.request(Command::ListEvents, params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StaticCredentialProvider;
    use cloudstack_core::{ErrorKind, ProvideCredentialChain};

    #[test]
    fn test_new_strips_trailing_separator() {
        let client = Client::new(Context::new(), "http://host/", "key", "secret");
        assert_eq!(client.base_url(), "http://host");
        assert_eq!(client.page_size(), None);
    }

    #[test]
    fn test_from_config_requires_every_field() {
        let config = Config {
            base_url: Some("http://host".to_string()),
            api_key: Some("key".to_string()),
            secret_key: None,
        };
        let err = Client::from_config(Context::new(), &config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

        let err = Client::from_config(Context::new(), &Config::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[tokio::test]
    async fn test_from_provider() -> Result<()> {
        let client = Client::from_provider(
            Context::new(),
            "http://host//",
            StaticCredentialProvider::new("key", "secret"),
        )
        .await?;
        assert_eq!(client.base_url(), "http://host");

        let err = Client::from_provider(
            Context::new(),
            "http://host",
            ProvideCredentialChain::<Credential>::new(),
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
        Ok(())
    }

    #[tokio::test]
    async fn test_execute_without_transport_is_transport_error() {
        let client = Client::new(Context::new(), "http://host", "key", "secret");
        let err = client.execute("listZones", &Params::new()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }
}
