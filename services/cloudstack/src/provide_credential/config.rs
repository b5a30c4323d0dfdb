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

use crate::{Config, Credential};
use async_trait::async_trait;
use cloudstack_core::{Context, ProvideCredential, Result};
use std::sync::Arc;

/// ConfigCredentialProvider takes the key pair from a [`Config`].
///
/// Yields nothing unless both `api_key` and `secret_key` are set.
#[derive(Debug)]
pub struct ConfigCredentialProvider {
    config: Arc<Config>,
}

impl ConfigCredentialProvider {
    /// Create a new ConfigCredentialProvider.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ProvideCredential for ConfigCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        match (&self.config.api_key, &self.config.secret_key) {
            (Some(ak), Some(sk)) => Ok(Some(Credential::new(ak, sk))),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::provide_credential::default_chain;
    use cloudstack_core::StaticEnv;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_config_credential_provider() -> Result<()> {
        let config = Arc::new(Config {
            api_key: Some("cfg_key".to_string()),
            secret_key: Some("cfg_secret".to_string()),
            ..Default::default()
        });

        let cred = ConfigCredentialProvider::new(config)
            .provide_credential(&Context::new())
            .await?
            .expect("credential must be loaded");
        assert_eq!(cred.api_key, "cfg_key");
        Ok(())
    }

    #[tokio::test]
    async fn test_default_chain_prefers_env() -> Result<()> {
        let config = Arc::new(Config {
            api_key: Some("cfg_key".to_string()),
            secret_key: Some("cfg_secret".to_string()),
            ..Default::default()
        });
        let chain = default_chain(config);

        let cred = chain.provide_credential(&Context::new()).await?;
        assert_eq!(cred.map(|c| c.api_key).as_deref(), Some("cfg_key"));

        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from([
                (CLOUDSTACK_APIKEY.to_string(), "env_key".to_string()),
                (CLOUDSTACK_SECRETKEY.to_string(), "env_secret".to_string()),
            ]),
        });
        let cred = chain.provide_credential(&ctx).await?;
        assert_eq!(cred.map(|c| c.api_key).as_deref(), Some("env_key"));
        Ok(())
    }
}
