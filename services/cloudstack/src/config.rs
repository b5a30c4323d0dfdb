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
use cloudstack_core::utils::Redact;
use cloudstack_core::Context;
use serde::Deserialize;
use std::fmt::{Debug, Formatter};

/// Config carries all the configuration needed to build a [`Client`](crate::Client).
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `base_url` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CLOUDSTACK_URL`]
    pub base_url: Option<String>,
    /// `api_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CLOUDSTACK_APIKEY`]
    pub api_key: Option<String>,
    /// `secret_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CLOUDSTACK_SECRETKEY`]
    pub secret_key: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("api_key", &Redact::from(&self.api_key))
            .field("secret_key", &Redact::from(&self.secret_key))
            .finish()
    }
}

impl Config {
    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(CLOUDSTACK_URL) {
            self.base_url.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(CLOUDSTACK_APIKEY) {
            self.api_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(CLOUDSTACK_SECRETKEY) {
            self.secret_key.get_or_insert(v);
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudstack_core::StaticEnv;
    use std::collections::HashMap;

    #[test]
    fn test_from_env_keeps_explicit_values() {
        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from([
                (CLOUDSTACK_URL.to_string(), "http://env/".to_string()),
                (CLOUDSTACK_APIKEY.to_string(), "env-key".to_string()),
                (CLOUDSTACK_SECRETKEY.to_string(), "env-secret".to_string()),
            ]),
        });

        let cfg = Config {
            api_key: Some("explicit-key".to_string()),
            ..Default::default()
        }
        .from_env(&ctx);

        assert_eq!(cfg.base_url.as_deref(), Some("http://env/"));
        assert_eq!(cfg.api_key.as_deref(), Some("explicit-key"));
        assert_eq!(cfg.secret_key.as_deref(), Some("env-secret"));
    }

    #[test]
    fn test_deserialize_partial() {
        let cfg: Config = serde_json::from_str(r#"{"base_url": "http://h/"}"#).unwrap();
        assert_eq!(cfg.base_url.as_deref(), Some("http://h/"));
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let cfg = Config {
            base_url: Some("http://h/".to_string()),
            api_key: Some("a-rather-long-api-key".to_string()),
            secret_key: Some("short".to_string()),
        };

        let s = format!("{cfg:?}");
        assert!(s.contains("a-r***key"));
        assert!(!s.contains("short"));
    }
}
