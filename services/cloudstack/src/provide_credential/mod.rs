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

mod config;
pub use config::ConfigCredentialProvider;

mod env;
pub use env::EnvCredentialProvider;

mod r#static;
pub use r#static::StaticCredentialProvider;

/// A chain of providers yielding cloudstack [`Credential`](crate::Credential)s.
pub type ProvideCredentialChain = cloudstack_core::ProvideCredentialChain<crate::Credential>;

/// The chain used when nothing else is specified: environment first, then the
/// given config.
pub fn default_chain(config: std::sync::Arc<crate::Config>) -> ProvideCredentialChain {
    ProvideCredentialChain::new()
        .push(EnvCredentialProvider::new())
        .push(ConfigCredentialProvider::new(config))
}
