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

//! CloudStack management API client.
//!
//! This crate issues signed requests against the CloudStack API, discovers the
//! server's page size and merges paginated `list*` responses into one result.
//!
//! ## Overview
//!
//! Every request is a `GET` on `<base_url>/client/api` carrying `command`,
//! `apiKey`, `response=json`, the command's own parameters and finally a
//! `signature`: the base64 HMAC-SHA1 of the lower-cased, sorted query string,
//! keyed by the secret key.
//!
//! Commands whose name starts with `list` are paginated. The first list call
//! learns the page size from the server, then pages are fetched until one comes
//! back short (at most 20 pages). The pages are merged: `count` is summed and
//! item arrays are concatenated.
//!
//! ## Quick Start
//!
//! ```no_run
//! use cloudstack::{Client, Params};
//! use cloudstack_core::Context;
//! use cloudstack_http_send_reqwest::ReqwestHttpSend;
//!
//! #[tokio::main]
//! async fn main() -> cloudstack_core::Result<()> {
//!     let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
//!     let client = Client::new(ctx, "http://localhost:8080/", "api-key", "secret-key");
//!
//!     let zones = client
//!         .list_zones(Params::from([("available".to_string(), "true".to_string())]))
//!         .await?;
//!     println!("{}", zones["listzonesresponse"]["count"]);
//!     Ok(())
//! }
//! ```
//!
//! ## Credential Sources
//!
//! ```bash
//! export CLOUDSTACK_URL=http://localhost:8080/
//! export CLOUDSTACK_APIKEY=your-api-key
//! export CLOUDSTACK_SECRETKEY=your-secret-key
//! ```
//!
//! ```no_run
//! use cloudstack::{Client, Config};
//! use cloudstack_core::{Context, OsEnv};
//! use cloudstack_http_send_reqwest::ReqwestHttpSend;
//!
//! # fn example() -> cloudstack_core::Result<()> {
//! let ctx = Context::new()
//!     .with_http_send(ReqwestHttpSend::default())
//!     .with_env(OsEnv);
//! let config = Config::default().from_env(&ctx);
//! let client = Client::from_config(ctx, &config)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! Nothing is retried. A failure on any page fails the whole list call, and
//! errors caused by an unsuccessful response keep its raw body, see
//! [`cloudstack_core::Error::response_body`].

mod constants;
pub use constants::{MAX_PAGES, PROBE_PAGE_SIZE};

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod provide_credential;
pub use provide_credential::*;

mod sign_request;
pub use sign_request::{build_canonical_message, sign_url, RequestSigner};

mod command;
pub use command::{is_list_command, response_key, Command};

mod capacity;
pub use capacity::{capacity_type_string, CapacityType};

mod client;
pub use client::Client;

mod page_size;
pub use page_size::{parse_page_size, PageSizeDiscovery};

mod aggregate;
pub use aggregate::{merge_page, next_page};

/// Parameters of a command, on top of the ones the client adds itself.
pub type Params = std::collections::BTreeMap<String, String>;
