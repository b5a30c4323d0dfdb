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

// Env values used by the cloudstack client.
pub const CLOUDSTACK_URL: &str = "CLOUDSTACK_URL";
pub const CLOUDSTACK_APIKEY: &str = "CLOUDSTACK_APIKEY";
pub const CLOUDSTACK_SECRETKEY: &str = "CLOUDSTACK_SECRETKEY";

// Path of the API endpoint, relative to the base url.
pub const API_PATH: &str = "/client/api";

// Query parameter names.
pub const PARAM_COMMAND: &str = "command";
pub const PARAM_API_KEY: &str = "apiKey";
pub const PARAM_RESPONSE: &str = "response";
pub const PARAM_PAGE: &str = "page";
pub const PARAM_PAGE_SIZE: &str = "pagesize";
pub const PARAM_SIGNATURE: &str = "signature";

pub const RESPONSE_FORMAT_JSON: &str = "json";

// Field of a list response that carries the number of items in this page.
pub const FIELD_COUNT: &str = "count";
// Field of an error response that carries the human readable message.
pub const FIELD_ERROR_TEXT: &str = "errortext";

/// Hard limit on pages fetched by a single aggregation.
///
/// At this many pages responses take too long to be useful. More data can be
/// captured by raising the server's `default.page.size` instead.
pub const MAX_PAGES: usize = 20;

/// Page size of the probe request used to discover the server limit.
///
/// No account has this many events, so a server enforcing a limit rejects it.
pub const PROBE_PAGE_SIZE: usize = 1_000_000;
