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

use crate::command::response_key;
use crate::constants::*;
use crate::page_size::PageSizeDiscovery;
use crate::{Client, Params};
use cloudstack_core::{Error, Result};
use log::{debug, warn};
use serde_json::{Map, Value};

impl Client {
    /// Fetch every page of a list command and merge them into one envelope.
    ///
    /// Pages are requested one after another starting at `1`, until a page
    /// reports fewer items than the page size or [`MAX_PAGES`] pages were
    /// fetched. Any failing page fails the whole call.
    ///
    /// Without a known page size a single page is fetched.
    pub async fn aggregate(&self, command: &str, params: &Params) -> Result<Value> {
        let page_size = match self.discover_page_size().await {
            PageSizeDiscovery::Unavailable(err) => {
                warn!("page size unavailable, {command} will fetch a single page: {err}");
                None
            }
            discovery => discovery.page_size(),
        };

        let key = response_key(command);
        let mut merged = Map::new();
        let mut page = 1;

        loop {
            let mut page_params = params.clone();
            page_params.insert(PARAM_PAGE.to_string(), page.to_string());
            if let Some(size) = page_size {
                page_params.insert(PARAM_PAGE_SIZE.to_string(), size.to_string());
            }

            let resp = self.execute(command, &page_params).await?;
            let inner = take_response(resp, &key)?;
            let count = inner.get(FIELD_COUNT).and_then(Value::as_u64).unwrap_or(0);
            debug!("{command} page {page} reported count {count}");

            merge_page(&mut merged, inner);

            match next_page(page, count, page_size) {
                Some(next) => page = next,
                None => break,
            }
        }

        let mut envelope = Map::new();
        envelope.insert(key, Value::Object(merged));
        Ok(Value::Object(envelope))
    }
}

/// Decide which page comes after `page`, given the count it reported.
///
/// Returns `None` once a short page shows the data is exhausted, when the page
/// size is unknown, or after [`MAX_PAGES`] pages even if more data remains.
pub fn next_page(page: usize, count: u64, page_size: Option<usize>) -> Option<usize> {
    let size = page_size? as u64;
    if page >= MAX_PAGES || count < size {
        return None;
    }

    Some(page + 1)
}

/// Merge one page's inner response object into `acc`.
///
/// - `count` is summed.
/// - An array field already present is extended with the page's array.
/// - A field not yet present is inserted as is.
/// - Any other field already present is replaced by the page's value.
pub fn merge_page(acc: &mut Map<String, Value>, page: Map<String, Value>) {
    for (k, v) in page {
        match acc.get_mut(&k) {
            None => {
                acc.insert(k, v);
            }
            Some(existing) if k == FIELD_COUNT => {
                let total = existing.as_u64().unwrap_or(0) + v.as_u64().unwrap_or(0);
                *existing = Value::from(total);
            }
            Some(Value::Array(items)) => match v {
                Value::Array(more) => items.extend(more),
                other => items.push(other),
            },
            Some(existing) => *existing = v,
        }
    }
}

/// Take the object under `key` out of a response envelope.
///
/// An envelope without `key` is an empty page, some servers answer
/// `{"listhostsresponse": {}}` and others `{}` when there is nothing to list.
fn take_response(resp: Value, key: &str) -> Result<Map<String, Value>> {
    let Value::Object(mut envelope) = resp else {
        return Err(Error::decode(format!(
            "response is not a json object, expected {key}"
        )));
    };

    match envelope.remove(key) {
        None => Ok(Map::new()),
        Some(Value::Object(inner)) => Ok(inner),
        Some(other) => Err(Error::decode(format!(
            "{key} is not a json object: {other}"
        ))),
    }
}
