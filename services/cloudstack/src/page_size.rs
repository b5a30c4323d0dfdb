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

//! Discovery of the server's page size.
//!
//! There is no endpoint reporting the limit. Instead we ask `listEvents` for an
//! absurd page size, and the server rejects it with a message like
//! `"... : 500"` where the trailing number is the real limit.

use crate::constants::*;
use crate::{Client, Command, Params};
use cloudstack_core::{Error, Result};
use log::{debug, warn};
use serde_json::Value;

/// Outcome of [`Client::discover_page_size`].
#[derive(Debug)]
pub enum PageSizeDiscovery {
    /// A previous call already resolved the page size.
    Cached(usize),
    /// The probe was rejected and the limit parsed from the error text.
    Discovered(usize),
    /// The probe succeeded: the server accepts the probe's page size.
    Accepted(usize),
    /// Nothing could be learned, the next list call will probe again.
    Unavailable(Error),
}

impl PageSizeDiscovery {
    /// The page size to use, if known.
    pub fn page_size(&self) -> Option<usize> {
        match self {
            PageSizeDiscovery::Cached(v)
            | PageSizeDiscovery::Discovered(v)
            | PageSizeDiscovery::Accepted(v) => Some(*v),
            PageSizeDiscovery::Unavailable(_) => None,
        }
    }
}

/// Extract the page size limit from the body of a rejected `listEvents` probe.
///
/// ```
/// use cloudstack::parse_page_size;
///
/// let body = r#"{"listeventsresponse": {"errortext": "Max pagesize is : 500"}}"#;
/// assert_eq!(parse_page_size(body).unwrap(), 500);
/// ```
pub fn parse_page_size(body: &str) -> Result<usize> {
    let key = Command::ListEvents.response_key();

    let value: Value = serde_json::from_str(body).map_err(|e| {
        Error::page_size_unavailable("probe error body is not json").with_source(e)
    })?;
    let text = value
        .get(&key)
        .and_then(|v| v.get(FIELD_ERROR_TEXT))
        .and_then(Value::as_str)
        .ok_or_else(|| {
            Error::page_size_unavailable(format!("probe error body has no {key}.{FIELD_ERROR_TEXT}"))
        })?;

    let Some((_, limit)) = text.split_once(':') else {
        return Err(Error::page_size_unavailable(format!(
            "no ':' in probe error text: {text}"
        )));
    };

    match limit.trim().parse::<usize>() {
        Ok(0) => Err(Error::page_size_unavailable(format!(
            "probe error text reports a zero page size: {text}"
        ))),
        Ok(v) => Ok(v),
        Err(e) => Err(Error::page_size_unavailable(format!(
            "probe error text does not end with a number: {text}"
        ))
        .with_source(e)),
    }
}

impl Client {
    /// Resolve the page size, probing the server on first use.
    ///
    /// Once resolved the value is cached for the life of this client and its
    /// clones. Failures are never cached, so the next call probes again.
    /// Overlapping first calls may each probe; they store the same value.
    pub async fn discover_page_size(&self) -> PageSizeDiscovery {
        if let Some(v) = self.page_size.get() {
            return PageSizeDiscovery::Cached(*v);
        }

        let params = Params::from([
            (PARAM_PAGE.to_string(), "1".to_string()),
            (PARAM_PAGE_SIZE.to_string(), PROBE_PAGE_SIZE.to_string()),
        ]);

        match self.execute(Command::ListEvents.as_str(), &params).await {
            Ok(_) => {
                warn!("server accepted probe page size {PROBE_PAGE_SIZE}, using it as the limit");
                PageSizeDiscovery::Accepted(*self.page_size.get_or_init(|| PROBE_PAGE_SIZE))
            }
            Err(err) => {
                let parsed = match err.response_body().map(parse_page_size) {
                    Some(parsed) => parsed,
                    None => Err(Error::page_size_unavailable(
                        "page size probe failed without a response",
                    )
                    .with_source(err)),
                };

                match parsed {
                    Ok(v) => {
                        debug!("discovered server page size: {v}");
                        PageSizeDiscovery::Discovered(*self.page_size.get_or_init(|| v))
                    }
                    Err(e) => PageSizeDiscovery::Unavailable(e),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudstack_core::ErrorKind;
    use test_case::test_case;

    #[test_case(r#"{"listeventsresponse": {"errortext": "Max pagesize is : 500"}}"#, 500 ; "spaced")]
    #[test_case(r#"{"listeventsresponse": {"uuidList": [], "errorcode": 431, "errortext": "Page size can't exceed max allowed page size value: 1000"}}"#, 1000 ; "full error document")]
    fn test_parse_page_size(body: &str, expected: usize) {
        assert_eq!(parse_page_size(body).unwrap(), expected);
    }

    #[test_case("<html>busy</html>" ; "not json")]
    #[test_case(r#"{"listzonesresponse": {"errortext": "x: 1"}}"# ; "wrong envelope")]
    #[test_case(r#"{"listeventsresponse": {}}"# ; "no errortext")]
    #[test_case(r#"{"listeventsresponse": {"errortext": "unable to execute"}}"# ; "no colon")]
    #[test_case(r#"{"listeventsresponse": {"errortext": "limit: five hundred"}}"# ; "not a number")]
    #[test_case(r#"{"listeventsresponse": {"errortext": "limit: 0"}}"# ; "zero")]
    #[test_case(r#"{"listeventsresponse": {"errortext": "Error: max page size: 250"}}"# ; "first colon is not followed by a number")]
    fn test_parse_page_size_unavailable(body: &str) {
        let err = parse_page_size(body).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PageSizeUnavailable);
    }

    #[test]
    fn test_discovery_page_size() {
        assert_eq!(PageSizeDiscovery::Cached(3).page_size(), Some(3));
        assert_eq!(PageSizeDiscovery::Accepted(7).page_size(), Some(7));
        assert_eq!(
            PageSizeDiscovery::Unavailable(Error::page_size_unavailable("x")).page_size(),
            None
        );
    }
}
