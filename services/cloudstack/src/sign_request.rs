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
use crate::{Credential, Params};
use cloudstack_core::hash::base64_hmac_sha1;
use cloudstack_core::{Error, Result};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left as-is when escaping the signature: `_ . - /`.
static SIGNATURE_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'/');

/// RequestSigner builds and signs CloudStack API urls.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credential: Credential,
}

impl RequestSigner {
    /// Create a new signer for the given credential.
    pub fn new(credential: Credential) -> Self {
        Self { credential }
    }

    /// Build the signed url calling `command` with `params` on `base_url`.
    ///
    /// `base_url` must not end with `/`. `params` is left untouched, the
    /// `command`, `apiKey` and `response` parameters are appended after it and
    /// replace any caller value for the same keys.
    pub fn build_url(&self, base_url: &str, command: &str, params: &Params) -> Result<String> {
        let mut query = form_urlencoded::Serializer::new(String::new());
        let reserved = [PARAM_COMMAND, PARAM_API_KEY, PARAM_RESPONSE];
        query.extend_pairs(params.iter().filter(|(k, _)| !reserved.contains(&k.as_str())));
        query.append_pair(PARAM_COMMAND, command);
        query.append_pair(PARAM_API_KEY, &self.credential.api_key);
        query.append_pair(PARAM_RESPONSE, RESPONSE_FORMAT_JSON);

        let url = format!("{base_url}{API_PATH}?{}", query.finish());
        self.sign(&url)
    }

    /// Sign `url`, see [`sign_url`].
    pub fn sign(&self, url: &str) -> Result<String> {
        sign_url(url, &self.credential.secret_key)
    }
}

/// Append a `signature` parameter to `url`.
///
/// The HMAC-SHA1 is computed over the canonical message (see
/// [`build_canonical_message`]) but appended to the query string exactly as
/// given: the server recomputes it the same way.
///
/// `url` must contain exactly one `?`.
///
/// ```
/// use cloudstack::sign_url;
///
/// let signed = sign_url(
///     "http://localhost:8080/client/api?command=listZones&apiKey=ABC&response=json",
///     "secret",
/// )
/// .unwrap();
/// assert_eq!(
///     signed,
///     "http://localhost:8080/client/api?command=listZones&apiKey=ABC&response=json&signature=tcMI1Kpm20pLhrrVYtCCcualuBU%3D"
/// );
/// ```
pub fn sign_url(url: &str, secret_key: &str) -> Result<String> {
    let mut parts = url.split('?');
    let (Some(base), Some(query), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(Error::request_invalid(format!(
            "url must contain exactly one '?' to be signed: {url}"
        )));
    };

    let message = build_canonical_message(query);
    let signature = base64_hmac_sha1(secret_key.as_bytes(), message.as_bytes());

    Ok(format!(
        "{base}?{query}&{PARAM_SIGNATURE}={}",
        utf8_percent_encode(&signature, &SIGNATURE_ENCODE_SET)
    ))
}

/// Lower-case every `key=value` token of `query`, sort them and join with `&`.
///
/// Tokens are compared whole, still percent-encoded.
pub fn build_canonical_message(query: &str) -> String {
    let mut tokens: Vec<String> = query.split('&').map(|t| t.to_lowercase()).collect();
    tokens.sort_unstable();
    tokens.join("&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudstack_core::ErrorKind;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(
        "http://localhost:8080/client/api?command=listZones&apiKey=ABC&response=json",
        "secret",
        "tcMI1Kpm20pLhrrVYtCCcualuBU%3D"
        ; "short key"
    )]
    #[test_case(
        "http://localhost:8080/client/api?command=listUsers&apiKey=miVr6X7u6bN_sdahOBpjNejPgEsT35eXq-jB8CG20YI3yaxXcgpyuaIRmFI_EJTVwZ0nUkkJbPmY3y2bciKwFQ&response=json",
        "Lxx1DM40AjcXU_xEtvG-0aCvTiaWNwMO5hKKCd0Gg0VlKgVLANEjLWfP4R20vkLDOGI1mASwQdAUKEqOEDfNA",
        "4tSGf4M9jsmFgJN3RbaTpS43Oj8%3D"
        ; "long key"
    )]
    #[test_case(
        "http://host/client/api?listAll=true&name=web+01&command=listVirtualMachines&apiKey=key&response=json",
        "s3cr3t",
        "gV25SHcT8obfmvmsmcLKUQQ5/Rs%3D"
        ; "slash kept raw"
    )]
    fn test_sign_url(url: &str, secret: &str, signature: &str) {
        let signed = sign_url(url, secret).expect("sign must succeed");
        assert_eq!(signed, format!("{url}&signature={signature}"));
    }

    #[test]
    fn test_sign_url_is_deterministic() {
        let url = "http://host/client/api?command=listHosts&apiKey=key&response=json";
        assert_eq!(
            sign_url(url, "s3cr3t").unwrap(),
            sign_url(url, "s3cr3t").unwrap()
        );
    }

    #[test]
    fn test_canonical_message() {
        assert_eq!(
            build_canonical_message("command=listZones&apiKey=ABC&response=json"),
            "apikey=abc&command=listzones&response=json"
        );
        assert_eq!(
            build_canonical_message("page=1&pagesize=2&type=Routing&command=listHosts&apiKey=key&response=json"),
            "apikey=key&command=listhosts&page=1&pagesize=2&response=json&type=routing"
        );
    }

    #[test_case("http://host/client/api" ; "no question mark")]
    #[test_case("http://host/client/api?a=b?c=d" ; "two question marks")]
    fn test_sign_url_rejects_malformed(url: &str) {
        let err = sign_url(url, "s3cr3t").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }

    #[test]
    fn test_build_url() {
        let signer = RequestSigner::new(Credential::new("key", "s3cr3t"));
        let params = Params::from([
            ("type".to_string(), "Routing".to_string()),
            ("page".to_string(), "1".to_string()),
            ("pagesize".to_string(), "2".to_string()),
        ]);

        let url = signer
            .build_url("http://host", "listHosts", &params)
            .unwrap();
        assert_eq!(
            url,
            "http://host/client/api?page=1&pagesize=2&type=Routing&command=listHosts&apiKey=key&response=json&signature=dB5QFWjHOHOv21tUrCwcXPrd5ZQ%3D"
        );
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_build_url_overrides_reserved_params() {
        let signer = RequestSigner::new(Credential::new("key", "s3cr3t"));
        let params = Params::from([
            ("command".to_string(), "deleteZone".to_string()),
            ("response".to_string(), "xml".to_string()),
            ("apiKey".to_string(), "other".to_string()),
            ("zoneid".to_string(), "z1".to_string()),
        ]);

        let url = signer
            .build_url("http://host", "listZones", &params)
            .unwrap();
        assert_eq!(
            url,
            "http://host/client/api?zoneid=z1&command=listZones&apiKey=key&response=json&signature=gY45f0Jwku5pOzABw%2BO9wTEzUhs%3D"
        );
        for key in ["command=", "apiKey=", "response="] {
            assert_eq!(url.matches(key).count(), 1, "{key} must appear once");
        }
        assert_eq!(params["command"], "deleteZone");
    }

    #[test]
    fn test_build_url_encodes_spaces() {
        let signer = RequestSigner::new(Credential::new("key", "s3cr3t"));
        let params = Params::from([
            ("name".to_string(), "web 01".to_string()),
            ("listAll".to_string(), "true".to_string()),
        ]);

        let url = signer
            .build_url("http://host", "listVirtualMachines", &params)
            .unwrap();
        assert_eq!(
            url,
            "http://host/client/api?listAll=true&name=web+01&command=listVirtualMachines&apiKey=key&response=json&signature=gV25SHcT8obfmvmsmcLKUQQ5/Rs%3D"
        );
    }
}
