use std::collections::HashMap;
use std::io::Read;
use std::sync::RwLock;

use reqwest::blocking::Response;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::envelope::Envelope;
use crate::error::Error;
use crate::registry::{ApiDescriptor, Registry};

/// API identity of the discovery endpoint. Unlike every other API, its
/// path is fixed and never itself discovered.
const INFO_API: &str = "SYNO.API.Info";
const INFO_PATH: &str = "query.cgi";
const INFO_VERSION: u32 = 1;

/// Call-specific query parameters.
///
/// The wire protocol requires structured values (arrays, objects) to be
/// serialized as a single JSON text under one key, never as repeated
/// keys; [`Params::with_json`] does exactly that. Setting the same key
/// twice keeps the last value.
///
/// # Example
///
/// ```ignore
/// let params = Params::new()
///     .with("folder_path", "/home")
///     .with_json("additional", &["size", "time"])?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Params {
    pairs: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a plain string parameter.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key.into(), value.into());
        self
    }

    /// Set a structured parameter, serialized as one JSON text value.
    pub fn with_json<T: Serialize>(mut self, key: impl Into<String>, value: &T) -> Result<Self, Error> {
        let text = serde_json::to_string(value)?;
        self.set(key.into(), text);
        Ok(self)
    }

    fn set(&mut self, key: String, value: String) {
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Undecoded response body, exclusively owned by the caller.
///
/// Used for downloads, where the payload is arbitrary binary content
/// rather than a JSON envelope. Dropping the stream releases the
/// underlying connection.
#[derive(Debug)]
pub struct ByteStream {
    response: Response,
}

impl Read for ByteStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.response.read(buf)
    }
}

/// Synchronous client for the DSM Web API gateway.
///
/// A `Client` resolves symbolic API names to concrete paths through the
/// discovery endpoint (memoized for the client's lifetime), attaches
/// client-wide static parameters such as the session token, and decodes
/// response envelopes. It is safe to share across threads; every call is
/// one blocking round trip (two for the first use of an API name).
///
/// # Example
///
/// ```ignore
/// let client = Client::new("https://nas.example:5001")?;
/// client.set_param("_sid", session_id);
/// let page: Folder = client.invoke(
///     "SYNO.FileStation.List",
///     2,
///     "list",
///     &Params::new().with("folder_path", "/home"),
/// )?;
/// ```
#[derive(Debug)]
pub struct Client {
    base_url: Url,
    http: reqwest::blocking::Client,
    static_params: RwLock<Vec<(String, String)>>,
    registry: Registry,
}

impl Client {
    /// Create a client for the given base URL.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        Self::with_http_client(reqwest::blocking::Client::new(), base_url)
    }

    /// Create a client with a caller-configured HTTP client (timeouts,
    /// proxies, TLS settings).
    pub fn with_http_client(
        http: reqwest::blocking::Client,
        base_url: &str,
    ) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        Ok(Self {
            base_url,
            http,
            static_params: RwLock::new(Vec::new()),
            registry: Registry::new(),
        })
    }

    /// Set a static query parameter sent with every subsequent request.
    ///
    /// The client attaches the value without interpreting it; the usual
    /// caller is the authentication layer storing the `_sid` session
    /// token after login. Call-specific parameters win on key collision.
    pub fn set_param(&self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let mut params = self.static_params.write().expect("param lock poisoned");
        match params.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value.into(),
            None => params.push((key, value.into())),
        }
    }

    /// Invoke a structured API method and decode its envelope.
    ///
    /// The API name is resolved through the discovery cache on first
    /// use. A `success: false` envelope surfaces as [`Error::Api`]; an
    /// undecodable or internally inconsistent body as
    /// [`Error::Protocol`].
    pub fn invoke<T: DeserializeOwned>(
        &self,
        api: &str,
        version: u32,
        method: &str,
        params: &Params,
    ) -> Result<T, Error> {
        self.fetch_envelope(api, version, method, params)?
            .into_data()
    }

    /// Invoke a structured API method whose success envelope carries no
    /// payload (e.g. logout).
    ///
    /// A dataless `success: true` is accepted; failure envelopes and
    /// undecodable bodies still propagate as errors.
    pub fn invoke_unit(
        &self,
        api: &str,
        version: u32,
        method: &str,
        params: &Params,
    ) -> Result<(), Error> {
        self.fetch_envelope::<serde_json::Value>(api, version, method, params)?
            .into_unit()
    }

    fn fetch_envelope<T: DeserializeOwned>(
        &self,
        api: &str,
        version: u32,
        method: &str,
        params: &Params,
    ) -> Result<Envelope<T>, Error> {
        let descriptor = self.resolve(api)?;
        let response = self.send(&descriptor.path, api, version, method, params)?;
        let body = response.text()?;
        serde_json::from_str(&body)
            .map_err(|e| Error::protocol(format!("{} {}: {}", api, method, e)))
    }

    /// Invoke an API method and return the raw response body undecoded.
    ///
    /// Used for binary downloads. Only the HTTP status is checked; the
    /// stream is handed to the caller as-is.
    pub fn invoke_raw(
        &self,
        api: &str,
        version: u32,
        method: &str,
        params: &Params,
    ) -> Result<ByteStream, Error> {
        let descriptor = self.resolve(api)?;
        let response = self.send(&descriptor.path, api, version, method, params)?;
        Ok(ByteStream { response })
    }

    /// Query the discovery endpoint directly.
    ///
    /// An empty `names` slice queries all known APIs. Results are not
    /// cached here; the memoizing path is [`Client::invoke`]'s implicit
    /// resolution.
    pub fn api_info(&self, names: &[&str]) -> Result<HashMap<String, ApiDescriptor>, Error> {
        let query = if names.is_empty() {
            "all".to_string()
        } else {
            names.join(",")
        };
        let params = Params::new().with("query", query);
        let response = self.send(INFO_PATH, INFO_API, INFO_VERSION, "query", &params)?;
        let body = response.text()?;
        let envelope: Envelope<HashMap<String, ApiDescriptor>> = serde_json::from_str(&body)
            .map_err(|e| Error::protocol(format!("{} query: {}", INFO_API, e)))?;
        envelope.into_data()
    }

    fn resolve(&self, api: &str) -> Result<ApiDescriptor, Error> {
        self.registry
            .resolve_with(api, |name| self.api_info(&[name]))
    }

    fn send(
        &self,
        api_path: &str,
        api: &str,
        version: u32,
        method: &str,
        params: &Params,
    ) -> Result<Response, Error> {
        let mut url = self.base_url.clone();
        url.set_path(&format!("/webapi/{}", api_path));
        {
            let static_params = self.static_params.read().expect("param lock poisoned");
            let query = merge_query(api, version, method, &static_params, params);
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &query {
                pairs.append_pair(key, value);
            }
        }

        tracing::debug!(url = %url, "dispatching API request");
        let response = self.http.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

/// Build the final query parameter list: the `api`/`version`/`method`
/// triple, then client-wide static parameters, then call parameters.
/// Later values replace earlier ones on key collision, so call
/// parameters take precedence.
fn merge_query(
    api: &str,
    version: u32,
    method: &str,
    static_params: &[(String, String)],
    params: &Params,
) -> Vec<(String, String)> {
    let mut query: Vec<(String, String)> = vec![
        ("api".to_string(), api.to_string()),
        ("version".to_string(), version.to_string()),
        ("method".to_string(), method.to_string()),
    ];
    let mut set = |key: &str, value: &str| match query.iter_mut().find(|(k, _)| k == key) {
        Some(pair) => pair.1 = value.to_string(),
        None => query.push((key.to_string(), value.to_string())),
    };
    for (key, value) in static_params {
        set(key, value);
    }
    for (key, value) in params.iter() {
        set(key, value);
    }
    query
}
