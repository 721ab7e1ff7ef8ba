use std::{collections::BTreeMap, fmt, future::Future, str::FromStr, sync::Arc};

use reqwest::{
    Client,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use secrecy::ExposeSecret;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use tokio::runtime::{Handle, Runtime};
use tracing::{debug, warn};

use crate::error::{ApiError, CallSummary, Error, Result};
use crate::models::Credentials;

const JSON_MEDIA_TYPE: &str = "application/json";
const REDACTED: &str = "Bearer ***";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "PATCH" => Ok(Method::Patch),
            "DELETE" => Ok(Method::Delete),
            _ => Err(Error::InvalidInput(format!(
                "Invalid method: '{}'. Expected one of GET, POST, PUT, PATCH, DELETE.",
                s
            ))),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Put => write!(f, "PUT"),
            Method::Patch => write!(f, "PATCH"),
            Method::Delete => write!(f, "DELETE"),
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(value: Method) -> Self {
        match value {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Per-call switches for the default headers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallOptions {
    pub requires_token: bool,
    pub default_content_type: bool,
    pub default_accept: bool,
}

impl Default for CallOptions {
    fn default() -> Self {
        Self {
            requires_token: true,
            default_content_type: true,
            default_accept: true,
        }
    }
}

impl CallOptions {
    /// No JSON content negotiation; used for uploads and binary downloads.
    pub fn raw() -> Self {
        Self {
            default_content_type: false,
            default_accept: false,
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Param {
    One(String),
    Many(Vec<String>),
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::One(value.to_owned())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::One(value)
    }
}

impl<S: Into<String>> From<Vec<S>> for Param {
    fn from(value: Vec<S>) -> Self {
        Param::Many(value.into_iter().map(Into::into).collect())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    Fields(Map<String, Value>),
    Raw(Vec<u8>),
}

impl Default for Body {
    fn default() -> Self {
        Body::Fields(Map::new())
    }
}

impl Body {
    fn is_empty(&self) -> bool {
        match self {
            Body::Fields(map) => map.is_empty(),
            Body::Raw(bytes) => bytes.is_empty(),
        }
    }

    /// Wire form: mappings as JSON, raw values verbatim, empty mapping as nothing.
    fn to_bytes(&self) -> Result<Option<Vec<u8>>> {
        match self {
            Body::Fields(map) if map.is_empty() => Ok(None),
            Body::Fields(map) => serde_json::to_vec(map)
                .map(Some)
                .map_err(|e| Error::InvalidInput(format!("Unable to encode body: {e}"))),
            Body::Raw(bytes) => Ok(Some(bytes.clone())),
        }
    }
}

/// Long-lived, access-scoped builder every facade holds.
///
/// Cloning is cheap: the HTTP client and the runtime are shared.
#[derive(Clone)]
pub struct ApiCall {
    credentials: Credentials,
    client: Client,
    runtime: Arc<Runtime>,
}

impl ApiCall {
    pub fn new(credentials: Credentials) -> Result<Self> {
        Ok(Self {
            credentials,
            client: Client::new(),
            runtime: Arc::new(Runtime::new()?),
        })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn new_call(&self, method: Method, path: impl Into<String>) -> PendingRequest {
        self.new_call_with(method, path, CallOptions::default())
    }

    /// Starts a fresh call; nothing mutable is shared with `self` or other calls.
    pub fn new_call_with(
        &self,
        method: Method,
        path: impl Into<String>,
        options: CallOptions,
    ) -> PendingRequest {
        PendingRequest {
            call: self.clone(),
            method,
            path: path.into(),
            options,
            headers: BTreeMap::new(),
            parameters: BTreeMap::new(),
            body: Body::default(),
            response: None,
        }
    }

    /// `GET path`, decoded as JSON.
    pub(crate) fn get_json<T: DeserializeOwned>(&self, path: impl Into<String>) -> Result<T> {
        let mut call = self.new_call(Method::Get, path);
        call.send()?.json()
    }

    /// `GET path` for a binary payload (archives, layout blobs).
    pub(crate) fn get_bytes(&self, path: impl Into<String>) -> Result<Vec<u8>> {
        let mut call = self.new_call_with(Method::Get, path, CallOptions::raw());
        Ok(call.send()?.bytes().to_vec())
    }

    /// Drives `future` to completion on the SDK runtime, blocking the caller.
    ///
    /// Fails instead of blocking when called from inside a tokio runtime.
    pub(crate) fn block_on<F: Future>(&self, future: F) -> Result<F::Output> {
        if Handle::try_current().is_ok() {
            return Err(Error::InvalidInput(
                "Blocking call made from inside an async runtime; \
                 call the SDK from a plain thread (e.g. tokio::task::spawn_blocking)."
                    .to_owned(),
            ));
        }
        Ok(self.runtime.block_on(future))
    }
}

#[derive(Clone, Debug)]
pub struct ApiResponse {
    status: u16,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl ApiResponse {
    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.body
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| Error::MalformedResponse(e.to_string()))
    }
}

/// One call in flight: built, sent once, then dropped.
pub struct PendingRequest {
    call: ApiCall,
    method: Method,
    path: String,
    options: CallOptions,
    headers: BTreeMap<String, String>,
    parameters: BTreeMap<String, Param>,
    body: Body,
    response: Option<ApiResponse>,
}

impl PendingRequest {
    pub fn method(&self) -> Method {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn options(&self) -> CallOptions {
        self.options
    }

    pub fn uri(&self) -> Result<String> {
        if self.path.is_empty() {
            return Err(Error::InvalidInput("No URI path provided".to_owned()));
        }
        Ok(format!("{}{}", self.call.credentials.url(), self.path))
    }

    pub fn add_header(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn add_parameter(&mut self, key: impl Into<String>, value: impl Into<Param>) -> &mut Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    pub fn parameters(&self) -> &BTreeMap<String, Param> {
        &self.parameters
    }

    pub fn add_body_field(&mut self, key: impl Into<String>, value: impl Serialize) -> Result<&mut Self> {
        let key = key.into();
        let Body::Fields(map) = &mut self.body else {
            return Err(Error::InvalidInput(format!(
                "Unable to add '{key}' to body: body is not a mapping."
            )));
        };
        let value = serde_json::to_value(value)
            .map_err(|e| Error::InvalidInput(format!("Unable to encode body field '{key}': {e}")))?;
        map.insert(key, value);
        Ok(self)
    }

    pub fn set_body_value(&mut self, value: impl Into<Vec<u8>>) -> Result<&mut Self> {
        if !self.body.is_empty() {
            return Err(Error::InvalidInput(
                "Unable to set body: body is already populated.".to_owned(),
            ));
        }
        self.body = Body::Raw(value.into());
        Ok(self)
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn body_bytes(&self) -> Result<Option<Vec<u8>>> {
        self.body.to_bytes()
    }

    /// Headers as they will be sent, with defaults filled in.
    pub fn headers(&self) -> BTreeMap<String, String> {
        let mut headers = self.headers.clone();
        let has = |headers: &BTreeMap<String, String>, name: &str| {
            headers.keys().any(|k| k.eq_ignore_ascii_case(name))
        };

        if self.options.requires_token && !has(&headers, AUTHORIZATION.as_str()) {
            headers.insert(
                "Authorization".to_owned(),
                self.call.credentials.token().expose_secret().to_owned(),
            );
        }
        if self.options.default_content_type && !has(&headers, CONTENT_TYPE.as_str()) {
            headers.insert("Content-Type".to_owned(), JSON_MEDIA_TYPE.to_owned());
        }
        if self.options.default_accept && !has(&headers, ACCEPT.as_str()) {
            headers.insert("Accept".to_owned(), JSON_MEDIA_TYPE.to_owned());
        }
        headers
    }

    /// Method, URI, headers and body of this call, with the token redacted.
    pub fn info(&self) -> CallSummary {
        let headers = self
            .headers()
            .into_iter()
            .map(|(k, v)| {
                if k.eq_ignore_ascii_case(AUTHORIZATION.as_str()) {
                    (k, REDACTED.to_owned())
                } else {
                    (k, v)
                }
            })
            .collect();
        let body = match &self.body {
            Body::Fields(map) if map.is_empty() => None,
            Body::Fields(map) => Some(Value::Object(map.clone()).to_string()),
            Body::Raw(bytes) => Some(format!("<{} bytes>", bytes.len())),
        };

        CallSummary {
            method: self.method,
            uri: self.uri().unwrap_or_default(),
            headers,
            body,
        }
    }

    pub fn response(&self) -> Option<&ApiResponse> {
        self.response.as_ref()
    }

    /// Sends the call and keeps the response; non-2xx becomes [`Error::Api`].
    pub fn send(&mut self) -> Result<&ApiResponse> {
        let uri = self.uri()?;
        let headers = header_map(&self.headers())?;
        let body = self.body_bytes()?;
        let query = self.query_pairs();

        let mut builder = self
            .call
            .client
            .request(self.method.into(), &uri)
            .headers(headers)
            .query(&query);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        debug!(method = %self.method, uri = uri.as_str(), "Sending request");

        let response = self.call.block_on(async {
            let response = builder.send().await?;
            let status = response.status().as_u16();
            let headers = response.headers().clone();
            let body = response.bytes().await?.to_vec();
            Ok::<_, reqwest::Error>(ApiResponse {
                status,
                headers,
                body,
            })
        })??;

        debug!(
            method = %self.method,
            uri = uri.as_str(),
            status_code = response.status,
            "Received response"
        );

        if !(200..300).contains(&response.status) {
            let error = ApiError::new(response.status, &response.body, self.info());
            warn!(
                method = %self.method,
                uri = uri.as_str(),
                status_code = response.status,
                "Request failed: {}",
                error
            );
            self.response = Some(response);
            return Err(error.into());
        }

        Ok(self.response.insert(response))
    }

    fn query_pairs(&self) -> Vec<(&str, &str)> {
        self.parameters
            .iter()
            .flat_map(|(key, value)| match value {
                Param::One(v) => vec![(key.as_str(), v.as_str())],
                Param::Many(values) => values.iter().map(|v| (key.as_str(), v.as_str())).collect(),
            })
            .collect()
    }
}

fn header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    for (key, value) in headers {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|e| Error::InvalidInput(format!("Invalid header name '{key}': {e}")))?;
        let mut value = HeaderValue::from_str(value)
            .map_err(|e| Error::InvalidInput(format!("Invalid value for header '{key}': {e}")))?;
        if name == AUTHORIZATION {
            value.set_sensitive(true);
        }
        map.insert(name, value);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_call() -> ApiCall {
        ApiCall::new(Credentials::new("https://docai.test/", "secret").unwrap()).unwrap()
    }

    #[test]
    fn parses_methods_case_insensitively() {
        assert_eq!("post".parse::<Method>().unwrap(), Method::Post);
        assert_eq!(" Delete ".parse::<Method>().unwrap(), Method::Delete);
        assert!(matches!("TRACE".parse::<Method>(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn body_fields_encode_as_json() {
        let mut call = api_call().new_call(Method::Post, "fields");
        call.add_body_field("field_name", "Foo").unwrap();

        let bytes = call.body_bytes().unwrap().unwrap();
        let decoded: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(decoded, serde_json::json!({ "field_name": "Foo" }));
    }

    #[test]
    fn sending_from_inside_a_runtime_is_rejected() {
        let call = api_call();
        let outer = Runtime::new().unwrap();

        let rejected = outer.block_on(async {
            let mut request = call.new_call(Method::Get, "fields");
            matches!(request.send(), Err(Error::InvalidInput(_)))
        });

        assert!(rejected);
    }

    #[test]
    fn empty_mapping_sends_no_body() {
        let call = api_call().new_call(Method::Get, "fields");
        assert_eq!(call.body_bytes().unwrap(), None);
    }

    #[test]
    fn body_shapes_do_not_mix() {
        let mut raw = api_call().new_call(Method::Post, "files");
        raw.set_body_value(b"%PDF-1.7".to_vec()).unwrap();
        assert!(raw.add_body_field("file_ids", vec!["a"]).is_err());
        assert!(raw.set_body_value("again").is_err());

        let mut mapped = api_call().new_call(Method::Post, "ocr");
        mapped.add_body_field("file_ids", vec!["a"]).unwrap();
        assert!(mapped.set_body_value("raw").is_err());
    }

    #[test]
    fn default_headers_are_injected() {
        let call = api_call().new_call(Method::Get, "fields");
        let headers = call.headers();
        assert_eq!(headers["Authorization"], "Bearer secret");
        assert_eq!(headers["Content-Type"], "application/json");
        assert_eq!(headers["Accept"], "application/json");
    }

    #[test]
    fn raw_calls_skip_content_negotiation() {
        let mut call = api_call().new_call_with(Method::Post, "files", CallOptions::raw());
        call.add_header("Content-Type", "application/kiraocr");
        let headers = call.headers();
        assert_eq!(headers["Content-Type"], "application/kiraocr");
        assert!(!headers.contains_key("Accept"));
        assert!(headers.contains_key("Authorization"));
    }

    #[test]
    fn explicit_headers_win_over_defaults() {
        let mut call = api_call().new_call(Method::Get, "fields");
        call.add_header("accept", "text/plain");
        let headers = call.headers();
        assert_eq!(headers["accept"], "text/plain");
        assert!(!headers.contains_key("Accept"));
    }

    #[test]
    fn token_can_be_left_out() {
        let options = CallOptions {
            requires_token: false,
            ..CallOptions::default()
        };
        let call = api_call().new_call_with(Method::Get, "health", options);
        assert!(!call.headers().contains_key("Authorization"));
    }

    #[test]
    fn uri_requires_a_path() {
        let call = api_call().new_call(Method::Get, "");
        assert!(matches!(call.uri(), Err(Error::InvalidInput(_))));

        let call = api_call().new_call(Method::Get, "ocr/abc/text");
        assert_eq!(call.uri().unwrap(), "https://docai.test/ocr/abc/text");
    }

    #[test]
    fn info_redacts_the_token() {
        let mut call = api_call().new_call(Method::Post, "files");
        call.set_body_value(vec![0u8; 12]).unwrap();
        let info = call.info();
        assert_eq!(info.headers["Authorization"], "Bearer ***");
        assert_eq!(info.body.as_deref(), Some("<12 bytes>"));
        assert_eq!(info.uri, "https://docai.test/files");
    }

    #[test]
    fn list_parameters_repeat_their_key() {
        let mut call = api_call().new_call(Method::Get, "ocrs");
        call.add_parameter("request_id", vec!["a", "b"]);
        call.add_parameter("verbose", "true");
        assert_eq!(
            call.query_pairs(),
            vec![("request_id", "a"), ("request_id", "b"), ("verbose", "true")]
        );
    }

    #[test]
    fn calls_do_not_share_state() {
        let base = api_call();
        let mut first = base.new_call(Method::Get, "fields");
        first.add_header("X-Trace", "1");
        let second = base.new_call(Method::Get, "fields");
        assert!(!second.headers().contains_key("X-Trace"));
    }
}
