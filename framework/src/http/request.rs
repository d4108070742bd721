use super::body::{parse_form, parse_json};
use crate::error::FrameworkError;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::str::FromStr;

/// An incoming request with its body already collected
///
/// The server buffers the body (bounded by `ServerConfig::max_body_size`)
/// before routing, so handlers can read it synchronously and tests can build
/// requests without a socket.
pub struct Request {
    parts: http::request::Parts,
    body: Bytes,
    params: HashMap<String, String>,
}

impl Request {
    pub fn new(inner: hyper::Request<Bytes>) -> Self {
        let (parts, body) = inner.into_parts();
        Self {
            parts,
            body,
            params: HashMap::new(),
        }
    }

    pub fn with_params(mut self, params: HashMap<String, String>) -> Self {
        self.params = params;
        self
    }

    pub fn method(&self) -> &hyper::Method {
        &self.parts.method
    }

    pub fn path(&self) -> &str {
        self.parts.uri.path()
    }

    /// Route parameter by name (e.g. `/edit/{id}`)
    pub fn param(&self, name: &str) -> Result<&str, FrameworkError> {
        self.params
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| FrameworkError::param(name))
    }

    /// Route parameter parsed into `T`; 400 if it does not parse
    ///
    /// ```rust,ignore
    /// let id: i32 = req.param_as("id")?;
    /// ```
    pub fn param_as<T: FromStr>(&self, name: &str) -> Result<T, FrameworkError> {
        let raw = self.param(name)?;
        raw.parse()
            .map_err(|_| FrameworkError::param_parse(raw, std::any::type_name::<T>()))
    }

    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.parts.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Value of a cookie sent by the client
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.parts
            .headers
            .get_all(hyper::header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|header| header.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FrameworkError> {
        parse_json(&self.body)
    }

    /// Decode the body as `application/x-www-form-urlencoded`
    pub fn form<T: DeserializeOwned>(&self) -> Result<T, FrameworkError> {
        parse_form(&self.body)
    }

    /// Decode the body based on Content-Type (form-urlencoded or JSON)
    pub fn input<T: DeserializeOwned>(&self) -> Result<T, FrameworkError> {
        match self.content_type() {
            Some(ct) if ct.starts_with("application/x-www-form-urlencoded") => self.form(),
            _ => self.json(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(builder: http::request::Builder, body: &'static str) -> Request {
        Request::new(builder.body(Bytes::from_static(body.as_bytes())).unwrap())
    }

    #[test]
    fn test_param_as_parses_and_rejects() {
        let mut params = HashMap::new();
        params.insert("id".to_string(), "42".to_string());
        let req = request(hyper::Request::builder().uri("/edit/42"), "").with_params(params);

        assert_eq!(req.param_as::<i32>("id").unwrap(), 42);
        assert_eq!(req.param("missing").unwrap_err().status_code(), 400);

        let mut params = HashMap::new();
        params.insert("id".to_string(), "abc".to_string());
        let req = request(hyper::Request::builder().uri("/edit/abc"), "").with_params(params);
        let err = req.param_as::<i32>("id").unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn test_cookie_lookup() {
        let req = request(
            hyper::Request::builder()
                .uri("/")
                .header("cookie", "theme=dark; kit_flash=abc%20def"),
            "",
        );

        assert_eq!(req.cookie("kit_flash"), Some("abc%20def"));
        assert_eq!(req.cookie("theme"), Some("dark"));
        assert_eq!(req.cookie("missing"), None);
    }

    #[test]
    fn test_input_follows_content_type() {
        #[derive(serde::Deserialize)]
        struct Payload {
            task: String,
        }

        let req = request(
            hyper::Request::builder()
                .method("POST")
                .uri("/add")
                .header("content-type", "application/x-www-form-urlencoded"),
            "task=Write+tests",
        );
        assert_eq!(req.input::<Payload>().unwrap().task, "Write tests");

        let req = request(
            hyper::Request::builder()
                .method("POST")
                .uri("/add")
                .header("content-type", "application/json"),
            r#"{"task":"From JSON"}"#,
        );
        assert_eq!(req.input::<Payload>().unwrap().task, "From JSON");
    }
}
