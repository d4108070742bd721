use crate::error::FrameworkError;
use bytes::Bytes;
use http_body_util::Full;

/// Response under construction
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: u16,
    body: String,
    headers: Vec<(String, String)>,
}

/// Handler return type. Both arms carry a response, so `?` can short-circuit
/// with an error page.
pub type Response = Result<HttpResponse, HttpResponse>;

impl HttpResponse {
    pub fn new() -> Self {
        Self {
            status: 200,
            body: String::new(),
            headers: Vec::new(),
        }
    }

    pub fn text(body: impl Into<String>) -> Self {
        Self::new()
            .body(body)
            .header("Content-Type", "text/plain; charset=utf-8")
    }

    pub fn html(body: impl Into<String>) -> Self {
        Self::new()
            .body(body)
            .header("Content-Type", "text/html; charset=utf-8")
    }

    pub fn json(body: serde_json::Value) -> Self {
        Self::new()
            .body(body.to_string())
            .header("Content-Type", "application/json")
    }

    pub fn status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Append a header; repeated names (e.g. `Set-Cookie`) are kept
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set a header unless the handler already did
    pub fn header_if_missing(self, name: &str, value: impl Into<String>) -> Self {
        if self.header_value(name).is_some() {
            self
        } else {
            self.header(name, value)
        }
    }

    pub fn ok(self) -> Response {
        Ok(self)
    }

    pub fn status_code(&self) -> u16 {
        self.status
    }

    pub fn body_text(&self) -> &str {
        &self.body
    }

    /// First value of a header, case-insensitive
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Every value of a header, case-insensitive
    pub fn header_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .iter()
            .filter(move |(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }

    /// Convert to a hyper response
    ///
    /// An invalid header name or value turns the response into a bare 500.
    pub fn into_hyper(self) -> hyper::Response<Full<Bytes>> {
        let mut builder = hyper::Response::builder().status(self.status);
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        match builder.body(Full::new(Bytes::from(self.body))) {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "invalid response, sending 500");
                let mut response = hyper::Response::new(Full::new(Bytes::from_static(
                    b"500 Internal Server Error",
                )));
                *response.status_mut() = hyper::StatusCode::INTERNAL_SERVER_ERROR;
                response
            }
        }
    }
}

impl Default for HttpResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Redirect builder
///
/// Defaults to 303 See Other, the right status after handling a form POST.
pub struct Redirect {
    location: String,
    status: u16,
}

impl Redirect {
    /// Redirect to a path or URL
    pub fn to(path: impl Into<String>) -> Self {
        Self {
            location: path.into(),
            status: 303,
        }
    }

    /// Redirect to a named route
    ///
    /// ```rust,ignore
    /// Redirect::route("todos.edit", &[("id", "3")])?
    /// ```
    pub fn route(name: &str, params: &[(&str, &str)]) -> Result<Self, FrameworkError> {
        crate::routing::route(name, params)
            .map(Self::to)
            .ok_or_else(|| FrameworkError::internal(format!("Route '{}' not found", name)))
    }

    /// Use 302 Found instead of 303
    pub fn found(mut self) -> Self {
        self.status = 302;
        self
    }

    pub fn into_response(self) -> HttpResponse {
        HttpResponse::new()
            .status(self.status)
            .header("Location", self.location)
    }
}

impl From<Redirect> for Response {
    fn from(redirect: Redirect) -> Response {
        Ok(redirect.into_response())
    }
}

/// Lets handlers return framework errors with `?`
///
/// The body is plain text so echoed parameter values are never interpreted
/// as markup.
impl From<FrameworkError> for HttpResponse {
    fn from(err: FrameworkError) -> HttpResponse {
        let status = err.status_code();
        if err.is_server_error() {
            tracing::error!(error = %err, status, "request failed");
        } else {
            tracing::debug!(error = %err, status, "request rejected");
        }

        let message = if err.is_server_error() && !crate::Config::is_debug() {
            "Internal Server Error".to_string()
        } else {
            err.to_string()
        };

        HttpResponse::text(format!("{} {}", status, message)).status(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_are_case_insensitive_and_repeatable() {
        let response = HttpResponse::html("<p>hi</p>")
            .header("Set-Cookie", "a=1")
            .header("set-cookie", "b=2");

        assert_eq!(
            response.header_value("content-type"),
            Some("text/html; charset=utf-8")
        );
        assert_eq!(
            response.header_values("SET-COOKIE").collect::<Vec<_>>(),
            vec!["a=1", "b=2"]
        );
    }

    #[test]
    fn test_header_if_missing_keeps_existing_value() {
        let response = HttpResponse::new()
            .header("X-Frame-Options", "DENY")
            .header_if_missing("x-frame-options", "SAMEORIGIN")
            .header_if_missing("X-Content-Type-Options", "nosniff");

        assert_eq!(response.header_value("X-Frame-Options"), Some("DENY"));
        assert_eq!(response.header_value("X-Content-Type-Options"), Some("nosniff"));
    }

    #[test]
    fn test_redirect_defaults_to_see_other() {
        let response = Redirect::to("/").into_response();
        assert_eq!(response.status_code(), 303);
        assert!(response.is_redirect());
        assert_eq!(response.header_value("location"), Some("/"));

        assert_eq!(Redirect::to("/").found().into_response().status_code(), 302);
    }

    #[test]
    fn test_client_errors_keep_their_message() {
        let response: HttpResponse = FrameworkError::param_parse("abc", "i32").into();
        assert_eq!(response.status_code(), 400);
        assert!(response.body_text().contains("abc"));
        assert_eq!(
            response.header_value("content-type"),
            Some("text/plain; charset=utf-8")
        );
    }

    #[test]
    fn test_into_hyper_copies_status_and_headers() {
        let hyper_response = HttpResponse::text("nope").status(404).into_hyper();
        assert_eq!(hyper_response.status(), hyper::StatusCode::NOT_FOUND);
        assert_eq!(
            hyper_response.headers().get("content-type").unwrap(),
            "text/plain; charset=utf-8"
        );
    }
}
