//! Transport primitives for API calls.
//!
//! The dispatcher only ever talks to a [`Transport`]: it builds a fully resolved
//! [`HttpRequest`] (URL with query string, headers, optional body) and receives an
//! [`HttpResponse`] or a [`TransportError`]. [`ReqwestTransport`] performs live HTTPS calls;
//! [`FixtureTransport`] serves canned responses and records requests so tests can run
//! offline and assert which calls were (or were not) made.

pub mod fixture;

pub use fixture::FixtureTransport;

// self
use crate::{_prelude::*, error::TransportError};

/// Boxed future returned by [`Transport::execute`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + 'a + Send + Sync>>;

/// Abstraction over HTTP stacks capable of executing SDK requests.
///
/// Implementations must be `Send + Sync + 'static` so a single transport can be shared by
/// every clone of a [`Client`](crate::Client). A returned error means no HTTP response was
/// received; any response, whatever its status, must be returned as [`HttpResponse`].
pub trait Transport
where
	Self: 'static + Send + Sync,
{
	/// Executes the request and returns the raw response.
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_>;
}

/// HTTP methods used by HubSpot endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
	/// `GET`; payloads become query parameters.
	Get,
	/// `POST` with a JSON body.
	Post,
	/// `PUT` with a JSON body.
	Put,
	/// `DELETE`; never carries a body.
	Delete,
}
impl HttpMethod {
	/// Returns the method token.
	pub const fn as_str(self) -> &'static str {
		match self {
			HttpMethod::Get => "GET",
			HttpMethod::Post => "POST",
			HttpMethod::Put => "PUT",
			HttpMethod::Delete => "DELETE",
		}
	}

	/// Returns `true` when requests with this method carry a JSON body.
	pub const fn has_body(self) -> bool {
		matches!(self, HttpMethod::Post | HttpMethod::Put)
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Fully resolved outbound request.
///
/// Header names are stored lowercase.
#[derive(Clone)]
pub struct HttpRequest {
	/// Request method.
	pub method: HttpMethod,
	/// Absolute URL including the query string.
	pub url: Url,
	/// Request headers keyed by lowercase name.
	pub headers: BTreeMap<String, String>,
	/// Encoded request body, if any.
	pub body: Option<Vec<u8>>,
}
impl HttpRequest {
	/// Creates a request without headers or body.
	pub fn new(method: HttpMethod, url: Url) -> Self {
		Self { method, url, headers: BTreeMap::new(), body: None }
	}

	/// Adds or replaces a header.
	pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
		self.headers.insert(name.as_ref().to_ascii_lowercase(), value.into());

		self
	}

	/// Sets the body together with its content type.
	pub fn with_body(mut self, content_type: impl Into<String>, body: Vec<u8>) -> Self {
		self.headers.insert("content-type".into(), content_type.into());
		self.body = Some(body);

		self
	}

	/// Looks up a header by case-insensitive name.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
	}

	/// Returns the decoded query parameters.
	pub fn query(&self) -> BTreeMap<String, String> {
		self.url.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned())).collect()
	}

	/// Decodes the body as JSON, if present and well formed.
	pub fn json_body(&self) -> Option<Value> {
		self.body.as_deref().and_then(|bytes| serde_json::from_slice(bytes).ok())
	}
}
impl Debug for HttpRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let query_keys = self.url.query_pairs().map(|(k, _)| k.into_owned()).collect::<Vec<_>>();
		let header_names = self.headers.keys().collect::<Vec<_>>();

		f.debug_struct("HttpRequest")
			.field("method", &self.method)
			.field("path", &self.url.path())
			.field("query_keys", &query_keys)
			.field("headers", &header_names)
			.field("body_len", &self.body.as_ref().map(Vec::len))
			.finish()
	}
}

/// Raw response returned by a [`Transport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
	/// HTTP status code.
	pub status: u16,
	/// Undecoded response body.
	pub body: Vec<u8>,
}
impl HttpResponse {
	/// Creates a response from raw bytes.
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, body: body.into() }
	}

	/// Creates a response whose body is the serialized JSON value.
	pub fn json(status: u16, body: &Value) -> Self {
		Self { status, body: body.to_string().into_bytes() }
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl std::ops::Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Transport for ReqwestTransport {
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_> {
		let HttpRequest { method, url, headers, body } = request;

		Box::pin(async move {
			let method = match method {
				HttpMethod::Get => reqwest::Method::GET,
				HttpMethod::Post => reqwest::Method::POST,
				HttpMethod::Put => reqwest::Method::PUT,
				HttpMethod::Delete => reqwest::Method::DELETE,
			};
			let mut builder = self.0.request(method, url);

			for (name, value) in &headers {
				builder = builder.header(name.as_str(), value.as_str());
			}
			if let Some(body) = body {
				builder = builder.body(body);
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?.to_vec();

			Ok(HttpResponse { status, body })
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn request_helpers_expose_headers_and_query() {
		let url = Url::parse("https://api.hubapi.com/contacts?hapikey=demo&userId=7")
			.expect("Failed to parse request URL.");
		let request = HttpRequest::new(HttpMethod::Post, url)
			.with_header("Accept", "application/json")
			.with_body("application/json", b"{\"a\":\"b\"}".to_vec());

		assert_eq!(request.header("accept"), Some("application/json"));
		assert_eq!(request.header("Content-Type"), Some("application/json"));
		assert_eq!(request.query().get("userId").map(String::as_str), Some("7"));
		assert_eq!(request.json_body(), Some(serde_json::json!({ "a": "b" })));
	}

	#[test]
	fn request_debug_hides_query_values_and_headers() {
		let url = Url::parse("https://api.hubapi.com/contacts?hapikey=super-secret")
			.expect("Failed to parse request URL.");
		let request = HttpRequest::new(HttpMethod::Get, url)
			.with_header("Authorization", "Bearer super-secret");
		let rendered = format!("{request:?}");

		assert!(!rendered.contains("super-secret"));
		assert!(rendered.contains("hapikey"));
	}

	#[test]
	fn only_post_and_put_carry_bodies() {
		assert!(HttpMethod::Post.has_body());
		assert!(HttpMethod::Put.has_body());
		assert!(!HttpMethod::Get.has_body());
		assert!(!HttpMethod::Delete.has_body());
	}
}
