//! In-memory transport that answers from registered fixtures.

// self
use crate::{
	_prelude::*,
	error::TransportError,
	http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportFuture},
};

/// Transport that serves canned responses keyed by method and path, recording every
/// request it receives.
///
/// Requests without a matching fixture fail with [`TransportError::MissingFixture`], which
/// the dispatcher reports like any other transport failure. When several fixtures match,
/// the most recently registered one wins.
#[derive(Debug, Default)]
pub struct FixtureTransport {
	fixtures: Mutex<Vec<Fixture>>,
	requests: Mutex<Vec<HttpRequest>>,
}
impl FixtureTransport {
	/// Creates an empty transport.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a JSON response and returns the transport for chaining.
	pub fn with_json(
		self,
		method: HttpMethod,
		path: impl Into<String>,
		status: u16,
		body: Value,
	) -> Self {
		self.insert(method, path, HttpResponse::json(status, &body));

		self
	}

	/// Registers a raw response for `method` + `path`.
	pub fn insert(&self, method: HttpMethod, path: impl Into<String>, response: HttpResponse) {
		self.fixtures.lock().push(Fixture { method, path: path.into(), response });
	}

	/// Returns every request received so far, oldest first.
	pub fn requests(&self) -> Vec<HttpRequest> {
		self.requests.lock().clone()
	}

	/// Returns the number of requests received so far.
	pub fn request_count(&self) -> usize {
		self.requests.lock().len()
	}

	/// Returns the most recent request, if any.
	pub fn last_request(&self) -> Option<HttpRequest> {
		self.requests.lock().last().cloned()
	}
}
impl Transport for FixtureTransport {
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_> {
		let method = request.method;
		let path = request.url.path().to_owned();
		let response = self
			.fixtures
			.lock()
			.iter()
			.rev()
			.find(|fixture| fixture.method == method && fixture.path == path)
			.map(|fixture| fixture.response.clone());

		self.requests.lock().push(request);

		Box::pin(async move { response.ok_or(TransportError::MissingFixture { method, path }) })
	}
}

#[derive(Clone, Debug)]
struct Fixture {
	method: HttpMethod,
	path: String,
	response: HttpResponse,
}
