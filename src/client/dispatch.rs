//! Generic call dispatch: resolve, mock or execute, and map the response.

// self
use crate::{
	_prelude::*,
	client::{ApiResult, Client},
	endpoint::{Endpoint, EndpointDescriptor},
	http::{HttpMethod, HttpRequest, HttpResponse, Transport},
	obs::{self, CallOutcome, CallSpan},
};

const JSON: &str = "application/json";

impl<T> Client<T>
where
	T: ?Sized + Transport,
{
	/// Calls a built-in endpoint. See [`Client::invoke`].
	pub async fn call<P>(
		&self,
		endpoint: Endpoint,
		path_params: &[(&str, &str)],
		payload: Option<&P>,
	) -> Result<ApiResult>
	where
		P: ?Sized + Serialize,
	{
		self.invoke(endpoint.name(), path_params, payload).await
	}

	/// Calls the endpoint registered under `name`.
	///
	/// `path_params` pairs are `(":token", value)` replacements for the path template. For
	/// `GET` endpoints the payload must serialize to a flat object of strings and becomes
	/// query parameters; `POST`/`PUT` send it as a JSON body; `DELETE` ignores it.
	///
	/// Endpoints that require OAuth are served from their mock response while no refresh
	/// token is configured, and in test mode every endpoint with a mock body is mocked.
	pub async fn invoke<P>(
		&self,
		name: &str,
		path_params: &[(&str, &str)],
		payload: Option<&P>,
	) -> Result<ApiResult>
	where
		P: ?Sized + Serialize,
	{
		let span = CallSpan::new(name, "invoke");

		obs::record_call_outcome(name, CallOutcome::Attempt);
		self.call_metrics.record_dispatch();

		let result = span.instrument(self.dispatch(name, path_params, payload)).await;

		match &result {
			Ok(_) => obs::record_call_outcome(name, CallOutcome::Success),
			Err(_) => {
				self.call_metrics.record_failure();
				obs::record_call_outcome(name, CallOutcome::Failure);
			},
		}

		result
	}

	async fn dispatch<P>(
		&self,
		name: &str,
		path_params: &[(&str, &str)],
		payload: Option<&P>,
	) -> Result<ApiResult>
	where
		P: ?Sized + Serialize,
	{
		let descriptor = self.registry.resolve(name)?;

		if self.should_mock(descriptor) {
			self.call_metrics.record_mocked();
			obs::record_call_outcome(name, CallOutcome::Mocked);
			obs::log_mocked(self.config.logging, name);

			let body = descriptor.mock_body().cloned().unwrap_or_else(empty_object);

			return Ok(ApiResult::new(200, body));
		}

		let request = self.build_request(descriptor, path_params, payload)?;

		obs::log_outbound(self.config.logging, name, request.method, &request.url);
		self.call_metrics.record_transport_call();

		let response = self.transport.execute(request).await.map_err(|err| {
			obs::log_transport_failure(self.config.logging, name, &err);

			ApiError::transport(err)
		})?;

		obs::log_response(self.config.logging, name, response.status);

		map_response(response)
	}

	fn should_mock(&self, descriptor: &EndpointDescriptor) -> bool {
		(descriptor.requires_oauth && !self.config.has_refresh_token())
			|| (self.config.test_mode && descriptor.mock_body().is_some())
	}

	fn build_request<P>(
		&self,
		descriptor: &EndpointDescriptor,
		path_params: &[(&str, &str)],
		payload: Option<&P>,
	) -> Result<HttpRequest>
	where
		P: ?Sized + Serialize,
	{
		let segments = descriptor.resolve_segments(path_params, &self.config.application_id);
		let mut url = self.config.root_url.clone();

		url.path_segments_mut()
			.map_err(|_| {
				ApiError::bad_request(
					SystemCode::InvalidPath,
					format!("root URL {} cannot carry a path", self.config.root_url),
				)
			})?
			.pop_if_empty()
			.extend(&segments);

		let mut query = BTreeMap::new();
		let mut request_headers = vec![("accept", JSON.to_owned())];

		match self.tokens.access_token() {
			Some(token) if descriptor.requires_oauth =>
				request_headers.push(("authorization", format!("Bearer {}", token.expose()))),
			_ => {
				query.insert("hapikey".to_owned(), self.config.api_key.expose().to_owned());
			},
		}

		if let Some(user_id) = self.config.user_id.as_deref().filter(|id| !id.is_empty()) {
			query.insert("userId".to_owned(), user_id.to_owned());
		}

		let mut body = None;

		match (descriptor.method, payload) {
			(HttpMethod::Get, Some(payload)) => query.extend(flat_query(payload)?),
			(method, Some(payload)) if method.has_body() => {
				let encoded = serde_json::to_vec(payload).map_err(|err| {
					ApiError::bad_request(SystemCode::InvalidPayload, err.to_string())
				})?;

				body = Some(encoded);
			},
			_ => (),
		}

		if !query.is_empty() {
			url.query_pairs_mut().extend_pairs(query);
		}

		let mut request = HttpRequest::new(descriptor.method, url);

		for (name, value) in request_headers {
			request = request.with_header(name, value);
		}
		if let Some(body) = body {
			request = request.with_body(JSON, body);
		}

		Ok(request)
	}
}

/// Serializes a GET payload into query pairs. Only flat objects of strings qualify.
fn flat_query<P>(payload: &P) -> Result<Vec<(String, String)>>
where
	P: ?Sized + Serialize,
{
	let bad_query = || {
		ApiError::bad_request(SystemCode::BadQueryString, SystemCode::BadQueryString.description())
	};
	let value = serde_json::to_value(payload)
		.map_err(|err| ApiError::bad_request(SystemCode::InvalidPayload, err.to_string()))?;
	let Value::Object(map) = value else {
		return Err(bad_query());
	};

	map.into_iter()
		.map(|(key, value)| match value {
			Value::String(value) => Ok((key, value)),
			_ => Err(bad_query()),
		})
		.collect()
}

fn map_response(response: HttpResponse) -> Result<ApiResult> {
	let HttpResponse { status, body } = response;

	let body = object_body(&body);

	if status >= 300 {
		let message = body.get("message").and_then(Value::as_str).unwrap_or("error").to_owned();

		return Err(ApiError::remote(status, message, body));
	}

	Ok(ApiResult::new(status, body))
}

/// Parses a response body as a JSON object, falling back to `{}`.
fn object_body(body: &[u8]) -> Value {
	serde_json::from_slice::<Value>(body).ok().filter(Value::is_object).unwrap_or_else(empty_object)
}

fn empty_object() -> Value {
	Value::Object(Default::default())
}
