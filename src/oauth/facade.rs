//! Refresh-token grant performed by the `oauth2` crate over the SDK [`Transport`].

// crates.io
use oauth2::{
	AsyncHttpClient, AuthType, ClientId, ClientSecret, EndpointNotSet, EndpointSet,
	HttpClientError, RefreshToken, RequestTokenError, TokenResponse, TokenUrl,
	basic::{BasicClient, BasicRequestTokenError},
	http::{Method, StatusCode},
};
// self
use crate::{
	_prelude::*,
	config::Config,
	error::{OAuthError, TransportError},
	http::{HttpMethod, HttpRequest, Transport},
	oauth::{OAuthToken, TokenSecret},
};

type ConfiguredBasicClient =
	BasicClient<EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;
type FacadeFuture<'c> = Pin<
	Box<
		dyn Future<Output = Result<oauth2::HttpResponse, HttpClientError<TransportError>>>
			+ 'c
			+ Send
			+ Sync,
	>,
>;

/// Exchanges `refresh_token` for a new access token at the configured token URL.
///
/// Client credentials travel in the form body, matching what HubSpot expects.
pub(crate) async fn exchange_refresh_token<T>(
	config: &Config,
	transport: Arc<T>,
	refresh_token: &TokenSecret,
) -> Result<OAuthToken, OAuthError>
where
	T: ?Sized + Transport,
{
	let oauth_client = basic_client(config)?;
	let status = StatusSlot::default();
	let handle = TransportHandle { transport, status: status.clone() };
	let refresh_secret = RefreshToken::new(refresh_token.expose().to_owned());
	let response = oauth_client
		.exchange_refresh_token(&refresh_secret)
		.request_async(&handle)
		.await
		.map_err(|err| map_request_error(status.take(), err))?;
	let expires_in = response
		.expires_in()
		.map(|lifetime| {
			i64::try_from(lifetime.as_secs())
				.map(Duration::seconds)
				.map_err(|_| OAuthError::ExpiresInOutOfRange)
		})
		.transpose()?;

	Ok(OAuthToken {
		access_token: TokenSecret::new(response.access_token().secret().to_owned()),
		refresh_token: response
			.refresh_token()
			.map(|token| TokenSecret::new(token.secret().to_owned())),
		expires_in,
		refreshed_at: OffsetDateTime::now_utc(),
	})
}

fn basic_client(config: &Config) -> Result<ConfiguredBasicClient, OAuthError> {
	let client_id = config
		.client_id
		.as_deref()
		.filter(|id| !id.is_empty())
		.ok_or(OAuthError::MissingClientId)?;
	let token_url = TokenUrl::new(config.oauth_token_url.to_string())
		.map_err(|source| OAuthError::InvalidTokenUrl { source })?;
	let mut oauth_client = BasicClient::new(ClientId::new(client_id.to_owned()))
		.set_token_uri(token_url)
		.set_auth_type(AuthType::RequestBody);

	if let Some(secret) = &config.client_secret {
		oauth_client =
			oauth_client.set_client_secret(ClientSecret::new(secret.expose().to_owned()));
	}

	Ok(oauth_client)
}

fn map_request_error(
	status: Option<u16>,
	err: BasicRequestTokenError<HttpClientError<TransportError>>,
) -> OAuthError {
	match err {
		RequestTokenError::Request(error) => map_transport_error(status, error),
		// HubSpot answers non-200 refreshes with its own error body, which `oauth2` may fail
		// to parse as an RFC 6749 error.
		_ if status.is_some_and(|code| code != 200) => OAuthError::Rejected {
			status,
			message: format!("token endpoint answered with HTTP {}", status.unwrap_or_default()),
		},
		RequestTokenError::ServerResponse(response) => OAuthError::Rejected {
			status,
			message: response
				.error_description()
				.cloned()
				.unwrap_or_else(|| response.error().as_ref().to_owned()),
		},
		RequestTokenError::Parse(source, _body) => OAuthError::MalformedResponse { source, status },
		RequestTokenError::Other(message) => OAuthError::Rejected { status, message },
	}
}

fn map_transport_error(status: Option<u16>, err: HttpClientError<TransportError>) -> OAuthError {
	match err {
		HttpClientError::Reqwest(inner) => OAuthError::Transport(*inner),
		HttpClientError::Http(inner) => OAuthError::HttpRequest(inner),
		HttpClientError::Io(inner) => OAuthError::Transport(TransportError::Io(inner)),
		HttpClientError::Other(message) => OAuthError::Rejected { status, message },
		_ => OAuthError::Rejected {
			status,
			message: "HTTP client error occurred while calling the token endpoint".into(),
		},
	}
}

/// Records the status of the last token endpoint response.
#[derive(Clone, Debug, Default)]
struct StatusSlot(Arc<Mutex<Option<u16>>>);
impl StatusSlot {
	fn store(&self, status: u16) {
		*self.0.lock() = Some(status);
	}

	fn take(&self) -> Option<u16> {
		self.0.lock().take()
	}
}

/// Bridges `oauth2`'s HTTP client contract onto an SDK [`Transport`].
struct TransportHandle<T>
where
	T: ?Sized + Transport,
{
	transport: Arc<T>,
	status: StatusSlot,
}
impl<'c, T> AsyncHttpClient<'c> for TransportHandle<T>
where
	T: ?Sized + Transport,
{
	type Error = HttpClientError<TransportError>;
	type Future = FacadeFuture<'c>;

	fn call(&'c self, request: oauth2::HttpRequest) -> Self::Future {
		Box::pin(async move {
			let request = into_sdk_request(request)?;
			let response = self.transport.execute(request).await.map_err(Box::new)?;

			self.status.store(response.status);

			let status = StatusCode::from_u16(response.status)
				.map_err(|err| HttpClientError::Other(err.to_string()))?;
			let mut http_response = oauth2::HttpResponse::new(response.body);

			*http_response.status_mut() = status;

			Ok(http_response)
		})
	}
}

fn into_sdk_request(
	request: oauth2::HttpRequest,
) -> Result<HttpRequest, HttpClientError<TransportError>> {
	let method = if request.method() == Method::POST {
		HttpMethod::Post
	} else if request.method() == Method::GET {
		HttpMethod::Get
	} else {
		return Err(HttpClientError::Other(format!(
			"unsupported token endpoint method {}",
			request.method()
		)));
	};
	let url = Url::parse(&request.uri().to_string())
		.map_err(|err| HttpClientError::Other(err.to_string()))?;
	let mut sdk_request = HttpRequest::new(method, url);

	for (name, value) in request.headers() {
		let value = value.to_str().map_err(|err| HttpClientError::Other(err.to_string()))?;

		sdk_request = sdk_request.with_header(name.as_str(), value);
	}

	let body = request.into_body();

	if !body.is_empty() {
		sdk_request.body = Some(body);
	}

	Ok(sdk_request)
}
