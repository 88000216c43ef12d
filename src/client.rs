//! The [`Client`] ties configuration, the endpoint registry, the transport, and the OAuth
//! token state together. Resource helpers in [`crate::resources`] and the generic
//! dispatcher are implemented as methods on it.

mod dispatch;
mod refresh;

// self
use crate::{
	_prelude::*,
	config::Config,
	endpoint::EndpointRegistry,
	http::Transport,
	oauth::TokenManager,
	obs::CallMetrics,
};
#[cfg(feature = "reqwest")]
use crate::{error::ConfigError, http::ReqwestTransport};

/// `User-Agent` sent by the reqwest-backed client.
#[cfg(feature = "reqwest")]
pub const USER_AGENT: &str = concat!("hubspot-sdk/", env!("CARGO_PKG_VERSION"));

/// Payload placeholder for calls without a body or query payload.
pub const NO_PAYLOAD: Option<&'static Value> = None;

/// Successful call result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiResult {
	/// HTTP status returned by the API, or `200` for mocked calls.
	pub http_status: u16,
	/// Decoded JSON body; `{}` when the API returned no content.
	pub body: Value,
}
impl ApiResult {
	/// Creates a result.
	pub fn new(http_status: u16, body: Value) -> Self {
		Self { http_status, body }
	}

	/// Decodes the body into a typed value, reporting the failing JSON path on mismatch.
	pub fn decode<D>(&self) -> Result<D>
	where
		D: serde::de::DeserializeOwned,
	{
		serde_path_to_error::deserialize(&self.body)
			.map_err(|err| ApiError::decode(self.http_status, err))
	}

	/// Reads an integer field from a JSON object body.
	pub fn i64_field(&self, field: &str) -> Option<i64> {
		self.body.get(field).and_then(Value::as_i64)
	}
}

/// HubSpot API client.
///
/// Cloning is cheap: every clone shares the same config, registry, transport, token
/// state, and counters.
pub struct Client<T>
where
	T: ?Sized + Transport,
{
	/// Settings applied to every call.
	pub config: Arc<Config>,
	/// Endpoints the dispatcher can resolve.
	pub registry: Arc<EndpointRegistry>,
	/// Transport executing live calls.
	pub transport: Arc<T>,
	/// Current OAuth token state.
	pub tokens: Arc<TokenManager>,
	/// In-process call counters.
	pub call_metrics: Arc<CallMetrics>,
}
impl<T> Client<T>
where
	T: ?Sized + Transport,
{
	/// Creates a client over the caller-provided transport with the built-in endpoints.
	///
	/// No OAuth refresh happens here; call [`Client::initialize`] for the startup refresh.
	pub fn with_transport(config: Config, transport: impl Into<Arc<T>>) -> Self {
		Self {
			config: Arc::new(config),
			registry: Default::default(),
			transport: transport.into(),
			tokens: Default::default(),
			call_metrics: Default::default(),
		}
	}

	/// Replaces the endpoint registry.
	pub fn with_registry(mut self, registry: EndpointRegistry) -> Self {
		self.registry = Arc::new(registry);

		self
	}
}
#[cfg(feature = "reqwest")]
impl Client<ReqwestTransport> {
	/// Creates a client backed by a fresh reqwest client.
	pub fn new(config: Config) -> Result<Self, ConfigError> {
		let http_client = ReqwestClient::builder().user_agent(USER_AGENT).build()?;

		Ok(Self::with_transport(config, ReqwestTransport::with_client(http_client)))
	}

	/// Creates a reqwest-backed client and runs the startup OAuth refresh.
	///
	/// A failed refresh is logged and leaves OAuth endpoints on their mock responses.
	pub async fn connect(config: Config) -> Result<Self, ConfigError> {
		let client = Self::new(config)?;

		client.initialize().await;

		Ok(client)
	}
}
impl<T> Clone for Client<T>
where
	T: ?Sized + Transport,
{
	fn clone(&self) -> Self {
		Self {
			config: self.config.clone(),
			registry: self.registry.clone(),
			transport: self.transport.clone(),
			tokens: self.tokens.clone(),
			call_metrics: self.call_metrics.clone(),
		}
	}
}
impl<T> Debug for Client<T>
where
	T: ?Sized + Transport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("config", &self.config)
			.field("endpoints", &self.registry.len())
			.field("tokens", &self.tokens)
			.finish()
	}
}
