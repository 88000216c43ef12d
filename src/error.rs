//! SDK error types: the call-level [`ApiError`], its [`SystemCode`] taxonomy, and the
//! configuration, transport, and OAuth failures that feed into it.

// self
use crate::{_prelude::*, http::HttpMethod};

/// SDK-wide result type alias returning [`ApiError`] by default.
pub type Result<T, E = ApiError> = std::result::Result<T, E>;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Symbolic reason attached to every [`ApiError`].
///
/// The dispatcher emits the generic request codes; resource modules overwrite them with a
/// domain-specific code once the HTTP status is known.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SystemCode {
	/// The requested endpoint is not registered.
	EndpointNotFound,
	/// A GET payload was not a flat string-to-string map.
	BadQueryString,
	/// The payload could not be serialized to JSON.
	InvalidPayload,
	/// The resolved path could not be joined onto the API root.
	InvalidPath,
	/// No response was received from the API.
	RequestError,
	/// The API answered with a status of 300 or above.
	Error,
	/// The API answered successfully but the body had an unexpected shape.
	ResponseDecode,
	/// The contact could not be created or updated.
	ContactCouldNotBeCreated,
	/// No email address was supplied for the contact.
	ContactNoEmail,
	/// The contact does not exist.
	ContactNotFound,
	/// A contact VID of zero was supplied.
	ContactVidZero,
	/// The contact could not be deleted.
	ContactCouldNotBeDeleted,
	/// The event type could not be created.
	EventTypeCouldNotBeCreated,
	/// The event type input is missing required fields.
	EventTypeMissingData,
	/// The event type could not be deleted.
	EventTypeCouldNotBeDeleted,
	/// The timeline event could not be created or updated.
	EventCouldNotBeCreated,
	/// The timeline event input is missing required fields.
	EventMissingData,
	/// Catch-all for failures without a more specific code.
	GeneralError,
}
impl SystemCode {
	/// Returns the stable label used in logs and serialized errors.
	pub const fn as_str(self) -> &'static str {
		match self {
			SystemCode::EndpointNotFound => "request_error_endpoint_not_found",
			SystemCode::BadQueryString => "request_error_bad_query_string",
			SystemCode::InvalidPayload => "request_error_invalid_payload",
			SystemCode::InvalidPath => "request_error_invalid_path",
			SystemCode::RequestError => "request_error",
			SystemCode::Error => "error",
			SystemCode::ResponseDecode => "response_decode_error",
			SystemCode::ContactCouldNotBeCreated => "contact_could_not_be_created",
			SystemCode::ContactNoEmail => "contact_no_email",
			SystemCode::ContactNotFound => "contact_not_found",
			SystemCode::ContactVidZero => "contact_vid_zero",
			SystemCode::ContactCouldNotBeDeleted => "contact_could_not_be_deleted",
			SystemCode::EventTypeCouldNotBeCreated => "event_type_could_not_be_created",
			SystemCode::EventTypeMissingData => "event_type_missing_data",
			SystemCode::EventTypeCouldNotBeDeleted => "event_type_could_not_be_deleted",
			SystemCode::EventCouldNotBeCreated => "event_could_not_be_created",
			SystemCode::EventMissingData => "event_missing_data",
			SystemCode::GeneralError => "general_error",
		}
	}

	/// Returns a human-readable explanation of the code.
	pub const fn description(self) -> &'static str {
		match self {
			SystemCode::EndpointNotFound => "could not find that endpoint",
			SystemCode::BadQueryString => "GET requests must use a flat string map for data",
			SystemCode::InvalidPayload => "the request payload could not be serialized",
			SystemCode::InvalidPath => "the endpoint path could not be resolved",
			SystemCode::RequestError => "the API could not be reached",
			SystemCode::Error => "the API returned an error",
			SystemCode::ResponseDecode => "the API response had an unexpected shape",
			SystemCode::ContactCouldNotBeCreated =>
				"the contact could not be created at hubspot; check the message field",
			SystemCode::ContactNoEmail => "you failed to specify an email for that contact",
			SystemCode::ContactNotFound => "contact could not be found",
			SystemCode::ContactVidZero => "the contact VID cannot be 0 for this action",
			SystemCode::ContactCouldNotBeDeleted => "the contact could not be deleted",
			SystemCode::EventTypeCouldNotBeCreated => "the event type could not be created",
			SystemCode::EventTypeMissingData | SystemCode::EventMissingData =>
				"the input is missing required information",
			SystemCode::EventTypeCouldNotBeDeleted => "that event type could not be deleted",
			SystemCode::EventCouldNotBeCreated => "the event could not be created",
			SystemCode::GeneralError => "a general error occurred",
		}
	}
}
impl Display for SystemCode {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Error returned by every API call.
///
/// `http_status` is the status returned by HubSpot, `400` for validation failures raised
/// before any request, or `500` when no response was received.
#[derive(Debug, ThisError)]
#[error("{message} ({system_code}, HTTP {http_status}).")]
pub struct ApiError {
	/// HTTP status code associated with the failure.
	pub http_status: u16,
	/// Symbolic reason for the failure.
	pub system_code: SystemCode,
	/// Provider- or SDK-supplied message.
	pub message: String,
	/// Parsed error body returned by the API, when one was received.
	pub body: Option<Value>,
	/// Underlying failure, for transport and decode errors.
	#[source]
	pub source: Option<BoxError>,
}
impl ApiError {
	/// Status used for failures detected before any request is sent.
	pub const CLIENT_STATUS: u16 = 400;
	/// Status used when the transport produced no response.
	pub const TRANSPORT_STATUS: u16 = 500;

	/// Creates an error without a body or source.
	pub fn new(http_status: u16, system_code: SystemCode, message: impl Into<String>) -> Self {
		Self { http_status, system_code, message: message.into(), body: None, source: None }
	}

	/// Client-side validation failure raised before any network call.
	pub fn bad_request(system_code: SystemCode, message: impl Into<String>) -> Self {
		Self::new(Self::CLIENT_STATUS, system_code, message)
	}

	/// Transport failure: no response was received.
	pub fn transport(err: TransportError) -> Self {
		let mut api_err =
			Self::new(Self::TRANSPORT_STATUS, SystemCode::RequestError, err.to_string());

		api_err.source = Some(Box::new(err));

		api_err
	}

	/// Remote failure carrying the provider's status and parsed error body.
	pub fn remote(http_status: u16, message: impl Into<String>, body: Value) -> Self {
		let mut api_err = Self::new(http_status, SystemCode::Error, message);

		api_err.body = Some(body);

		api_err
	}

	/// Successful response whose body could not be decoded.
	pub fn decode(http_status: u16, src: impl 'static + Send + Sync + StdError) -> Self {
		let mut api_err = Self::new(http_status, SystemCode::ResponseDecode, src.to_string());

		api_err.source = Some(Box::new(src));

		api_err
	}

	/// Overwrites the system code while keeping status, message, and body.
	pub fn with_system_code(mut self, system_code: SystemCode) -> Self {
		self.system_code = system_code;

		self
	}

	/// Returns `true` when the API reported the resource as missing.
	pub fn is_not_found(&self) -> bool {
		self.http_status == 404
	}

	/// Returns `true` when the failure happened in the transport layer.
	pub fn is_transport_failure(&self) -> bool {
		self.source.as_ref().is_some_and(|source| source.is::<TransportError>())
	}
}

/// Configuration failures raised while loading settings or building a client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// A URL setting could not be parsed.
	#[error("The {setting} setting is not a valid URL: {value}.")]
	InvalidUrl {
		/// Setting name.
		setting: &'static str,
		/// Raw value that failed to parse.
		value: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// An env file could not be read or parsed.
	#[error("Env file could not be loaded.")]
	EnvFile(#[from] dotenvy::Error),
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO, missing fixtures).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API: {source}.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the API.")]
	Io(#[from] std::io::Error),
	/// A fixture transport has no response registered for the request.
	#[error("No fixture is registered for {method} {path}.")]
	MissingFixture {
		/// Request method.
		method: HttpMethod,
		/// Request path.
		path: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Failures raised while refreshing the OAuth access token.
#[derive(Debug, ThisError)]
pub enum OAuthError {
	/// No refresh token is configured.
	#[error("No OAuth refresh token is configured.")]
	MissingRefreshToken,
	/// No OAuth client identifier is configured.
	#[error("No OAuth client identifier is configured.")]
	MissingClientId,
	/// Token endpoint URL cannot be used by the OAuth client.
	#[error("OAuth token URL is invalid.")]
	InvalidTokenUrl {
		/// Underlying parsing failure.
		#[source]
		source: oauth2::url::ParseError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Token endpoint rejected the refresh grant.
	#[error("Could not refresh the OAuth token: {message}.")]
	Rejected {
		/// HTTP status code, when available.
		status: Option<u16>,
		/// Provider- or SDK-supplied message.
		message: String,
	},
	/// Token endpoint responded with malformed JSON.
	#[error("Token endpoint returned malformed JSON.")]
	MalformedResponse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Token endpoint returned an excessively large `expires_in`.
	#[error("The expires_in value exceeds the supported range.")]
	ExpiresInOutOfRange,
	/// Transport failure while calling the token endpoint.
	#[error(transparent)]
	Transport(#[from] TransportError),
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn transport_errors_map_to_500_request_error() {
		let err = ApiError::transport(TransportError::MissingFixture {
			method: HttpMethod::Get,
			path: "/contacts".into(),
		});

		assert_eq!(err.http_status, 500);
		assert_eq!(err.system_code, SystemCode::RequestError);
		assert!(err.is_transport_failure());
		assert!(err.source.is_some());
	}

	#[test]
	fn with_system_code_keeps_status_and_body() {
		let err = ApiError::remote(404, "resource not found", serde_json::json!({ "a": 1 }))
			.with_system_code(SystemCode::ContactNotFound);

		assert!(err.is_not_found());
		assert_eq!(err.system_code, SystemCode::ContactNotFound);
		assert_eq!(err.message, "resource not found");
		assert!(err.body.is_some());
	}

	#[test]
	fn system_codes_display_stable_labels() {
		assert_eq!(SystemCode::ContactVidZero.to_string(), "contact_vid_zero");
		assert_eq!(SystemCode::BadQueryString.to_string(), "request_error_bad_query_string");
	}
}
