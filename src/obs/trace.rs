// self
use crate::{
	_prelude::*,
	error::{OAuthError, TransportError},
	http::HttpMethod,
};

/// Query parameters whose values never reach the logs.
const SECRET_QUERY_KEYS: [&str; 1] = ["hapikey"];

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// Span wrapping one dispatch or refresh.
#[derive(Clone, Debug)]
pub struct CallSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Creates a new span tagged with the endpoint name + stage.
	pub fn new(endpoint: &str, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("hubspot_sdk.call", endpoint, stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (endpoint, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCall<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Renders `url` with secret query values replaced by `REDACTED`.
pub fn redact_url(url: &Url) -> String {
	if url.query().is_none() {
		return url.to_string();
	}

	let pairs = url
		.query_pairs()
		.map(|(key, value)| {
			let value = if SECRET_QUERY_KEYS.iter().any(|secret| *secret == key) {
				"REDACTED".into()
			} else {
				value
			};

			(key.into_owned(), value.into_owned())
		})
		.collect::<Vec<_>>();
	let mut redacted = url.clone();

	redacted.query_pairs_mut().clear().extend_pairs(pairs);

	redacted.to_string()
}

pub(crate) fn log_mocked(enabled: bool, endpoint: &str) {
	#[cfg(feature = "tracing")]
	{
		if enabled {
			tracing::info!(endpoint, "Serving mock response.");
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (enabled, endpoint);
	}
}

pub(crate) fn log_outbound(enabled: bool, endpoint: &str, method: HttpMethod, url: &Url) {
	#[cfg(feature = "tracing")]
	{
		if enabled {
			tracing::info!(endpoint, %method, url = %redact_url(url), "Calling HubSpot.");
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (enabled, endpoint, method, url);
	}
}

pub(crate) fn log_response(enabled: bool, endpoint: &str, status: u16) {
	#[cfg(feature = "tracing")]
	{
		if enabled {
			tracing::debug!(endpoint, status, "HubSpot responded.");
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (enabled, endpoint, status);
	}
}

pub(crate) fn log_transport_failure(enabled: bool, endpoint: &str, err: &TransportError) {
	#[cfg(feature = "tracing")]
	{
		if enabled {
			tracing::warn!(endpoint, error = %err, "HubSpot could not be reached.");
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (enabled, endpoint, err);
	}
}

pub(crate) fn log_refresh_success(enabled: bool) {
	#[cfg(feature = "tracing")]
	{
		if enabled {
			tracing::info!("OAuth token refreshed.");
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = enabled;
	}
}

pub(crate) fn log_refresh_failure(enabled: bool, err: &OAuthError) {
	#[cfg(feature = "tracing")]
	{
		if enabled {
			tracing::error!(
				error = %err,
				"Could not get an OAuth token; calls that require OAuth will be mocked."
			);
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (enabled, err);
	}
}
