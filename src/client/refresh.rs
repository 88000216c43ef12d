//! OAuth refresh entry points on [`Client`].

// self
use crate::{
	_prelude::*,
	client::Client,
	error::OAuthError,
	http::Transport,
	oauth::OAuthToken,
	obs::{self, CallOutcome, CallSpan, OAUTH_REFRESH},
};

impl<T> Client<T>
where
	T: ?Sized + Transport,
{
	/// Exchanges the refresh token for a new access token and stores it.
	///
	/// Fails without a network call when no refresh token or client id is configured.
	/// Non-200 answers from the token endpoint yield [`OAuthError::Rejected`].
	pub async fn refresh_oauth_token(&self) -> Result<OAuthToken, OAuthError> {
		let span = CallSpan::new(OAUTH_REFRESH, "refresh_oauth_token");

		obs::record_call_outcome(OAUTH_REFRESH, CallOutcome::Attempt);

		let result =
			span.instrument(self.tokens.refresh(&self.config, self.transport.clone())).await;

		match &result {
			Ok(_) => {
				obs::record_call_outcome(OAUTH_REFRESH, CallOutcome::Success);
				obs::log_refresh_success(self.config.logging);
			},
			Err(_) => obs::record_call_outcome(OAUTH_REFRESH, CallOutcome::Failure),
		}

		result
	}

	/// Runs the startup refresh.
	///
	/// Failures are logged at error level and never returned; OAuth endpoints then keep
	/// using their mock responses (or the API key once a refresh token is configured).
	pub async fn initialize(&self) -> Option<OAuthToken> {
		match self.refresh_oauth_token().await {
			Ok(token) => Some(token),
			Err(err) => {
				obs::log_refresh_failure(self.config.logging, &err);

				None
			},
		}
	}
}
