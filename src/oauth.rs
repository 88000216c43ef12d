//! OAuth2 refresh-token support.
//!
//! HubSpot timeline events require a bearer token. The [`TokenManager`] keeps the current
//! [`OAuthToken`] and swaps it in one assignment after each successful refresh. Refreshes
//! are serialized so concurrent callers never race two grants with the same refresh token.

pub mod secret;
pub mod token;

mod facade;

pub use oauth2;
pub use secret::TokenSecret;
pub use token::OAuthToken;

// self
use crate::{_prelude::*, config::Config, error::OAuthError, http::Transport};

/// Shared holder of the current OAuth token.
#[derive(Default)]
pub struct TokenManager {
	current: RwLock<Option<OAuthToken>>,
	refresh_guard: AsyncMutex<()>,
}
impl TokenManager {
	/// Creates an empty manager.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns a copy of the current token, if any.
	pub fn current(&self) -> Option<OAuthToken> {
		self.current.read().clone()
	}

	/// Returns the current access token when one is held and non-empty.
	pub fn access_token(&self) -> Option<TokenSecret> {
		self.current
			.read()
			.as_ref()
			.map(|token| token.access_token.clone())
			.filter(|secret| !secret.is_empty())
	}

	/// Replaces the token state.
	pub fn replace(&self, token: OAuthToken) {
		*self.current.write() = Some(token);
	}

	/// Drops the current token so OAuth endpoints fall back to the API key.
	pub fn clear(&self) {
		*self.current.write() = None;
	}

	/// Runs the refresh-token grant and stores the result.
	///
	/// A refresh token rotated by a previous grant takes precedence over the configured one.
	/// When the provider does not rotate the refresh token, the one just used is kept.
	pub(crate) async fn refresh<T>(
		&self,
		config: &Config,
		transport: Arc<T>,
	) -> Result<OAuthToken, OAuthError>
	where
		T: ?Sized + Transport,
	{
		let _guard = self.refresh_guard.lock().await;
		let refresh_token = self
			.current()
			.and_then(|token| token.refresh_token)
			.or_else(|| config.oauth_refresh_token.clone())
			.filter(|secret| !secret.is_empty())
			.ok_or(OAuthError::MissingRefreshToken)?;
		let mut token = facade::exchange_refresh_token(config, transport, &refresh_token).await?;

		token.refresh_token.get_or_insert(refresh_token);

		self.replace(token.clone());

		Ok(token)
	}
}
impl Debug for TokenManager {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenManager").field("current", &*self.current.read()).finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::http::{FixtureTransport, HttpMethod};

	fn config() -> Config {
		Config::from_lookup(|_| None)
			.expect("Default configuration should load.")
			.with_oauth_client("client", "secret")
			.with_oauth_refresh_token("configured-refresh")
	}

	fn token_body(access: &str, refresh: Option<&str>) -> Value {
		let mut body = serde_json::json!({
			"access_token": access,
			"token_type": "bearer",
			"expires_in": 21600
		});

		if let Some(refresh) = refresh {
			body["refresh_token"] = Value::String(refresh.into());
		}

		body
	}

	#[tokio::test]
	async fn refresh_replaces_state_and_keeps_unrotated_refresh_token() {
		let transport = Arc::new(FixtureTransport::new().with_json(
			HttpMethod::Post,
			"/oauth/v1/token",
			200,
			token_body("access-1", None),
		));
		let manager = TokenManager::new();
		let token = manager.refresh(&config(), transport).await.expect("Refresh should succeed.");

		assert_eq!(token.access_token.expose(), "access-1");
		assert_eq!(
			token.refresh_token.as_ref().map(TokenSecret::expose),
			Some("configured-refresh")
		);
		assert_eq!(manager.access_token().as_ref().map(TokenSecret::expose), Some("access-1"));
	}

	#[tokio::test]
	async fn rotated_refresh_token_is_used_next_time() {
		let transport = Arc::new(FixtureTransport::new().with_json(
			HttpMethod::Post,
			"/oauth/v1/token",
			200,
			token_body("access-1", Some("rotated-refresh")),
		));
		let manager = TokenManager::new();

		manager.refresh(&config(), transport.clone()).await.expect("First refresh should succeed.");
		manager
			.refresh(&config(), transport.clone())
			.await
			.expect("Second refresh should succeed.");

		let form = transport
			.last_request()
			.and_then(|request| request.body)
			.map(|body| String::from_utf8_lossy(&body).into_owned())
			.unwrap_or_default();

		assert!(form.contains("refresh_token=rotated-refresh"));
	}

	#[tokio::test]
	async fn missing_refresh_token_fails_without_a_request() {
		let transport = Arc::new(FixtureTransport::new());
		let config = Config::from_lookup(|_| None)
			.expect("Default configuration should load.")
			.with_oauth_client("client", "secret");
		let err = TokenManager::new()
			.refresh(&config, transport.clone())
			.await
			.expect_err("Refresh without a refresh token should fail.");

		assert!(matches!(err, OAuthError::MissingRefreshToken));
		assert_eq!(transport.request_count(), 0);
	}

	#[test]
	fn empty_access_tokens_are_ignored() {
		let manager = TokenManager::new();

		manager.replace(OAuthToken {
			access_token: TokenSecret::new(""),
			refresh_token: None,
			expires_in: None,
			refreshed_at: OffsetDateTime::now_utc(),
		});

		assert!(manager.current().is_some());
		assert!(manager.access_token().is_none());

		manager.clear();

		assert!(manager.current().is_none());
	}
}
