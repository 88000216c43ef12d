//! Access/refresh token pair obtained from the token endpoint.

// self
use crate::{_prelude::*, oauth::TokenSecret};

/// Token state held by the [`TokenManager`](crate::oauth::TokenManager).
///
/// HubSpot access tokens are short lived, but the client never refreshes on expiry by
/// itself; callers that keep a client around can check [`OAuthToken::is_expired_at`] and
/// call [`Client::refresh_oauth_token`](crate::Client::refresh_oauth_token).
#[derive(Clone, PartialEq, Eq)]
pub struct OAuthToken {
	/// Bearer token sent on OAuth endpoints.
	pub access_token: TokenSecret,
	/// Refresh token returned with the access token, if the provider rotated it.
	pub refresh_token: Option<TokenSecret>,
	/// Lifetime reported by the provider.
	pub expires_in: Option<Duration>,
	/// Instant the token was received.
	pub refreshed_at: OffsetDateTime,
}
impl OAuthToken {
	/// Returns the expiry instant when the provider reported a lifetime.
	pub fn expires_at(&self) -> Option<OffsetDateTime> {
		self.expires_in.map(|lifetime| self.refreshed_at + lifetime)
	}

	/// Returns `true` once `now` reaches the expiry instant. Tokens without a reported
	/// lifetime never expire.
	pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
		self.expires_at().is_some_and(|expires_at| now >= expires_at)
	}
}
impl Debug for OAuthToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OAuthToken")
			.field("access_token", &self.access_token)
			.field("has_refresh_token", &self.refresh_token.is_some())
			.field("expires_in", &self.expires_in)
			.field("refreshed_at", &self.refreshed_at)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros::datetime;
	// self
	use super::*;

	fn token(expires_in: Option<Duration>) -> OAuthToken {
		OAuthToken {
			access_token: TokenSecret::new("access"),
			refresh_token: Some(TokenSecret::new("refresh")),
			expires_in,
			refreshed_at: datetime!(2025-01-01 00:00 UTC),
		}
	}

	#[test]
	fn expiry_follows_reported_lifetime() {
		let token = token(Some(Duration::seconds(21_600)));

		assert_eq!(token.expires_at(), Some(datetime!(2025-01-01 06:00 UTC)));
		assert!(!token.is_expired_at(datetime!(2025-01-01 05:59 UTC)));
		assert!(token.is_expired_at(datetime!(2025-01-01 06:00 UTC)));
	}

	#[test]
	fn tokens_without_lifetime_never_expire() {
		assert!(!token(None).is_expired_at(datetime!(2099-01-01 00:00 UTC)));
	}

	#[test]
	fn debug_output_redacts_tokens() {
		let rendered = format!("{:?}", token(None));

		assert!(!rendered.contains("access\""));
		assert!(rendered.contains("<redacted>"));
	}
}
