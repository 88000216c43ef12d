//! Client configuration loaded from the environment, an env file, or any key lookup.
//!
//! Every setting reads a `HUBSPOT_SDK_*` variable. Empty values count as unset, so
//! defaults apply:
//!
//! | Variable | Default |
//! |---|---|
//! | `HUBSPOT_SDK_ENV` | `dev` |
//! | `HUBSPOT_SDK_ROOT_URL` | `https://api.hubapi.com/` |
//! | `HUBSPOT_SDK_API_KEY` | `demo` |
//! | `HUBSPOT_SDK_APPLICATION_ID` | `test` |
//! | `HUBSPOT_SDK_USER_ID` | `test` |
//! | `HUBSPOT_SDK_CLIENT_ID` / `HUBSPOT_SDK_CLIENT_SECRET` | unset |
//! | `HUBSPOT_SDK_OAUTH_REFRESH_TOKEN` | unset |
//! | `HUBSPOT_SDK_OAUTH_TOKEN_URL` | `https://api.hubapi.com/oauth/v1/token` |
//! | `HUBSPOT_SDK_LOGGING` | on (`off`, `false`, `no` disable it) |
//! | `HUBSPOT_SDK_TEST_MODE` | on iff the application id is `test` |

// std
use std::path::Path;
// self
use crate::{_prelude::*, error::ConfigError, oauth::TokenSecret};

/// Default API root.
pub const DEFAULT_ROOT_URL: &str = "https://api.hubapi.com/";
/// Default OAuth token endpoint.
pub const DEFAULT_OAUTH_TOKEN_URL: &str = "https://api.hubapi.com/oauth/v1/token";
/// Application identifier that designates the sandbox/test identity.
pub const TEST_APPLICATION_ID: &str = "test";

const ENV: &str = "HUBSPOT_SDK_ENV";
const ROOT_URL: &str = "HUBSPOT_SDK_ROOT_URL";
const API_KEY: &str = "HUBSPOT_SDK_API_KEY";
const APPLICATION_ID: &str = "HUBSPOT_SDK_APPLICATION_ID";
const USER_ID: &str = "HUBSPOT_SDK_USER_ID";
const CLIENT_ID: &str = "HUBSPOT_SDK_CLIENT_ID";
const CLIENT_SECRET: &str = "HUBSPOT_SDK_CLIENT_SECRET";
const OAUTH_REFRESH_TOKEN: &str = "HUBSPOT_SDK_OAUTH_REFRESH_TOKEN";
const OAUTH_TOKEN_URL: &str = "HUBSPOT_SDK_OAUTH_TOKEN_URL";
const LOGGING: &str = "HUBSPOT_SDK_LOGGING";
const TEST_MODE: &str = "HUBSPOT_SDK_TEST_MODE";

/// Deployment identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
	/// `dev`, `development`, or unset.
	Development,
	/// `prod` or `production`.
	Production,
	/// Any other lowercased value.
	Other(String),
}
impl Environment {
	/// Parses a raw environment name (case-insensitive).
	pub fn parse(raw: &str) -> Self {
		let lowered = raw.trim().to_ascii_lowercase();

		match lowered.as_str() {
			"prod" | "production" => Environment::Production,
			"" | "dev" | "development" => Environment::Development,
			_ => Environment::Other(lowered),
		}
	}

	/// Returns the canonical label.
	pub fn as_str(&self) -> &str {
		match self {
			Environment::Development => "dev",
			Environment::Production => "production",
			Environment::Other(value) => value,
		}
	}
}
impl Display for Environment {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Settings shared by every call a [`Client`](crate::Client) makes.
///
/// Secrets are wrapped in [`TokenSecret`] so `Debug` output stays redacted.
#[derive(Clone, Debug)]
pub struct Config {
	/// Deployment identity.
	pub environment: Environment,
	/// API root, always ending with `/`.
	pub root_url: Url,
	/// API key sent as the `hapikey` query parameter on non-OAuth calls.
	pub api_key: TokenSecret,
	/// Application identifier substituted for `:applicationID` in paths.
	pub application_id: String,
	/// User identifier sent as the `userId` query parameter when set.
	pub user_id: Option<String>,
	/// OAuth client identifier.
	pub client_id: Option<String>,
	/// OAuth client secret.
	pub client_secret: Option<TokenSecret>,
	/// Long-lived OAuth refresh token.
	pub oauth_refresh_token: Option<TokenSecret>,
	/// OAuth token endpoint.
	pub oauth_token_url: Url,
	/// Emits SDK log events when true.
	pub logging: bool,
	/// Serves endpoint fixtures instead of calling the API when a fixture exists.
	pub test_mode: bool,
}
impl Config {
	/// Loads the configuration from process environment variables.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Loads the configuration from an env file, letting process variables take precedence.
	///
	/// The process environment itself is left untouched.
	pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let mut values = BTreeMap::new();

		for item in dotenvy::from_path_iter(path.as_ref())? {
			let (key, value) = item?;

			values.insert(key, value);
		}

		Self::from_lookup(|key| std::env::var(key).ok().or_else(|| values.get(key).cloned()))
	}

	/// Builds the configuration from an arbitrary key lookup.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let get = |key: &str| {
			lookup(key).map(|value| value.trim().to_owned()).filter(|value| !value.is_empty())
		};
		let environment = Environment::parse(&get(ENV).unwrap_or_default());
		let root_url = get(ROOT_URL)
			.map(|value| value.to_ascii_lowercase())
			.unwrap_or_else(|| DEFAULT_ROOT_URL.into());
		let root_url = parse_url("root URL", &root_url)?;
		let oauth_token_url = parse_url(
			"OAuth token URL",
			&get(OAUTH_TOKEN_URL).unwrap_or_else(|| DEFAULT_OAUTH_TOKEN_URL.into()),
		)?;
		let application_id = get(APPLICATION_ID).unwrap_or_else(|| TEST_APPLICATION_ID.into());
		let logging = get(LOGGING).and_then(|value| parse_flag(&value)).unwrap_or(true);
		let test_mode = get(TEST_MODE)
			.and_then(|value| parse_flag(&value))
			.unwrap_or(application_id == TEST_APPLICATION_ID);

		Ok(Self {
			environment,
			root_url: with_trailing_slash(root_url),
			api_key: TokenSecret::new(get(API_KEY).unwrap_or_else(|| "demo".into())),
			application_id,
			user_id: Some(get(USER_ID).unwrap_or_else(|| "test".into())),
			client_id: get(CLIENT_ID),
			client_secret: get(CLIENT_SECRET).map(TokenSecret::new),
			oauth_refresh_token: get(OAUTH_REFRESH_TOKEN).map(TokenSecret::new),
			oauth_token_url,
			logging,
			test_mode,
		})
	}

	/// Overrides the API root; a trailing `/` is appended when missing.
	pub fn with_root_url(mut self, url: Url) -> Self {
		self.root_url = with_trailing_slash(url);

		self
	}

	/// Overrides the API key.
	pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
		self.api_key = TokenSecret::new(api_key);

		self
	}

	/// Overrides the application identifier.
	pub fn with_application_id(mut self, application_id: impl Into<String>) -> Self {
		self.application_id = application_id.into();

		self
	}

	/// Overrides (or clears) the user identifier.
	pub fn with_user_id(mut self, user_id: Option<String>) -> Self {
		self.user_id = user_id;

		self
	}

	/// Sets the OAuth client credentials.
	pub fn with_oauth_client(
		mut self,
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) -> Self {
		self.client_id = Some(client_id.into());
		self.client_secret = Some(TokenSecret::new(client_secret));

		self
	}

	/// Sets the OAuth refresh token.
	pub fn with_oauth_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
		self.oauth_refresh_token = Some(TokenSecret::new(refresh_token));

		self
	}

	/// Overrides the OAuth token endpoint.
	pub fn with_oauth_token_url(mut self, url: Url) -> Self {
		self.oauth_token_url = url;

		self
	}

	/// Toggles SDK log events.
	pub fn with_logging(mut self, logging: bool) -> Self {
		self.logging = logging;

		self
	}

	/// Toggles fixture responses for endpoints that define one.
	pub fn with_test_mode(mut self, test_mode: bool) -> Self {
		self.test_mode = test_mode;

		self
	}

	/// Returns `true` when an OAuth refresh token is configured.
	pub fn has_refresh_token(&self) -> bool {
		self.oauth_refresh_token.as_ref().is_some_and(|token| !token.expose().is_empty())
	}
}

fn parse_url(setting: &'static str, value: &str) -> Result<Url, ConfigError> {
	Url::parse(value).map_err(|source| ConfigError::InvalidUrl {
		setting,
		value: value.to_owned(),
		source,
	})
}

fn with_trailing_slash(mut url: Url) -> Url {
	if !url.path().ends_with('/') {
		let path = format!("{}/", url.path());

		url.set_path(&path);
	}

	url
}

fn parse_flag(value: &str) -> Option<bool> {
	match value.to_ascii_lowercase().as_str() {
		"1" | "true" | "yes" | "on" => Some(true),
		"0" | "false" | "no" | "off" => Some(false),
		_ => None,
	}
}
