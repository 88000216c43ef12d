#![allow(dead_code)]

// std
use std::sync::Arc;
// crates.io
use httpmock::MockServer;
// self
use hubspot_sdk::{Client, Config, http::FixtureTransport, url::Url};

pub const API_KEY: &str = "test-api-key";
pub const USER_ID: &str = "7";
pub const APPLICATION_ID: &str = "4242";

/// Live-mode configuration: fixtures are only served for OAuth endpoints without a
/// refresh token.
pub fn config() -> Config {
	Config::from_lookup(|_| None)
		.expect("Default configuration should load.")
		.with_api_key(API_KEY)
		.with_user_id(Some(USER_ID.into()))
		.with_application_id(APPLICATION_ID)
		.with_test_mode(false)
		.with_logging(false)
}

pub fn fixture_client(config: Config) -> (Client<FixtureTransport>, Arc<FixtureTransport>) {
	let transport = Arc::new(FixtureTransport::new());
	let client = <Client<FixtureTransport>>::with_transport(config, transport.clone());

	(client, transport)
}

#[cfg(feature = "reqwest")]
pub fn http_client(
	server: &MockServer,
	config: Config,
) -> Client<hubspot_sdk::http::ReqwestTransport> {
	let root = Url::parse(&server.base_url()).expect("Mock server URL should parse.");
	let token_url =
		Url::parse(&server.url("/oauth/v1/token")).expect("Mock token URL should parse.");

	Client::new(config.with_root_url(root).with_oauth_token_url(token_url))
		.expect("Reqwest client should build.")
}
