//! Declarative endpoint table.
//!
//! Each [`Endpoint`] maps a symbolic name to its HTTP method, path template, auth
//! requirement, and optional mock response. Path templates use `:name` tokens that the
//! dispatcher replaces literally; `:applicationID` is always filled from the config.

/// Builder API for custom endpoint descriptors.
pub mod builder;
/// Name-keyed registry consulted by the dispatcher.
pub mod registry;

pub use builder::*;
pub use registry::*;

// self
use crate::{
	_prelude::*,
	http::HttpMethod,
	resources::{DEFAULT_DETAIL_TEMPLATE, DEFAULT_HEADER_TEMPLATE},
};

/// Path token always replaced with the configured application identifier.
pub const APPLICATION_ID_TOKEN: &str = ":applicationID";

/// Built-in HubSpot endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
	/// Create or update a contact keyed by email.
	CreateContact,
	/// Fetch a contact profile by email.
	GetContact,
	/// Delete a contact by VID.
	DeleteContact,
	/// Create a timeline event type.
	CreateEventType,
	/// Delete a timeline event type.
	DeleteEventType,
	/// Create or update a timeline event.
	CreateEvent,
}
impl Endpoint {
	/// Every built-in endpoint.
	pub const ALL: [Endpoint; 6] = [
		Endpoint::CreateContact,
		Endpoint::GetContact,
		Endpoint::DeleteContact,
		Endpoint::CreateEventType,
		Endpoint::DeleteEventType,
		Endpoint::CreateEvent,
	];

	/// Returns the symbolic registry name.
	pub const fn name(self) -> &'static str {
		match self {
			Endpoint::CreateContact => "endpointCreateContact",
			Endpoint::GetContact => "endpointGetContact",
			Endpoint::DeleteContact => "endpointDeleteContact",
			Endpoint::CreateEventType => "endpointCreateEventType",
			Endpoint::DeleteEventType => "endpointDeleteEventType",
			Endpoint::CreateEvent => "endpointCreateEvent",
		}
	}

	/// Builds the descriptor for this endpoint.
	pub fn descriptor(self) -> EndpointDescriptor {
		let (method, path_template, requires_oauth, mock) = match self {
			Endpoint::CreateContact => (
				HttpMethod::Post,
				"/contacts/v1/contact/createOrUpdate/email/:email",
				false,
				None,
			),
			Endpoint::GetContact =>
				(HttpMethod::Get, "/contacts/v1/contact/email/:email/profile", false, None),
			Endpoint::DeleteContact =>
				(HttpMethod::Delete, "/contacts/v1/contact/vid/:vid", false, None),
			Endpoint::CreateEventType => (
				HttpMethod::Post,
				"/integrations/v1/:applicationID/timeline/event-types",
				false,
				Some(MockResponse::new(
					201,
					Some(serde_json::json!({
						"id": 123,
						"name": "Test Event Type",
						"headerTemplate": DEFAULT_HEADER_TEMPLATE,
						"detailTemplate": DEFAULT_DETAIL_TEMPLATE,
						"applicationId": 123,
						"objectType": "CONTACT"
					})),
				)),
			),
			Endpoint::DeleteEventType => (
				HttpMethod::Delete,
				"/integrations/v1/:applicationID/timeline/event-types/:eventTypeID",
				false,
				Some(MockResponse::new(204, Some(serde_json::json!({})))),
			),
			Endpoint::CreateEvent => (
				HttpMethod::Put,
				"/integrations/v1/:applicationID/timeline/event",
				true,
				Some(MockResponse::new(204, None)),
			),
		};

		EndpointDescriptor {
			name: self.name().into(),
			method,
			path_template: path_template.into(),
			requires_oauth,
			mock,
		}
	}
}
impl Display for Endpoint {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.name())
	}
}
impl FromStr for Endpoint {
	type Err = ApiError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Endpoint::ALL.into_iter().find(|endpoint| endpoint.name() == s).ok_or_else(|| {
			ApiError::bad_request(SystemCode::EndpointNotFound, format!("unknown endpoint {s}"))
		})
	}
}

/// Canned response served instead of a live call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockResponse {
	/// Status the live endpoint would answer with.
	pub status: u16,
	/// Body served by the mock; `None` for endpoints that answer without content.
	pub body: Option<Value>,
}
impl MockResponse {
	/// Creates a mock response.
	pub fn new(status: u16, body: Option<Value>) -> Self {
		Self { status, body }
	}
}

/// Immutable description of a callable endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointDescriptor {
	/// Symbolic name used for lookups.
	pub name: String,
	/// HTTP method.
	pub method: HttpMethod,
	/// Path relative to the API root, with `:token` placeholders.
	pub path_template: String,
	/// Whether the endpoint needs an OAuth bearer token.
	pub requires_oauth: bool,
	/// Optional canned response.
	pub mock: Option<MockResponse>,
}
impl EndpointDescriptor {
	/// Creates a new builder for the provided name.
	pub fn builder(name: impl Into<String>) -> EndpointDescriptorBuilder {
		EndpointDescriptorBuilder::new(name)
	}

	/// Returns the mock body, if the endpoint defines one.
	pub fn mock_body(&self) -> Option<&Value> {
		self.mock.as_ref().and_then(|mock| mock.body.as_ref())
	}

	/// Replaces every path parameter token, then `:applicationID`.
	///
	/// Tokens are replaced literally and repeatedly in the order given. Tokens that do not
	/// occur in the template are ignored, and template tokens without a parameter are left
	/// untouched.
	pub fn resolve_path(&self, path_params: &[(&str, &str)], application_id: &str) -> String {
		substitute(&self.path_template, path_params, application_id)
	}

	/// Resolves the template one `/`-separated segment at a time.
	///
	/// Substituted values never split or end a segment; the dispatcher percent-encodes each
	/// returned segment when it builds the URL.
	pub fn resolve_segments(
		&self,
		path_params: &[(&str, &str)],
		application_id: &str,
	) -> Vec<String> {
		self.path_template
			.split('/')
			.filter(|segment| !segment.is_empty())
			.map(|segment| substitute(segment, path_params, application_id))
			.collect()
	}
}

fn substitute(template: &str, path_params: &[(&str, &str)], application_id: &str) -> String {
	let mut path = template.to_owned();

	for (token, value) in path_params.iter().filter(|(token, _)| !token.is_empty()) {
		path = path.replace(token, value);
	}

	path.replace(APPLICATION_ID_TOKEN, application_id)
}
