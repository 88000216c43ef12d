// self
use crate::{
	_prelude::*,
	endpoint::{EndpointDescriptor, MockResponse},
	http::HttpMethod,
};

/// Errors raised while constructing custom endpoint descriptors.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum EndpointDescriptorError {
	/// Descriptor names must be non-empty.
	#[error("Endpoint name must not be empty.")]
	EmptyName,
	/// An HTTP method is required.
	#[error("Endpoint {name} is missing an HTTP method.")]
	MissingMethod {
		/// Descriptor name.
		name: String,
	},
	/// Path templates are resolved against the API root and must be absolute.
	#[error("Endpoint path must start with '/': {path}.")]
	RelativePath {
		/// Offending template.
		path: String,
	},
	/// Mock statuses must be valid HTTP status codes.
	#[error("Mock status {status} is not a valid HTTP status.")]
	InvalidMockStatus {
		/// Offending status.
		status: u16,
	},
}

/// Builder for [`EndpointDescriptor`] values.
#[derive(Debug)]
pub struct EndpointDescriptorBuilder {
	/// Symbolic name of the descriptor being constructed.
	pub name: String,
	/// HTTP method.
	pub method: Option<HttpMethod>,
	/// Path template; defaults to `/`.
	pub path_template: String,
	/// Whether a bearer token is required.
	pub requires_oauth: bool,
	/// Optional canned response.
	pub mock: Option<MockResponse>,
}
impl EndpointDescriptorBuilder {
	/// Creates a new builder seeded with the provided name.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			method: None,
			path_template: "/".into(),
			requires_oauth: false,
			mock: None,
		}
	}

	/// Sets the HTTP method.
	pub fn method(mut self, method: HttpMethod) -> Self {
		self.method = Some(method);

		self
	}

	/// Sets the path template.
	pub fn path(mut self, path_template: impl Into<String>) -> Self {
		self.path_template = path_template.into();

		self
	}

	/// Marks the endpoint as requiring an OAuth bearer token.
	pub fn requires_oauth(mut self, requires_oauth: bool) -> Self {
		self.requires_oauth = requires_oauth;

		self
	}

	/// Attaches a canned response.
	pub fn mock(mut self, status: u16, body: Option<Value>) -> Self {
		self.mock = Some(MockResponse::new(status, body));

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<EndpointDescriptor, EndpointDescriptorError> {
		if self.name.trim().is_empty() {
			return Err(EndpointDescriptorError::EmptyName);
		}

		let method = self.method.ok_or(EndpointDescriptorError::MissingMethod {
			name: self.name.clone(),
		})?;

		if !self.path_template.starts_with('/') {
			return Err(EndpointDescriptorError::RelativePath { path: self.path_template });
		}
		if let Some(status) = self
			.mock
			.as_ref()
			.map(|mock| mock.status)
			.filter(|status| !(100..=599).contains(status))
		{
			return Err(EndpointDescriptorError::InvalidMockStatus { status });
		}

		Ok(EndpointDescriptor {
			name: self.name,
			method,
			path_template: self.path_template,
			requires_oauth: self.requires_oauth,
			mock: self.mock,
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn builds_valid_descriptors() {
		let descriptor = EndpointDescriptor::builder("endpointListForms")
			.method(HttpMethod::Get)
			.path("/forms/v2/forms")
			.mock(200, Some(serde_json::json!([])))
			.build()
			.expect("Valid descriptors should build.");

		assert_eq!(descriptor.name, "endpointListForms");
		assert_eq!(descriptor.method, HttpMethod::Get);
		assert!(!descriptor.requires_oauth);
		assert_eq!(descriptor.mock_body(), Some(&serde_json::json!([])));
	}

	#[test]
	fn rejects_invalid_descriptors() {
		assert_eq!(
			EndpointDescriptor::builder(" ").method(HttpMethod::Get).build(),
			Err(EndpointDescriptorError::EmptyName)
		);
		assert_eq!(
			EndpointDescriptor::builder("x").build(),
			Err(EndpointDescriptorError::MissingMethod { name: "x".into() })
		);
		assert_eq!(
			EndpointDescriptor::builder("x").method(HttpMethod::Get).path("forms").build(),
			Err(EndpointDescriptorError::RelativePath { path: "forms".into() })
		);
		assert_eq!(
			EndpointDescriptor::builder("x").method(HttpMethod::Get).mock(42, None).build(),
			Err(EndpointDescriptorError::InvalidMockStatus { status: 42 })
		);
	}
}
