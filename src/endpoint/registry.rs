// self
use crate::{
	_prelude::*,
	endpoint::{Endpoint, EndpointDescriptor},
};

/// Name-keyed set of endpoint descriptors.
///
/// [`EndpointRegistry::default`] holds every built-in [`Endpoint`]. Custom descriptors can
/// be added before the registry is handed to a [`Client`](crate::Client); after that it is
/// shared immutably.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointRegistry {
	descriptors: BTreeMap<String, EndpointDescriptor>,
}
impl EndpointRegistry {
	/// Creates a registry without any endpoints.
	pub fn empty() -> Self {
		Self { descriptors: BTreeMap::new() }
	}

	/// Adds or replaces a descriptor, returning the one it replaced.
	pub fn register(&mut self, descriptor: EndpointDescriptor) -> Option<EndpointDescriptor> {
		self.descriptors.insert(descriptor.name.clone(), descriptor)
	}

	/// Chaining variant of [`EndpointRegistry::register`].
	pub fn with(mut self, descriptor: EndpointDescriptor) -> Self {
		self.register(descriptor);

		self
	}

	/// Looks up a descriptor by exact name.
	pub fn get(&self, name: &str) -> Option<&EndpointDescriptor> {
		self.descriptors.get(name)
	}

	/// Looks up a descriptor, failing with `request_error_endpoint_not_found` (HTTP 400).
	pub fn resolve(&self, name: &str) -> Result<&EndpointDescriptor> {
		self.get(name).ok_or_else(|| {
			ApiError::bad_request(
				SystemCode::EndpointNotFound,
				format!("could not find endpoint {name}"),
			)
		})
	}

	/// Iterates over registered names in lexical order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.descriptors.keys().map(String::as_str)
	}

	/// Returns the number of registered endpoints.
	pub fn len(&self) -> usize {
		self.descriptors.len()
	}

	/// Returns `true` when nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.descriptors.is_empty()
	}
}
impl Default for EndpointRegistry {
	fn default() -> Self {
		Endpoint::ALL.into_iter().fold(Self::empty(), |registry, endpoint| {
			registry.with(endpoint.descriptor())
		})
	}
}
