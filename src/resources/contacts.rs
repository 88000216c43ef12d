//! Contacts: create-or-update by email, fetch by email, delete by VID.

// self
use crate::{
	_prelude::*,
	client::{Client, NO_PAYLOAD},
	endpoint::Endpoint,
	http::Transport,
};

/// Property names of the declared [`Contact`] fields, in the order they are sent.
pub const CONTACT_FIELDS: [&str; 10] = [
	"email",
	"firstname",
	"lastname",
	"website",
	"company",
	"phone",
	"address",
	"city",
	"state",
	"zip",
];

/// One `{property, value}` pair in HubSpot's contact property list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactProperty {
	/// Property name.
	pub property: String,
	/// Property value.
	pub value: String,
}
impl ContactProperty {
	/// Creates a property pair.
	pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
		Self { property: property.into(), value: value.into() }
	}
}

/// A HubSpot contact.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Contact {
	/// HubSpot contact id; `0` until the contact has been created or fetched.
	pub vid: i64,
	/// Email address, required for create and fetch.
	pub email: String,
	/// `firstname` property.
	pub first_name: String,
	/// `lastname` property.
	pub last_name: String,
	/// `website` property.
	pub website: String,
	/// `company` property.
	pub company: String,
	/// `phone` property.
	pub phone: String,
	/// `address` property.
	pub address: String,
	/// `city` property.
	pub city: String,
	/// `state` property.
	pub state: String,
	/// `zip` property.
	pub zip: String,
	/// Properties beyond the declared fields, sent after them.
	pub additional_properties: Vec<ContactProperty>,
}
impl Contact {
	/// Creates a contact with only an email address.
	pub fn new(email: impl Into<String>) -> Self {
		Self { email: email.into(), ..Default::default() }
	}

	/// Returns the declared fields paired with their property names.
	pub fn fields(&self) -> [(&'static str, &str); 10] {
		[
			("email", self.email.as_str()),
			("firstname", self.first_name.as_str()),
			("lastname", self.last_name.as_str()),
			("website", self.website.as_str()),
			("company", self.company.as_str()),
			("phone", self.phone.as_str()),
			("address", self.address.as_str()),
			("city", self.city.as_str()),
			("state", self.state.as_str()),
			("zip", self.zip.as_str()),
		]
	}

	fn field_mut(&mut self, property: &str) -> Option<&mut String> {
		match property {
			"email" => Some(&mut self.email),
			"firstname" => Some(&mut self.first_name),
			"lastname" => Some(&mut self.last_name),
			"website" => Some(&mut self.website),
			"company" => Some(&mut self.company),
			"phone" => Some(&mut self.phone),
			"address" => Some(&mut self.address),
			"city" => Some(&mut self.city),
			"state" => Some(&mut self.state),
			"zip" => Some(&mut self.zip),
			_ => None,
		}
	}

	/// Flattens the contact into HubSpot's property list.
	///
	/// Declared fields come first in [`CONTACT_FIELDS`] order and only when non-empty; the
	/// additional properties follow unchanged.
	pub fn to_properties(&self) -> Vec<ContactProperty> {
		self.fields()
			.into_iter()
			.filter(|(_, value)| !value.is_empty())
			.map(|(property, value)| ContactProperty::new(property, value))
			.chain(self.additional_properties.iter().cloned())
			.collect()
	}

	/// Builds a contact from a contact profile body.
	///
	/// Known properties fill the declared fields; other properties are ignored. A `vid`
	/// missing from the body leaves the contact at `0`.
	pub fn from_profile(body: &Value) -> Result<Self, ProfileError> {
		let profile = serde_path_to_error::deserialize::<_, ContactProfile>(body)?;
		let mut contact = Contact { vid: profile.vid, ..Default::default() };

		for (name, property) in profile.properties {
			let Some(field) = contact.field_mut(&name) else {
				continue;
			};

			match property.value {
				Value::String(value) => *field = value,
				Value::Null => (),
				_ => return Err(ProfileError::NonStringProperty { property: name }),
			}
		}

		Ok(contact)
	}
}

/// Failures raised while decoding a contact profile.
#[derive(Debug, ThisError)]
pub enum ProfileError {
	/// The body does not have the profile shape.
	#[error("Contact profile has an unexpected shape: {0}.")]
	Shape(#[from] serde_path_to_error::Error<serde_json::Error>),
	/// A declared property carried a non-string value.
	#[error("Contact property {property} is not a string.")]
	NonStringProperty {
		/// Property name.
		property: String,
	},
}

#[derive(Debug, Deserialize)]
struct ContactProfile {
	#[serde(default)]
	vid: i64,
	#[serde(default)]
	properties: BTreeMap<String, ProfileProperty>,
}

#[derive(Debug, Deserialize)]
struct ProfileProperty {
	#[serde(default)]
	value: Value,
}

#[derive(Serialize)]
struct PropertiesPayload {
	properties: Vec<ContactProperty>,
}

impl<T> Client<T>
where
	T: ?Sized + Transport,
{
	/// Creates the contact, or updates the existing contact with the same email, and
	/// stores the returned VID on `contact`.
	pub async fn create_or_update_contact(&self, contact: &mut Contact) -> Result<()> {
		if contact.email.is_empty() {
			return Err(ApiError::bad_request(
				SystemCode::ContactNoEmail,
				"you must provide an email for a contact",
			));
		}

		let payload = PropertiesPayload { properties: contact.to_properties() };
		let result = self
			.call(Endpoint::CreateContact, &[(":email", contact.email.as_str())], Some(&payload))
			.await
			.map_err(|err| err.with_system_code(SystemCode::ContactCouldNotBeCreated))?;

		if let Some(vid) = result.i64_field("vid") {
			contact.vid = vid;
		}

		Ok(())
	}

	/// Fetches the contact with the given email.
	pub async fn get_contact_by_email(&self, email: &str) -> Result<Contact> {
		if email.is_empty() || !email.contains('@') {
			return Err(ApiError::bad_request(
				SystemCode::ContactNoEmail,
				"you must specify an email address for that contact",
			));
		}

		let result =
			self.call(Endpoint::GetContact, &[(":email", email)], NO_PAYLOAD).await.map_err(
				|err| {
					let code = if err.is_not_found() {
						SystemCode::ContactNotFound
					} else {
						SystemCode::GeneralError
					};

					err.with_system_code(code)
				},
			)?;

		Contact::from_profile(&result.body).map_err(|err| ApiError::decode(result.http_status, err))
	}

	/// Deletes the contact with the given VID.
	pub async fn delete_contact_by_vid(&self, vid: i64) -> Result<()> {
		if vid == 0 {
			return Err(ApiError::bad_request(
				SystemCode::ContactVidZero,
				SystemCode::ContactVidZero.description(),
			));
		}

		let vid = vid.to_string();

		self.call(Endpoint::DeleteContact, &[(":vid", vid.as_str())], NO_PAYLOAD).await.map_err(
			|err| {
				let code = if err.is_not_found() {
					SystemCode::ContactNotFound
				} else {
					SystemCode::ContactCouldNotBeDeleted
				};

				err.with_system_code(code)
			},
		)?;

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn properties_skip_empty_fields_and_keep_order() {
		let contact = Contact {
			email: "a@b.com".into(),
			first_name: "Kevin".into(),
			zip: "12345".into(),
			additional_properties: vec![ContactProperty::new("lifecyclestage", "lead")],
			..Default::default()
		};

		assert_eq!(contact.fields().map(|(property, _)| property), CONTACT_FIELDS);
		assert_eq!(
			contact.to_properties(),
			vec![
				ContactProperty::new("email", "a@b.com"),
				ContactProperty::new("firstname", "Kevin"),
				ContactProperty::new("zip", "12345"),
				ContactProperty::new("lifecyclestage", "lead"),
			]
		);
	}

	#[test]
	fn provider_echo_round_trips_declared_fields() {
		let contact = Contact {
			vid: 51,
			email: "a@b.com".into(),
			first_name: "Kevin".into(),
			..Default::default()
		};
		let properties = contact
			.to_properties()
			.into_iter()
			.map(|property| (property.property, serde_json::json!({ "value": property.value })))
			.collect::<serde_json::Map<_, _>>();
		let echo = serde_json::json!({ "vid": 51, "properties": properties });
		let decoded = Contact::from_profile(&echo).expect("Echoed profile should decode.");

		assert_eq!(decoded, contact);
	}

	#[test]
	fn profile_decoding_ignores_unknown_properties() {
		let body = serde_json::json!({
			"vid": 3,
			"properties": {
				"email": { "value": "x@y.z" },
				"hs_analytics_num_visits": { "value": 4 },
				"city": { "value": null }
			}
		});
		let contact = Contact::from_profile(&body).expect("Profile should decode.");

		assert_eq!(contact.vid, 3);
		assert_eq!(contact.email, "x@y.z");
		assert!(contact.city.is_empty());
	}

	#[test]
	fn profile_decoding_reports_bad_shapes() {
		let err = Contact::from_profile(&serde_json::json!({ "vid": "3" }))
			.expect_err("String VIDs should be rejected.");

		assert!(matches!(err, ProfileError::Shape(_)));

		let err = Contact::from_profile(&serde_json::json!({
			"properties": { "firstname": { "value": 1 } }
		}))
		.expect_err("Non-string declared properties should be rejected.");

		assert!(matches!(
			err,
			ProfileError::NonStringProperty { ref property } if property == "firstname"
		));
	}
}
