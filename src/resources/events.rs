//! Timeline event types and timeline events.

// self
use crate::{
	_prelude::*,
	client::{Client, NO_PAYLOAD},
	endpoint::Endpoint,
	http::Transport,
};

/// Header template applied when an event type does not provide one.
pub const DEFAULT_HEADER_TEMPLATE: &str =
	"# Title for event {{id}}\nThis is an event for {{objectType}}";
/// Detail template applied when an event type does not provide one.
pub const DEFAULT_DETAIL_TEMPLATE: &str =
	"This event happened on {{#formatDate timestamp}}{{/formatDate}}";

/// Timeline event type. Templates use Handlebars syntax.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventType {
	/// HubSpot id; `0` until created.
	#[serde(skip_serializing_if = "is_zero")]
	pub id: i64,
	/// Display name.
	pub name: String,
	/// Timeline header template.
	pub header_template: String,
	/// Timeline detail template.
	pub detail_template: String,
	/// Owning application; always overwritten with the configured id on create.
	pub application_id: String,
	/// `CONTACT`, `COMPANY`, or `DEAL`.
	pub object_type: String,
}

/// Timeline event attached to a HubSpot object.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Event {
	/// Caller-chosen id; generated when empty. Reusing an id updates the event.
	pub id: String,
	/// Id of the object the event belongs to (the contact VID for contact events).
	pub object_id: i64,
	/// Id of the event type.
	pub event_type_id: i64,
	/// Values available to the event type templates.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub extra_data: Option<BTreeMap<String, String>>,
	/// Iframe opened from the timeline entry.
	#[serde(rename = "timelineIFrame", skip_serializing_if = "Option::is_none")]
	pub timeline_iframe: Option<EventIFrame>,
}

/// Iframe shown from a timeline event. HubSpot requires every field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventIFrame {
	/// Link text in the timeline entry.
	pub link_label: String,
	/// Title of the iframe dialog.
	pub iframe_label: String,
	/// Page loaded into the iframe.
	pub iframe_uri: String,
	/// Width in pixels.
	pub width: u32,
	/// Height in pixels.
	pub height: u32,
}

fn is_zero(value: &i64) -> bool {
	*value == 0
}

/// Builds an event id from random digits, the Unix timestamp, and the object id.
pub fn generate_event_id(object_id: i64) -> String {
	let random = rand::random::<u64>() >> 1;

	format!("{random}{}{object_id}", OffsetDateTime::now_utc().unix_timestamp())
}

impl<T> Client<T>
where
	T: ?Sized + Transport,
{
	/// Creates a timeline event type for the configured application and stores the
	/// returned id on `event_type`.
	///
	/// The object type is upper-cased and empty templates get the default templates
	/// before the call.
	pub async fn create_event_type(&self, event_type: &mut EventType) -> Result<()> {
		event_type.application_id = self.config.application_id.clone();

		if event_type.name.is_empty()
			|| event_type.object_type.is_empty()
			|| event_type.application_id.is_empty()
		{
			return Err(ApiError::bad_request(
				SystemCode::EventTypeMissingData,
				"name, applicationID, and objectType are all required",
			));
		}

		event_type.object_type = event_type.object_type.to_uppercase();

		if event_type.header_template.is_empty() {
			event_type.header_template = DEFAULT_HEADER_TEMPLATE.into();
		}
		if event_type.detail_template.is_empty() {
			event_type.detail_template = DEFAULT_DETAIL_TEMPLATE.into();
		}

		let result = self
			.call(Endpoint::CreateEventType, &[], Some(&*event_type))
			.await
			.map_err(|err| err.with_system_code(SystemCode::EventTypeCouldNotBeCreated))?;

		if let Some(id) = result.i64_field("id") {
			event_type.id = id;
		}

		Ok(())
	}

	/// Deletes the event type with the given id.
	pub async fn delete_event_type(&self, event_type_id: i64) -> Result<()> {
		if event_type_id == 0 {
			return Err(ApiError::bad_request(
				SystemCode::EventTypeMissingData,
				"an event type id is required",
			));
		}

		let event_type_id = event_type_id.to_string();

		self.call(
			Endpoint::DeleteEventType,
			&[(":eventTypeID", event_type_id.as_str())],
			NO_PAYLOAD,
		)
		.await
		.map_err(|err| err.with_system_code(SystemCode::EventTypeCouldNotBeDeleted))?;

		Ok(())
	}

	/// Creates or updates a timeline event, generating its id when empty.
	pub async fn create_or_update_event(&self, event: &mut Event) -> Result<()> {
		if event.object_id == 0 || event.event_type_id == 0 {
			return Err(ApiError::bad_request(
				SystemCode::EventMissingData,
				"objectID and eventTypeID are required",
			));
		}
		if event.id.is_empty() {
			event.id = generate_event_id(event.object_id);
		}

		self.call(Endpoint::CreateEvent, &[], Some(&*event))
			.await
			.map_err(|err| err.with_system_code(SystemCode::EventCouldNotBeCreated))?;

		Ok(())
	}
}
