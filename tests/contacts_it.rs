#![cfg(feature = "reqwest")]

mod common;

// crates.io
use httpmock::prelude::*;
// self
use hubspot_sdk::{
	SystemCode,
	resources::{Contact, ContactProperty},
	serde_json::json,
};

const CREATE_PATH: &str = "/contacts/v1/contact/createOrUpdate/email/a@b.com";

#[tokio::test]
async fn create_or_update_sets_vid_and_is_idempotent() {
	let server = MockServer::start_async().await;
	let client = common::http_client(&server, common::config());
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path(CREATE_PATH)
				.query_param("hapikey", common::API_KEY)
				.query_param("userId", common::USER_ID)
				.json_body(json!({
					"properties": [
						{ "property": "email", "value": "a@b.com" },
						{ "property": "firstname", "value": "Kevin" }
					]
				}));
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"vid\":51,\"isNew\":false}");
		})
		.await;
	let mut first = Contact { first_name: "Kevin".into(), ..Contact::new("a@b.com") };
	let mut second = first.clone();

	client.create_or_update_contact(&mut first).await.expect("First create should succeed.");
	client.create_or_update_contact(&mut second).await.expect("Second create should succeed.");

	mock.assert_calls_async(2).await;

	assert_eq!(first.vid, 51);
	assert_eq!(first.vid, second.vid);
}

#[tokio::test]
async fn create_requires_an_email() {
	let (client, transport) = common::fixture_client(common::config());
	let mut contact = Contact { first_name: "Kevin".into(), ..Default::default() };
	let err = client
		.create_or_update_contact(&mut contact)
		.await
		.expect_err("Contacts without email should be rejected.");

	assert_eq!(err.http_status, 400);
	assert_eq!(err.system_code, SystemCode::ContactNoEmail);
	assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn create_failures_are_remapped() {
	let server = MockServer::start_async().await;
	let client = common::http_client(&server, common::config());
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(CREATE_PATH);
			then.status(400)
				.header("content-type", "application/json")
				.body("{\"status\":\"error\",\"message\":\"Property values were not valid\"}");
		})
		.await;
	let mut contact = Contact {
		additional_properties: vec![ContactProperty::new("bogus", "x")],
		..Contact::new("a@b.com")
	};
	let err = client
		.create_or_update_contact(&mut contact)
		.await
		.expect_err("Rejected creates should fail.");

	mock.assert_async().await;

	assert_eq!(err.http_status, 400);
	assert_eq!(err.system_code, SystemCode::ContactCouldNotBeCreated);
	assert_eq!(err.message, "Property values were not valid");
	assert_eq!(contact.vid, 0);
}

#[tokio::test]
async fn get_by_email_decodes_profile_properties() {
	let server = MockServer::start_async().await;
	let client = common::http_client(&server, common::config());
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/contacts/v1/contact/email/a@b.com/profile");
			then.status(200).header("content-type", "application/json").body(
				"{\"vid\":51,\"properties\":{\"email\":{\"value\":\"a@b.com\"},\"firstname\":{\"value\":\"Kevin\"},\"city\":{\"value\":\"Austin\"},\"hs_lead_status\":{\"value\":\"NEW\"}}}",
			);
		})
		.await;
	let contact = client.get_contact_by_email("a@b.com").await.expect("Lookup should succeed.");

	mock.assert_async().await;

	assert_eq!(contact.vid, 51);
	assert_eq!(contact.email, "a@b.com");
	assert_eq!(contact.first_name, "Kevin");
	assert_eq!(contact.city, "Austin");
	assert!(contact.additional_properties.is_empty());
}

#[tokio::test]
async fn get_by_email_maps_missing_contacts_and_bad_input() {
	let server = MockServer::start_async().await;
	let client = common::http_client(&server, common::config());
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/contacts/v1/contact/email/nobody@b.com/profile");
			then.status(404)
				.header("content-type", "application/json")
				.body("{\"status\":\"error\",\"message\":\"contact does not exist\"}");
		})
		.await;
	let err = client
		.get_contact_by_email("nobody@b.com")
		.await
		.expect_err("Missing contacts should fail.");

	mock.assert_async().await;

	assert_eq!(err.http_status, 404);
	assert_eq!(err.system_code, SystemCode::ContactNotFound);

	let err =
		client.get_contact_by_email("not-an-email").await.expect_err("Bad emails should fail.");

	assert_eq!(err.system_code, SystemCode::ContactNoEmail);
}

#[tokio::test]
async fn get_by_email_reports_unexpected_shapes() {
	let server = MockServer::start_async().await;
	let client = common::http_client(&server, common::config());
	let _mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/contacts/v1/contact/email/a@b.com/profile");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"vid\":51,\"properties\":[]}");
		})
		.await;
	let err = client
		.get_contact_by_email("a@b.com")
		.await
		.expect_err("Unexpected profile shapes should fail.");

	assert_eq!(err.http_status, 200);
	assert_eq!(err.system_code, SystemCode::ResponseDecode);
}

#[tokio::test]
async fn delete_validates_vid_and_maps_errors() {
	let server = MockServer::start_async().await;
	let client = common::http_client(&server, common::config());
	let err = client.delete_contact_by_vid(0).await.expect_err("VID 0 should be rejected.");

	assert_eq!(err.http_status, 400);
	assert_eq!(err.system_code, SystemCode::ContactVidZero);

	let missing = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/contacts/v1/contact/vid/404");
			then.status(404)
				.header("content-type", "application/json")
				.body("{\"message\":\"resource not found\"}");
		})
		.await;
	let broken = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/contacts/v1/contact/vid/500");
			then.status(500).body("oops");
		})
		.await;
	let deleted = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/contacts/v1/contact/vid/51");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"vid\":51,\"deleted\":true,\"reason\":\"OK\"}");
		})
		.await;
	let err = client.delete_contact_by_vid(404).await.expect_err("404 deletes should fail.");

	assert_eq!(err.system_code, SystemCode::ContactNotFound);

	let err = client.delete_contact_by_vid(500).await.expect_err("500 deletes should fail.");

	assert_eq!(err.http_status, 500);
	assert_eq!(err.system_code, SystemCode::ContactCouldNotBeDeleted);

	client.delete_contact_by_vid(51).await.expect("Delete should succeed.");

	missing.assert_async().await;
	broken.assert_async().await;
	deleted.assert_async().await;
}
