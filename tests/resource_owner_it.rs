mod common;

// crates.io
use httpmock::prelude::*;
// self
use common::{CLIENT_SECRET, mock_client};
use oauth2_benevaut::{
	auth::{AccessToken, AppSecretProof},
	error::{Error, TransientError},
	provider::DEFAULT_FIELDS,
};

#[tokio::test]
async fn profile_fetch_is_signed_and_decoded() {
	let server = MockServer::start_async().await;
	let client = mock_client(&server, "v2.8", false);
	let proof = AppSecretProof::create(CLIENT_SECRET, "long-lived-token");
	let fields = DEFAULT_FIELDS.join(",");
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/v2.8/me")
				.query_param("fields", &fields)
				.query_param("access_token", "long-lived-token")
				.query_param("appsecret_proof", &proof);
			then.status(200).header("content-type", "application/json").body(
				r#"{
					"id": "12345",
					"name": "Mark Zuck",
					"first_name": "Mark",
					"last_name": "Zuck",
					"email": "mark@example.com",
					"hometown": { "id": "108", "name": "Paris" },
					"picture": { "data": { "url": "https://cdn.example.com/p.jpg", "is_silhouette": false } },
					"age_range": { "min": 21 }
				}"#,
			);
		})
		.await;
	let user = client
		.fetch_resource_owner(&AccessToken::new("long-lived-token"))
		.await
		.expect("Profile fetch should succeed.");

	mock.assert_async().await;

	assert_eq!(proof, "ef6fd622a2c2caf558b07b983a8a0e3c02da4dfb976c6f2de6007747dfde8104");
	assert_eq!(user.id().as_deref(), Some("12345"));
	assert_eq!(user.name(), Some("Mark Zuck"));
	assert_eq!(user.email(), Some("mark@example.com"));
	assert_eq!(
		user.hometown().and_then(|town| town.get("name")).and_then(|name| name.as_str()),
		Some("Paris")
	);
	assert_eq!(user.picture_url(), Some("https://cdn.example.com/p.jpg"));
	assert_eq!(user.is_default_picture(), Some(false));
	assert_eq!(user.min_age(), Some(21));
	assert_eq!(user.max_age(), None);
	assert_eq!(user.bio(), None);
}

#[tokio::test]
async fn legacy_versions_request_bio() {
	let server = MockServer::start_async().await;
	let client = mock_client(&server, "v2.7", false);
	let mut fields = DEFAULT_FIELDS.join(",");

	fields.push_str(",bio");

	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v2.7/me").query_param("fields", &fields);
			then.status(200)
				.header("content-type", "text/javascript; charset=UTF-8")
				.body(r#"{"id": 42, "bio": "Builder of things."}"#);
		})
		.await;
	let user = client
		.fetch_resource_owner(&AccessToken::new("token"))
		.await
		.expect("Profile fetch should succeed.");

	mock.assert_async().await;

	assert_eq!(user.id().as_deref(), Some("42"));
	assert_eq!(user.bio(), Some("Builder of things."));
}

#[tokio::test]
async fn profile_errors_carry_the_envelope() {
	let server = MockServer::start_async().await;
	let client = mock_client(&server, "v2.8", false);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v2.8/me");
			then.status(400).header("content-type", "application/json").body(
				r#"{"error":{"message":"Invalid appsecret_proof provided in the API argument","type":"GraphMethodException","code":100}}"#,
			);
		})
		.await;
	let err = client
		.fetch_resource_owner(&AccessToken::new("token"))
		.await
		.expect_err("Error envelopes must fail.");

	mock.assert_async().await;

	assert!(matches!(err, Error::Remote(ref remote) if remote.code() == 100));
	assert_eq!(
		err.to_string(),
		"GraphMethodException: Invalid appsecret_proof provided in the API argument"
	);
}

#[tokio::test]
async fn non_object_profiles_are_rejected() {
	let server = MockServer::start_async().await;
	let client = mock_client(&server, "v2.8", false);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v2.8/me");
			then.status(200).header("content-type", "application/json").body("[1,2,3]");
		})
		.await;
	let err = client
		.fetch_resource_owner(&AccessToken::new("token"))
		.await
		.expect_err("Array bodies must fail.");

	mock.assert_async().await;

	assert!(matches!(err, Error::Transient(TransientError::UnexpectedResponse { .. })));
}
