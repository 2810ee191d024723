#![cfg(feature = "reqwest")]

mod common;

// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
use serde_json::{Value, json};
// self
use common::*;
use social_api_client::{
	ReqwestApiClient, api::Page, config::ClientConfig, error::Error, http::RequestOptions,
	store::MemoryStore,
};

#[tokio::test]
async fn request_attaches_bearer_and_keeps_caller_headers() {
	let server = MockServer::start_async().await;
	let (client, store) = build_client(&server);

	seed_tokens(&store, "access-1", "refresh-1").await;

	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path(api_path("/threads"))
				.header("authorization", "Bearer access-1")
				.header("content-type", "text/plain")
				.header("accept", "application/json")
				.header("x-trace", "abc");
			then.status(200).json_body(json!({ "id": 5 }));
		})
		.await;
	let options = RequestOptions::post()
		.header("Content-Type", "text/plain")
		.and_then(|options| options.header("X-Trace", "abc"))
		.expect("Caller headers should be valid.");
	let body = client
		.request::<Value>("/threads", options)
		.await
		.expect("Authenticated request should succeed.");

	mock.assert_calls_async(1).await;

	assert_eq!(body, Some(json!({ "id": 5 })));
}

#[tokio::test]
async fn request_without_token_sends_no_authorization() {
	let server = MockServer::start_async().await;
	let (client, _store) = build_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path(api_path("/users/health"))
				.header_missing("authorization")
				.header("content-type", "application/json");
			then.status(200).json_body(json!({ "status": "SERVING" }));
		})
		.await;
	let body = client.health().await.expect("Health check should succeed.");

	mock.assert_calls_async(1).await;

	assert_eq!(body["status"], "SERVING");
}

#[tokio::test]
async fn no_content_resolves_to_none() {
	let server = MockServer::start_async().await;
	let (client, store) = build_client(&server);

	seed_tokens(&store, "access-1", "refresh-1").await;

	let mock = server
		.mock_async(|when, then| {
			when.method(DELETE).path(api_path("/threads/9"));
			then.status(204);
		})
		.await;
	let body = client
		.request::<Value>("/threads/9", RequestOptions::delete())
		.await
		.expect("No-content response should succeed.");

	mock.assert_calls_async(1).await;

	assert_eq!(body, None);

	server
		.mock_async(|when, then| {
			when.method(POST).path(api_path("/threads/9/like"));
			then.status(204);
		})
		.await;

	let liked = client.like_thread(9).await.expect("Like should succeed.");

	assert_eq!(liked, Value::Null);
}

#[tokio::test]
async fn text_error_bodies_are_appended_to_the_message() {
	let server = MockServer::start_async().await;
	let (client, _store) = build_client(&server);

	server
		.mock_async(|when, then| {
			when.method(GET).path(api_path("/threads/feed"));
			then.status(500).header("content-type", "text/plain").body("internal failure");
		})
		.await;

	let err = client
		.request::<Value>("/threads/feed", RequestOptions::get())
		.await
		.expect_err("Server failure should surface as an error.");

	assert!(matches!(err, Error::Api(_)));
	assert_eq!(err.to_string(), "API request failed with status 500: internal failure");
	assert_eq!(err.status_code(), Some(500));
	assert_eq!(err.details(), None);
}

#[tokio::test]
async fn json_error_bodies_prefer_error_then_message() {
	let server = MockServer::start_async().await;
	let (client, _store) = build_client(&server);

	server
		.mock_async(|when, then| {
			when.method(GET).path(api_path("/threads/1"));
			then.status(404).json_body(json!({ "error": "Thread not found", "message": "ignored" }));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path(api_path("/threads/2"));
			then.status(409).json_body(json!({ "message": "Already liked" }));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path(api_path("/threads/3"));
			then.status(400).json_body(json!({ "code": 7 }));
		})
		.await;

	let not_found = client.thread(1).await.expect_err("404 should fail.");

	assert_eq!(not_found.to_string(), "Thread not found");
	assert_eq!(not_found.status_code(), Some(404));
	assert_eq!(not_found.details().map(|d| d["message"].clone()), Some(json!("ignored")));

	let conflict = client.thread(2).await.expect_err("409 should fail.");

	assert_eq!(conflict.to_string(), "Already liked");

	let bare = client.thread(3).await.expect_err("400 should fail.");

	assert_eq!(bare.to_string(), "API request failed with status 400");
	assert_eq!(bare.details(), Some(&json!({ "code": 7 })));
}

#[tokio::test]
async fn success_bodies_are_not_scanned_for_errors() {
	let server = MockServer::start_async().await;
	let (client, _store) = build_client(&server);

	server
		.mock_async(|when, then| {
			when.method(GET).path(api_path("/threads/4"));
			then.status(200).json_body(json!({ "error": "not really", "id": 4 }));
		})
		.await;

	let body = client.thread(4).await.expect("2xx should succeed regardless of fields.");

	assert_eq!(body["error"], "not really");
}

#[tokio::test]
async fn malformed_success_body_is_a_parse_error() {
	let server = MockServer::start_async().await;
	let (client, _store) = build_client(&server);

	server
		.mock_async(|when, then| {
			when.method(GET).path(api_path("/notifications/unread_count"));
			then.status(200).header("content-type", "application/json").body("{not json");
		})
		.await;

	let err = client
		.unread_notification_count()
		.await
		.expect_err("Malformed body should fail to decode.");

	assert!(matches!(err, Error::Parse(_)));
	assert_eq!(err.to_string(), "Failed to parse successful API response.");
	assert_eq!(err.status_code(), Some(200));
}

#[tokio::test]
async fn identical_calls_are_independent() {
	let server = MockServer::start_async().await;
	let (client, store) = build_client(&server);

	seed_tokens(&store, "access-1", "refresh-1").await;

	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path(api_path("/notifications/unread_count"));
			then.status(200).json_body(json!({ "count": 3 }));
		})
		.await;
	let (first, second) =
		tokio::join!(client.unread_notification_count(), client.unread_notification_count());

	mock.assert_calls_async(2).await;

	assert_eq!(first.expect("First call should succeed.").count, 3);
	assert_eq!(second.expect("Second call should succeed.").count, 3);
}

#[tokio::test]
async fn list_endpoints_send_page_queries() {
	let server = MockServer::start_async().await;
	let (client, _store) = build_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path(api_path("/profiles/ada/followers"))
				.query_param("page", "2")
				.query_param("limit", "5");
			then.status(200).json_body(json!({ "users": [] }));
		})
		.await;
	let body = client
		.followers("ada", Page::new(2, 5))
		.await
		.expect("Followers request should succeed.");

	mock.assert_calls_async(1).await;

	assert_eq!(body, json!({ "users": [] }));
}

#[tokio::test]
async fn unreachable_gateway_is_a_network_error() {
	let config = ClientConfig::new("http://127.0.0.1:1/api/v1")
		.expect("Loopback base URL should parse successfully.");
	let client = ReqwestApiClient::new(Arc::new(MemoryStore::default()), config);
	let err = client.health().await.expect_err("Connection should be refused.");

	assert!(matches!(err, Error::Transport(_)));
	assert_eq!(err.to_string(), "Network error occurred while fetching data.");
	assert_eq!(err.status_code(), None);
}
