#![allow(dead_code)]

// std
use std::sync::Arc;
// crates.io
use httpmock::MockServer;
// self
use social_api_client::{
	ReqwestApiClient,
	auth::TokenPair,
	config::ClientConfig,
	store::{MemoryStore, TokenKey, TokenStore},
};

/// Gateway prefix every mock path lives under.
pub const API_PREFIX: &str = "/api/v1";

/// Full mock path for a gateway endpoint.
pub fn api_path(endpoint: &str) -> String {
	format!("{API_PREFIX}{endpoint}")
}

/// Builds a reqwest-backed client pointed at the mock server, plus the shared store.
pub fn build_client(server: &MockServer) -> (ReqwestApiClient, MemoryStore) {
	let store = MemoryStore::default();
	let config = ClientConfig::new(server.url(API_PREFIX))
		.expect("Mock server base URL should parse successfully.");
	let client = ReqwestApiClient::new(Arc::new(store.clone()), config);

	(client, store)
}

/// Seeds both credentials into the store.
pub async fn seed_tokens(store: &MemoryStore, access: &str, refresh: &str) {
	let store: &dyn TokenStore = store;

	store
		.save_pair(&TokenPair::new(access, refresh))
		.await
		.expect("Seeding the token store should succeed.");
}

/// Reads one credential from the store as a plain string.
pub async fn stored(store: &MemoryStore, key: TokenKey) -> Option<String> {
	store
		.get(key)
		.await
		.expect("Token store read should succeed.")
		.map(|secret| secret.expose().to_owned())
}
