//! Token Store contract and built-in store implementations.
//!
//! The store is a small key-value surface over the two credentials the client cares about.
//! Requests read the access token, the refresh path replaces both halves after a successful
//! exchange, and a failed refresh removes both.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{
	_prelude::*,
	auth::{TokenPair, TokenSecret},
};

/// Boxed future returned by [`TokenStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Storage backend contract implemented by token stores.
pub trait TokenStore
where
	Self: Send + Sync,
{
	/// Fetches the secret stored under `key`, if present.
	fn get(&self, key: TokenKey) -> StoreFuture<'_, Option<TokenSecret>>;

	/// Persists or replaces the secret stored under `key`.
	fn set(&self, key: TokenKey, value: TokenSecret) -> StoreFuture<'_, ()>;

	/// Removes the secret stored under `key`; missing keys are not an error.
	fn remove(&self, key: TokenKey) -> StoreFuture<'_, ()>;
}
impl dyn TokenStore + '_ {
	/// Reads the current access token; an empty value counts as absent.
	pub async fn load_access_token(&self) -> Result<Option<TokenSecret>, StoreError> {
		self.load_present(TokenKey::AccessToken).await
	}

	/// Reads the current refresh token; an empty value counts as absent.
	pub async fn load_refresh_token(&self) -> Result<Option<TokenSecret>, StoreError> {
		self.load_present(TokenKey::RefreshToken).await
	}

	async fn load_present(&self, key: TokenKey) -> Result<Option<TokenSecret>, StoreError> {
		Ok(self.get(key).await?.filter(|secret| !secret.is_empty()))
	}

	/// Replaces both stored credentials with `pair`.
	///
	/// When the refresh token cannot be written the previous access token is restored, so the
	/// store never holds halves of two different pairs. If the rollback fails as well, both keys
	/// are removed. The original write error is returned either way.
	pub async fn save_pair(&self, pair: &TokenPair) -> Result<(), StoreError> {
		let previous = self.get(TokenKey::AccessToken).await?;

		self.set(TokenKey::AccessToken, pair.access_token.clone()).await?;

		let Err(e) = self.set(TokenKey::RefreshToken, pair.refresh_token.clone()).await else {
			return Ok(());
		};
		let rollback = match previous {
			Some(secret) => self.set(TokenKey::AccessToken, secret).await,
			None => self.remove(TokenKey::AccessToken).await,
		};

		if rollback.is_err() {
			let _ = self.clear_tokens().await;
		}

		Err(e)
	}

	/// Removes both stored credentials.
	///
	/// Both removals are attempted even if the first one fails; the first failure is returned.
	pub async fn clear_tokens(&self) -> Result<(), StoreError> {
		let access = self.remove(TokenKey::AccessToken).await;
		let refresh = self.remove(TokenKey::RefreshToken).await;

		access.and(refresh)
	}
}

/// Keys understood by token stores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKey {
	/// Short-lived bearer credential.
	AccessToken,
	/// Credential exchanged for a new pair.
	RefreshToken,
}
impl TokenKey {
	/// Every key, in persistence order.
	pub const ALL: [TokenKey; 2] = [TokenKey::AccessToken, TokenKey::RefreshToken];

	/// Returns the stable label used when persisting the key.
	pub const fn as_str(self) -> &'static str {
		match self {
			TokenKey::AccessToken => "accessToken",
			TokenKey::RefreshToken => "refreshToken",
		}
	}

	/// Resolves a persisted label back into a key.
	pub fn from_label(label: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|key| key.as_str() == label)
	}
}
impl Display for TokenKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Error type produced by [`TokenStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::atomic::{AtomicUsize, Ordering};
	// self
	use super::*;
	use crate::error::Error;

	#[test]
	fn store_error_converts_into_client_error_with_source() {
		let store_error = StoreError::Backend { message: "disk unavailable".into() };
		let client_error: Error = store_error.clone().into();

		assert!(matches!(client_error, Error::Storage(_)));
		assert!(client_error.to_string().contains("disk unavailable"));

		let source = StdError::source(&client_error)
			.expect("Client error should expose the original store error as its source.");

		assert_eq!(source.to_string(), store_error.to_string());
	}

	#[test]
	fn token_key_labels_round_trip() {
		for key in TokenKey::ALL {
			assert_eq!(TokenKey::from_label(key.as_str()), Some(key));
		}

		assert_eq!(TokenKey::from_label("sessionId"), None);
		assert_eq!(TokenKey::AccessToken.to_string(), "accessToken");
	}

	#[tokio::test]
	async fn pair_helpers_replace_and_clear_both_tokens() {
		let store: Arc<dyn TokenStore> = Arc::new(MemoryStore::default());

		store.save_pair(&TokenPair::new("A", "B")).await.expect("Saving a pair should succeed.");

		assert_eq!(
			store.load_access_token().await.expect("Access token read should succeed."),
			Some(TokenSecret::new("A"))
		);
		assert_eq!(
			store.load_refresh_token().await.expect("Refresh token read should succeed."),
			Some(TokenSecret::new("B"))
		);

		store.clear_tokens().await.expect("Clearing tokens should succeed.");

		assert_eq!(store.load_access_token().await.expect("Read should succeed."), None);
		assert_eq!(store.load_refresh_token().await.expect("Read should succeed."), None);
	}

	/// Rejects every refresh token write. With `fail_rollback` set, every write after the first
	/// is rejected too.
	#[derive(Default)]
	struct FlakyStore {
		inner: MemoryStore,
		fail_rollback: bool,
		writes: AtomicUsize,
	}
	impl TokenStore for FlakyStore {
		fn get(&self, key: TokenKey) -> StoreFuture<'_, Option<TokenSecret>> {
			self.inner.get(key)
		}

		fn set(&self, key: TokenKey, value: TokenSecret) -> StoreFuture<'_, ()> {
			let writes = self.writes.fetch_add(1, Ordering::SeqCst);

			if key == TokenKey::RefreshToken || (self.fail_rollback && writes > 0) {
				return Box::pin(async {
					Err(StoreError::Backend { message: "disk full".into() })
				});
			}

			self.inner.set(key, value)
		}

		fn remove(&self, key: TokenKey) -> StoreFuture<'_, ()> {
			self.inner.remove(key)
		}
	}

	async fn seeded(fail_rollback: bool) -> FlakyStore {
		let store = FlakyStore { fail_rollback, ..Default::default() };

		store.inner.set(TokenKey::AccessToken, "old-a".into()).await.expect("Seed should succeed.");
		store.inner.set(TokenKey::RefreshToken, "old-r".into()).await.expect("Seed should succeed.");

		store
	}

	#[tokio::test]
	async fn failed_pair_write_restores_previous_access_token() {
		let flaky = seeded(false).await;
		let store: &dyn TokenStore = &flaky;
		let err = store
			.save_pair(&TokenPair::new("A", "R"))
			.await
			.expect_err("Refresh token write should fail.");

		assert_eq!(err, StoreError::Backend { message: "disk full".into() });
		assert_eq!(
			store.load_access_token().await.expect("Read should succeed."),
			Some(TokenSecret::new("old-a"))
		);
		assert_eq!(
			store.load_refresh_token().await.expect("Read should succeed."),
			Some(TokenSecret::new("old-r"))
		);
	}

	#[tokio::test]
	async fn failed_rollback_clears_both_tokens() {
		let flaky = seeded(true).await;
		let store: &dyn TokenStore = &flaky;

		store.save_pair(&TokenPair::new("A", "R")).await.expect_err("Pair write should fail.");

		assert!(flaky.inner.is_empty());
	}

	#[tokio::test]
	async fn empty_tokens_count_as_absent() {
		let store: Arc<dyn TokenStore> = Arc::new(MemoryStore::default());

		store.save_pair(&TokenPair::new("", "")).await.expect("Saving a pair should succeed.");

		assert_eq!(store.load_access_token().await.expect("Read should succeed."), None);
		assert_eq!(store.load_refresh_token().await.expect("Read should succeed."), None);
		assert!(store.get(TokenKey::AccessToken).await.expect("Read should succeed.").is_some());
	}
}
