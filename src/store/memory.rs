//! Thread-safe in-memory [`TokenStore`] implementation scoped to the running process.

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	store::{StoreFuture, TokenKey, TokenStore},
};

type StoreMap = Arc<RwLock<HashMap<TokenKey, TokenSecret>>>;

/// Storage backend that keeps credentials in-process, like a browsing-context session.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(StoreMap);
impl MemoryStore {
	/// Returns the number of stored credentials.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns `true` when no credential is stored.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}
}
impl TokenStore for MemoryStore {
	fn get(&self, key: TokenKey) -> StoreFuture<'_, Option<TokenSecret>> {
		let map = self.0.clone();

		Box::pin(async move { Ok(map.read().get(&key).cloned()) })
	}

	fn set(&self, key: TokenKey, value: TokenSecret) -> StoreFuture<'_, ()> {
		let map = self.0.clone();

		Box::pin(async move {
			map.write().insert(key, value);

			Ok(())
		})
	}

	fn remove(&self, key: TokenKey) -> StoreFuture<'_, ()> {
		let map = self.0.clone();

		Box::pin(async move {
			map.write().remove(&key);

			Ok(())
		})
	}
}
