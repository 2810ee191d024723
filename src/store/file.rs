//! File-backed [`TokenStore`] so credentials survive process restarts.

// std
use std::{
	collections::BTreeMap,
	fs::{self, File},
	io::Write,
	path::{Path, PathBuf},
};
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	store::{StoreError, StoreFuture, TokenKey, TokenStore},
};

type Snapshot = BTreeMap<String, TokenSecret>;

/// Persists credentials to a JSON file after each mutation.
#[derive(Clone, Debug)]
pub struct FileStore {
	path: PathBuf,
	inner: Arc<RwLock<HashMap<TokenKey, TokenSecret>>>,
}
impl FileStore {
	/// Opens (or creates) a store at the provided path, eagerly loading existing data.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
		let path = path.into();

		Self::ensure_parent_exists(&path)?;

		let snapshot = Self::load_snapshot(&path)?;

		Ok(Self { path, inner: Arc::new(RwLock::new(snapshot)) })
	}

	/// Location of the backing file.
	pub fn path(&self) -> &Path {
		&self.path
	}

	fn load_snapshot(path: &Path) -> Result<HashMap<TokenKey, TokenSecret>, StoreError> {
		if !path.exists() {
			return Ok(HashMap::new());
		}

		let metadata = path.metadata().map_err(|e| StoreError::Backend {
			message: format!("Failed to inspect {}: {e}", path.display()),
		})?;

		if metadata.len() == 0 {
			return Ok(HashMap::new());
		}

		let bytes = fs::read(path).map_err(|e| StoreError::Backend {
			message: format!("Failed to read {}: {e}", path.display()),
		})?;
		let entries: Snapshot =
			serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization {
				message: format!("Failed to parse {}: {e}", path.display()),
			})?;

		entries
			.into_iter()
			.map(|(label, secret)| match TokenKey::from_label(&label) {
				Some(key) => Ok((key, secret)),
				None => Err(StoreError::Serialization {
					message: format!("Unknown key `{label}` in {}", path.display()),
				}),
			})
			.collect()
	}

	fn ensure_parent_exists(path: &Path) -> Result<(), StoreError> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|e| StoreError::Backend {
				message: format!("Failed to create store directory {}: {e}", parent.display()),
			})?;
		}

		Ok(())
	}

	fn persist_locked(&self, contents: &HashMap<TokenKey, TokenSecret>) -> Result<(), StoreError> {
		Self::ensure_parent_exists(&self.path)?;

		let snapshot: Snapshot =
			contents.iter().map(|(key, secret)| (key.as_str().to_owned(), secret.clone())).collect();
		let serialized =
			serde_json::to_vec_pretty(&snapshot).map_err(|e| StoreError::Serialization {
				message: format!("Failed to serialize store snapshot: {e}"),
			})?;
		let mut tmp_path = self.path.clone();

		tmp_path.set_extension("tmp");

		{
			let mut file = File::create(&tmp_path).map_err(|e| StoreError::Backend {
				message: format!("Failed to create {}: {e}", tmp_path.display()),
			})?;

			file.write_all(&serialized).map_err(|e| StoreError::Backend {
				message: format!("Failed to write {}: {e}", tmp_path.display()),
			})?;
			file.sync_all().map_err(|e| StoreError::Backend {
				message: format!("Failed to sync {}: {e}", tmp_path.display()),
			})?;
		}

		fs::rename(&tmp_path, &self.path).map_err(|e| StoreError::Backend {
			message: format!("Failed to replace {}: {e}", self.path.display()),
		})
	}
}
impl TokenStore for FileStore {
	fn get(&self, key: TokenKey) -> StoreFuture<'_, Option<TokenSecret>> {
		Box::pin(async move { Ok(self.inner.read().get(&key).cloned()) })
	}

	fn set(&self, key: TokenKey, value: TokenSecret) -> StoreFuture<'_, ()> {
		Box::pin(async move {
			let mut guard = self.inner.write();

			guard.insert(key, value);
			self.persist_locked(&guard)
		})
	}

	fn remove(&self, key: TokenKey) -> StoreFuture<'_, ()> {
		Box::pin(async move {
			let mut guard = self.inner.write();

			if guard.remove(&key).is_some() {
				self.persist_locked(&guard)?;
			}

			Ok(())
		})
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::{env, process};
	// crates.io
	use time::OffsetDateTime;
	// self
	use super::*;
	use crate::auth::TokenPair;

	fn temp_path() -> PathBuf {
		let unique = format!(
			"social_api_client_file_store_{}_{}.json",
			process::id(),
			OffsetDateTime::now_utc().unix_timestamp_nanos(),
		);

		env::temp_dir().join(unique)
	}

	#[tokio::test]
	async fn save_and_reload_round_trip() {
		let path = temp_path();
		let store: Arc<dyn TokenStore> =
			Arc::new(FileStore::open(&path).expect("Failed to open file store snapshot."));

		store
			.save_pair(&TokenPair::new("access-file", "refresh-file"))
			.await
			.expect("Failed to save fixture pair to file store.");
		drop(store);

		let reopened = FileStore::open(&path).expect("Failed to reopen file store snapshot.");
		let access = reopened
			.get(TokenKey::AccessToken)
			.await
			.expect("Failed to read access token from file store.")
			.expect("File store lost the access token after reopen.");

		assert_eq!(access.expose(), "access-file");

		let raw = fs::read_to_string(&path).expect("Snapshot file should be readable.");

		assert!(raw.contains("\"refreshToken\""));

		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove temporary file store snapshot {}: {e}", path.display())
		});
	}

	#[tokio::test]
	async fn clearing_tokens_persists_an_empty_snapshot() {
		let path = temp_path();
		let store: Arc<dyn TokenStore> =
			Arc::new(FileStore::open(&path).expect("Failed to open file store snapshot."));

		store
			.save_pair(&TokenPair::new("access-clear", "refresh-clear"))
			.await
			.expect("Failed to save fixture pair to file store.");
		store.clear_tokens().await.expect("Failed to clear file store tokens.");

		let reopened = FileStore::open(&path).expect("Failed to reopen file store snapshot.");

		assert_eq!(reopened.get(TokenKey::AccessToken).await.expect("Read should succeed."), None);
		assert_eq!(reopened.get(TokenKey::RefreshToken).await.expect("Read should succeed."), None);

		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove temporary file store snapshot {}: {e}", path.display())
		});
	}
}
