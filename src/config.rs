//! Client configuration (base URL resolution from code, environment, or the default).

// self
use crate::{_prelude::*, error::ConfigError};

/// Gateway base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";
/// Environment variable consulted by [`ClientConfig::from_env`].
pub const BASE_URL_ENV: &str = "API_BASE_URL";

/// Settings shared by every request issued through a client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
	/// Base URL that endpoint paths are appended to, verbatim.
	pub base_url: Url,
}
impl ClientConfig {
	/// Builds a config for an explicit base URL.
	pub fn new(base_url: impl AsRef<str>) -> Result<Self, ConfigError> {
		let raw = base_url.as_ref().trim();
		let base_url = Url::parse(raw)
			.map_err(|source| ConfigError::InvalidBaseUrl { url: raw.to_owned(), source })?;

		Ok(Self { base_url })
	}

	/// Loads `.env` when present, then resolves [`BASE_URL_ENV`] with the default as fallback.
	pub fn from_env() -> Result<Self, ConfigError> {
		let _ = dotenvy::dotenv();

		Self::from_lookup(|key| dotenvy::var(key).ok())
	}

	/// Resolves the config through an arbitrary variable lookup.
	///
	/// Blank values are treated as unset.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: FnOnce(&str) -> Option<String>,
	{
		match lookup(BASE_URL_ENV).filter(|value| !value.trim().is_empty()) {
			Some(value) => Self::new(value),
			None => Self::new(DEFAULT_BASE_URL),
		}
	}

	/// Joins an endpoint path onto the base URL.
	///
	/// The path is appended verbatim so the base URL's own path (`/api/v1`) is preserved; a
	/// missing leading slash is added.
	pub fn endpoint_url(&self, endpoint: &str) -> Result<Url, ConfigError> {
		let base = self.base_url.as_str().trim_end_matches('/');
		let joined = if endpoint.starts_with('/') {
			format!("{base}{endpoint}")
		} else {
			format!("{base}/{endpoint}")
		};

		Url::parse(&joined)
			.map_err(|source| ConfigError::InvalidEndpoint { endpoint: endpoint.to_owned(), source })
	}
}
impl Default for ClientConfig {
	fn default() -> Self {
		Self { base_url: Url::parse(DEFAULT_BASE_URL).expect("Default base URL must parse.") }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn lookup_falls_back_to_default() {
		let config = ClientConfig::from_lookup(|_| None).expect("Default config should build.");

		assert_eq!(config, ClientConfig::default());
		assert_eq!(config.base_url.as_str(), DEFAULT_BASE_URL);

		let blank =
			ClientConfig::from_lookup(|_| Some("  ".into())).expect("Blank values are unset.");

		assert_eq!(blank, ClientConfig::default());
	}

	#[test]
	fn lookup_prefers_configured_value() {
		let config = ClientConfig::from_lookup(|key| {
			assert_eq!(key, BASE_URL_ENV);

			Some("https://gateway.example.com/api/v1".into())
		})
		.expect("Configured base URL should parse.");

		assert_eq!(config.base_url.host_str(), Some("gateway.example.com"));
	}

	#[test]
	fn invalid_base_url_is_rejected() {
		let err = ClientConfig::new("not a url").expect_err("Invalid base URL should fail.");

		assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
	}

	#[test]
	fn endpoint_url_keeps_base_path() {
		let config = ClientConfig::default();

		assert_eq!(
			config.endpoint_url("/users/health").expect("Endpoint should join.").as_str(),
			"http://localhost:8080/api/v1/users/health"
		);
		assert_eq!(
			config.endpoint_url("threads/feed").expect("Endpoint should join.").as_str(),
			"http://localhost:8080/api/v1/threads/feed"
		);

		let trailing = ClientConfig::new("http://localhost:8080/api/v1/")
			.expect("Trailing slash base should parse.");

		assert_eq!(
			trailing.endpoint_url("/auth/login").expect("Endpoint should join.").as_str(),
			"http://localhost:8080/api/v1/auth/login"
		);
	}
}
