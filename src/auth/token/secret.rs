//! Credential strings that stay out of logs.

// crates.io
use http::HeaderValue;
// self
use crate::{_prelude::*, error::ConfigError};

/// Access or refresh credential; formatting never reveals the value.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a credential string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Raw credential. Never log the returned string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Returns `true` for an empty credential, which callers treat as absent.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// `Bearer <token>` text.
	pub fn bearer(&self) -> String {
		format!("Bearer {}", self.0)
	}

	/// `Authorization` header value, flagged sensitive so HTTP stacks redact it.
	pub fn bearer_header(&self) -> Result<HeaderValue, ConfigError> {
		let mut value = HeaderValue::try_from(self.bearer())
			.map_err(|_| ConfigError::InvalidHeader { name: "authorization".into() })?;

		value.set_sensitive(true);

		Ok(value)
	}
}
impl From<String> for TokenSecret {
	fn from(value: String) -> Self {
		Self(value)
	}
}
impl From<&str> for TokenSecret {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "TokenSecret(<redacted; {} bytes>)", self.0.len())
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
