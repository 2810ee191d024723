//! Access/refresh credential pair as issued by the login and refresh endpoints.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Credentials pair returned by `/auth/login` and `/auth/refresh`.
///
/// The store always replaces both halves together; a pair is never partially updated.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
	/// Short-lived bearer credential sent with each request.
	pub access_token: TokenSecret,
	/// Longer-lived credential exchanged for a new pair.
	pub refresh_token: TokenSecret,
}
impl TokenPair {
	/// Builds a pair from raw token strings.
	pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
		Self {
			access_token: TokenSecret::new(access_token),
			refresh_token: TokenSecret::new(refresh_token),
		}
	}
}
impl Debug for TokenPair {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenPair")
			.field("access_token", &self.access_token)
			.field("refresh_token", &self.refresh_token)
			.finish()
	}
}

/// Body posted to `/auth/refresh`.
#[derive(Clone, Serialize)]
pub struct RefreshRequest<'a> {
	/// Stored refresh token being exchanged.
	pub refresh_token: &'a str,
}
