//! Typed endpoint helpers layered over [`ApiClient::request`].
//!
//! Each helper only describes its request (method, path, query, JSON body). Bodies whose shape
//! the gateway owns are surfaced as [`Value`]; a no-content reply becomes [`Value::Null`].

pub mod ai;
pub mod auth;
pub mod communities;
pub mod discovery;
pub mod media;
pub mod messages;
pub mod notifications;
pub mod profiles;
pub mod threads;

pub use self::{
	auth::*, communities::*, discovery::*, media::*, messages::*, notifications::*, profiles::*,
	threads::*,
};

// self
use crate::{
	_prelude::*,
	client::{ApiClient, Retry},
	http::{ApiTransport, RequestOptions},
};

/// Page selector for list endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
	/// One-based page number.
	pub page: u32,
	/// Maximum number of items per page.
	pub limit: u32,
}
impl Page {
	/// Creates a page selector.
	pub const fn new(page: u32, limit: u32) -> Self {
		Self { page, limit }
	}

	pub(crate) fn apply(self, options: RequestOptions) -> RequestOptions {
		options.query("page", self.page).query("limit", self.limit)
	}
}
impl Default for Page {
	fn default() -> Self {
		Self::new(1, 10)
	}
}

/// Confirmation body of the form `{"message": "..."}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
	/// Human-readable confirmation.
	#[serde(default)]
	pub message: String,
}

impl<C> ApiClient<C>
where
	C: ?Sized + ApiTransport,
{
	async fn fetch_value(&self, endpoint: &str, options: RequestOptions) -> Result<Value> {
		Ok(self.request::<Value>(endpoint, options).await?.unwrap_or_default())
	}

	// Credential-less auth endpoints: a 401 there is a real answer, not a stale token.
	async fn fetch_public<T>(&self, endpoint: &str, options: RequestOptions) -> Result<Option<T>>
	where
		T: DeserializeOwned,
	{
		self.request_with(endpoint, options, Retry::Exhausted).await
	}
}

/// Percent-encodes a caller-supplied path segment.
pub(crate) fn segment(raw: &str) -> String {
	url::form_urlencoded::byte_serialize(raw.as_bytes()).collect::<String>().replace('+', "%20")
}
