//! Search, trending, and suggestion endpoints.

// self
use crate::{
	_prelude::*,
	api::Page,
	client::ApiClient,
	http::{ApiTransport, RequestOptions},
};

/// Filters for `GET /search/threads`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ThreadSearch {
	/// Free-text query.
	pub query: String,
	/// Community categories to restrict results to.
	pub categories: Vec<String>,
	/// `everyone` (gateway default) or `following`.
	pub user_filter: Option<String>,
}
impl ThreadSearch {
	/// Searches every thread for `query`.
	pub fn new(query: impl Into<String>) -> Self {
		Self { query: query.into(), ..Default::default() }
	}

	fn apply(&self, options: RequestOptions) -> RequestOptions {
		let categories = (!self.categories.is_empty()).then(|| self.categories.join(","));

		options
			.query("q", &self.query)
			.query_opt("categories", categories)
			.query_opt("user_filter", self.user_filter.as_deref())
	}
}

impl<C> ApiClient<C>
where
	C: ?Sized + ApiTransport,
{
	/// Accounts matching `query`.
	pub async fn search_users(&self, query: &str, page: Page) -> Result<Value> {
		let options = page.apply(RequestOptions::get()).query("q", query);

		self.fetch_value("/search/users", options).await
	}

	/// Threads matching the search filters.
	pub async fn search_threads(&self, search: &ThreadSearch, page: Page) -> Result<Value> {
		let options = search.apply(page.apply(RequestOptions::get()));

		self.fetch_value("/search/threads", options).await
	}

	/// Top hashtags; the gateway defaults to 10.
	pub async fn trending_hashtags(&self, limit: Option<u32>) -> Result<Value> {
		let options = RequestOptions::get().query_opt("limit", limit);

		self.fetch_value("/trending/hashtags", options).await
	}

	/// Suggested accounts to follow; the gateway defaults to 3.
	pub async fn who_to_follow(&self, limit: Option<u32>) -> Result<Value> {
		let options = RequestOptions::get().query_opt("limit", limit);

		self.fetch_value("/suggestions/who-to-follow", options).await
	}
}
