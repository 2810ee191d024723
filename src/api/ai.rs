//! AI-assisted helpers proxied by the gateway.

// self
use crate::{
	_prelude::*,
	client::ApiClient,
	http::{ApiTransport, RequestOptions},
};

#[derive(Serialize)]
struct SuggestCategoryBody<'a> {
	content: &'a str,
}

impl<C> ApiClient<C>
where
	C: ?Sized + ApiTransport,
{
	/// Suggests a community category for draft thread `content`.
	pub async fn suggest_category(&self, content: &str) -> Result<Value> {
		let options = RequestOptions::post().json(&SuggestCategoryBody { content })?;

		self.fetch_value("/ai/suggest-category", options).await
	}
}
