//! Thread endpoints under `/threads`.

// self
use crate::{
	_prelude::*,
	api::Page,
	client::ApiClient,
	http::{ApiTransport, RequestOptions},
};

/// New thread or reply submitted to `POST /threads`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CreateThreadRequest {
	/// Post body.
	pub content: String,
	/// Thread being replied to.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub parent_thread_id: Option<u32>,
	/// Who may reply, e.g. `EVERYONE` or `FOLLOWING`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub reply_restriction: Option<String>,
	/// RFC 3339 instant at which the thread is published.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub scheduled_at: Option<String>,
	/// Community the thread is posted into.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub community_id: Option<u32>,
	/// Media returned by prior uploads.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub media_ids: Vec<u32>,
}
impl CreateThreadRequest {
	/// Creates a top-level thread with only `content` set.
	pub fn new(content: impl Into<String>) -> Self {
		Self { content: content.into(), ..Default::default() }
	}
}

/// Feed flavor for `GET /threads/feed`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FeedKind {
	/// Recommended threads.
	#[default]
	ForYou,
	/// Threads from followed accounts.
	Following,
}
impl FeedKind {
	/// Query value understood by the gateway.
	pub const fn as_str(self) -> &'static str {
		match self {
			FeedKind::ForYou => "foryou",
			FeedKind::Following => "following",
		}
	}
}

impl<C> ApiClient<C>
where
	C: ?Sized + ApiTransport,
{
	/// Publishes a thread or reply.
	pub async fn create_thread(&self, thread: &CreateThreadRequest) -> Result<Value> {
		self.fetch_value("/threads", RequestOptions::post().json(thread)?).await
	}

	/// One page of the home feed.
	pub async fn feed(&self, kind: FeedKind, page: Page) -> Result<Value> {
		let options = page.apply(RequestOptions::get()).query("type", kind.as_str());

		self.fetch_value("/threads/feed", options).await
	}

	/// Threads the signed-in user bookmarked.
	pub async fn bookmarked_threads(&self, page: Page) -> Result<Value> {
		self.fetch_value("/threads/bookmarked", page.apply(RequestOptions::get())).await
	}

	/// A single thread.
	pub async fn thread(&self, thread_id: u32) -> Result<Value> {
		self.fetch_value(&format!("/threads/{thread_id}"), RequestOptions::get()).await
	}

	/// Deletes a thread owned by the signed-in user.
	pub async fn delete_thread(&self, thread_id: u32) -> Result<Value> {
		self.fetch_value(&format!("/threads/{thread_id}"), RequestOptions::delete()).await
	}

	/// Likes a thread.
	pub async fn like_thread(&self, thread_id: u32) -> Result<Value> {
		self.fetch_value(&format!("/threads/{thread_id}/like"), RequestOptions::post()).await
	}

	/// Removes a like.
	pub async fn unlike_thread(&self, thread_id: u32) -> Result<Value> {
		self.fetch_value(&format!("/threads/{thread_id}/like"), RequestOptions::delete()).await
	}

	/// Bookmarks a thread.
	pub async fn bookmark_thread(&self, thread_id: u32) -> Result<Value> {
		self.fetch_value(&format!("/threads/{thread_id}/bookmark"), RequestOptions::post()).await
	}

	/// Removes a bookmark.
	pub async fn unbookmark_thread(&self, thread_id: u32) -> Result<Value> {
		self.fetch_value(&format!("/threads/{thread_id}/bookmark"), RequestOptions::delete()).await
	}
}
