//! Notification endpoints under `/notifications`.

// self
use crate::{
	_prelude::*,
	api::Page,
	client::ApiClient,
	http::{ApiTransport, RequestOptions},
};

/// Body of `GET /notifications/unread_count`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct UnreadCount {
	/// Number of unread notifications.
	#[serde(default)]
	pub count: u64,
}

impl<C> ApiClient<C>
where
	C: ?Sized + ApiTransport,
{
	/// Notifications for the signed-in user, optionally only unread ones.
	pub async fn notifications(&self, unread_only: bool, page: Page) -> Result<Value> {
		let options = page.apply(RequestOptions::get()).query("unread_only", unread_only);

		self.fetch_value("/notifications", options).await
	}

	/// Marks one notification as read.
	pub async fn mark_notification_read(&self, notification_id: u32) -> Result<Value> {
		self.fetch_value(&format!("/notifications/read/{notification_id}"), RequestOptions::post())
			.await
	}

	/// Marks every notification as read.
	pub async fn mark_all_notifications_read(&self) -> Result<Value> {
		self.fetch_value("/notifications/read/all", RequestOptions::post()).await
	}

	/// Number of unread notifications.
	pub async fn unread_notification_count(&self) -> Result<UnreadCount> {
		Ok(self
			.request("/notifications/unread_count", RequestOptions::get())
			.await?
			.unwrap_or_default())
	}
}
