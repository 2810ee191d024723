//! Own-profile and public profile endpoints (`/users/me/profile`, `/profiles/{username}`).

// self
use crate::{
	_prelude::*,
	api::{Page, segment},
	client::ApiClient,
	http::{ApiTransport, RequestOptions},
};

/// Partial update for `PUT /users/me/profile`; unset fields are left unchanged.
#[derive(Clone, Debug, Default, Serialize)]
pub struct UpdateProfileRequest {
	/// Display name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Profile biography.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub bio: Option<String>,
	/// Current password, required when changing it.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub current_password: Option<String>,
	/// Replacement password.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub new_password: Option<String>,
	/// Self-reported gender.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub gender: Option<String>,
	/// Avatar URL.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub profile_picture_url: Option<String>,
	/// Banner URL.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub banner_url: Option<String>,
	/// Date of birth, `YYYY-MM-DD`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub date_of_birth: Option<String>,
	/// `public` or `private`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub account_privacy: Option<String>,
	/// Newsletter opt-in.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub subscribed_to_newsletter: Option<bool>,
}

impl<C> ApiClient<C>
where
	C: ?Sized + ApiTransport,
{
	/// Profile of the signed-in user.
	pub async fn my_profile(&self) -> Result<Value> {
		self.fetch_value("/users/me/profile", RequestOptions::get()).await
	}

	/// Applies a partial update to the signed-in user's profile.
	pub async fn update_my_profile(&self, update: &UpdateProfileRequest) -> Result<Value> {
		self.fetch_value("/users/me/profile", RequestOptions::put().json(update)?).await
	}

	/// Public profile for `username`.
	pub async fn profile(&self, username: &str) -> Result<Value> {
		self.fetch_value(&profile_path(username, ""), RequestOptions::get()).await
	}

	/// Accounts following `username`.
	pub async fn followers(&self, username: &str, page: Page) -> Result<Value> {
		self.fetch_value(&profile_path(username, "/followers"), page.apply(RequestOptions::get()))
			.await
	}

	/// Accounts `username` follows.
	pub async fn following(&self, username: &str, page: Page) -> Result<Value> {
		self.fetch_value(&profile_path(username, "/following"), page.apply(RequestOptions::get()))
			.await
	}

	/// Threads authored by `username`.
	///
	/// `kind` selects the tab (`posts`, `replies`, `likes`, `media`); the gateway defaults to
	/// `posts`.
	pub async fn user_threads(
		&self,
		username: &str,
		kind: Option<&str>,
		page: Page,
	) -> Result<Value> {
		let options = page.apply(RequestOptions::get()).query_opt("type", kind);

		self.fetch_value(&profile_path(username, "/threads"), options).await
	}

	/// Follows `username`.
	pub async fn follow(&self, username: &str) -> Result<Value> {
		self.fetch_value(&profile_path(username, "/follow"), RequestOptions::post()).await
	}

	/// Unfollows `username`.
	pub async fn unfollow(&self, username: &str) -> Result<Value> {
		self.fetch_value(&profile_path(username, "/follow"), RequestOptions::delete()).await
	}

	/// Blocks `username`.
	pub async fn block(&self, username: &str) -> Result<Value> {
		self.fetch_value(&profile_path(username, "/block"), RequestOptions::post()).await
	}

	/// Unblocks `username`.
	pub async fn unblock(&self, username: &str) -> Result<Value> {
		self.fetch_value(&profile_path(username, "/block"), RequestOptions::delete()).await
	}
}

fn profile_path(username: &str, suffix: &str) -> String {
	format!("/profiles/{}{suffix}", segment(username))
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn usernames_are_escaped_in_paths() {
		assert_eq!(profile_path("ada", ""), "/profiles/ada");
		assert_eq!(profile_path("a/b", "/follow"), "/profiles/a%2Fb/follow");
	}

	#[test]
	fn profile_update_sends_only_set_fields() {
		let update = UpdateProfileRequest { bio: Some("hi".into()), ..Default::default() };
		let json = serde_json::to_value(&update).expect("Update should serialize.");

		assert_eq!(json, serde_json::json!({ "bio": "hi" }));
	}
}
