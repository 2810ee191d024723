//! Community endpoints under `/communities`, plus the signed-in user's join requests.

// self
use crate::{
	_prelude::*,
	api::Page,
	client::ApiClient,
	http::{ApiTransport, RequestOptions},
};

/// New community submitted to `POST /communities`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CreateCommunityRequest {
	/// Community name, 3 to 100 characters.
	pub name: String,
	/// Description shown on the community page.
	pub description: String,
	/// Icon URL from a prior media upload.
	pub icon_url: String,
	/// Banner URL from a prior media upload.
	pub banner_url: String,
	/// Categories; may be empty.
	pub categories: Vec<String>,
	/// Rules; may be empty.
	pub rules: Vec<String>,
}

/// Listing filters for `GET /communities`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommunityFilter {
	/// `ALL_PUBLIC` (gateway default), `JOINED_BY_USER`, or `CREATED_BY_USER`.
	pub filter_type: Option<String>,
	/// User the `*_BY_USER` filters refer to.
	pub user_id_context: Option<u32>,
	/// Free-text name search.
	pub search_query: Option<String>,
	/// Categories to restrict results to.
	pub categories: Vec<String>,
}
impl CommunityFilter {
	fn apply(&self, options: RequestOptions) -> RequestOptions {
		let categories = (!self.categories.is_empty()).then(|| self.categories.join(","));

		options
			.query_opt("filter_type", self.filter_type.as_deref())
			.query_opt("user_id_context", self.user_id_context)
			.query_opt("search_query", self.search_query.as_deref())
			.query_opt("categories", categories)
	}
}

/// Role change submitted to `PUT /communities/{id}/members/role`.
#[derive(Clone, Debug, Serialize)]
pub struct UpdateMemberRoleRequest {
	/// Member whose role changes.
	pub target_user_id: u32,
	/// New role, e.g. `member` or `moderator`.
	pub new_role: String,
}

#[derive(Serialize)]
struct JoinDecisionBody {
	target_user_id: u32,
}

impl<C> ApiClient<C>
where
	C: ?Sized + ApiTransport,
{
	/// Creates a community owned by the signed-in user.
	pub async fn create_community(&self, community: &CreateCommunityRequest) -> Result<Value> {
		self.fetch_value("/communities", RequestOptions::post().json(community)?).await
	}

	/// Community details.
	pub async fn community(&self, community_id: u32) -> Result<Value> {
		self.fetch_value(&format!("/communities/{community_id}"), RequestOptions::get()).await
	}

	/// One page of communities matching `filter`.
	pub async fn communities(&self, filter: &CommunityFilter, page: Page) -> Result<Value> {
		let options = filter.apply(page.apply(RequestOptions::get()));

		self.fetch_value("/communities", options).await
	}

	/// Requests to join a community.
	pub async fn join_community(&self, community_id: u32) -> Result<Value> {
		self.fetch_value(&format!("/communities/{community_id}/join"), RequestOptions::post())
			.await
	}

	/// Threads posted in a community.
	pub async fn community_threads(&self, community_id: u32, page: Page) -> Result<Value> {
		self.fetch_value(
			&format!("/communities/{community_id}/threads"),
			page.apply(RequestOptions::get()),
		)
		.await
	}

	/// Members of a community, optionally filtered by role (gateway default `all`).
	pub async fn community_members(
		&self,
		community_id: u32,
		role: Option<&str>,
		page: Page,
	) -> Result<Value> {
		let options = page.apply(RequestOptions::get()).query_opt("role", role);

		self.fetch_value(&format!("/communities/{community_id}/members"), options).await
	}

	/// Most active members of a community, as ranked by the gateway.
	pub async fn top_community_members(&self, community_id: u32) -> Result<Value> {
		self.fetch_value(&format!("/communities/{community_id}/top-members"), RequestOptions::get())
			.await
	}

	/// Pending join requests, visible to moderators.
	pub async fn community_join_requests(&self, community_id: u32, page: Page) -> Result<Value> {
		self.fetch_value(
			&format!("/communities/{community_id}/requests"),
			page.apply(RequestOptions::get()),
		)
		.await
	}

	/// Accepts `user_id`'s join request.
	pub async fn accept_join_request(&self, community_id: u32, user_id: u32) -> Result<Value> {
		self.decide_join_request(community_id, user_id, "accept").await
	}

	/// Rejects `user_id`'s join request.
	pub async fn reject_join_request(&self, community_id: u32, user_id: u32) -> Result<Value> {
		self.decide_join_request(community_id, user_id, "reject").await
	}

	/// Changes a member's role.
	pub async fn update_member_role(
		&self,
		community_id: u32,
		change: &UpdateMemberRoleRequest,
	) -> Result<Value> {
		self.fetch_value(
			&format!("/communities/{community_id}/members/role"),
			RequestOptions::put().json(change)?,
		)
		.await
	}

	/// Join requests submitted by the signed-in user.
	pub async fn my_join_requests(&self) -> Result<Value> {
		self.fetch_value("/users/community-join-requests", RequestOptions::get()).await
	}

	async fn decide_join_request(
		&self,
		community_id: u32,
		user_id: u32,
		decision: &str,
	) -> Result<Value> {
		let options =
			RequestOptions::post().json(&JoinDecisionBody { target_user_id: user_id })?;

		self.fetch_value(&format!("/communities/{community_id}/requests/{decision}"), options)
			.await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn community_filter_only_sends_set_fields() {
		let filter = CommunityFilter {
			filter_type: Some("JOINED_BY_USER".into()),
			user_id_context: Some(4),
			..Default::default()
		};
		let options = filter.apply(RequestOptions::get());

		assert_eq!(
			options.query,
			vec![
				("filter_type".to_owned(), "JOINED_BY_USER".to_owned()),
				("user_id_context".to_owned(), "4".to_owned()),
			]
		);
	}
}
