//! Direct and group messaging endpoints under `/messages`.

// self
use crate::{
	_prelude::*,
	api::Page,
	client::ApiClient,
	http::{ApiTransport, RequestOptions},
};

/// Message submitted to `POST /messages/chat/{chat_id}`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SendMessageRequest {
	/// Message text.
	pub content: String,
	/// Media returned by prior uploads.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub media_ids: Vec<u32>,
}

/// Group chat submitted to `POST /messages/group`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CreateGroupChatRequest {
	/// Group name.
	pub name: String,
	/// Members added alongside the creator; may be empty.
	pub initial_participant_ids: Vec<u32>,
}

#[derive(Serialize)]
struct DirectChatBody {
	other_user_id: u32,
}

#[derive(Serialize)]
struct ParticipantBody {
	target_user_id: u32,
}

impl<C> ApiClient<C>
where
	C: ?Sized + ApiTransport,
{
	/// Chats the signed-in user participates in.
	pub async fn chats(&self) -> Result<Value> {
		self.fetch_value("/messages", RequestOptions::get()).await
	}

	/// Returns the direct chat with `other_user_id`, creating it when absent.
	pub async fn direct_chat(&self, other_user_id: u32) -> Result<Value> {
		let options = RequestOptions::post().json(&DirectChatBody { other_user_id })?;

		self.fetch_value("/messages/direct", options).await
	}

	/// One page of messages in a chat.
	pub async fn chat_messages(&self, chat_id: u32, page: Page) -> Result<Value> {
		self.fetch_value(&format!("/messages/chat/{chat_id}"), page.apply(RequestOptions::get()))
			.await
	}

	/// Posts a message to a chat.
	pub async fn send_message(&self, chat_id: u32, message: &SendMessageRequest) -> Result<Value> {
		let options = RequestOptions::post().json(message)?;

		self.fetch_value(&format!("/messages/chat/{chat_id}"), options).await
	}

	/// Deletes one message.
	pub async fn delete_message(&self, chat_id: u32, message_id: u32) -> Result<Value> {
		self.fetch_value(
			&format!("/messages/chat/{chat_id}/message/{message_id}"),
			RequestOptions::delete(),
		)
		.await
	}

	/// Deletes a chat.
	pub async fn delete_chat(&self, chat_id: u32) -> Result<Value> {
		self.fetch_value(&format!("/messages/chat/{chat_id}"), RequestOptions::delete()).await
	}

	/// Creates a group chat.
	pub async fn create_group_chat(&self, group: &CreateGroupChatRequest) -> Result<Value> {
		self.fetch_value("/messages/group", RequestOptions::post().json(group)?).await
	}

	/// Adds a member to a group chat.
	pub async fn add_participant(&self, chat_id: u32, user_id: u32) -> Result<Value> {
		let options = RequestOptions::post().json(&ParticipantBody { target_user_id: user_id })?;

		self.fetch_value(&format!("/messages/group/{chat_id}/participants"), options).await
	}

	/// Removes a member from a group chat.
	pub async fn remove_participant(&self, chat_id: u32, user_id: u32) -> Result<Value> {
		self.fetch_value(
			&format!("/messages/group/{chat_id}/participants/{user_id}"),
			RequestOptions::delete(),
		)
		.await
	}
}
