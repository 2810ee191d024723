//! Media upload (`POST /media/upload`).

// self
use crate::{
	_prelude::*,
	client::ApiClient,
	error::ParseError,
	http::{ApiTransport, MultipartUpload},
};

/// Form field the gateway reads the file from.
pub const MEDIA_FIELD: &str = "media_file";

/// Stored media record returned by the upload endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MediaMetadata {
	/// Media identifier, referenced by `media_ids` in threads and messages.
	pub id: u32,
	/// Uploading user.
	#[serde(default)]
	pub uploader_user_id: u32,
	/// Object path in the storage bucket.
	#[serde(default)]
	pub supabase_path: String,
	/// Storage bucket.
	#[serde(default)]
	pub bucket_name: String,
	/// MIME type detected by the server.
	#[serde(default)]
	pub mime_type: String,
	/// Size in bytes.
	#[serde(default)]
	pub file_size: i64,
	/// Publicly reachable URL.
	#[serde(default)]
	pub public_url: String,
	/// Creation instant as reported by the server.
	#[serde(default)]
	pub created_at: String,
}

impl<C> ApiClient<C>
where
	C: ?Sized + ApiTransport,
{
	/// Uploads one file and returns its stored metadata.
	///
	/// Like [`ApiClient::upload`], a 401 is returned as an error without refreshing tokens.
	pub async fn upload_media(
		&self,
		file_name: impl Into<String>,
		mime_type: Option<&str>,
		bytes: Vec<u8>,
	) -> Result<MediaMetadata> {
		let mut upload = MultipartUpload::new(MEDIA_FIELD, file_name, bytes);

		if let Some(mime_type) = mime_type {
			upload = upload.with_mime_type(mime_type)?;
		}

		// A 201 without a body leaves nothing to reference from threads or messages.
		self.upload("/media/upload", upload).await?.ok_or_else(|| {
			Error::Parse(ParseError::SuccessBodyRead { source: "empty upload response".into() })
		})
	}
}
