//! Transport primitives and request descriptors.
//!
//! [`ApiTransport`] is the client's only dependency on an HTTP stack. The client builds an
//! [`ApiRequest`] (absolute URL, merged headers, body) and hands it to the transport, which
//! returns the status, headers, and buffered body as a [`RawResponse`]. Connection-level
//! failures are reported as [`TransportError`]; a body that fails to stream after the status
//! line arrived is reported inside the [`RawResponse`] so the client can classify it as a
//! parse failure instead of a network failure.

// std
#[cfg(feature = "reqwest")] use std::time::Duration;
// crates.io
use http::{
	HeaderMap, HeaderName, HeaderValue, Method, StatusCode,
	header::{CONTENT_LENGTH, CONTENT_TYPE},
};
// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransportError},
};

/// Boxed future returned by [`ApiTransport::execute`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<RawResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing gateway requests.
///
/// Implementations must be `Send + Sync + 'static` so a single transport can be shared by
/// every clone of the client, and the futures they return must be `Send`.
pub trait ApiTransport
where
	Self: 'static + Send + Sync,
{
	/// Executes `request` and buffers the response body.
	fn execute(&self, request: ApiRequest) -> TransportFuture<'_>;
}

/// Fully resolved request handed to an [`ApiTransport`].
#[derive(Clone, Debug)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: Method,
	/// Absolute URL including query pairs.
	pub url: Url,
	/// Final header set (defaults and bearer token already applied).
	pub headers: HeaderMap,
	/// Request body.
	pub body: RequestBody,
}

/// Request body variants understood by transports.
#[derive(Clone, Debug, Default)]
pub enum RequestBody {
	/// No body.
	#[default]
	Empty,
	/// Pre-serialized JSON bytes.
	Json(Vec<u8>),
	/// Multipart form; the transport chooses the boundary and content type.
	Multipart(MultipartUpload),
}
impl RequestBody {
	/// Returns `true` for multipart bodies.
	pub fn is_multipart(&self) -> bool {
		matches!(self, Self::Multipart(_))
	}
}

/// Single-file multipart form with optional text fields.
#[derive(Clone)]
pub struct MultipartUpload {
	/// Form field that carries the file.
	pub field: String,
	/// File name reported to the server.
	pub file_name: String,
	/// MIME type of the file, when known.
	pub mime_type: Option<String>,
	/// Raw file content.
	pub bytes: Vec<u8>,
	/// Additional text fields sent alongside the file.
	pub text_fields: Vec<(String, String)>,
}
impl MultipartUpload {
	/// Creates an upload for `bytes` under the provided form field.
	pub fn new(field: impl Into<String>, file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
		Self {
			field: field.into(),
			file_name: file_name.into(),
			mime_type: None,
			bytes,
			text_fields: Vec::new(),
		}
	}

	/// Sets the MIME type of the file part.
	///
	/// The value must read `type/subtype`, optionally followed by `;` parameters, and be a valid
	/// header value; anything else is rejected before a request is built.
	pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Result<Self, ConfigError> {
		let mime_type = mime_type.into();

		if !is_mime_type(&mime_type) {
			return Err(ConfigError::InvalidHeader { name: CONTENT_TYPE.as_str().to_owned() });
		}

		self.mime_type = Some(mime_type);

		Ok(self)
	}

	/// Adds a text field to the form.
	pub fn with_text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.text_fields.push((name.into(), value.into()));

		self
	}
}
impl Debug for MultipartUpload {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("MultipartUpload")
			.field("field", &self.field)
			.field("file_name", &self.file_name)
			.field("mime_type", &self.mime_type)
			.field("len", &self.bytes.len())
			.field("text_fields", &self.text_fields)
			.finish()
	}
}

fn is_mime_type(raw: &str) -> bool {
	// RFC 9110 `token` characters.
	fn is_token(part: &str) -> bool {
		!part.is_empty()
			&& part.bytes().all(|b| b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b))
	}

	let (essence, params) = raw.split_once(';').unwrap_or((raw, ""));

	match essence.trim().split_once('/') {
		Some((kind, subtype)) =>
			is_token(kind) && is_token(subtype) && HeaderValue::from_str(params).is_ok(),
		None => false,
	}
}

/// Buffered response returned by an [`ApiTransport`].
#[derive(Debug)]
pub struct RawResponse {
	/// HTTP status code.
	pub status: StatusCode,
	/// Response headers.
	pub headers: HeaderMap,
	/// Buffered body, or the failure raised while streaming it.
	pub body: Result<Vec<u8>, BodyReadError>,
}
impl RawResponse {
	/// Builds a response with a fully buffered body.
	pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Vec<u8>>) -> Self {
		Self { status, headers, body: Ok(body.into()) }
	}

	/// Returns `true` when the server signalled that no content follows.
	pub fn is_no_content(&self) -> bool {
		self.status == StatusCode::NO_CONTENT
			|| self
				.headers
				.get(CONTENT_LENGTH)
				.and_then(|value| value.to_str().ok())
				.is_some_and(|value| value.trim() == "0")
	}
}

/// Body streaming failure captured after the status line was received.
#[derive(Debug, ThisError)]
#[error("Response body could not be read: {message}.")]
pub struct BodyReadError {
	/// Human-readable cause.
	pub message: String,
}

/// Caller-supplied request options: method, headers, query pairs, and body.
///
/// Headers set here take precedence over the client's JSON defaults; only `Authorization` is
/// always overwritten when a token is stored.
#[derive(Clone, Debug)]
pub struct RequestOptions {
	/// HTTP method.
	pub method: Method,
	/// Caller headers.
	pub headers: HeaderMap,
	/// Query pairs appended to the endpoint URL.
	pub query: Vec<(String, String)>,
	/// Request body.
	pub body: RequestBody,
}
impl RequestOptions {
	/// Creates options for the provided method with no headers or body.
	pub fn new(method: Method) -> Self {
		Self { method, headers: HeaderMap::new(), query: Vec::new(), body: RequestBody::Empty }
	}

	/// Shorthand for `GET`.
	pub fn get() -> Self {
		Self::new(Method::GET)
	}

	/// Shorthand for `POST`.
	pub fn post() -> Self {
		Self::new(Method::POST)
	}

	/// Shorthand for `PUT`.
	pub fn put() -> Self {
		Self::new(Method::PUT)
	}

	/// Shorthand for `DELETE`.
	pub fn delete() -> Self {
		Self::new(Method::DELETE)
	}

	/// Serializes `payload` as the JSON body.
	pub fn json<T>(mut self, payload: &T) -> Result<Self, ConfigError>
	where
		T: ?Sized + Serialize,
	{
		self.body = RequestBody::Json(serde_json::to_vec(payload)?);

		Ok(self)
	}

	/// Uses a multipart form as the body.
	pub fn multipart(mut self, upload: MultipartUpload) -> Self {
		self.body = RequestBody::Multipart(upload);

		self
	}

	/// Sets a caller header, replacing any previous value for the same name.
	pub fn header(mut self, name: &str, value: &str) -> Result<Self, ConfigError> {
		let invalid = || ConfigError::InvalidHeader { name: name.to_owned() };
		let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
		let value = HeaderValue::from_str(value).map_err(|_| invalid())?;

		self.headers.insert(name, value);

		Ok(self)
	}

	/// Appends a query pair.
	pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
		self.query.push((key.into(), value.to_string()));

		self
	}

	/// Appends a query pair when `value` is present.
	pub fn query_opt(self, key: impl Into<String>, value: Option<impl ToString>) -> Self {
		match value {
			Some(value) => self.query(key, value),
			None => self,
		}
	}

}
impl Default for RequestOptions {
	fn default() -> Self {
		Self::get()
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Starts a builder for a tuned transport.
	pub fn builder() -> ReqwestTransportBuilder {
		ReqwestTransportBuilder::default()
	}

	fn build_form(upload: MultipartUpload) -> Result<reqwest::multipart::Form, ReqwestError> {
		let mut part = reqwest::multipart::Part::bytes(upload.bytes).file_name(upload.file_name);

		if let Some(mime) = upload.mime_type.as_deref() {
			part = part.mime_str(mime)?;
		}

		let mut form = reqwest::multipart::Form::new();

		for (name, value) in upload.text_fields {
			form = form.text(name, value);
		}

		Ok(form.part(upload.field, part))
	}

	async fn send(client: ReqwestClient, request: ApiRequest) -> Result<RawResponse, TransportError> {
		let mut headers = request.headers;

		// `RequestBuilder::multipart` appends its own boundary-bearing content type.
		if request.body.is_multipart() {
			headers.remove(CONTENT_TYPE);
		}

		let mut builder = client.request(request.method, request.url).headers(headers);

		builder = match request.body {
			RequestBody::Empty => builder,
			RequestBody::Json(bytes) => builder.body(bytes),
			RequestBody::Multipart(upload) => builder.multipart(Self::build_form(upload)?),
		};

		let response = builder.send().await?;
		let status = response.status();
		let headers = response.headers().to_owned();
		let body = response
			.bytes()
			.await
			.map(|bytes| bytes.to_vec())
			.map_err(|e| BodyReadError { message: e.to_string() });

		Ok(RawResponse { status, headers, body })
	}
}
/// Builder for a [`ReqwestTransport`] with caller-chosen limits.
///
/// Nothing is set by default: requests carry reqwest's defaults and never time out.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportBuilder {
	timeout: Option<Duration>,
	connect_timeout: Option<Duration>,
	user_agent: Option<String>,
}
#[cfg(feature = "reqwest")]
impl ReqwestTransportBuilder {
	/// Total time allowed for a request, from connect to the last body byte.
	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	/// Time allowed to establish a connection.
	pub fn connect_timeout(mut self, timeout: Duration) -> Self {
		self.connect_timeout = Some(timeout);

		self
	}

	/// `User-Agent` sent with every request.
	pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = Some(user_agent.into());

		self
	}

	/// Builds the underlying [`ReqwestClient`].
	pub fn build(self) -> Result<ReqwestTransport, ConfigError> {
		let mut builder = ReqwestClient::builder();

		if let Some(timeout) = self.timeout {
			builder = builder.timeout(timeout);
		}
		if let Some(timeout) = self.connect_timeout {
			builder = builder.connect_timeout(timeout);
		}
		if let Some(user_agent) = self.user_agent {
			builder = builder.user_agent(user_agent);
		}

		Ok(ReqwestTransport(builder.build()?))
	}
}

#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiTransport for ReqwestTransport {
	fn execute(&self, request: ApiRequest) -> TransportFuture<'_> {
		let client = self.0.clone();

		Box::pin(Self::send(client, request))
	}
}
