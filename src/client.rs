//! Authenticated request client.
//!
//! [`ApiClient`] issues requests against the gateway, attaches the stored access token,
//! normalizes success and error bodies, and recovers at most once from a rejected access token
//! by refreshing the credentials pair and re-issuing the original request.
//!
//! Concurrent requests do not coordinate: two requests that both see a 401 each run their own
//! refresh, and the last successful refresh wins in the token store.

pub mod refresh;
pub mod response;

pub use refresh::*;
pub use response::ErrorBody;

// crates.io
use http::{
	HeaderMap, HeaderValue, StatusCode,
	header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	config::ClientConfig,
	error::ConfigError,
	http::{ApiRequest, ApiTransport, MultipartUpload, RawResponse, RequestOptions},
	obs::{self, CallKind, CallOutcome, CallSpan},
	store::TokenStore,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

const JSON: &str = "application/json";

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestApiClient = ApiClient<ReqwestTransport>;

/// Whether a request may still spend its single refresh-and-retry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Retry {
	/// First attempt; a 401 triggers one refresh and one retry.
	#[default]
	Eligible,
	/// Retry already consumed or not wanted; a 401 surfaces as an ordinary API error.
	Exhausted,
}

/// Issues authenticated requests against the gateway.
///
/// The client owns the transport, token store, and configuration so endpoint helpers only
/// describe the request. Cloning is cheap and clones share the transport, store, and refresh
/// counters.
pub struct ApiClient<C>
where
	C: ?Sized + ApiTransport,
{
	/// HTTP transport used for every outbound request.
	pub transport: Arc<C>,
	/// Token store holding the credentials pair.
	pub store: Arc<dyn TokenStore>,
	/// Base URL and related settings.
	pub config: ClientConfig,
	/// Shared counters for refresh outcomes.
	pub refresh_metrics: Arc<RefreshMetrics>,
}
impl<C> ApiClient<C>
where
	C: ?Sized + ApiTransport,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_transport(
		store: Arc<dyn TokenStore>,
		config: ClientConfig,
		transport: impl Into<Arc<C>>,
	) -> Self {
		Self { transport: transport.into(), store, config, refresh_metrics: Default::default() }
	}

	/// Issues a retry-eligible request and decodes the body as `T`.
	///
	/// Resolves to `None` when the server signals no content (204 or `Content-Length: 0`).
	pub async fn request<T>(&self, endpoint: &str, options: RequestOptions) -> Result<Option<T>>
	where
		T: DeserializeOwned,
	{
		self.request_with(endpoint, options, Retry::Eligible).await
	}

	/// Issues a request with explicit retry eligibility.
	pub async fn request_with<T>(
		&self,
		endpoint: &str,
		options: RequestOptions,
		retry: Retry,
	) -> Result<Option<T>>
	where
		T: DeserializeOwned,
	{
		const KIND: CallKind = CallKind::Request;

		let span = CallSpan::new(KIND, "request");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span.instrument(self.execute(endpoint, &options, retry)).await;

		record_result(KIND, &result);

		result
	}

	/// Uploads a multipart form and decodes the body as `T`.
	///
	/// Uploads attach the bearer token and normalize errors like [`ApiClient::request`], but a
	/// 401 is surfaced directly instead of triggering a refresh.
	pub async fn upload<T>(&self, endpoint: &str, upload: MultipartUpload) -> Result<Option<T>>
	where
		T: DeserializeOwned,
	{
		const KIND: CallKind = CallKind::Upload;

		let span = CallSpan::new(KIND, "upload");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let options = RequestOptions::post().multipart(upload);
		let result = span
			.instrument(async {
				let response = self.dispatch(endpoint, &options).await?;

				response::decode(response)
			})
			.await;

		record_result(KIND, &result);

		result
	}

	async fn execute<T>(
		&self,
		endpoint: &str,
		options: &RequestOptions,
		retry: Retry,
	) -> Result<Option<T>>
	where
		T: DeserializeOwned,
	{
		let response = self.dispatch(endpoint, options).await?;

		if response.status != StatusCode::UNAUTHORIZED || retry == Retry::Exhausted {
			return response::decode(response);
		}

		match self.refresh_tokens().await {
			Ok(_) => {
				obs::debug_retrying_with_fresh_token(endpoint);
				self.refresh_metrics.record_retry();

				let retried = self.dispatch(endpoint, options).await?;

				response::decode(retried)
			},
			Err(err) => Err(self.expire_session(err).await),
		}
	}

	/// Resolves the URL, merges headers, and hands the request to the transport.
	pub(crate) async fn dispatch(
		&self,
		endpoint: &str,
		options: &RequestOptions,
	) -> Result<RawResponse> {
		let mut url = self.config.endpoint_url(endpoint)?;

		if !options.query.is_empty() {
			url.query_pairs_mut().extend_pairs(options.query.iter());
		}

		let token = self.store.load_access_token().await?;
		let headers = merge_headers(options, token.as_ref())?;
		let request = ApiRequest {
			method: options.method.clone(),
			url,
			headers,
			body: options.body.clone(),
		};

		Ok(self.transport.execute(request).await?)
	}
}
#[cfg(feature = "reqwest")]
impl ApiClient<ReqwestTransport> {
	/// Creates a client backed by a default reqwest transport.
	pub fn new(store: Arc<dyn TokenStore>, config: ClientConfig) -> Self {
		Self::with_transport(store, config, ReqwestTransport::default())
	}

	/// Creates a reqwest-backed client whose base URL comes from the environment.
	pub fn from_env(store: Arc<dyn TokenStore>) -> Result<Self> {
		Ok(Self::new(store, ClientConfig::from_env()?))
	}
}
impl<C> Clone for ApiClient<C>
where
	C: ?Sized + ApiTransport,
{
	fn clone(&self) -> Self {
		Self {
			transport: self.transport.clone(),
			store: self.store.clone(),
			config: self.config.clone(),
			refresh_metrics: self.refresh_metrics.clone(),
		}
	}
}
impl<C> Debug for ApiClient<C>
where
	C: ?Sized + ApiTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiClient")
			.field("base_url", &self.config.base_url.as_str())
			.field("refresh_metrics", &self.refresh_metrics)
			.finish()
	}
}

/// Applies JSON defaults where the caller left a header unset, then the bearer token.
pub(crate) fn merge_headers(
	options: &RequestOptions,
	token: Option<&TokenSecret>,
) -> Result<HeaderMap, ConfigError> {
	let mut headers = options.headers.clone();

	if !options.body.is_multipart() {
		headers.entry(CONTENT_TYPE).or_insert(HeaderValue::from_static(JSON));
	}

	headers.entry(ACCEPT).or_insert(HeaderValue::from_static(JSON));

	if let Some(token) = token {
		// `insert` drops every caller value so exactly one credential is sent.
		headers.insert(AUTHORIZATION, token.bearer_header()?);
	}

	Ok(headers)
}

fn record_result<T>(kind: CallKind, result: &Result<T>) {
	obs::record_call_outcome(kind, CallOutcome::of(result));
}
