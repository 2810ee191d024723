//! Refresh-token exchange used by the single refresh-and-retry policy.
//!
//! [`ApiClient::refresh_tokens`] posts the stored refresh token to `/auth/refresh` and replaces
//! the stored pair with the response. The request path calls it at most once per originating
//! request; any failure tears the session down through `expire_session`, which clears both
//! tokens and yields [`Error::SessionExpired`].

mod metrics;

pub use metrics::{RefreshMetrics, RefreshStats};

// self
use crate::{
	_prelude::*,
	auth::{RefreshRequest, TokenPair},
	client::{ApiClient, response},
	error::{ConfigError, ParseError},
	http::{ApiTransport, RequestOptions},
	obs::{self, CallKind, CallOutcome, CallSpan},
};

/// Gateway endpoint that exchanges a refresh token for a new pair.
pub const REFRESH_ENDPOINT: &str = "/auth/refresh";

impl<C> ApiClient<C>
where
	C: ?Sized + ApiTransport,
{
	/// Exchanges the stored refresh token for a new pair and persists it.
	///
	/// Fails without any HTTP call when no refresh token is stored. The exchange itself is never
	/// retried.
	pub async fn refresh_tokens(&self) -> Result<TokenPair> {
		const KIND: CallKind = CallKind::Refresh;

		let span = CallSpan::new(KIND, "refresh_tokens");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);
		self.refresh_metrics.record_attempt();

		let result = span.instrument(self.exchange_refresh_token()).await;

		self.refresh_metrics.record_exchange(&result);
		obs::record_call_outcome(KIND, CallOutcome::of(&result));

		result
	}

	async fn exchange_refresh_token(&self) -> Result<TokenPair> {
		let refresh =
			self.store.load_refresh_token().await?.ok_or(ConfigError::MissingRefreshToken)?;
		let options = RequestOptions::post()
			.json(&RefreshRequest { refresh_token: refresh.expose() })?;
		let response = self.dispatch(REFRESH_ENDPOINT, &options).await?;
		let pair = response::decode::<TokenPair>(response)?.ok_or(ParseError::MissingTokenPair)?;

		self.store.save_pair(&pair).await?;

		Ok(pair)
	}

	/// Clears stored credentials after a failed refresh and returns the terminal error.
	pub(crate) async fn expire_session(&self, cause: Error) -> Error {
		obs::warn_refresh_failed(&cause);
		obs::record_session_expired();
		self.refresh_metrics.record_expired_session();

		if let Err(e) = self.store.clear_tokens().await {
			obs::warn_store_cleanup_failed(&e);
		}

		Error::SessionExpired
	}
}
