// self
use crate::{_prelude::*, obs::CallKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// A span builder used by client calls.
#[derive(Clone, Debug)]
pub struct CallSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Creates a new span tagged with the provided call kind + stage.
	pub fn new(kind: CallKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("social_api_client.call", call = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCall<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Logs an error body that was neither JSON nor usable text.
pub fn warn_unparsable_error_body(status: u16, reason: &dyn Display) {
	#[cfg(feature = "tracing")]
	tracing::warn!(status, %reason, "Could not parse error response body as JSON.");

	#[cfg(not(feature = "tracing"))]
	let _ = (status, reason);
}

/// Logs a refresh failure before the session is torn down.
pub fn warn_refresh_failed(reason: &dyn Display) {
	#[cfg(feature = "tracing")]
	tracing::warn!(%reason, "Token refresh failed; clearing stored credentials.");

	#[cfg(not(feature = "tracing"))]
	let _ = reason;
}

/// Logs a store failure that is not propagated to the caller.
pub fn warn_store_cleanup_failed(reason: &dyn Display) {
	#[cfg(feature = "tracing")]
	tracing::warn!(%reason, "Failed to clear stored credentials.");

	#[cfg(not(feature = "tracing"))]
	let _ = reason;
}

/// Logs the decision to retry a request with freshly issued credentials.
pub fn debug_retrying_with_fresh_token(endpoint: &str) {
	#[cfg(feature = "tracing")]
	tracing::debug!(endpoint, "Access token rejected; retrying once with refreshed credentials.");

	#[cfg(not(feature = "tracing"))]
	let _ = endpoint;
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn log_helpers_accept_display_values() {
		warn_unparsable_error_body(502, &"upstream returned html");
		warn_refresh_failed(&"refresh token rejected");
		warn_store_cleanup_failed(&"disk full");
		debug_retrying_with_fresh_token("/threads/feed");
	}

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = CallSpan::new(CallKind::Refresh, "instrument_wraps_future");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}
}
