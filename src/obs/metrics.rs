// self
use crate::obs::{CallKind, CallOutcome};

/// Counter incremented once per call stage, labeled by `call` and `outcome`.
pub const CALL_TOTAL: &str = "social_api_client_call_total";
/// Counter incremented whenever a failed refresh clears the stored credentials.
pub const SESSION_EXPIRED_TOTAL: &str = "social_api_client_session_expired_total";

/// Records a call outcome via the global metrics recorder (when enabled).
pub fn record_call_outcome(kind: CallKind, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	metrics::counter!(CALL_TOTAL, "call" => kind.as_str(), "outcome" => outcome.as_str())
		.increment(1);

	#[cfg(not(feature = "metrics"))]
	let _ = (kind, outcome);
}

/// Records a session teardown via the global metrics recorder (when enabled).
pub fn record_session_expired() {
	#[cfg(feature = "metrics")]
	metrics::counter!(SESSION_EXPIRED_TOTAL).increment(1);
}
