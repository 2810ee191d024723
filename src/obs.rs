//! Optional observability helpers for client calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` (on by default) to emit structured spans named `social_api_client.call` with
//!   the `call` (kind) and `stage` (call site) fields, plus warning events for refresh failures and
//!   unparsable error bodies.
//! - Enable `metrics` to increment `social_api_client_call_total` for every attempt, success, and
//!   failure (labeled by `call` and `outcome`), and `social_api_client_session_expired_total` each
//!   time stored credentials are dropped.

mod metrics;
mod tracing;

pub use self::{metrics::*, tracing::*};

// self
use crate::_prelude::*;

macro_rules! labels {
	($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident => $label:literal,)+ }) => {
		$(#[$meta])*
		#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
		pub enum $name {
			$($(#[$vmeta])* $variant,)+
		}
		impl $name {
			/// Stable label used for span and metric fields.
			pub const fn as_str(self) -> &'static str {
				match self {
					$(Self::$variant => $label,)+
				}
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(self.as_str())
			}
		}
	};
}

labels! {
	/// Kind of outbound call made by the client.
	CallKind {
		/// Authenticated JSON request.
		Request => "request",
		/// Token refresh exchange.
		Refresh => "refresh",
		/// Multipart media upload.
		Upload => "upload",
	}
}

labels! {
	/// Outcome recorded for a call.
	CallOutcome {
		/// The call was started.
		Attempt => "attempt",
		/// The call completed.
		Success => "success",
		/// The call returned an error to its caller.
		Failure => "failure",
	}
}
impl CallOutcome {
	/// Maps a finished call onto [`CallOutcome::Success`] or [`CallOutcome::Failure`].
	pub fn of<T, E>(result: &Result<T, E>) -> Self {
		if result.is_ok() { Self::Success } else { Self::Failure }
	}
}
