//! Per-client counters for the refresh-and-retry path.

// std
use std::sync::atomic::{AtomicU64, Ordering::Relaxed};

/// Point-in-time copy of [`RefreshMetrics`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RefreshStats {
	/// Refresh exchanges started.
	pub attempts: u64,
	/// Exchanges that stored a new pair.
	pub successes: u64,
	/// Exchanges that failed for any reason.
	pub failures: u64,
	/// Original requests re-issued after a successful refresh.
	pub retries: u64,
	/// Sessions torn down (tokens cleared) after a failed refresh.
	pub expired_sessions: u64,
}

/// Counters shared by every clone of a client.
#[derive(Debug, Default)]
pub struct RefreshMetrics {
	attempts: AtomicU64,
	successes: AtomicU64,
	failures: AtomicU64,
	retries: AtomicU64,
	expired_sessions: AtomicU64,
}
impl RefreshMetrics {
	/// Refresh exchanges started.
	pub fn attempts(&self) -> u64 {
		self.attempts.load(Relaxed)
	}

	/// Exchanges that stored a new pair.
	pub fn successes(&self) -> u64 {
		self.successes.load(Relaxed)
	}

	/// Exchanges that failed.
	pub fn failures(&self) -> u64 {
		self.failures.load(Relaxed)
	}

	/// Copies every counter at once.
	pub fn snapshot(&self) -> RefreshStats {
		RefreshStats {
			attempts: self.attempts(),
			successes: self.successes(),
			failures: self.failures(),
			retries: self.retries.load(Relaxed),
			expired_sessions: self.expired_sessions.load(Relaxed),
		}
	}

	pub(crate) fn record_attempt(&self) {
		self.attempts.fetch_add(1, Relaxed);
	}

	pub(crate) fn record_exchange<T, E>(&self, result: &Result<T, E>) {
		let counter = if result.is_ok() { &self.successes } else { &self.failures };

		counter.fetch_add(1, Relaxed);
	}

	pub(crate) fn record_retry(&self) {
		self.retries.fetch_add(1, Relaxed);
	}

	pub(crate) fn record_expired_session(&self) {
		self.expired_sessions.fetch_add(1, Relaxed);
	}
}
