// std
use std::sync::atomic::{AtomicU64, Ordering};
// self
use crate::{_prelude::*, auth::Token, obs::CallOutcome};

/// In-process counters of client-credentials exchanges, always on.
#[derive(Debug, Default)]
pub struct ExchangeMetrics {
	counters: [AtomicU64; 3],
	last_minted_at: Mutex<Option<OffsetDateTime>>,
}
impl ExchangeMetrics {
	/// Exchanges sent to the token endpoint.
	pub fn attempts(&self) -> u64 {
		self.count(CallOutcome::Attempt)
	}

	/// Exchanges that minted a token.
	pub fn successes(&self) -> u64 {
		self.count(CallOutcome::Success)
	}

	/// Exchanges that failed.
	pub fn failures(&self) -> u64 {
		self.count(CallOutcome::Failure)
	}

	/// Completion instant of the latest successful exchange.
	pub fn last_minted_at(&self) -> Option<OffsetDateTime> {
		*self.last_minted_at.lock()
	}

	pub(crate) fn record(&self, outcome: CallOutcome) {
		self.counters[Self::slot(outcome)].fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_minted(&self, token: &Token) {
		self.record(CallOutcome::Success);

		*self.last_minted_at.lock() = Some(token.issued_at);
	}

	fn count(&self, outcome: CallOutcome) -> u64 {
		self.counters[Self::slot(outcome)].load(Ordering::Relaxed)
	}

	const fn slot(outcome: CallOutcome) -> usize {
		match outcome {
			CallOutcome::Attempt => 0,
			CallOutcome::Success => 1,
			CallOutcome::Failure => 2,
		}
	}
}
