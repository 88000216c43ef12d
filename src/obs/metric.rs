// std
use std::sync::atomic::{AtomicU64, Ordering};
// self
use crate::obs::CallOutcome;

/// Records a call outcome via the global metrics recorder (when enabled).
pub fn record_call_outcome(endpoint: &str, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"hubspot_sdk_call_total",
			"endpoint" => endpoint.to_owned(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (endpoint, outcome);
	}
}

/// Thread-safe counters shared by every clone of a [`Client`](crate::Client).
#[derive(Debug, Default)]
pub struct CallMetrics {
	dispatched: AtomicU64,
	mocked: AtomicU64,
	transport_calls: AtomicU64,
	failures: AtomicU64,
}
impl CallMetrics {
	/// Returns the number of dispatcher invocations.
	pub fn dispatched(&self) -> u64 {
		self.dispatched.load(Ordering::Relaxed)
	}

	/// Returns the number of calls answered from a mock response.
	pub fn mocked(&self) -> u64 {
		self.mocked.load(Ordering::Relaxed)
	}

	/// Returns the number of requests handed to the transport.
	pub fn transport_calls(&self) -> u64 {
		self.transport_calls.load(Ordering::Relaxed)
	}

	/// Returns the number of calls that ended in an error.
	pub fn failures(&self) -> u64 {
		self.failures.load(Ordering::Relaxed)
	}

	pub(crate) fn record_dispatch(&self) {
		self.dispatched.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_mocked(&self) {
		self.mocked.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_transport_call(&self) {
		self.transport_calls.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_failure(&self) {
		self.failures.fetch_add(1, Ordering::Relaxed);
	}
}
