//! Observability helpers for API calls and OAuth refreshes.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to wrap every dispatch and refresh in a span named `hubspot_sdk.call`
//!   with `endpoint` and `stage` fields. Log events inside those spans are only emitted when
//!   [`Config::logging`](crate::Config::logging) is on.
//! - Enable `metrics` to increment the `hubspot_sdk_call_total` counter for every
//!   attempt/mock/success/failure, labeled by `endpoint` + `outcome`.
//!
//! [`CallMetrics`] counters are always available on each [`Client`](crate::Client).

mod metric;
mod trace;

pub use metric::*;
pub use trace::*;

// self
use crate::_prelude::*;

/// Endpoint label used for OAuth refresh spans and metrics.
pub const OAUTH_REFRESH: &str = "oauthRefresh";

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to the dispatcher or refresh routine.
	Attempt,
	/// Served from the endpoint's mock response.
	Mocked,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Mocked => "mocked",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
