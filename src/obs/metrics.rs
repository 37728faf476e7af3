//! Counters behind the `metrics` feature. Both functions compile to no-ops without it.

// self
use crate::obs::{CallKind, CallOutcome};

/// Bumps `paypal_rest_call_total{call,outcome}`.
pub fn record_call_outcome(kind: CallKind, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	metrics::counter!(
		"paypal_rest_call_total",
		"call" => kind.as_str(),
		"outcome" => outcome.as_str()
	)
	.increment(1);
	#[cfg(not(feature = "metrics"))]
	let _ = (kind, outcome);
}

/// Bumps `paypal_rest_api_responses_total{method,status_class}` once per PayPal response.
pub fn record_api_response(method: &str, status: u16) {
	#[cfg(feature = "metrics")]
	metrics::counter!(
		"paypal_rest_api_responses_total",
		"method" => method.to_owned(),
		"status_class" => status_class(status)
	)
	.increment(1);
	#[cfg(not(feature = "metrics"))]
	let _ = (method, status);
}

fn status_class(status: u16) -> &'static str {
	match status {
		100..=199 => "1xx",
		200..=299 => "2xx",
		300..=399 => "3xx",
		400..=499 => "4xx",
		500..=599 => "5xx",
		_ => "other",
	}
}
