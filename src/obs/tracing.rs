// self
use crate::{_prelude::*, obs::CallKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// A span builder used around token exchanges and API requests.
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
			let span = tracing::info_span!(
				"paypal_rest.call",
				call = kind.as_str(),
				stage,
				method = tracing::field::Empty,
				path = tracing::field::Empty,
				status = tracing::field::Empty,
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Fills the `method` and `path` fields once the outbound request is known.
	pub fn record_request(&self, method: &str, path: &str) {
		#[cfg(feature = "tracing")]
		{
			self.span.record("method", method);
			self.span.record("path", path);
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (method, path);
		}
	}

	/// Fills the `status` field once a response arrived.
	pub fn record_status(&self, status: u16) {
		#[cfg(feature = "tracing")]
		{
			self.span.record("status", status);
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = status;
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

/// Emits a debug event inside the current span (when enabled).
pub fn debug_event(kind: CallKind, message: &'static str) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(call = kind.as_str(), "{message}");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, message);
	}
}

/// Emits a debug event describing one request/response pair.
pub fn response_event(kind: CallKind, method: &str, path: &str, status: u16) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(call = kind.as_str(), method, path, status, "response received");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, method, path, status);
	}
}
