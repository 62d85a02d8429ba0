// self
use crate::{
	_prelude::*,
	obs::{FlowKind, FlowOutcome, record_flow_outcome},
};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedFlow<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedFlow<F> = F;

/// Span + outcome recorder wrapping one client operation.
///
/// [`start`](Self::start) records the attempt, [`finish`](Self::finish) records how it
/// ended. Both go to the metrics counter; failures also emit a `warn` event inside the
/// span when tracing is enabled.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	kind: FlowKind,
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl FlowSpan {
	/// Opens a span tagged with the flow kind + stage and records the attempt.
	pub fn start(kind: FlowKind, stage: &'static str) -> Self {
		record_flow_outcome(kind, FlowOutcome::Attempt);

		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("oauth2_benevaut.flow", flow = kind.as_str(), stage);

			Self { kind, span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = stage;

			Self { kind }
		}
	}

	/// Flow kind this span was opened for.
	pub fn kind(&self) -> FlowKind {
		self.kind
	}

	/// Enters the span for synchronous sections.
	pub fn entered(&self) -> FlowSpanGuard {
		#[cfg(feature = "tracing")]
		{
			FlowSpanGuard { guard: self.span.clone().entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			FlowSpanGuard {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedFlow<Fut>
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

	/// Records the outcome of `result` and hands it back untouched.
	pub fn finish<T, E>(&self, result: Result<T, E>) -> Result<T, E>
	where
		E: Display,
	{
		match &result {
			Ok(_) => record_flow_outcome(self.kind, FlowOutcome::Success),
			Err(_e) => {
				#[cfg(feature = "tracing")]
				self.span.in_scope(|| tracing::warn!(error = %_e, "flow failed"));

				record_flow_outcome(self.kind, FlowOutcome::Failure);
			},
		}

		result
	}
}

/// RAII guard returned by [`FlowSpan::entered`].
pub struct FlowSpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for FlowSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("FlowSpanGuard(..)")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn entered_guard_formats_opaquely() {
		let span = FlowSpan::start(FlowKind::TokenExchange, "entered_guard");
		let guard = span.entered();

		assert_eq!(format!("{guard:?}"), "FlowSpanGuard(..)");
		assert_eq!(span.kind(), FlowKind::TokenExchange);
	}

	#[tokio::test]
	async fn instrument_and_finish_preserve_output() {
		let span = FlowSpan::start(FlowKind::ResourceOwner, "instrument_and_finish");
		let value = span.instrument(async { Ok::<_, String>(42) }).await;

		assert_eq!(span.finish(value), Ok(42));
		assert_eq!(span.finish::<(), _>(Err("boom".to_owned())), Err("boom".to_owned()));
	}
}
