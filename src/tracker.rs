use log::info;

use crate::error::Result;
use crate::modules::{ControlModule, InputModule, OutputModule};
use crate::pipeline::Pipeline;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
	EndOfStream,
	Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
	pub frames: u64,
	pub reason: StopReason,
}

/// The main loop: acquire, process, show, record, poll.
pub struct Tracker {
	pipeline: Pipeline,
	poll_delay_ms: i32,
}

impl Tracker {
	pub fn new(pipeline: Pipeline, poll_delay_ms: i32) -> Self {
		Self { pipeline, poll_delay_ms }
	}

	pub fn pipeline(&self) -> &Pipeline {
		&self.pipeline
	}

	/// Runs until the input runs dry or the display reports a quit key.
	pub fn run<I, D>(&mut self, input: &mut I, display: &mut D, sinks: &mut [Box<dyn OutputModule>]) -> Result<RunSummary>
	where
		I: InputModule + ?Sized,
		D: OutputModule + ControlModule + ?Sized,
	{
		let mut frames = 0;

		let reason = loop {
			let frame = match input.run()? {
				Some(frame) => frame,
				None => break StopReason::EndOfStream,
			};

			let result = self.pipeline.process(&frame)?;

			display.run(&result.annotated, &result.mask)?;
			for sink in sinks.iter_mut() {
				sink.run(&result.annotated, &result.mask)?;
			}
			frames += 1;

			let control = display.poll(self.poll_delay_ms)?;
			for event in control.events {
				self.pipeline.handle_event(event);
			}
			if control.quit {
				break StopReason::Quit;
			}
		};

		info!("stopped after {} frames: {:?}", frames, reason);
		Ok(RunSummary { frames, reason })
	}
}
