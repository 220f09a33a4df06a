pub mod calibration;
pub mod filter;
pub mod input;
pub mod locate;
pub mod output;
pub mod threshold;

use opencv::core::{Mat, Point2f};

use crate::error::Result;
use crate::modules::calibration::PointerEvent;

/// One object found in a frame: the minimal enclosing circle of a contour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackedCircle {
	pub center: Point2f,
	pub radius: f32,
}

/// What the user asked for during the last poll.
#[derive(Debug, Default, PartialEq)]
pub struct Control {
	pub events: Vec<PointerEvent>,
	pub quit: bool,
}

pub trait InputModule {
	/// Next frame, or `None` once the stream is exhausted.
	fn run(&mut self) -> Result<Option<Mat>>;
}

pub trait FilterModule {
	/// `true` keeps the object.
	fn run(&mut self, object: &TrackedCircle) -> bool;
}

pub trait OutputModule {
	fn run(&mut self, frame: &Mat, mask: &Mat) -> Result<()>;
}

pub trait ControlModule {
	/// Waits up to `delay_ms` for input and drains whatever arrived.
	fn poll(&mut self, delay_ms: i32) -> Result<Control>;
}
