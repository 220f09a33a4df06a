//! One frame's worth of work: threshold, denoise, locate, annotate.

use log::debug;
use opencv::core::{self, Mat};
use opencv::prelude::*;

use crate::config::{Mode, VisionSettings};
use crate::error::Result;
use crate::modules::calibration::{CalibrationGesture, CalibrationOutcome, PointerEvent};
use crate::modules::filter::{MinRadius, NoiseSuppressor};
use crate::modules::locate::ObjectLocator;
use crate::modules::output::overlay;
use crate::modules::threshold::{SimpleColor, ThresholdRange};
use crate::modules::TrackedCircle;

pub struct FrameResult {
	/// Copy of the input with circles (and the live selection) drawn on it.
	pub annotated: Mat,
	/// Denoised threshold mask.
	pub mask: Mat,
	pub circles: Vec<TrackedCircle>,
	pub calibration: CalibrationOutcome,
}

pub struct Pipeline {
	mode: Mode,
	range: ThresholdRange,
	gesture: CalibrationGesture,
	color: SimpleColor,
	suppressor: NoiseSuppressor,
	locator: ObjectLocator,
	show_fps: bool,
}

impl Pipeline {
	pub fn new(settings: &VisionSettings) -> Result<Self> {
		Ok(Self {
			mode: settings.mode,
			range: settings.range,
			gesture: CalibrationGesture::new(),
			color: SimpleColor::new(),
			suppressor: NoiseSuppressor::new(settings.erode_size, settings.dilate_size, settings.morph_iterations)?,
			locator: ObjectLocator::new(settings.max_objects).with_filter(MinRadius::new(settings.min_radius)),
			show_fps: settings.show_fps,
		})
	}

	pub fn mode(&self) -> Mode {
		self.mode
	}

	pub fn range(&self) -> ThresholdRange {
		self.range
	}

	pub fn gesture(&self) -> &CalibrationGesture {
		&self.gesture
	}

	/// Pointer input only means something in interactive mode.
	pub fn handle_event(&mut self, event: PointerEvent) {
		if self.mode == Mode::Interactive {
			self.gesture.handle(event, &mut self.range);
		}
	}

	/// Fixed mode always tracks; interactive mode starts after the first selection.
	pub fn tracking_enabled(&self) -> bool {
		match self.mode {
			Mode::Fixed => true,
			Mode::Interactive => self.gesture.tracking_enabled(),
		}
	}

	pub fn process(&mut self, frame: &Mat) -> Result<FrameResult> {
		let e1 = core::get_tick_count()?;

		let hsv = self.color.to_hsv(frame)?;
		let calibration = match self.mode {
			Mode::Interactive => self.gesture.calibrate(&hsv, &mut self.range)?,
			Mode::Fixed => CalibrationOutcome::NotPending,
		};

		let raw = self.color.mask(&hsv, &self.range)?;
		let mask = self.suppressor.run(&raw)?;

		let mut annotated = frame.try_clone()?;
		let circles = if self.tracking_enabled() {
			let circles = self.locator.run(&mask)?;
			overlay::draw_circles(&mut annotated, &circles)?;
			circles
		} else {
			Vec::new()
		};
		debug!("{} object(s) in frame", circles.len());

		if let Some((from, to)) = self.gesture.preview() {
			overlay::draw_selection(&mut annotated, from, to)?;
		}

		if self.show_fps {
			let e2 = core::get_tick_count()?;
			let fps = 1. / ((e2 - e1).max(1) as f64 / core::get_tick_frequency()?);
			overlay::draw_fps(&mut annotated, fps)?;
		}

		Ok(FrameResult {
			annotated,
			mask,
			circles,
			calibration,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use opencv::core::{Point, Scalar, CV_8UC3};

	fn frame() -> Mat {
		Mat::new_rows_cols_with_default(60, 80, CV_8UC3, Scalar::new(0., 0., 255., 0.)).unwrap()
	}

	#[test]
	fn fixed_mode_ignores_pointer_events() {
		let mut pipeline = Pipeline::new(&VisionSettings::defaults(Mode::Fixed)).unwrap();
		let before = pipeline.range();

		pipeline.handle_event(PointerEvent::Reset);
		pipeline.handle_event(PointerEvent::Press(Point::new(1, 1)));
		assert_eq!(pipeline.range(), before);
		assert!(!pipeline.gesture().is_dragging());
		assert!(pipeline.tracking_enabled());
	}

	#[test]
	fn interactive_mode_waits_for_a_selection() {
		let mut pipeline = Pipeline::new(&VisionSettings::defaults(Mode::Interactive)).unwrap();
		assert!(!pipeline.tracking_enabled());

		let result = pipeline.process(&frame()).unwrap();
		assert!(result.circles.is_empty());
		assert_eq!(result.calibration, CalibrationOutcome::NotPending);
		// full range: every pixel is foreground
		assert_eq!(core::count_non_zero(&result.mask).unwrap(), 60 * 80);
	}

	#[test]
	fn annotated_frame_is_a_copy() {
		let mut pipeline = Pipeline::new(&VisionSettings::defaults(Mode::Interactive)).unwrap();
		let input = frame();
		pipeline.handle_event(PointerEvent::Press(Point::new(5, 5)));
		pipeline.handle_event(PointerEvent::Move(Point::new(20, 20)));

		let result = pipeline.process(&input).unwrap();
		let drawn = *result.annotated.at_2d::<core::Vec3b>(5, 5).unwrap();
		let original = *input.at_2d::<core::Vec3b>(5, 5).unwrap();
		assert_eq!((drawn[0], drawn[1], drawn[2]), (0, 255, 0));
		assert_eq!((original[0], original[1], original[2]), (0, 0, 255));
	}
}
