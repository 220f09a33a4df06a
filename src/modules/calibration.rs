//! Click-and-drag threshold calibration.
//!
//! The gesture is fed one [`PointerEvent`] at a time. Releasing a drag leaves a
//! pending selection rectangle, which [`CalibrationGesture::calibrate`] consumes
//! on the next frame by sampling the HSV pixels beneath it.

use itertools::Itertools;
use log::{debug, info};
use opencv::core::{Mat, Point, Rect, Vec3b};
use opencv::highgui;
use opencv::prelude::*;

use crate::error::Result;
use crate::modules::threshold::ThresholdRange;

const CHANNEL_NAMES: [char; 3] = ['H', 'S', 'V'];

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
	/// Primary button went down.
	Press(Point),
	Move(Point),
	/// Primary button came up.
	Release(Point),
	/// Secondary button: back to the full range.
	Reset,
}

impl PointerEvent {
	/// Maps a highgui mouse callback to an event. Buttons we don't use map to `None`.
	pub fn from_highgui(event: i32, x: i32, y: i32) -> Option<Self> {
		let at = Point::new(x, y);
		match event {
			highgui::EVENT_LBUTTONDOWN => Some(PointerEvent::Press(at)),
			highgui::EVENT_MOUSEMOVE => Some(PointerEvent::Move(at)),
			highgui::EVENT_LBUTTONUP => Some(PointerEvent::Release(at)),
			highgui::EVENT_RBUTTONDOWN => Some(PointerEvent::Reset),
			_ => None,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum GestureState {
	Idle,
	Dragging { origin: Point, current: Point, moved: bool },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CalibrationOutcome {
	/// Nothing to do: no released selection, or a drag is still in progress.
	NotPending,
	/// The selection had no area inside the frame; the range was left alone.
	Rejected(Rect),
	Applied(ThresholdRange),
}

/// Per-channel HSV values sampled from the last selection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CalibrationSamples {
	channels: [Vec<u8>; 3],
}

impl CalibrationSamples {
	pub fn clear(&mut self) {
		for ch in self.channels.iter_mut() {
			ch.clear();
		}
	}

	pub fn push(&mut self, hsv: [u8; 3]) {
		for (ch, value) in self.channels.iter_mut().zip(hsv) {
			ch.push(value);
		}
	}

	pub fn channel(&self, index: usize) -> &[u8] {
		&self.channels[index]
	}

	pub fn len(&self) -> usize {
		self.channels[0].len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Narrows `range` to the sampled min/max. Channels without samples keep their bounds.
	fn apply(&self, range: &mut ThresholdRange) {
		for (index, ch) in self.channels.iter().enumerate() {
			if let Some((min, max)) = ch.iter().copied().minmax().into_option() {
				range.lower[index] = min;
				range.upper[index] = max;
				info!("calibrated {}: min {} max {}", CHANNEL_NAMES[index], min, max);
			}
		}
	}
}

/// Axis-aligned rectangle spanned by two corners, in either order.
pub fn selection_rect(a: Point, b: Point) -> Rect {
	let span = |p: i32, q: i32| i32::try_from(p.abs_diff(q)).unwrap_or(i32::MAX);
	Rect::new(a.x.min(b.x), a.y.min(b.y), span(a.x, b.x), span(a.y, b.y))
}

/// Part of `rect` inside a `cols` x `rows` image. May come back with no area.
fn clip_to_frame(rect: Rect, cols: i32, rows: i32) -> Rect {
	let x0 = rect.x.max(0);
	let y0 = rect.y.max(0);
	let x1 = rect.x.saturating_add(rect.width).min(cols);
	let y1 = rect.y.saturating_add(rect.height).min(rows);
	Rect::new(x0, y0, x1 - x0, y1 - y0)
}

#[derive(Debug)]
pub struct CalibrationGesture {
	state: GestureState,
	pending: Option<Rect>,
	tracking: bool,
	samples: CalibrationSamples,
}

impl Default for CalibrationGesture {
	fn default() -> Self {
		Self::new()
	}
}

impl CalibrationGesture {
	pub fn new() -> Self {
		Self {
			state: GestureState::Idle,
			pending: None,
			tracking: false,
			samples: CalibrationSamples::default(),
		}
	}

	pub fn handle(&mut self, event: PointerEvent, range: &mut ThresholdRange) {
		match (self.state, event) {
			(_, PointerEvent::Reset) => {
				range.reset();
				info!("threshold reset to full range");
			}
			(GestureState::Idle, PointerEvent::Press(at)) => {
				self.state = GestureState::Dragging { origin: at, current: at, moved: false };
			}
			(GestureState::Dragging { origin, .. }, PointerEvent::Move(at)) => {
				self.state = GestureState::Dragging { origin, current: at, moved: true };
			}
			(GestureState::Dragging { origin, current, .. }, PointerEvent::Release(_)) => {
				let rect = selection_rect(origin, current);
				debug!("selection released: {:?}", rect);
				self.pending = Some(rect);
				self.tracking = true;
				self.state = GestureState::Idle;
			}
			_ => {}
		}
	}

	pub fn is_dragging(&self) -> bool {
		matches!(self.state, GestureState::Dragging { .. })
	}

	pub fn pending(&self) -> Option<Rect> {
		self.pending
	}

	/// Corners of the live selection, once the pointer has moved during a drag.
	pub fn preview(&self) -> Option<(Point, Point)> {
		match self.state {
			GestureState::Dragging { origin, current, moved: true } => Some((origin, current)),
			_ => None,
		}
	}

	/// Whether a selection has ever been released.
	pub fn tracking_enabled(&self) -> bool {
		self.tracking
	}

	pub fn samples(&self) -> &CalibrationSamples {
		&self.samples
	}

	/// Consumes the pending selection against `hsv` and narrows `range` to it.
	pub fn calibrate(&mut self, hsv: &Mat, range: &mut ThresholdRange) -> Result<CalibrationOutcome> {
		if self.is_dragging() {
			return Ok(CalibrationOutcome::NotPending);
		}
		let rect = match self.pending.take() {
			Some(rect) => rect,
			None => return Ok(CalibrationOutcome::NotPending),
		};

		self.samples.clear();

		let roi = clip_to_frame(rect, hsv.cols(), hsv.rows());
		if roi.width < 1 || roi.height < 1 {
			info!("Please drag a rectangle, not a line (got {}x{})", roi.width, roi.height);
			return Ok(CalibrationOutcome::Rejected(rect));
		}

		for x in roi.x..roi.x + roi.width {
			for y in roi.y..roi.y + roi.height {
				let px = hsv.at_2d::<Vec3b>(y, x)?;
				self.samples.push([px[0], px[1], px[2]]);
			}
		}

		self.samples.apply(range);
		Ok(CalibrationOutcome::Applied(*range))
	}
}
