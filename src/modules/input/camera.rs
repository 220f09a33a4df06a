use log::{debug, warn};
use opencv::core::{Mat, Size};
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture};

use crate::error::{Result, TrackerError};
use crate::modules::InputModule;

/// Frames from a local capture device.
pub struct CameraInput {
	cap: VideoCapture,
}

impl InputModule for CameraInput {
	fn run(&mut self) -> Result<Option<Mat>> {
		let mut frame = Mat::default();
		let read = self.cap.read(&mut frame);
		Ok(grabbed_frame(read, frame))
	}
}

/// A failed, empty or undecodable read ends the stream.
fn grabbed_frame(read: opencv::Result<bool>, frame: Mat) -> Option<Mat> {
	match read {
		Ok(true) if !frame.empty() => Some(frame),
		Ok(_) => None,
		Err(e) => {
			debug!("frame read failed: {}", e);
			None
		}
	}
}

impl CameraInput {
	/// Opens device `index`. `width`/`height` are a hint the driver may ignore.
	pub fn open(index: i32, width: i32, height: i32) -> Result<Self> {
		let mut cap = VideoCapture::new(index, videoio::CAP_ANY).map_err(|e| {
			debug!("device {} raised: {}", index, e);
			TrackerError::DeviceOpen { index }
		})?;
		if !cap.is_opened()? {
			return Err(TrackerError::DeviceOpen { index });
		}

		if !cap.set(videoio::CAP_PROP_FRAME_WIDTH, width as f64)? || !cap.set(videoio::CAP_PROP_FRAME_HEIGHT, height as f64)? {
			warn!("device {} did not accept frame size {}x{}", index, width, height);
		}

		let input = Self { cap };
		debug!("opened device {} at {:?}", index, input.frame_size()?);
		Ok(input)
	}

	/// Size the device actually delivers.
	pub fn frame_size(&self) -> Result<Size> {
		Ok(Size::new(
			self.cap.get(videoio::CAP_PROP_FRAME_WIDTH)? as i32,
			self.cap.get(videoio::CAP_PROP_FRAME_HEIGHT)? as i32,
		))
	}
}
