use std::path::Path;

use log::info;
use opencv::core::{Mat, Size};
use opencv::prelude::*;
use opencv::videoio::VideoWriter;

use crate::error::{Result, TrackerError};
use crate::modules::OutputModule;

/// Appends annotated frames to a video file.
pub struct VideoRecorder {
	writer: VideoWriter,
}

impl OutputModule for VideoRecorder {
	fn run(&mut self, frame: &Mat, _mask: &Mat) -> Result<()> {
		self.writer.write(frame)?;
		Ok(())
	}
}

impl VideoRecorder {
	pub fn open(path: &Path, fourcc: [char; 4], fps: f64, size: Size) -> Result<Self> {
		let code = VideoWriter::fourcc(fourcc[0], fourcc[1], fourcc[2], fourcc[3])?;
		let writer = VideoWriter::new(&path.to_string_lossy(), code, fps, size, true)?;
		if !writer.is_opened()? {
			return Err(TrackerError::VideoOpen { path: path.to_path_buf() });
		}

		info!("recording {}x{} at {} fps to {}", size.width, size.height, fps, path.display());
		Ok(Self { writer })
	}
}
