use opencv::core::{self, Mat, Point, Size};
use opencv::imgproc;

use crate::error::Result;

/// Erodes with a small rectangle, then dilates with a larger one.
///
/// Erosion clears isolated speckle; dilation closes the gaps it leaves in the
/// blobs that survive.
pub struct NoiseSuppressor {
	erode_kernel: Mat,
	dilate_kernel: Mat,
	iterations: i32,
}

impl NoiseSuppressor {
	pub fn new(erode_size: i32, dilate_size: i32, iterations: i32) -> Result<Self> {
		let anchor = Point::new(-1, -1);
		Ok(Self {
			erode_kernel: imgproc::get_structuring_element(imgproc::MORPH_RECT, Size::new(erode_size, erode_size), anchor)?,
			dilate_kernel: imgproc::get_structuring_element(imgproc::MORPH_RECT, Size::new(dilate_size, dilate_size), anchor)?,
			iterations,
		})
	}

	pub fn run(&self, mask: &Mat) -> Result<Mat> {
		let anchor = Point::new(-1, -1);
		let border = imgproc::morphology_default_border_value()?;

		let mut eroded = Mat::default();
		imgproc::erode(mask, &mut eroded, &self.erode_kernel, anchor, self.iterations, core::BORDER_CONSTANT, border)?;

		let mut dilated = Mat::default();
		imgproc::dilate(&eroded, &mut dilated, &self.dilate_kernel, anchor, self.iterations, core::BORDER_CONSTANT, border)?;

		Ok(dilated)
	}
}
