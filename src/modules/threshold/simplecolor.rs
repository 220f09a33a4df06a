use opencv::core::{self, Mat};
use opencv::imgproc;

use crate::error::Result;
use crate::modules::threshold::ThresholdRange;

/// HSV conversion of a frame together with its threshold mask.
pub struct ColorMasks {
	pub hsv: Mat,
	pub mask: Mat,
}

/// Color filter: BGR frame to HSV, HSV to a 0/255 single channel mask.
#[derive(Default)]
pub struct SimpleColor;

impl SimpleColor {
	pub fn new() -> Self {
		Self
	}

	pub fn to_hsv(&self, frame: &Mat) -> Result<Mat> {
		let mut hsv = Mat::default();
		imgproc::cvt_color_def(frame, &mut hsv, imgproc::COLOR_BGR2HSV)?;
		Ok(hsv)
	}

	pub fn mask(&self, hsv: &Mat, range: &ThresholdRange) -> Result<Mat> {
		let mut mask = Mat::default();
		core::in_range(hsv, &range.lower_scalar(), &range.upper_scalar(), &mut mask)?;
		Ok(mask)
	}

	pub fn run(&self, frame: &Mat, range: &ThresholdRange) -> Result<ColorMasks> {
		let hsv = self.to_hsv(frame)?;
		let mask = self.mask(&hsv, range)?;
		Ok(ColorMasks { hsv, mask })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use opencv::core::{Rect, Scalar, Vec3b, CV_8UC3};
	use opencv::prelude::*;

	fn solid(rows: i32, cols: i32, bgr: (f64, f64, f64)) -> Mat {
		Mat::new_rows_cols_with_default(rows, cols, CV_8UC3, Scalar::new(bgr.0, bgr.1, bgr.2, 0.)).unwrap()
	}

	#[test]
	fn hsv_of_pure_red_is_zero_hue() {
		let frame = solid(4, 4, (0., 0., 255.));
		let hsv = SimpleColor::new().to_hsv(&frame).unwrap();
		let px = *hsv.at_2d::<Vec3b>(1, 1).unwrap();
		assert_eq!((px[0], px[1], px[2]), (0, 255, 255));
	}

	#[test]
	fn mask_marks_only_pixels_in_range() {
		let mut frame = solid(20, 20, (0., 0., 0.));
		imgproc::rectangle(&mut frame, Rect::new(5, 5, 4, 3), Scalar::new(170., 255., 0., 0.), imgproc::FILLED, imgproc::LINE_8, 0).unwrap();

		let range = ThresholdRange::new([70, 200, 50], [100, 255, 255]);
		let out = SimpleColor::new().run(&frame, &range).unwrap();

		assert_eq!(out.mask.typ(), core::CV_8UC1);
		assert_eq!(core::count_non_zero(&out.mask).unwrap(), 12);
		assert_eq!(*out.mask.at_2d::<u8>(6, 6).unwrap(), 255);
		assert_eq!(*out.mask.at_2d::<u8>(0, 0).unwrap(), 0);
	}

	#[test]
	fn full_range_selects_everything() {
		let frame = solid(8, 6, (12., 200., 31.));
		let out = SimpleColor::new().run(&frame, &ThresholdRange::full()).unwrap();
		assert_eq!(core::count_non_zero(&out.mask).unwrap(), 48);
	}
}
