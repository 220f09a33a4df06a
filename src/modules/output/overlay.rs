//! Drawing on the annotated frame.

use opencv::core::{Mat, Point, Scalar};
use opencv::imgproc;
use opencv::prelude::*;

use crate::error::Result;
use crate::modules::TrackedCircle;

const CIRCLE_THICKNESS: i32 = 3;

/// BGR red.
pub fn circle_color() -> Scalar {
	Scalar::new(0., 0., 255., 0.)
}

/// BGR green.
pub fn selection_color() -> Scalar {
	Scalar::new(0., 255., 0., 0.)
}

pub fn draw_circles(frame: &mut Mat, circles: &[TrackedCircle]) -> Result<()> {
	for c in circles {
		let center = Point::new(c.center.x.round() as i32, c.center.y.round() as i32);
		imgproc::circle(frame, center, c.radius as i32, circle_color(), CIRCLE_THICKNESS, imgproc::LINE_8, 0)?;
	}
	Ok(())
}

/// Outline of the rectangle being dragged.
pub fn draw_selection(frame: &mut Mat, from: Point, to: Point) -> Result<()> {
	imgproc::rectangle_points(frame, from, to, selection_color(), 1, imgproc::LINE_8, 0)?;
	Ok(())
}

pub fn draw_fps(frame: &mut Mat, fps: f64) -> Result<()> {
	let origin = Point::new(10, frame.rows() / 8);
	imgproc::put_text(
		frame,
		&format!("{}", fps as usize),
		origin,
		imgproc::FONT_HERSHEY_DUPLEX,
		0.5,
		Scalar::new(255., 255., 0., 0.),
		2,
		imgproc::LINE_8,
		false,
	)?;
	Ok(())
}
