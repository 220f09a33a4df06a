use std::cmp::Ordering;

use itertools::Itertools;
use opencv::core::{Mat, Point, Point2f, Vector};
use opencv::imgproc;

use crate::error::Result;
use crate::modules::{FilterModule, TrackedCircle};

/// Finds objects in a mask as the enclosing circles of its contours.
pub struct ObjectLocator {
	filters: Vec<Box<dyn FilterModule>>,
	max_objects: usize,
}

impl ObjectLocator {
	/// `max_objects == 0` keeps every circle that passes the filters.
	pub fn new(max_objects: usize) -> Self {
		Self {
			filters: Vec::new(),
			max_objects,
		}
	}

	pub fn with_filter<F: FilterModule + 'static>(mut self, filter: F) -> Self {
		self.filters.push(Box::new(filter));
		self
	}

	pub fn run(&mut self, mask: &Mat) -> Result<Vec<TrackedCircle>> {
		let mut contours = Vector::<Vector<Point>>::new();
		imgproc::find_contours(mask, &mut contours, imgproc::RETR_TREE, imgproc::CHAIN_APPROX_NONE, Point::new(0, 0))?;

		let mut circles = Vec::with_capacity(contours.len());
		for cnt in contours.iter() {
			let mut center = Point2f::default();
			let mut radius = 0f32;
			imgproc::min_enclosing_circle(&cnt, &mut center, &mut radius)?;
			circles.push(TrackedCircle { center, radius });
		}

		for module in self.filters.iter_mut() {
			circles.retain(|obj| module.run(obj));
		}

		if self.max_objects > 0 && circles.len() > self.max_objects {
			circles = circles
				.into_iter()
				.sorted_by(|a, b| b.radius.partial_cmp(&a.radius).unwrap_or(Ordering::Equal))
				.take(self.max_objects)
				.collect();
		}

		Ok(circles)
	}
}
