use crate::modules::FilterModule;
use crate::modules::TrackedCircle;

/// Drops circles smaller than `min`, which are mostly leftover speckle.
pub struct MinRadius {
	min: f32,
}

impl FilterModule for MinRadius {
	fn run(&mut self, object: &TrackedCircle) -> bool {
		object.radius >= self.min
	}
}

impl MinRadius {
	pub fn new(min: f32) -> Self {
		Self { min }
	}
}
