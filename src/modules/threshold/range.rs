use opencv::core::Scalar;

/// Inclusive HSV bounds, indexed H, S, V.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThresholdRange {
	pub lower: [u8; 3],
	pub upper: [u8; 3],
}

impl ThresholdRange {
	pub const fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
		Self { lower, upper }
	}

	/// Every HSV value passes.
	pub const fn full() -> Self {
		Self::new([0, 0, 0], [255, 255, 255])
	}

	pub fn reset(&mut self) {
		*self = Self::full();
	}

	pub fn contains(&self, h: u8, s: u8, v: u8) -> bool {
		h >= self.lower[0]
			&& h <= self.upper[0]
			&& s >= self.lower[1]
			&& s <= self.upper[1]
			&& v >= self.lower[2]
			&& v <= self.upper[2]
	}

	pub fn lower_scalar(&self) -> Scalar {
		Scalar::new(self.lower[0] as f64, self.lower[1] as f64, self.lower[2] as f64, 0.)
	}

	pub fn upper_scalar(&self) -> Scalar {
		Scalar::new(self.upper[0] as f64, self.upper[1] as f64, self.upper[2] as f64, 0.)
	}
}

impl Default for ThresholdRange {
	fn default() -> Self {
		Self::full()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn full_range_contains_everything() {
		let range = ThresholdRange::full();
		assert!(range.contains(0, 0, 0));
		assert!(range.contains(255, 255, 255));
		assert!(range.contains(90, 12, 200));
	}

	#[test]
	fn bounds_are_inclusive() {
		let range = ThresholdRange::new([70, 200, 50], [100, 255, 255]);
		assert!(range.contains(70, 200, 50));
		assert!(range.contains(100, 255, 255));
		assert!(!range.contains(69, 220, 100));
		assert!(!range.contains(101, 220, 100));
		assert!(!range.contains(80, 199, 100));
		assert!(!range.contains(80, 220, 49));
	}

	#[test]
	fn reset_restores_full_range() {
		let mut range = ThresholdRange::new([3, 4, 5], [6, 7, 8]);
		range.reset();
		assert_eq!(range, ThresholdRange::full());
	}
}
