mod range;
mod simplecolor;

pub use range::ThresholdRange;
pub use simplecolor::{ColorMasks, SimpleColor};
