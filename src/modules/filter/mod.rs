mod minradius;
mod morphology;

pub use minradius::MinRadius;
pub use morphology::NoiseSuppressor;
