mod display;
pub mod overlay;
mod video;

pub use display::{is_quit_key, Display};
pub use video::VideoRecorder;
