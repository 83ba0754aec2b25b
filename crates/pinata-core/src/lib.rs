pub mod highlight;
pub mod language;
pub mod layout;
pub mod markers;
pub mod parser;
pub mod state;
pub mod types;

pub use highlight::highlight;
pub use language::{TargetLanguage, UnknownLanguage};
pub use layout::{MarkerBounds, place};
pub use markers::{Marker, MarkerBoard, MarkerState};
pub use parser::parse;
pub use state::ScreenState;
