pub mod detector;
pub mod landmark;
#[cfg(feature = "desktop")]
pub mod preprocess;

pub use detector::{PoseDetector, DEFAULT_PRESENCE_THRESHOLD, LANDMARKER_INPUT_SIZE};
pub use landmark::{Landmark, LandmarkIndex, LandmarkSet};
#[cfg(feature = "desktop")]
pub use preprocess::preprocess_for_landmarker;
