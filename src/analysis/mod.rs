pub mod averager;
pub mod classify;
pub mod ratios;

pub use averager::{FrameAverager, DEFAULT_MAX_FRAMES};
pub use classify::{classify_arm_type, classify_body_type, ArmType, BodyType};
pub use ratios::{body_ratios, round3, BodyRatios, RatioKind};
