pub mod analysis;
#[cfg(feature = "desktop")]
pub mod camera;
pub mod clothing;
pub mod config;
pub mod pose;
pub mod protocol;
#[cfg(feature = "desktop")]
pub mod render;
pub mod scan;
