pub mod chart;
pub mod compare;
pub mod rules;
pub mod warnings;

pub use chart::{SizeChart, SizeEntry};
pub use compare::{compare_size, FitStatus, RatioComparison, SizeComparison, FIT_TOLERANCE};
pub use rules::{recommend_size, SizeLabel};
pub use warnings::fit_warnings;
