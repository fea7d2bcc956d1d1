#[cfg(feature = "perf-stats")]
mod real_impl;
#[cfg(feature = "perf-stats")]
pub use self::real_impl::{finish_frame, measure, start_frame, Measurer, PerfStats};

#[cfg(not(feature = "perf-stats"))]
mod dummy_impl;
#[cfg(not(feature = "perf-stats"))]
pub use self::dummy_impl::{finish_frame, measure, start_frame, Measurer, PerfStats};
