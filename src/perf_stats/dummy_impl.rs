#[derive(Default)]
pub struct PerfStats;
pub struct Measurer;

impl PerfStats {
    pub fn new() -> PerfStats {
        PerfStats
    }

    pub fn to_text(&self) -> String {
        String::from("Built without the perf-stats feature\n")
    }
}

pub fn start_frame(_: impl Into<String>) {}

pub fn finish_frame(_: &mut PerfStats) {}

pub fn measure(_: impl Into<String>) -> Measurer {
    Measurer {}
}
