use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use std::time::Instant;

struct PerfStatsElement {
    duration: Duration,
    children: IndexMap<String, Rc<RefCell<PerfStatsElement>>>,
}

type PerfStatsElementRef = Rc<RefCell<PerfStatsElement>>;
type PerfStatsElementStackRef = Rc<RefCell<Vec<PerfStatsElementRef>>>;

impl PerfStatsElement {
    fn create() -> PerfStatsElementRef {
        Rc::new(RefCell::new(PerfStatsElement {
            duration: Duration::default(),
            children: IndexMap::new(),
        }))
    }
}

struct Measurement {
    start_time: Instant,
    element: PerfStatsElementRef,
    element_stack: PerfStatsElementStackRef,
}

/// Adds the time until it is dropped to the current frame. Measurers created
/// outside of a frame measure nothing.
pub struct Measurer {
    measurement: Option<Measurement>,
}

impl Drop for Measurer {
    fn drop(&mut self) {
        if let Some(m) = self.measurement.take() {
            m.element.borrow_mut().duration += Instant::now() - m.start_time;
            m.element_stack.borrow_mut().pop();
        }
    }
}

struct FramePerfStats {
    label: String,
    root_element: PerfStatsElementRef,
    element_stack: PerfStatsElementStackRef,
    start_time: Instant,
}

impl FramePerfStats {
    fn new(label: String) -> FramePerfStats {
        let root = PerfStatsElement::create();
        FramePerfStats {
            label,
            root_element: Rc::clone(&root),
            element_stack: Rc::new(RefCell::new(vec![Rc::clone(&root)])),
            start_time: Instant::now(),
        }
    }

    fn measure(&self, name: impl Into<String>) -> Measurer {
        let mut stack = self.element_stack.borrow_mut();

        let new_element = {
            let name = name.into();
            let mut current_element = match stack.last() {
                Some(current) => current.borrow_mut(),
                None => return Measurer { measurement: None },
            };

            if let Some(existing_child) = current_element.children.get(&name) {
                Rc::clone(existing_child)
            } else {
                let new_child = PerfStatsElement::create();
                current_element.children.insert(name, Rc::clone(&new_child));
                new_child
            }
        };

        stack.push(Rc::clone(&new_element));

        Measurer {
            measurement: Some(Measurement {
                start_time: Instant::now(),
                element: new_element,
                element_stack: Rc::clone(&self.element_stack),
            }),
        }
    }

    fn finalize(&mut self) {
        self.root_element.borrow_mut().duration = Instant::now() - self.start_time;
    }
}

#[derive(Default)]
struct SummedPerfStatsElement {
    duration_sum: Duration,
    children: IndexMap<String, Box<SummedPerfStatsElement>>,
}

impl SummedPerfStatsElement {
    fn add(&mut self, element: &PerfStatsElementRef) {
        self.duration_sum += element.borrow().duration;
        for (other_child_name, other_child) in element.borrow().children.iter() {
            if let Some(our_child) = self.children.get_mut(other_child_name) {
                our_child.add(other_child);
            } else {
                let mut new_child = Box::new(SummedPerfStatsElement::default());
                new_child.add(other_child);
                self.children.insert(other_child_name.clone(), new_child);
            }
        }
    }
}

#[derive(Default)]
struct SummedPerfStats {
    root_element: SummedPerfStatsElement,
    count: u32,
}

/// Timings summed over all finished frames, grouped by frame label.
#[derive(Default)]
pub struct PerfStats {
    stats_by_label: IndexMap<String, SummedPerfStats>,
}

impl PerfStats {
    pub fn new() -> PerfStats {
        Default::default()
    }

    fn add_frame_stats(&mut self, frame_stats: FramePerfStats) {
        let label_stats = self.stats_by_label.entry(frame_stats.label).or_default();
        label_stats.root_element.add(&frame_stats.root_element);
        label_stats.count += 1;
    }

    /// Average time per frame of every measured step, one step per line and
    /// indented by nesting depth.
    pub fn to_text(&self) -> String {
        let mut dump = String::new();
        for (label, label_stats) in self.stats_by_label.iter() {
            dump += &format!("{} ({} frames)\n", label, label_stats.count);
            dump_summed_perf_stats_element("TOTAL", &label_stats.root_element, 0, None, label_stats.count, &mut dump);
        }
        dump
    }
}

fn dump_summed_perf_stats_element(
    current_name: &str,
    current_element: &SummedPerfStatsElement,
    depth: usize,
    parent_duration: Option<Duration>,
    duration_count: u32,
    dump: &mut String,
) {
    let normalized_duration = current_element.duration_sum / duration_count.max(1);
    let percentage = match parent_duration {
        Some(parent_duration) if parent_duration.as_nanos() > 0 => {
            normalized_duration.as_secs_f64() / parent_duration.as_secs_f64()
        }
        _ => 1.0,
    };

    *dump += &format!(
        "{}{}: {:.2}% ({:.3?})\n",
        "\t".repeat(depth),
        current_name,
        100.0 * percentage,
        normalized_duration
    );

    for (child_name, child) in current_element.children.iter() {
        dump_summed_perf_stats_element(
            child_name,
            child,
            depth + 1,
            Some(normalized_duration),
            duration_count,
            dump,
        );
    }
}

thread_local!(static TLS_PERF_STATS: RefCell<Option<FramePerfStats>> = RefCell::new(None));

pub fn start_frame(label: impl Into<String>) {
    TLS_PERF_STATS.with(|stats| stats.borrow_mut().replace(FramePerfStats::new(label.into())));
}

pub fn finish_frame(total_stats: &mut PerfStats) {
    TLS_PERF_STATS.with(|stats| {
        if let Some(mut frame_stats) = stats.borrow_mut().take() {
            frame_stats.finalize();
            total_stats.add_frame_stats(frame_stats);
        }
    });
}

pub fn measure(name: impl Into<String>) -> Measurer {
    TLS_PERF_STATS.with(|stats| match stats.borrow().as_ref() {
        Some(frame_stats) => frame_stats.measure(name),
        None => Measurer { measurement: None },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_measurements() {
        let mut stats = PerfStats::new();
        for _ in 0..2 {
            start_frame("contours");
            {
                let _outer = measure("outer");
                let _inner = measure("inner");
            }
            finish_frame(&mut stats);
        }

        let text = stats.to_text();
        assert!(text.starts_with("contours (2 frames)\n"));
        assert!(text.contains("\n\touter: "));
        assert!(text.contains("\n\t\tinner: "));
    }

    #[test]
    fn test_measure_outside_of_frame() {
        let mut stats = PerfStats::new();
        drop(measure("orphan"));
        finish_frame(&mut stats);
        assert!(stats.to_text().is_empty());
    }
}
