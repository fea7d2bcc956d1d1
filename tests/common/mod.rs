#![allow(dead_code)]

extern crate netgeom;

use netgeom::geom::{Position, PositionVector};
use netgeom::geometry::RoadNetwork;
use std::path::PathBuf;

pub fn get_test_path(relative_path: &[&str]) -> String {
    let mut test_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    test_path.push("tests");
    for component in relative_path {
        test_path.push(component);
    }

    test_path.to_str().unwrap().to_string()
}

pub fn shape(points: &[(f64, f64)]) -> PositionVector {
    PositionVector::from(points.to_vec())
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {}, got {}",
        expected,
        actual
    );
}

pub fn assert_same_position(actual: &Position, expected: &Position) {
    assert!(
        actual.distance_to_2d(expected) < 1e-6,
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}

pub const LANE_WIDTH: f64 = 3.2;

pub struct MockLane {
    pub shape: PositionVector,
    pub edge: usize,
}

/// A single junction at the origin. Edge 0 comes in from the west, edges
/// 1, 2 and 3 leave it to the east, to the north and back to the west.
pub struct MockNetwork {
    pub lanes: Vec<MockLane>,
    pub edges: Vec<Vec<usize>>,
    pub junction_area: f64,
}

pub const INCOMING_EDGE: usize = 0;
pub const TURNAROUND_EDGE: usize = 3;

impl MockNetwork {
    pub fn junction(incoming_lanes: usize, junction_area: f64) -> MockNetwork {
        let mut network = MockNetwork {
            lanes: Vec::new(),
            edges: Vec::new(),
            junction_area,
        };
        network.add_edge(incoming_lanes, |i| {
            let y = -(i as f64) * LANE_WIDTH;
            vec![(-100.0, y), (-10.0, y)]
        });
        network.add_edge(1, |_| vec![(10.0, 0.0), (100.0, 0.0)]);
        network.add_edge(2, |i| {
            let x = i as f64 * LANE_WIDTH;
            vec![(x, 10.0), (x, 100.0)]
        });
        network.add_edge(1, |_| vec![(-10.0, 5.0), (-100.0, 5.0)]);
        network
    }

    pub fn lanes_of(&self, edge: usize) -> &[usize] {
        &self.edges[edge]
    }

    fn add_edge(&mut self, lane_count: usize, lane_points: impl Fn(usize) -> Vec<(f64, f64)>) {
        let edge = self.edges.len();
        let mut lane_ids = Vec::new();
        for i in 0..lane_count {
            lane_ids.push(self.lanes.len());
            self.lanes.push(MockLane {
                shape: PositionVector::from(lane_points(i)),
                edge,
            });
        }
        self.edges.push(lane_ids);
    }
}

impl RoadNetwork for MockNetwork {
    type LaneId = usize;

    fn lane_shape(&self, lane: usize) -> &PositionVector {
        &self.lanes[lane].shape
    }

    fn lane_border_shape(&self, lane: usize) -> &PositionVector {
        &self.lanes[lane].shape
    }

    fn edge_lane_count(&self, lane: usize) -> usize {
        self.edges[self.lanes[lane].edge].len()
    }

    fn outgoing_lanes(&self, lane: usize) -> Vec<usize> {
        if self.lanes[lane].edge != INCOMING_EDGE {
            return Vec::new();
        }
        self.edges[1..].iter().flatten().cloned().collect()
    }

    fn destination_junction_area(&self, _lane: usize) -> f64 {
        self.junction_area
    }

    fn is_turnaround(&self, from_lane: usize, to_lane: usize) -> bool {
        self.lanes[from_lane].edge == INCOMING_EDGE && self.lanes[to_lane].edge == TURNAROUND_EDGE
    }
}
