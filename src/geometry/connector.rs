use crate::geom::{compute_smooth_shape, PositionVector};
use crate::geometry::segmented::SegmentedGeometry;

use anyhow::{anyhow, Result};
use indexmap::IndexMap;
use log::debug;
use std::fmt::Debug;
use std::hash::Hash;

const SMOOTH_POINTS: usize = 5;
// Busier edges only get straight connectors.
const MAX_SMOOTHED_LANES: usize = 10;
const MIN_JUNCTION_AREA: f64 = 4.0;

/// The part of the road network model that connector geometry needs.
pub trait RoadNetwork {
    type LaneId: Copy + Eq + Hash + Debug;

    /// Lane shape as displayed.
    fn lane_shape(&self, lane: Self::LaneId) -> &PositionVector;
    /// Lane shape as produced by the network builder; connectors are smoothed
    /// between these.
    fn lane_border_shape(&self, lane: Self::LaneId) -> &PositionVector;
    fn edge_lane_count(&self, lane: Self::LaneId) -> usize;
    /// Lanes of all edges leaving the junction `lane` flows into, edge by
    /// edge, in network order.
    fn outgoing_lanes(&self, lane: Self::LaneId) -> Vec<Self::LaneId>;
    fn destination_junction_area(&self, lane: Self::LaneId) -> f64;
    /// Whether the edge of `to_lane` is the turnaround of the edge of `from_lane`.
    fn is_turnaround(&self, from_lane: Self::LaneId, to_lane: Self::LaneId) -> bool;

    fn smooth_shape(
        &self,
        from_shape: &PositionVector,
        to_shape: &PositionVector,
        num_points: usize,
        is_turnaround: bool,
        extrapolate_begin: f64,
        extrapolate_end: f64,
    ) -> PositionVector {
        compute_smooth_shape(from_shape, to_shape, num_points, is_turnaround, extrapolate_begin, extrapolate_end)
    }
}

/// Curves from one lane to every lane it could continue into.
pub struct ConnectorGeometryCache<L> {
    from_lane: L,
    connectors: IndexMap<L, SegmentedGeometry>,
}

impl<L: Copy + Eq + Hash + Debug> ConnectorGeometryCache<L> {
    pub fn new(from_lane: L) -> ConnectorGeometryCache<L> {
        ConnectorGeometryCache {
            from_lane,
            connectors: IndexMap::new(),
        }
    }

    pub fn from_lane(&self) -> L {
        self.from_lane
    }

    pub fn rebuild<N: RoadNetwork<LaneId = L>>(&mut self, network: &N) {
        let _m = crate::perf_stats::measure("Connector rebuild");

        let from = self.from_lane;
        let from_lane_count = network.edge_lane_count(from);
        let smooth = from_lane_count <= MAX_SMOOTHED_LANES && network.destination_junction_area(from) > MIN_JUNCTION_AREA;

        self.connectors.clear();
        for to in network.outgoing_lanes(from) {
            let shape = if smooth {
                network.smooth_shape(
                    network.lane_border_shape(from),
                    network.lane_border_shape(to),
                    SMOOTH_POINTS,
                    network.is_turnaround(from, to),
                    (SMOOTH_POINTS * from_lane_count) as f64,
                    (SMOOTH_POINTS * network.edge_lane_count(to)) as f64,
                )
            } else {
                straight_connector(network.lane_shape(from), network.lane_shape(to))
            };
            self.connectors.entry(to).or_default().update_whole_shape(shape);
        }

        debug!(
            "Rebuilt {} {} connectors from lane {:?}",
            self.connectors.len(),
            if smooth { "smooth" } else { "straight" },
            from
        );
    }

    pub fn exists(&self, to_lane: L) -> bool {
        self.connectors.contains_key(&to_lane)
    }

    pub fn get(&self, to_lane: L) -> Result<&SegmentedGeometry> {
        self.connectors
            .get(&to_lane)
            .ok_or_else(|| anyhow!("No connector from lane {:?} to lane {:?}", self.from_lane, to_lane))
    }

    pub fn len(&self) -> usize {
        self.connectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connectors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&L, &SegmentedGeometry)> {
        self.connectors.iter()
    }
}

fn straight_connector(from_shape: &PositionVector, to_shape: &PositionVector) -> PositionVector {
    from_shape.last().into_iter().chain(to_shape.first()).cloned().collect()
}
