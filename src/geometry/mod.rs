pub mod connector;
pub mod dash_color;
pub mod dotted;
pub mod drawing;
pub mod segmented;

pub use self::connector::{ConnectorGeometryCache, RoadNetwork};
pub use self::dash_color::{DashColorAlternator, DashState, DottedContourType};
pub use self::dotted::{DottedContourBuilder, Segment, MAXIMUM_DOTTED_GEOMETRY_LENGTH};
pub use self::drawing::LaneOutline;
pub use self::segmented::SegmentedGeometry;
