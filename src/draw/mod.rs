pub mod backend;
pub mod fill;
pub mod pixels;
pub mod png_writer;
pub mod raster;
pub mod recording;

pub use self::backend::{heading, DrawingBackend};
pub use self::raster::RasterDrawer;
pub use self::recording::{ColoredBoxLine, DrawCall, RecordingDrawer};
