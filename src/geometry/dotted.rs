use crate::draw::DrawingBackend;
use crate::geom::PositionVector;
use crate::geometry::dash_color::{DashColorAlternator, DottedContourType};
use crate::geometry::segmented::SegmentedGeometry;
use crate::settings::VisualizationSettings;

use log::trace;

/// Shapes longer than this get longer dashes, so that a contour never has
/// more than about twice this many of them.
pub const MAXIMUM_DOTTED_GEOMETRY_LENGTH: f64 = 500.0;

/// One edge of the base polyline, resampled into dash-length pieces.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    geometry: SegmentedGeometry,
    offset: f64,
}

impl Segment {
    fn new(shape: PositionVector, dash_length: f64) -> Segment {
        Segment {
            geometry: SegmentedGeometry::from_shape(shape.resample(dash_length)),
            offset: -1.0,
        }
    }

    pub fn shape(&self) -> &PositionVector {
        self.geometry.shape()
    }

    pub fn rotations(&self) -> &[f64] {
        self.geometry.rotations()
    }

    pub fn lengths(&self) -> &[f64] {
        self.geometry.lengths()
    }

    /// Either `-1` or `1`: which side of the contour this segment belongs to.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    fn move_to_side(&mut self, amount: f64) {
        let mut shape = self.geometry.shape().clone();
        shape.move_to_side(amount);
        self.geometry.update_whole_shape(shape);
    }
}

/// Dashed outline of a polyline, ready to be drawn with alternating colors.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DottedContourBuilder {
    segments: Vec<Segment>,
    width: f64,
}

impl DottedContourBuilder {
    pub fn new() -> DottedContourBuilder {
        Default::default()
    }

    /// Splits `shape` into dashes. With `close`, a shape of more than two
    /// points gets a closing edge back to its first point.
    pub fn from_shape(settings: &VisualizationSettings, shape: &PositionVector, close: bool) -> DottedContourBuilder {
        let _m = crate::perf_stats::measure("Dotted contour from shape");

        let mut shape = shape.clone();
        if close && shape.len() > 2 {
            shape.close_polygon();
        }

        let mut dash_length = settings.dotted_contour.segment_length;
        let total_length = shape.length_2d();
        if total_length > MAXIMUM_DOTTED_GEOMETRY_LENGTH {
            dash_length = total_length / (MAXIMUM_DOTTED_GEOMETRY_LENGTH * 0.5);
        }

        let builder = DottedContourBuilder {
            segments: split_into_segments(&shape, dash_length),
            width: settings.dotted_contour.segment_width,
        };
        trace!(
            "Built a dotted contour of {} segments ({} dashes) with dash length {:.2}",
            builder.segments.len(),
            builder.dash_count(),
            dash_length
        );
        builder
    }

    /// The segments joining two outlines: one between their first points
    /// and/or one between their last points. The last one is on the opposite
    /// side of the first one.
    pub fn from_extremes(
        settings: &VisualizationSettings,
        top: &DottedContourBuilder,
        draw_first_extreme: bool,
        bottom: &DottedContourBuilder,
        draw_last_extreme: bool,
    ) -> DottedContourBuilder {
        let dash_length = settings.dotted_contour.segment_length;
        let mut segments = Vec::new();

        let first_points = top
            .segments
            .first()
            .and_then(|s| s.shape().first())
            .zip(bottom.segments.first().and_then(|s| s.shape().first()));
        if let (true, Some((top_first, bottom_first))) = (draw_first_extreme, first_points) {
            segments.push(Segment::new(PositionVector::from(vec![*top_first, *bottom_first]), dash_length));
        }

        let last_points = top
            .segments
            .last()
            .and_then(|s| s.shape().last())
            .zip(bottom.segments.last().and_then(|s| s.shape().last()));
        if let (true, Some((top_last, bottom_last))) = (draw_last_extreme, last_points) {
            let mut segment = Segment::new(PositionVector::from(vec![*top_last, *bottom_last]), dash_length);
            segment.offset *= -1.0;
            segments.push(segment);
        }

        DottedContourBuilder {
            segments,
            width: settings.dotted_contour.segment_width,
        }
    }

    /// Rebuilds the dashes along a lane, never closing it.
    pub fn update_from_lane_shape(&mut self, settings: &VisualizationSettings, lane_shape: &PositionVector) {
        self.width = settings.dotted_contour.segment_width;
        self.segments = split_into_segments(lane_shape, settings.dotted_contour.segment_length);
    }

    /// Like `from_shape`, but always with the default dash length.
    pub fn update_from_shape(&mut self, settings: &VisualizationSettings, shape: &PositionVector, close: bool) {
        self.width = settings.dotted_contour.segment_width;
        let mut shape = shape.clone();
        if close && shape.len() > 2 {
            shape.close_polygon();
        }
        self.segments = split_into_segments(&shape, settings.dotted_contour.segment_length);
    }

    /// Moves every segment sideways on its own; positive values go left.
    pub fn move_shape_to_side(&mut self, amount: f64) {
        for segment in self.segments.iter_mut() {
            segment.move_to_side(amount);
        }
    }

    pub fn invert_offset(&mut self) {
        for segment in self.segments.iter_mut() {
            segment.offset *= -1.0;
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn set_width(&mut self, width: f64) {
        self.width = width;
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn dash_count(&self) -> usize {
        self.segments.iter().map(|s| s.lengths().len()).sum()
    }

    /// Draws one box line per dash, asking `alternator` for every color.
    /// A positive `custom_width` overrides the builder width.
    pub fn draw(
        &self,
        backend: &mut impl DrawingBackend,
        alternator: &mut DashColorAlternator,
        contour_type: DottedContourType,
        custom_width: f64,
    ) {
        let width = if custom_width > 0.0 { custom_width } else { self.width };
        for segment in &self.segments {
            let dashes = segment.rotations().iter().zip(segment.lengths().iter());
            for (beg, (rotation, length)) in segment.shape().iter().zip(dashes) {
                backend.set_color(&alternator.next_color(contour_type));
                backend.draw_box_line(beg, *rotation, *length, width, 0.0);
            }
        }
    }
}

fn split_into_segments(shape: &PositionVector, dash_length: f64) -> Vec<Segment> {
    shape
        .windows(2)
        .map(|w| Segment::new(PositionVector::from(vec![w[0], w[1]]), dash_length))
        .collect()
}
