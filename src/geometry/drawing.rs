//! Draw entry points used by the editor for network elements and their
//! editing aids. Everything here is stateless: callers pass the cached
//! geometry, the view settings and the current mouse position.

use crate::color::Color;
use crate::draw::DrawingBackend;
use crate::geom::{vertex_circle, Position, PositionVector, POSITION_EPS};
use crate::geometry::dash_color::{DashColorAlternator, DottedContourType};
use crate::geometry::dotted::DottedContourBuilder;
use crate::geometry::segmented::SegmentedGeometry;
use crate::settings::VisualizationSettings;

/// Depth of inspected dotted contours.
pub const DOTTED_CONTOUR_INSPECTED: f64 = 1010.0;
/// Depth of front dotted contours, above the inspected ones.
pub const DOTTED_CONTOUR_FRONT: f64 = 1020.0;

const CONTOUR_LINE_WIDTH: f64 = 0.1;
const GEOMETRY_POINT_DEPTH: f64 = 0.2;
const LABEL_LAYER: f64 = 0.3;
const ELEVATION_LABEL_SIZE: f64 = 0.7;
// Relation lines to far away elements are cut to this length.
const RELATION_LINE_SHORT_LENGTH: f64 = 5.0;
const RELATION_ARROW_MIN_DISTANCE: f64 = 10.0;

/// One lane of an edge, as far as its dotted contour is concerned.
#[derive(Clone, Copy, Debug)]
pub struct LaneOutline<'a> {
    pub shape: &'a PositionVector,
    pub half_width: f64,
}

pub fn draw_geometry(
    backend: &mut impl DrawingBackend,
    settings: &VisualizationSettings,
    mouse: &Position,
    geometry: &SegmentedGeometry,
    width: f64,
) {
    if settings.draw_for_position_selection {
        draw_selection_hit(backend, settings, mouse, geometry.shape(), width);
    } else if settings.scale * width < 1.0 {
        backend.draw_line(geometry.shape());
    } else {
        backend.draw_box_lines(geometry.shape(), geometry.rotations(), geometry.lengths(), width);
    }
}

/// Outlines `geometry` with thin lines just inside `width`. With
/// `draw_extremes` both sides are joined into one closed outline.
pub fn draw_contour_geometry(backend: &mut impl DrawingBackend, geometry: &SegmentedGeometry, width: f64, draw_extremes: bool) {
    if draw_extremes {
        backend.draw_box_lines_path(&closed_outline(geometry.shape(), width), CONTOUR_LINE_WIDTH);
    } else {
        let (left, right) = outline_sides(geometry.shape(), width);
        backend.draw_box_lines_path(&left, CONTOUR_LINE_WIDTH);
        backend.draw_box_lines_path(&right, CONTOUR_LINE_WIDTH);
    }
}

#[allow(clippy::too_many_arguments)]
pub fn draw_lane_geometry(
    backend: &mut impl DrawingBackend,
    settings: &VisualizationSettings,
    mouse: &Position,
    shape: &PositionVector,
    rotations: &[f64],
    lengths: &[f64],
    colors: &[Color],
    width: f64,
    only_contour: bool,
) {
    if only_contour {
        backend.draw_box_lines_path(&closed_outline(shape, width), CONTOUR_LINE_WIDTH);
    } else if settings.draw_for_position_selection {
        draw_selection_hit(backend, settings, mouse, shape, width);
    } else if !colors.is_empty() {
        backend.draw_box_lines_colored(shape, rotations, lengths, colors, width);
    } else {
        backend.draw_box_lines(shape, rotations, lengths, width);
    }
}

/// Vertex markers of an editable shape, labelled "S" and "E" at its ends
/// (or with their elevation while editing elevations).
#[allow(clippy::too_many_arguments)]
pub fn draw_geometry_points(
    backend: &mut impl DrawingBackend,
    settings: &VisualizationSettings,
    mouse: &Position,
    editing_elevation: bool,
    shape: &PositionVector,
    point_color: &Color,
    text_color: &Color,
    radius: f64,
    exaggeration: f64,
) {
    let exaggerated_radius = radius * exaggeration;
    let exaggerated_radius_squared = exaggerated_radius * exaggerated_radius;
    let draw_labels = !settings.is_selection_pass();
    let draw_detail = settings.draw_detail(settings.geometry_points_text_detail, exaggeration);

    for vertex in shape.iter() {
        if settings.draw_for_position_selection && mouse.distance_squared_to_2d(vertex) > exaggerated_radius_squared {
            continue;
        }

        backend.push_matrix();
        backend.translate(vertex.x, vertex.y, GEOMETRY_POINT_DEPTH);
        backend.set_color(point_color);
        backend.draw_filled_circle(exaggerated_radius, settings.circle_resolution());
        backend.pop_matrix();

        if !draw_labels {
            continue;
        }
        if editing_elevation {
            let elevation = format!("{:.2}", vertex.z);
            backend.draw_text(&elevation, vertex, LABEL_LAYER, ELEVATION_LABEL_SIZE, text_color);
        } else if Some(vertex) == shape.first() && draw_detail {
            backend.draw_text("S", vertex, LABEL_LAYER, 2.0 * exaggerated_radius, text_color);
        } else if Some(vertex) == shape.last() && !shape.is_closed() && draw_detail {
            backend.draw_text("E", vertex, LABEL_LAYER, 2.0 * exaggerated_radius, text_color);
        }
    }
}

/// In move mode, marks where a new vertex would be created when the mouse is
/// close to `shape` but not over one of its vertices.
#[allow(clippy::too_many_arguments)]
pub fn draw_moving_hint(
    backend: &mut impl DrawingBackend,
    settings: &VisualizationSettings,
    mouse: &Position,
    move_mode: bool,
    shape: &PositionVector,
    hint_color: &Color,
    radius: f64,
    exaggeration: f64,
) {
    if !move_mode || shape.is_empty() {
        return;
    }
    let exaggerated_radius = radius * exaggeration;
    let squared_radius = radius * radius * exaggeration;
    let over_vertex = shape.iter().any(|v| v.distance_squared_to_2d(mouse) <= squared_radius);
    if over_vertex || shape.distance_2d(mouse) >= exaggerated_radius {
        return;
    }

    let hint = if shape.len() > 1 {
        shape.position_at_offset_2d(shape.nearest_offset_to_point_2d(mouse))
    } else {
        shape[0]
    };
    backend.push_matrix();
    backend.translate(hint.x, hint.y, GEOMETRY_POINT_DEPTH);
    backend.set_color(hint_color);
    backend.draw_filled_circle(exaggerated_radius, settings.circle_resolution());
    backend.pop_matrix();
}

/// Dotted contour around a polyline of half width `width`, closed at its
/// first and/or last point on request.
#[allow(clippy::too_many_arguments)]
pub fn draw_dotted_contour_shape(
    backend: &mut impl DrawingBackend,
    settings: &VisualizationSettings,
    contour_type: DottedContourType,
    shape: &PositionVector,
    width: f64,
    exaggeration: f64,
    draw_first_extreme: bool,
    draw_last_extreme: bool,
    line_width: f64,
) {
    let center = DottedContourBuilder::from_shape(settings, shape, false);
    let mut top = center.clone();
    let mut bottom = center;
    top.move_shape_to_side(width * exaggeration);
    bottom.move_shape_to_side(-width * exaggeration);
    top.invert_offset();
    draw_two_sided_contour(
        backend,
        settings,
        contour_type,
        &top,
        &bottom,
        draw_first_extreme,
        draw_last_extreme,
        line_width,
    );
}

/// Dotted contour around a whole edge given its lanes from first to last.
pub fn draw_dotted_contour_edge(
    backend: &mut impl DrawingBackend,
    settings: &VisualizationSettings,
    contour_type: DottedContourType,
    lanes: &[LaneOutline],
    draw_front_extreme: bool,
    draw_back_extreme: bool,
) {
    let (first, last) = match (lanes.first(), lanes.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return,
    };
    if lanes.len() == 1 {
        draw_dotted_contour_shape(
            backend,
            settings,
            contour_type,
            first.shape,
            first.half_width,
            1.0,
            draw_front_extreme,
            draw_back_extreme,
            0.0,
        );
        return;
    }

    let (top_lane, bottom_lane) = if settings.lefthand { (last, first) } else { (first, last) };
    let mut top = DottedContourBuilder::from_shape(settings, top_lane.shape, false);
    let mut bottom = DottedContourBuilder::from_shape(settings, bottom_lane.shape, false);
    top.move_shape_to_side(top_lane.half_width);
    bottom.move_shape_to_side(-bottom_lane.half_width);
    top.invert_offset();
    draw_two_sided_contour(
        backend,
        settings,
        contour_type,
        &top,
        &bottom,
        draw_front_extreme,
        draw_back_extreme,
        0.0,
    );
}

/// Dotted contour along a closed shape, grown around its centroid by
/// `exaggeration`. Nothing is drawn for a non-positive exaggeration.
pub fn draw_dotted_contour_closed_shape(
    backend: &mut impl DrawingBackend,
    settings: &VisualizationSettings,
    contour_type: DottedContourType,
    shape: &PositionVector,
    exaggeration: f64,
    line_width: f64,
) {
    if exaggeration <= 0.0 {
        return;
    }
    let mut scaled = shape.clone();
    scaled.scale_relative(exaggeration);
    let contour = DottedContourBuilder::from_shape(settings, &scaled, true);

    let mut alternator = DashColorAlternator::new(settings);
    backend.push_matrix();
    backend.translate(0.0, 0.0, contour_depth(contour_type));
    contour.draw(backend, &mut alternator, contour_type, line_width);
    backend.pop_matrix();
}

pub fn draw_dotted_contour_circle(
    backend: &mut impl DrawingBackend,
    settings: &VisualizationSettings,
    contour_type: DottedContourType,
    pos: &Position,
    radius: f64,
    exaggeration: f64,
) {
    let steps = if radius * exaggeration < 2.0 { 8 } else { 16 };
    let circle = vertex_circle(pos, radius, steps);
    draw_dotted_contour_closed_shape(backend, settings, contour_type, &circle, exaggeration, 0.0);
}

/// Dotted contour around a `2 * width` by `2 * height` rectangle, shifted by
/// the offsets, turned by `rotation` degrees and placed at `pos`.
#[allow(clippy::too_many_arguments)]
pub fn draw_dotted_squared_shape(
    backend: &mut impl DrawingBackend,
    settings: &VisualizationSettings,
    contour_type: DottedContourType,
    pos: &Position,
    width: f64,
    height: f64,
    offset_x: f64,
    offset_y: f64,
    rotation: f64,
    exaggeration: f64,
) {
    let mut rectangle = PositionVector::from(vec![(width, height), (width, -height), (-width, -height), (-width, height)]);
    rectangle.add(offset_x, offset_y, 0.0);
    rectangle.rotate_2d((90.0 - rotation).to_radians());
    rectangle.add_position(pos);
    draw_dotted_contour_closed_shape(backend, settings, contour_type, &rectangle, exaggeration, 0.0);
}

/// Line from a parent element towards one of its children. Far away children
/// only get the first few units of it, with an arrowhead.
pub fn draw_parent_line(
    backend: &mut impl DrawingBackend,
    settings: &VisualizationSettings,
    parent: &Position,
    child: &Position,
    color: &Color,
    draw_entire: bool,
) {
    if settings.is_selection_pass() {
        return;
    }
    let distance_squared = parent.distance_squared_to_2d(child);
    let span = if draw_entire {
        Some(RelationSpan::Entire)
    } else if distance_squared > RELATION_LINE_SHORT_LENGTH * RELATION_LINE_SHORT_LENGTH {
        Some(RelationSpan::Shortened)
    } else {
        None
    };
    draw_relation_line(backend, settings, parent, child, color, span);
}

/// Line from a child element towards its parent. Unlike parent lines, short
/// ones are always drawn entirely.
pub fn draw_child_line(
    backend: &mut impl DrawingBackend,
    settings: &VisualizationSettings,
    child: &Position,
    parent: &Position,
    color: &Color,
    draw_entire: bool,
) {
    if settings.is_selection_pass() {
        return;
    }
    let distance_squared = child.distance_squared_to_2d(parent);
    let span = if draw_entire || distance_squared < RELATION_LINE_SHORT_LENGTH * RELATION_LINE_SHORT_LENGTH {
        RelationSpan::Entire
    } else {
        RelationSpan::Shortened
    };
    draw_relation_line(backend, settings, child, parent, color, Some(span));
}

/// Turns the current matrix so that +y follows a lane with the given rotation.
pub fn rotate_over_lane(backend: &mut impl DrawingBackend, rotation: f64) {
    backend.rotate(-rotation + 90.0);
}

/// Keeps the positions of an element along its lanes at least `POSITION_EPS`
/// away from the lane ends. On a single lane the end is also kept after the
/// start. Lane lengths are `None` when the element has no such lane; absent
/// positions stay absent.
///
/// # Examples
/// ```
/// use netgeom::geometry::drawing::adjust_start_pos_geometric_path;
/// let (start, end) = adjust_start_pos_geometric_path(Some(-3.0), Some(50.0), Some(80.0), Some(50.0), true);
/// assert_eq!(start, Some(0.1));
/// assert_eq!(end, Some(49.9));
/// ```
pub fn adjust_start_pos_geometric_path(
    start: Option<f64>,
    start_lane_length: Option<f64>,
    end: Option<f64>,
    end_lane_length: Option<f64>,
    same_lane: bool,
) -> (Option<f64>, Option<f64>) {
    let mut end = end;
    let lanes_present = start_lane_length.is_some() && end_lane_length.is_some();
    if let (true, true, Some(start), Some(end_pos)) = (same_lane, lanes_present, start, end) {
        if start >= end_pos {
            end = Some(start + POSITION_EPS);
        }
    }
    let clamp = |pos: Option<f64>, lane_length: Option<f64>| match (pos, lane_length) {
        (Some(pos), Some(lane_length)) => Some(clamp_into_lane(pos, lane_length)),
        _ => pos,
    };
    (clamp(start, start_lane_length), clamp(end, end_lane_length))
}

fn clamp_into_lane(pos: f64, lane_length: f64) -> f64 {
    let mut pos = pos;
    if pos < POSITION_EPS {
        pos = POSITION_EPS;
    }
    if pos > lane_length - POSITION_EPS {
        pos = lane_length - POSITION_EPS;
    }
    pos
}

fn contour_depth(contour_type: DottedContourType) -> f64 {
    match contour_type {
        DottedContourType::Front => DOTTED_CONTOUR_FRONT,
        _ => DOTTED_CONTOUR_INSPECTED,
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_two_sided_contour(
    backend: &mut impl DrawingBackend,
    settings: &VisualizationSettings,
    contour_type: DottedContourType,
    top: &DottedContourBuilder,
    bottom: &DottedContourBuilder,
    draw_first_extreme: bool,
    draw_last_extreme: bool,
    line_width: f64,
) {
    let extremes = DottedContourBuilder::from_extremes(settings, top, draw_first_extreme, bottom, draw_last_extreme);
    let mut alternator = DashColorAlternator::new(settings);

    backend.push_matrix();
    backend.translate(0.0, 0.0, contour_depth(contour_type));
    top.draw(backend, &mut alternator, contour_type, line_width);
    alternator.reset();
    bottom.draw(backend, &mut alternator, contour_type, line_width);
    alternator.change_color();
    extremes.draw(backend, &mut alternator, contour_type, line_width);
    backend.pop_matrix();
}

fn draw_selection_hit(
    backend: &mut impl DrawingBackend,
    settings: &VisualizationSettings,
    mouse: &Position,
    shape: &PositionVector,
    width: f64,
) {
    let nearest = shape.position_at_offset_2d(shape.nearest_offset_to_point_2d(mouse));
    if nearest.distance_squared_to_2d(mouse) <= width * width {
        backend.push_matrix();
        backend.translate(nearest.x, nearest.y, 0.0);
        backend.draw_filled_circle(width, settings.circle_resolution());
        backend.pop_matrix();
    }
}

fn outline_sides(shape: &PositionVector, width: f64) -> (PositionVector, PositionVector) {
    let mut left = shape.clone();
    let mut right = shape.clone();
    left.move_to_side(width - CONTOUR_LINE_WIDTH);
    right.move_to_side(-(width - CONTOUR_LINE_WIDTH));
    (left, right)
}

fn closed_outline(shape: &PositionVector, width: f64) -> PositionVector {
    let (mut outline, right) = outline_sides(shape, width);
    outline.append(&right.reverse());
    outline.close_polygon();
    outline
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum RelationSpan {
    Entire,
    Shortened,
}

fn draw_relation_line(
    backend: &mut impl DrawingBackend,
    settings: &VisualizationSettings,
    from: &Position,
    to: &Position,
    color: &Color,
    span: Option<RelationSpan>,
) {
    let rotation = from.angle_to_2d(to).to_degrees() + 90.0;
    let distance = from.distance_to_2d(to);
    let shadow = color.changed_brightness(-50);

    backend.push_matrix();
    backend.translate(0.0, 0.0, -1.0);
    if let Some(span) = span {
        let length = match span {
            RelationSpan::Entire => distance,
            RelationSpan::Shortened => RELATION_LINE_SHORT_LENGTH,
        };
        backend.set_color(&shadow);
        backend.draw_box_line(from, rotation, length, 0.05, 0.0);
        backend.translate(0.0, 0.0, 0.1);
        backend.set_color(color);
        backend.draw_box_line(from, rotation, length, 0.04, 0.0);

        if span == RelationSpan::Shortened && distance > RELATION_ARROW_MIN_DISTANCE {
            let arrow = &settings.additional;
            let tip = PositionVector::from(vec![*from, *to]).position_at_offset_2d(RELATION_LINE_SHORT_LENGTH);
            backend.set_color(&shadow);
            backend.draw_triangle_at_end(from, &tip, arrow.arrow_width, arrow.arrow_length, arrow.arrow_offset);
            backend.translate(0.0, 0.0, 0.1);
            backend.set_color(color);
            backend.draw_triangle_at_end(
                from,
                &tip,
                arrow.arrow_width - 0.01,
                arrow.arrow_length - 0.01,
                arrow.arrow_offset - 0.01,
            );
        }
    }
    backend.pop_matrix();
}
