extern crate netgeom;

mod common;

use common::{assert_close, assert_same_position, shape};
use netgeom::color::Color;
use netgeom::draw::{DrawCall, RecordingDrawer};
use netgeom::geom::{Position, PositionVector};
use netgeom::geometry::drawing::{
    draw_child_line, draw_contour_geometry, draw_geometry, draw_geometry_points, draw_lane_geometry, draw_moving_hint,
    draw_parent_line, rotate_over_lane,
};
use netgeom::geometry::SegmentedGeometry;
use netgeom::settings::VisualizationSettings;

fn is_circle(call: &DrawCall) -> bool {
    matches!(call, DrawCall::FilledCircle { .. })
}

fn circle_centers(drawer: &RecordingDrawer) -> Vec<Position> {
    drawer
        .calls
        .windows(2)
        .filter_map(|w| match (&w[0], &w[1]) {
            (DrawCall::Translate { x, y, .. }, DrawCall::SetColor(_)) => Some(Position::new(*x, *y)),
            (DrawCall::Translate { x, y, .. }, DrawCall::FilledCircle { .. }) => Some(Position::new(*x, *y)),
            _ => None,
        })
        .collect()
}

#[test]
fn test_geometry_depends_on_zoom() {
    let geometry = SegmentedGeometry::from_shape(shape(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]));
    let mouse = Position::new(0.0, 0.0);
    let mut settings = VisualizationSettings::default();

    settings.scale = 0.5;
    let mut drawer = RecordingDrawer::new();
    draw_geometry(&mut drawer, &settings, &mouse, &geometry, 1.5);
    assert_eq!(drawer.calls, vec![DrawCall::Line(geometry.shape().clone())]);

    settings.scale = 4.0;
    let mut drawer = RecordingDrawer::new();
    draw_geometry(&mut drawer, &settings, &mouse, &geometry, 1.5);
    let lines = drawer.box_lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1].rotation, geometry.rotations()[1]);
    assert_eq!(lines[1].width, 1.5);
}

#[test]
fn test_geometry_position_selection() {
    let geometry = SegmentedGeometry::from_shape(shape(&[(0.0, 0.0), (10.0, 0.0)]));
    let mut settings = VisualizationSettings::default();
    settings.draw_for_position_selection = true;

    let mut drawer = RecordingDrawer::new();
    draw_geometry(&mut drawer, &settings, &Position::new(4.0, 1.0), &geometry, 1.5);
    assert_eq!(drawer.count(is_circle), 1);
    assert_same_position(&circle_centers(&drawer)[0], &Position::new(4.0, 0.0));

    let mut drawer = RecordingDrawer::new();
    draw_geometry(&mut drawer, &settings, &Position::new(4.0, 3.0), &geometry, 1.5);
    assert!(drawer.calls.is_empty());
}

#[test]
fn test_contour_geometry() {
    let geometry = SegmentedGeometry::from_shape(shape(&[(0.0, 0.0), (10.0, 0.0)]));

    let mut drawer = RecordingDrawer::new();
    draw_contour_geometry(&mut drawer, &geometry, 1.1, false);
    let lines = drawer.box_lines();
    assert_eq!(lines.len(), 2);
    assert_same_position(&lines[0].beg, &Position::new(0.0, 1.0));
    assert_same_position(&lines[1].beg, &Position::new(0.0, -1.0));
    assert!(lines.iter().all(|l| l.width == 0.1));

    let mut drawer = RecordingDrawer::new();
    draw_contour_geometry(&mut drawer, &geometry, 1.1, true);
    let lines = drawer.box_lines();
    // Left side, right end, right side and the closing left end.
    assert_eq!(lines.len(), 4);
    let total: f64 = lines.iter().map(|l| l.length).sum();
    assert_close(total, 24.0);
}

#[test]
fn test_lane_geometry_modes() {
    let lane = shape(&[(0.0, 0.0), (10.0, 0.0), (20.0, 5.0)]);
    let geometry = SegmentedGeometry::from_shape(lane.clone());
    let mouse = Position::new(100.0, 100.0);
    let settings = VisualizationSettings::default();
    let colors = [Color::RED, Color::BLUE];

    let mut drawer = RecordingDrawer::new();
    draw_lane_geometry(
        &mut drawer,
        &settings,
        &mouse,
        &lane,
        geometry.rotations(),
        geometry.lengths(),
        &colors,
        1.6,
        false,
    );
    let lines = drawer.box_lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].color, Some(Color::RED));
    assert_eq!(lines[1].color, Some(Color::BLUE));

    let mut drawer = RecordingDrawer::new();
    draw_lane_geometry(
        &mut drawer,
        &settings,
        &mouse,
        &lane,
        geometry.rotations(),
        geometry.lengths(),
        &[],
        1.6,
        false,
    );
    assert_eq!(drawer.box_lines().len(), 2);
    assert!(drawer.box_lines().iter().all(|l| l.color.is_none()));

    let mut drawer = RecordingDrawer::new();
    draw_lane_geometry(
        &mut drawer,
        &settings,
        &mouse,
        &lane,
        geometry.rotations(),
        geometry.lengths(),
        &colors,
        1.6,
        true,
    );
    assert!(drawer.box_lines().iter().all(|l| l.width == 0.1));
    assert!(drawer.box_lines().len() >= 6);
}

#[test]
fn test_geometry_point_labels() {
    let open = shape(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
    let mouse = Position::new(0.0, 0.0);
    let mut settings = VisualizationSettings::default();
    settings.scale = 20.0;

    let mut drawer = RecordingDrawer::new();
    draw_geometry_points(&mut drawer, &settings, &mouse, false, &open, &Color::ORANGE, &Color::BLACK, 0.5, 1.0);
    assert_eq!(drawer.count(is_circle), 3);
    assert_eq!(drawer.texts(), vec!["S", "E"]);
    assert_eq!(drawer.depth_translations(), vec![0.2, 0.2, 0.2]);

    let mut closed = open.clone();
    closed.close_polygon();
    let mut drawer = RecordingDrawer::new();
    draw_geometry_points(&mut drawer, &settings, &mouse, false, &closed, &Color::ORANGE, &Color::BLACK, 0.5, 1.0);
    assert_eq!(drawer.texts(), vec!["S", "S"]);

    // Zoomed out: no labels.
    settings.scale = 1.0;
    let mut drawer = RecordingDrawer::new();
    draw_geometry_points(&mut drawer, &settings, &mouse, false, &open, &Color::ORANGE, &Color::BLACK, 0.5, 1.0);
    assert!(drawer.texts().is_empty());
}

#[test]
fn test_geometry_point_elevation() {
    let raised: PositionVector = vec![Position::with_z(0.0, 0.0, 1.5), Position::with_z(5.0, 0.0, 2.25)]
        .into_iter()
        .collect();
    let mut drawer = RecordingDrawer::new();
    draw_geometry_points(
        &mut drawer,
        &VisualizationSettings::default(),
        &Position::new(0.0, 0.0),
        true,
        &raised,
        &Color::ORANGE,
        &Color::BLACK,
        0.5,
        1.0,
    );
    assert_eq!(drawer.texts(), vec!["1.50", "2.25"]);
}

#[test]
fn test_geometry_points_under_mouse() {
    let points = shape(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
    let mut settings = VisualizationSettings::default();
    settings.draw_for_position_selection = true;

    let mut drawer = RecordingDrawer::new();
    draw_geometry_points(
        &mut drawer,
        &settings,
        &Position::new(10.2, 0.1),
        false,
        &points,
        &Color::ORANGE,
        &Color::BLACK,
        0.5,
        1.0,
    );
    assert_eq!(drawer.count(is_circle), 1);
    assert!(drawer.texts().is_empty());
    assert_same_position(&circle_centers(&drawer)[0], &Position::new(10.0, 0.0));
}

#[test]
fn test_moving_hint() {
    let line = shape(&[(0.0, 0.0), (10.0, 0.0)]);
    let settings = VisualizationSettings::default();

    let mut drawer = RecordingDrawer::new();
    draw_moving_hint(&mut drawer, &settings, &Position::new(5.0, 0.3), true, &line, &Color::CYAN, 1.0, 1.0);
    assert_eq!(drawer.count(is_circle), 1);
    assert_same_position(&circle_centers(&drawer)[0], &Position::new(5.0, 0.0));

    // Over a vertex, too far away, or not moving: nothing.
    for (mouse, move_mode) in vec![
        (Position::new(0.2, 0.2), true),
        (Position::new(5.0, 3.0), true),
        (Position::new(5.0, 0.3), false),
    ] {
        let mut drawer = RecordingDrawer::new();
        draw_moving_hint(&mut drawer, &settings, &mouse, move_mode, &line, &Color::CYAN, 1.0, 1.0);
        assert!(drawer.calls.is_empty());
    }

    let single = shape(&[(3.0, 3.0)]);
    let mut drawer = RecordingDrawer::new();
    draw_moving_hint(&mut drawer, &settings, &Position::new(3.0, 3.8), true, &single, &Color::CYAN, 0.5, 2.0);
    assert_same_position(&circle_centers(&drawer)[0], &Position::new(3.0, 3.0));
}

#[test]
fn test_parent_line_lengths() {
    let settings = VisualizationSettings::default();
    let parent = Position::new(0.0, 0.0);

    let mut drawer = RecordingDrawer::new();
    draw_parent_line(&mut drawer, &settings, &parent, &Position::new(30.0, 0.0), &Color::GREEN, true);
    let lines = drawer.box_lines();
    assert_eq!(lines.len(), 2);
    assert_close(lines[0].length, 30.0);
    assert_eq!(lines[0].width, 0.05);
    assert_eq!(lines[0].color, Some(Color::GREEN.changed_brightness(-50)));
    assert_eq!(lines[1].width, 0.04);
    assert_eq!(lines[1].color, Some(Color::GREEN));
    assert_close(lines[0].rotation, 90.0);
    assert_eq!(drawer.count(|c| matches!(c, DrawCall::TriangleAtEnd { .. })), 0);

    let mut drawer = RecordingDrawer::new();
    draw_parent_line(&mut drawer, &settings, &parent, &Position::new(0.0, 30.0), &Color::GREEN, false);
    let lines = drawer.box_lines();
    assert_close(lines[0].length, 5.0);
    assert_close(lines[0].rotation, 180.0);
    let arrows = drawer
        .calls
        .iter()
        .filter_map(|c| match c {
            DrawCall::TriangleAtEnd { p2, length, .. } => Some((*p2, *length)),
            _ => None,
        })
        .collect::<Vec<_>>();
    assert_eq!(arrows.len(), 2);
    assert_same_position(&arrows[0].0, &Position::new(0.0, 5.0));
    assert_close(arrows[1].1, settings.additional.arrow_width - 0.01);
    assert_eq!(drawer.depth_translations(), vec![-1.0, 0.1, 0.1]);

    // Close children get no parent line unless asked for.
    let mut drawer = RecordingDrawer::new();
    draw_parent_line(&mut drawer, &settings, &parent, &Position::new(3.0, 0.0), &Color::GREEN, false);
    assert!(drawer.box_lines().is_empty());
}

#[test]
fn test_child_line_lengths() {
    let settings = VisualizationSettings::default();
    let child = Position::new(0.0, 0.0);

    let mut drawer = RecordingDrawer::new();
    draw_child_line(&mut drawer, &settings, &child, &Position::new(3.0, 0.0), &Color::RED, false);
    let lines = drawer.box_lines();
    assert_eq!(lines.len(), 2);
    assert_close(lines[0].length, 3.0);

    let mut drawer = RecordingDrawer::new();
    draw_child_line(&mut drawer, &settings, &child, &Position::new(8.0, 0.0), &Color::RED, false);
    assert_close(drawer.box_lines()[0].length, 5.0);
    assert_eq!(drawer.count(|c| matches!(c, DrawCall::TriangleAtEnd { .. })), 0);
}

#[test]
fn test_relation_lines_skip_selection() {
    let mut settings = VisualizationSettings::default();
    settings.draw_for_rectangle_selection = true;
    let mut drawer = RecordingDrawer::new();
    let (a, b) = (Position::new(0.0, 0.0), Position::new(50.0, 0.0));
    draw_parent_line(&mut drawer, &settings, &a, &b, &Color::GREEN, true);
    draw_child_line(&mut drawer, &settings, &b, &a, &Color::GREEN, true);
    assert!(drawer.calls.is_empty());
}

#[test]
fn test_rotate_over_lane() {
    let mut drawer = RecordingDrawer::new();
    rotate_over_lane(&mut drawer, 30.0);
    assert_eq!(drawer.calls, vec![DrawCall::Rotate(60.0)]);
}
