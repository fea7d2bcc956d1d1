use crate::color::Color;
use crate::draw::backend::DrawingBackend;
use crate::geom::{Position, PositionVector};

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    SetColor(Color),
    PushMatrix,
    PopMatrix,
    Translate { x: f64, y: f64, z: f64 },
    Rotate(f64),
    FilledCircle { radius: f64, steps: usize },
    BoxLine { beg: Position, rotation: f64, length: f64, width: f64, offset: f64 },
    Line(PositionVector),
    Text { text: String, pos: Position, size: f64, color: Color },
    TriangleAtEnd { p1: Position, p2: Position, length: f64, width: f64, extra_offset: f64 },
}

/// A backend that only remembers what it was asked to draw.
#[derive(Debug, Default)]
pub struct RecordingDrawer {
    pub calls: Vec<DrawCall>,
}

/// A box line together with the color that was current when it was drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct ColoredBoxLine {
    pub color: Option<Color>,
    pub beg: Position,
    pub rotation: f64,
    pub length: f64,
    pub width: f64,
}

impl RecordingDrawer {
    pub fn new() -> RecordingDrawer {
        Default::default()
    }

    pub fn box_lines(&self) -> Vec<ColoredBoxLine> {
        let mut color = None;
        let mut lines = Vec::new();
        for call in &self.calls {
            match *call {
                DrawCall::SetColor(c) => color = Some(c),
                DrawCall::BoxLine { beg, rotation, length, width, .. } => lines.push(ColoredBoxLine {
                    color,
                    beg,
                    rotation,
                    length,
                    width,
                }),
                _ => {}
            }
        }
        lines
    }

    pub fn count(&self, pred: impl Fn(&DrawCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    /// The z translations issued, in order.
    pub fn depth_translations(&self) -> Vec<f64> {
        self.calls
            .iter()
            .filter_map(|c| match *c {
                DrawCall::Translate { z, .. } if z != 0.0 => Some(z),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DrawingBackend for RecordingDrawer {
    fn set_color(&mut self, color: &Color) {
        self.calls.push(DrawCall::SetColor(*color));
    }

    fn push_matrix(&mut self) {
        self.calls.push(DrawCall::PushMatrix);
    }

    fn pop_matrix(&mut self) {
        self.calls.push(DrawCall::PopMatrix);
    }

    fn translate(&mut self, x: f64, y: f64, z: f64) {
        self.calls.push(DrawCall::Translate { x, y, z });
    }

    fn rotate(&mut self, degrees: f64) {
        self.calls.push(DrawCall::Rotate(degrees));
    }

    fn draw_filled_circle(&mut self, radius: f64, steps: usize) {
        self.calls.push(DrawCall::FilledCircle { radius, steps });
    }

    fn draw_box_line(&mut self, beg: &Position, rotation: f64, length: f64, width: f64, offset: f64) {
        self.calls.push(DrawCall::BoxLine {
            beg: *beg,
            rotation,
            length,
            width,
            offset,
        });
    }

    fn draw_line(&mut self, shape: &PositionVector) {
        self.calls.push(DrawCall::Line(shape.clone()));
    }

    fn draw_text(&mut self, text: &str, pos: &Position, _layer: f64, size: f64, color: &Color) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            pos: *pos,
            size,
            color: *color,
        });
    }

    fn draw_triangle_at_end(&mut self, p1: &Position, p2: &Position, length: f64, width: f64, extra_offset: f64) {
        self.calls.push(DrawCall::TriangleAtEnd {
            p1: *p1,
            p2: *p2,
            length,
            width,
            extra_offset,
        });
    }
}
