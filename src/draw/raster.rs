use crate::color::Color;
use crate::draw::backend::DrawingBackend;
use crate::draw::fill::{draw_thin_line, fill_polygon};
use crate::draw::pixels::{Pixels, RgbTriples, RgbaColor};
use crate::draw::png_writer::rgb_triples_to_png;
use crate::geom::{vertex_circle, Position, PositionVector};

use anyhow::Result;
use log::trace;

/// Software backend that paints into an RGB canvas, for previews and tests.
///
/// Network coordinates grow upwards while pixel rows grow downwards; the view
/// maps `view_min` to the bottom left corner of the canvas. Depth translations
/// are ignored, so later primitives paint over earlier ones.
pub struct RasterDrawer {
    pixels: Pixels,
    view_min: Position,
    pixels_per_unit: f64,
    color: RgbaColor,
    matrix: Affine,
    matrix_stack: Vec<Affine>,
}

#[derive(Clone, Copy, Debug)]
struct Affine {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    tx: f64,
    ty: f64,
}

impl Affine {
    fn identity() -> Affine {
        Affine {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            tx: 0.0,
            ty: 0.0,
        }
    }

    fn translated(&self, x: f64, y: f64) -> Affine {
        Affine {
            tx: self.a * x + self.c * y + self.tx,
            ty: self.b * x + self.d * y + self.ty,
            ..*self
        }
    }

    fn rotated(&self, degrees: f64) -> Affine {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Affine {
            a: self.a * cos + self.c * sin,
            b: self.b * cos + self.d * sin,
            c: self.c * cos - self.a * sin,
            d: self.d * cos - self.b * sin,
            ..*self
        }
    }

    fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (self.a * x + self.c * y + self.tx, self.b * x + self.d * y + self.ty)
    }
}

impl RasterDrawer {
    pub fn new(width: usize, height: usize, view_min: Position, pixels_per_unit: f64, background: &Color) -> RasterDrawer {
        RasterDrawer {
            pixels: Pixels::new(width, height, background),
            view_min,
            pixels_per_unit,
            color: RgbaColor::from_color(&Color::BLACK),
            matrix: Affine::identity(),
            matrix_stack: Vec::new(),
        }
    }

    pub fn pixels(&self) -> &Pixels {
        &self.pixels
    }

    /// Canvas pixel covering the network position `pos`, if any.
    pub fn pixel_at(&self, pos: &Position) -> Option<&RgbaColor> {
        let (x, y) = self.to_canvas(pos.x, pos.y);
        if x < 0.0 || y < 0.0 {
            return None;
        }
        self.pixels.get_pixel(x as usize, y as usize)
    }

    pub fn to_rgb_triples(&self) -> RgbTriples {
        self.pixels.to_rgb_triples()
    }

    pub fn to_png(&self) -> Result<Vec<u8>> {
        rgb_triples_to_png(&self.to_rgb_triples(), self.pixels.width(), self.pixels.height())
    }

    fn to_canvas(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (x - self.view_min.x) * self.pixels_per_unit,
            self.pixels.height() as f64 - (y - self.view_min.y) * self.pixels_per_unit,
        )
    }

    fn fill_local_polygon(&mut self, matrix: &Affine, local: &[(f64, f64)]) {
        let polygon = local
            .iter()
            .map(|&(x, y)| {
                let (wx, wy) = matrix.apply(x, y);
                self.to_canvas(wx, wy)
            })
            .collect::<Vec<_>>();
        fill_polygon(&polygon, &self.color, &mut self.pixels);
    }
}

impl DrawingBackend for RasterDrawer {
    fn set_color(&mut self, color: &Color) {
        self.color = RgbaColor::from_color(color);
    }

    fn push_matrix(&mut self) {
        self.matrix_stack.push(self.matrix);
    }

    fn pop_matrix(&mut self) {
        self.matrix = self.matrix_stack.pop().unwrap_or_else(Affine::identity);
    }

    fn translate(&mut self, x: f64, y: f64, _z: f64) {
        self.matrix = self.matrix.translated(x, y);
    }

    fn rotate(&mut self, degrees: f64) {
        self.matrix = self.matrix.rotated(degrees);
    }

    fn draw_filled_circle(&mut self, radius: f64, steps: usize) {
        let circle = vertex_circle(&Position::default(), radius, steps.max(3))
            .iter()
            .map(|p| (p.x, p.y))
            .collect::<Vec<_>>();
        let matrix = self.matrix;
        self.fill_local_polygon(&matrix, &circle);
    }

    fn draw_box_line(&mut self, beg: &Position, rotation: f64, length: f64, width: f64, offset: f64) {
        let matrix = self.matrix.translated(beg.x, beg.y).rotated(rotation);
        let corners = [
            (-width - offset, 0.0),
            (width - offset, 0.0),
            (width - offset, -length),
            (-width - offset, -length),
        ];
        self.fill_local_polygon(&matrix, &corners);
    }

    fn draw_line(&mut self, shape: &PositionVector) {
        let canvas_points = shape
            .iter()
            .map(|p| {
                let (wx, wy) = self.matrix.apply(p.x, p.y);
                let (x, y) = self.to_canvas(wx, wy);
                (x.floor() as i64, y.floor() as i64)
            })
            .collect::<Vec<_>>();
        for w in canvas_points.windows(2) {
            draw_thin_line(w[0], w[1], &self.color, &mut self.pixels);
        }
    }

    fn draw_text(&mut self, text: &str, pos: &Position, _layer: f64, _size: f64, _color: &Color) {
        trace!("Skipping label <{}> at ({}, {}): no font rasterizer", text, pos.x, pos.y);
    }

    fn draw_triangle_at_end(&mut self, p1: &Position, p2: &Position, length: f64, width: f64, extra_offset: f64) {
        let dist = p1.distance_to_2d(p2);
        if dist == 0.0 {
            return;
        }
        let dir = Position::new((p2.x - p1.x) / dist, (p2.y - p1.y) / dist);
        let normal = Position::new(-dir.y, dir.x);
        let tip = *p2 - dir * extra_offset;
        let base = tip - dir * length;
        let corners = [tip, base + normal * width, base - normal * width]
            .iter()
            .map(|p| (p.x, p.y))
            .collect::<Vec<_>>();
        let matrix = self.matrix;
        self.fill_local_polygon(&matrix, &corners);
    }
}
