use crate::color::Color;

/// Premultiplied RGBA with channels in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct RgbaColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl RgbaColor {
    pub fn from_color(color: &Color) -> RgbaColor {
        let opacity = component_to_opacity(color.a);
        let premultiply = |c| opacity * component_to_opacity(c);

        RgbaColor {
            r: premultiply(color.r),
            g: premultiply(color.g),
            b: premultiply(color.b),
            a: opacity,
        }
    }
}

fn component_to_opacity(component: u8) -> f64 {
    f64::from(component) / f64::from(u8::max_value())
}

pub struct Pixels {
    width: usize,
    height: usize,
    pixels: Vec<RgbaColor>,
}

pub type RgbTriples = Vec<(u8, u8, u8)>;

impl Pixels {
    pub fn new(width: usize, height: usize, background: &Color) -> Pixels {
        Pixels {
            width,
            height,
            pixels: vec![RgbaColor::from_color(background); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<&RgbaColor> {
        if x < self.width && y < self.height {
            Some(&self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Source-over blending; writes outside of the canvas are dropped.
    pub fn blend_pixel(&mut self, x: usize, y: usize, color: &RgbaColor) {
        if x >= self.width || y >= self.height {
            return;
        }
        let old_pixel = &mut self.pixels[y * self.width + x];
        let blend = |new_value: f64, old_value: f64| new_value + (1.0 - color.a) * old_value;
        *old_pixel = RgbaColor {
            r: blend(color.r, old_pixel.r),
            g: blend(color.g, old_pixel.g),
            b: blend(color.b, old_pixel.b),
            a: blend(color.a, old_pixel.a),
        };
    }

    pub fn to_rgb_triples(&self) -> RgbTriples {
        self.pixels
            .iter()
            .map(|p| {
                let postdivide = |val: f64| {
                    let mul = if p.a == 0.0 { 0.0 } else { val / p.a };
                    (f64::from(u8::max_value()) * mul.min(1.0)).round() as u8
                };
                (postdivide(p.r), postdivide(p.g), postdivide(p.b))
            })
            .collect()
    }
}
