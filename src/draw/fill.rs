use crate::draw::pixels::{Pixels, RgbaColor};

type PointF = (f64, f64);

/// Even-odd scanline fill of a polygon given in pixel coordinates. A pixel is
/// covered when its center lies inside the polygon.
pub fn fill_polygon(polygon: &[PointF], color: &RgbaColor, pixels: &mut Pixels) {
    if polygon.len() < 3 {
        return;
    }

    let (min_y, max_y) = polygon
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p.1), hi.max(p.1)));
    let from_y = (min_y - 0.5).ceil().max(0.0) as usize;
    let to_y = ((max_y - 0.5).floor() + 1.0).max(0.0).min(pixels.height() as f64) as usize;

    let mut crossings = Vec::new();
    for y in from_y..to_y {
        let center_y = y as f64 + 0.5;
        crossings.clear();
        for idx in 0..polygon.len() {
            let p1 = polygon[idx];
            let p2 = polygon[(idx + 1) % polygon.len()];
            // Half-open so that a vertex shared by two edges is counted once.
            if (p1.1 <= center_y) != (p2.1 <= center_y) {
                let t = (center_y - p1.1) / (p2.1 - p1.1);
                crossings.push(p1.0 + t * (p2.0 - p1.0));
            }
        }
        crossings.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        for span in crossings.chunks(2) {
            if let [x1, x2] = *span {
                let from_x = (x1 - 0.5).ceil().max(0.0) as usize;
                let to_x = ((x2 - 0.5).floor() + 1.0).max(0.0).min(pixels.width() as f64) as usize;
                for x in from_x..to_x {
                    pixels.blend_pixel(x, y, color);
                }
            }
        }
    }
}

// Stripped-down Bresenham, one pixel wide.
// See http://members.chello.at/~easyfilter/bresenham.html
pub fn draw_thin_line(p1: (i64, i64), p2: (i64, i64), color: &RgbaColor, pixels: &mut Pixels) {
    let (p1, p2) = match clip_to_canvas(p1, p2, pixels.width(), pixels.height()) {
        Some(clipped) => clipped,
        None => return,
    };

    let dx = (p2.0 - p1.0).abs();
    let dy = -(p2.1 - p1.1).abs();

    let get_dir = |c1, c2| if c1 < c2 { 1 } else { -1 };
    let sx = get_dir(p1.0, p2.0);
    let sy = get_dir(p1.1, p2.1);

    let mut err = dx + dy;
    let mut cur = p1;

    loop {
        if cur.0 >= 0 && cur.1 >= 0 {
            pixels.blend_pixel(cur.0 as usize, cur.1 as usize, color);
        }
        if cur == p2 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            cur.0 += sx;
        }
        if e2 <= dx {
            err += dx;
            cur.1 += sy;
        }
    }
}

// Liang-Barsky clipping against the pixel rectangle, so that the walk above
// never leaves the canvas. Endpoints already inside are returned untouched.
fn clip_to_canvas(p1: (i64, i64), p2: (i64, i64), width: usize, height: usize) -> Option<((i64, i64), (i64, i64))> {
    if width == 0 || height == 0 {
        return None;
    }
    let (x1, y1) = (p1.0 as f64, p1.1 as f64);
    let (dx, dy) = (p2.0 as f64 - x1, p2.1 as f64 - y1);
    let max_x = (width - 1) as f64;
    let max_y = (height - 1) as f64;

    let mut t0 = 0.0;
    let mut t1 = 1.0;
    for &(p, q) in [(-dx, x1), (dx, max_x - x1), (-dy, y1), (dy, max_y - y1)].iter() {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            if r > t0 {
                t0 = r;
            }
        } else {
            if r < t0 {
                return None;
            }
            if r < t1 {
                t1 = r;
            }
        }
    }

    let at = |t: f64| ((x1 + t * dx).round() as i64, (y1 + t * dy).round() as i64);
    let beg = if t0 > 0.0 { at(t0) } else { p1 };
    let end = if t1 < 1.0 { at(t1) } else { p2 };
    Some((beg, end))
}
