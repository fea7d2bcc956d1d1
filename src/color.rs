use anyhow::{bail, Context, Result};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const ORANGE: Color = Color::rgb(255, 128, 0);
    pub const GREY: Color = Color::rgb(128, 128, 128);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 255 }
    }

    /// Adds `change` to every channel. Whatever a saturated channel could not
    /// absorb is spread over the remaining ones.
    ///
    /// # Examples
    /// ```
    /// use netgeom::color::Color;
    /// assert_eq!(Color::GREEN.changed_brightness(-30), Color::rgb(0, 165, 0));
    /// assert_eq!(Color::MAGENTA.changed_brightness(-30), Color::rgb(210, 0, 210));
    /// assert_eq!(Color::rgb(100, 100, 100).changed_brightness(-50), Color::rgb(50, 50, 50));
    /// ```
    pub fn changed_brightness(&self, change: i32) -> Color {
        let mut current = *self;
        let mut change = change;
        let mut to_change = 3;
        loop {
            let shift = |c: u8| (i32::from(c) + change).max(0).min(255);
            let (r, g, b) = (shift(current.r), shift(current.g), shift(current.b));
            let changed = (r - i32::from(current.r)) + (g - i32::from(current.g)) + (b - i32::from(current.b));
            let saturated = [(r, current.r), (g, current.g), (b, current.b)]
                .iter()
                .filter(|(new, old)| *new != i32::from(*old) + change)
                .count() as i32;

            let result = Color {
                r: r as u8,
                g: g as u8,
                b: b as u8,
                a: current.a,
            };
            if changed == to_change * change || changed == 0 || saturated == 3 {
                return result;
            }
            let next_to_change = 3 - saturated;
            change = (to_change * change - changed) / next_to_change;
            to_change = next_to_change;
            current = result;
        }
    }
}

pub fn from_color_name(name: &str) -> Option<Color> {
    match name {
        "white" => Some(Color::WHITE),
        "black" => Some(Color::BLACK),
        "red" => Some(Color::RED),
        "green" => Some(Color::GREEN),
        "blue" => Some(Color::BLUE),
        "cyan" => Some(Color::CYAN),
        "magenta" => Some(Color::MAGENTA),
        "yellow" => Some(Color::YELLOW),
        "orange" => Some(Color::ORANGE),
        "grey" => Some(Color::GREY),
        _ => None,
    }
}

/// Parses either a color name or `r,g,b[,a]` with channels in `0..=255`.
///
/// # Examples
/// ```
/// use netgeom::color::{parse_color, Color};
/// assert_eq!(parse_color("magenta").unwrap(), Color::MAGENTA);
/// assert_eq!(parse_color("0, 0, 235").unwrap(), Color::rgb(0, 0, 235));
/// assert!(parse_color("0,0").is_err());
/// ```
pub fn parse_color(value: &str) -> Result<Color> {
    let value = value.trim();
    if let Some(color) = from_color_name(value) {
        return Ok(color);
    }

    let channels = value
        .split(',')
        .map(|c| c.trim().parse::<u8>().with_context(|| format!("Invalid color channel <{}>", c.trim())))
        .collect::<Result<Vec<_>>>()?;
    match channels.as_slice() {
        [r, g, b] => Ok(Color::rgb(*r, *g, *b)),
        [r, g, b, a] => Ok(Color { r: *r, g: *g, b: *b, a: *a }),
        _ => bail!("<{}> doesn't look like a color", value),
    }
}
