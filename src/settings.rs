use crate::color::{parse_color, Color};

use anyhow::{Context, Result};
use ini::Ini;
use log::warn;
use std::path::Path;

#[derive(Clone, Debug, PartialEq)]
pub struct DottedContourSettings {
    /// Half width of every dash stroke.
    pub segment_width: f64,
    /// Default dash length.
    pub segment_length: f64,
    pub first_inspected_color: Color,
    pub second_inspected_color: Color,
    pub first_front_color: Color,
    pub second_front_color: Color,
}

impl Default for DottedContourSettings {
    fn default() -> DottedContourSettings {
        DottedContourSettings {
            segment_width: 0.2,
            segment_length: 2.0,
            first_inspected_color: Color::rgb(235, 235, 235),
            second_inspected_color: Color::rgb(20, 20, 20),
            first_front_color: Color::rgb(0, 0, 235),
            second_front_color: Color::rgb(0, 255, 0),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AdditionalSettings {
    pub arrow_width: f64,
    pub arrow_length: f64,
    pub arrow_offset: f64,
}

impl Default for AdditionalSettings {
    fn default() -> AdditionalSettings {
        AdditionalSettings {
            arrow_width: 1.0,
            arrow_length: 0.2,
            arrow_offset: 0.1,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct VisualizationSettings {
    pub dotted_contour: DottedContourSettings,
    pub additional: AdditionalSettings,
    /// View zoom: screen pixels per network unit.
    pub scale: f64,
    /// Traffic drives on the left, so the first lane of an edge is the outer one.
    pub lefthand: bool,
    pub draw_for_position_selection: bool,
    pub draw_for_rectangle_selection: bool,
    /// Minimum `scale * exaggeration` at which geometry point labels are drawn.
    pub geometry_points_text_detail: f64,
}

impl Default for VisualizationSettings {
    fn default() -> VisualizationSettings {
        VisualizationSettings {
            dotted_contour: DottedContourSettings::default(),
            additional: AdditionalSettings::default(),
            scale: 1.0,
            lefthand: false,
            draw_for_position_selection: false,
            draw_for_rectangle_selection: false,
            geometry_points_text_detail: 10.0,
        }
    }
}

impl VisualizationSettings {
    pub fn is_selection_pass(&self) -> bool {
        self.draw_for_position_selection || self.draw_for_rectangle_selection
    }

    /// Number of vertices used when drawing filled circles at the current zoom.
    pub fn circle_resolution(&self) -> usize {
        if self.is_selection_pass() {
            8
        } else if self.scale >= 10.0 {
            32
        } else if self.scale >= 2.0 {
            16
        } else {
            8
        }
    }

    pub fn draw_detail(&self, detail: f64, exaggeration: f64) -> bool {
        self.scale * exaggeration >= detail
    }

    pub fn load(path: &Path) -> Result<VisualizationSettings> {
        let config = Ini::load_from_file(path)
            .with_context(|| format!("Failed to read visualization settings from {}", path.display()))?;
        VisualizationSettings::from_ini(&config)
    }

    pub fn from_ini_str(content: &str) -> Result<VisualizationSettings> {
        let config = Ini::load_from_str(content).context("Failed to parse visualization settings")?;
        VisualizationSettings::from_ini(&config)
    }

    /// Starts from the defaults and overrides whatever the INI document sets.
    pub fn from_ini(config: &Ini) -> Result<VisualizationSettings> {
        let mut settings = VisualizationSettings::default();

        for (section, properties) in config.iter() {
            let section = section.unwrap_or_default();
            for (key, value) in properties.iter() {
                settings
                    .apply(section, key, value)
                    .with_context(|| format!("Invalid value <{}> for [{}] {}", value, section, key))?;
            }
        }

        Ok(settings)
    }

    fn apply(&mut self, section: &str, key: &str, value: &str) -> Result<()> {
        let num = || value.trim().parse::<f64>().context("Not a number");
        let flag = || value.trim().parse::<bool>().context("Not a boolean");

        let dc = &mut self.dotted_contour;
        let add = &mut self.additional;
        match (section, key) {
            ("dotted-contour", "segment-width") => dc.segment_width = num()?,
            ("dotted-contour", "segment-length") => dc.segment_length = num()?,
            ("dotted-contour", "first-inspected-color") => dc.first_inspected_color = parse_color(value)?,
            ("dotted-contour", "second-inspected-color") => dc.second_inspected_color = parse_color(value)?,
            ("dotted-contour", "first-front-color") => dc.first_front_color = parse_color(value)?,
            ("dotted-contour", "second-front-color") => dc.second_front_color = parse_color(value)?,
            ("additional", "arrow-width") => add.arrow_width = num()?,
            ("additional", "arrow-length") => add.arrow_length = num()?,
            ("additional", "arrow-offset") => add.arrow_offset = num()?,
            ("view", "scale") => self.scale = num()?,
            ("view", "lefthand") => self.lefthand = flag()?,
            ("view", "geometry-points-text-detail") => self.geometry_points_text_detail = num()?,
            _ => warn!("Ignoring unknown visualization setting [{}] {}", section, key),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_defaults() {
        let settings = VisualizationSettings::from_ini_str(
            "[dotted-contour]\nsegment-length = 3.5\nfirst-front-color = 10,20,30\n\n[view]\nlefthand = true\nunknown = 1\n",
        )
        .unwrap();
        assert_eq!(settings.dotted_contour.segment_length, 3.5);
        assert_eq!(settings.dotted_contour.first_front_color, Color::rgb(10, 20, 30));
        assert_eq!(settings.dotted_contour.segment_width, 0.2);
        assert!(settings.lefthand);
    }

    #[test]
    fn test_bad_value_is_reported() {
        let err = VisualizationSettings::from_ini_str("[additional]\narrow-width = wide\n").unwrap_err();
        assert!(format!("{:#}", err).contains("arrow-width"));
    }

    #[test]
    fn test_circle_resolution() {
        let mut settings = VisualizationSettings::default();
        assert_eq!(settings.circle_resolution(), 8);
        settings.scale = 4.0;
        assert_eq!(settings.circle_resolution(), 16);
        settings.scale = 12.0;
        assert_eq!(settings.circle_resolution(), 32);
        settings.draw_for_rectangle_selection = true;
        assert_eq!(settings.circle_resolution(), 8);
    }

    #[test]
    fn test_draw_detail_only_depends_on_zoom() {
        let mut settings = VisualizationSettings::default();
        settings.scale = 2.0;
        assert!(!settings.draw_detail(10.0, 4.0));
        assert!(settings.draw_detail(10.0, 5.0));

        settings.draw_for_position_selection = true;
        assert!(!settings.draw_detail(10.0, 4.0));
    }
}
