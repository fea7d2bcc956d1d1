use crate::color::Color;
use crate::settings::VisualizationSettings;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum DottedContourType {
    Inspect,
    Front,
    Green,
    Magenta,
    Default,
}

impl DottedContourType {
    /// The two alternating colors, or `None` for the plain type.
    pub fn color_pair(self, settings: &VisualizationSettings) -> Option<(Color, Color)> {
        let dc = &settings.dotted_contour;
        match self {
            DottedContourType::Inspect => Some((dc.first_inspected_color, dc.second_inspected_color)),
            DottedContourType::Front => Some((dc.first_front_color, dc.second_front_color)),
            DottedContourType::Green => Some((Color::GREEN, Color::GREEN.changed_brightness(-30))),
            DottedContourType::Magenta => Some((Color::MAGENTA, Color::MAGENTA.changed_brightness(-30))),
            DottedContourType::Default => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DashState {
    First,
    Second,
}

impl DashState {
    fn next(self) -> DashState {
        match self {
            DashState::First => DashState::Second,
            DashState::Second => DashState::First,
        }
    }
}

/// Hands out dash colors so that consecutive dashes alternate.
pub struct DashColorAlternator<'s> {
    settings: &'s VisualizationSettings,
    state: DashState,
}

impl<'s> DashColorAlternator<'s> {
    pub fn new(settings: &'s VisualizationSettings) -> DashColorAlternator<'s> {
        DashColorAlternator {
            settings,
            state: DashState::First,
        }
    }

    pub fn state(&self) -> DashState {
        self.state
    }

    pub fn next_color(&mut self, contour_type: DottedContourType) -> Color {
        match contour_type.color_pair(self.settings) {
            Some((first, second)) => {
                let color = match self.state {
                    DashState::First => first,
                    DashState::Second => second,
                };
                self.state = self.state.next();
                color
            }
            None => Color::BLACK,
        }
    }

    pub fn change_color(&mut self) {
        self.state = self.state.next();
    }

    pub fn reset(&mut self) {
        self.state = DashState::First;
    }
}
