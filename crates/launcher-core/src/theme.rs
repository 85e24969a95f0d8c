use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ThemeKind {
    Dark,
    Light,
}

/// Colour values for the four styled slots of the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeStyle {
    pub background: &'static str,
    pub button_background: &'static str,
    pub button_hover: &'static str,
    pub text_color: &'static str,
}

pub const DARK_STYLE: ThemeStyle = ThemeStyle {
    background: "rgba(40, 44, 52, 0.9)",
    button_background: "rgba(255, 255, 255, 0.1)",
    button_hover: "rgba(255, 255, 255, 0.2)",
    text_color: "#FFFFFF",
};

pub const LIGHT_STYLE: ThemeStyle = ThemeStyle {
    background: "rgba(255, 255, 255, 0.9)",
    button_background: "rgba(0, 0, 0, 0.1)",
    button_hover: "rgba(0, 0, 0, 0.2)",
    text_color: "#000000",
};

impl ThemeKind {
    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark {
            ThemeKind::Dark
        } else {
            ThemeKind::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeKind::Dark
    }

    pub fn toggled(self) -> Self {
        Self::from_dark(!self.is_dark())
    }

    pub fn style(self) -> ThemeStyle {
        match self {
            ThemeKind::Dark => DARK_STYLE,
            ThemeKind::Light => LIGHT_STYLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_twice_restores_style() {
        for theme in [ThemeKind::Dark, ThemeKind::Light] {
            let toggled = theme.toggled();
            assert_ne!(toggled.style(), theme.style());
            assert_eq!(toggled.toggled().style(), theme.style());
        }
    }

    #[test]
    fn bool_mapping() {
        assert_eq!(ThemeKind::from_dark(true), ThemeKind::Dark);
        assert!(!ThemeKind::Light.is_dark());
    }
}
