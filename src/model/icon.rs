use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum DisplayColor {
    #[default]
    Primary,
    Secondary,
    White,
    Clear,
    Gray,
    LightGray,
    Green,
    Cyan,
    Orange,
    Yellow,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum CaptionLocation {
    Left,
    #[default]
    Bottom,
}

/// Symbols come from the platform symbol set, images from the app bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum IconKind {
    #[default]
    Symbol,
    Image,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Icon {
    pub name: String,
    #[serde(default)]
    pub color: DisplayColor,
    #[serde(default)]
    pub caption: String,
    #[serde(default = "default_caption_color")]
    pub caption_color: DisplayColor,
    #[serde(default)]
    pub caption_location: CaptionLocation,
    #[serde(default, rename = "type")]
    pub kind: IconKind,
}

fn default_caption_color() -> DisplayColor {
    DisplayColor::White
}

impl Icon {
    pub fn symbol(name: impl Into<String>, color: DisplayColor) -> Self {
        Self {
            name: name.into(),
            color,
            caption: String::new(),
            caption_color: DisplayColor::White,
            caption_location: CaptionLocation::Bottom,
            kind: IconKind::Symbol,
        }
    }

    pub fn image(name: impl Into<String>, color: DisplayColor) -> Self {
        Self {
            kind: IconKind::Image,
            ..Self::symbol(name, color)
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }

    pub fn with_caption_location(mut self, location: CaptionLocation) -> Self {
        self.caption_location = location;
        self
    }

    /// The bundled template image every new record starts with.
    pub fn template() -> Self {
        Self::image("HomeWatchTemplate", DisplayColor::Secondary)
    }

    /// The last-resort icon when no table has an entry.
    pub fn fallback() -> Self {
        Self::symbol("circle", DisplayColor::White)
    }
}

impl Default for Icon {
    fn default() -> Self {
        Self::template()
    }
}
