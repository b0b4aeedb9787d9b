use serde::Deserialize;

use crate::{CustomizationTable, MirrorResult};

/// Display-units preference, read by the display mapper and weather formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySettings {
    #[serde(default)]
    pub imperial_units: bool,
}

impl DisplaySettings {
    pub fn metric() -> Self {
        Self {
            imperial_units: false,
        }
    }

    pub fn imperial() -> Self {
        Self {
            imperial_units: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MirrorConfig {
    #[serde(default)]
    pub display: DisplaySettings,
    /// Installation-specific mode: rooms without an override are dropped and labels rewritten.
    #[serde(default)]
    pub personal: bool,
    #[serde(default)]
    pub customization: CustomizationTable,
}

impl MirrorConfig {
    pub fn from_json(json: &str) -> MirrorResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
