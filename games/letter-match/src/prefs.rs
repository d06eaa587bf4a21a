use serde::{Deserialize, Serialize};

/// Player display choices shared by the round logic and the render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DisplayPreferences {
    /// Modules show their branch colour instead of the neutral theme colour.
    pub color_hints: bool,
    pub dark_mode: bool,
}

impl Default for DisplayPreferences {
    fn default() -> Self {
        Self {
            color_hints: true,
            dark_mode: true,
        }
    }
}
