//! Branch colours.
//!
//! Characters are grouped into branches; each branch spreads its members
//! evenly across a hue range. Ranges whose start is above their end wrap
//! through 360 (the A–F branch runs rose → coral through red).

use serde::Serialize;

/// HSB colour: hue in degrees [0, 360), saturation and brightness in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HsbColor {
    pub h: f32,
    pub s: f32,
    pub b: f32,
}

impl HsbColor {
    pub const fn new(h: f32, s: f32, b: f32) -> Self {
        Self { h, s, b }
    }
}

/// A contiguous character group sharing a hue family.
#[derive(Debug, Clone, Copy)]
pub struct Branch {
    pub chars: &'static str,
    pub label: &'static str,
    pub hue_start: f32,
    pub hue_end: f32,
    pub saturation: f32,
    pub brightness: f32,
}

pub const BRANCHES: [Branch; 7] = [
    Branch { chars: "ABCDEF", label: "A-F", hue_start: 350.0, hue_end: 15.0, saturation: 95.0, brightness: 100.0 },
    Branch { chars: "GHIJKL", label: "G-L", hue_start: 40.0, hue_end: 55.0, saturation: 100.0, brightness: 100.0 },
    Branch { chars: "MNOPQR", label: "M-R", hue_start: 150.0, hue_end: 175.0, saturation: 90.0, brightness: 100.0 },
    Branch { chars: "STUVWX", label: "S-X", hue_start: 200.0, hue_end: 230.0, saturation: 95.0, brightness: 100.0 },
    Branch { chars: "YZÑ", label: "Y-Ñ", hue_start: 260.0, hue_end: 290.0, saturation: 90.0, brightness: 100.0 },
    Branch { chars: "0123456789", label: "0-9", hue_start: 310.0, hue_end: 330.0, saturation: 90.0, brightness: 100.0 },
    Branch { chars: ".,?!- ", label: "Signs", hue_start: 195.0, hue_end: 195.0, saturation: 0.0, brightness: 90.0 },
];

/// Colour for characters outside every branch.
pub const FALLBACK: HsbColor = HsbColor::new(0.0, 0.0, 100.0);

impl Branch {
    fn color_at(&self, index: usize) -> HsbColor {
        let count = self.chars.chars().count();
        let mut span = self.hue_end - self.hue_start;
        if self.hue_start > self.hue_end {
            span = self.hue_end + 360.0 - self.hue_start;
        }
        let step = if count > 1 { span / (count - 1) as f32 } else { 0.0 };
        let h = (self.hue_start + step * index as f32) % 360.0;
        HsbColor::new(h, self.saturation, self.brightness)
    }
}

/// Branch colour for `c`.
pub fn style_of(c: char) -> HsbColor {
    BRANCHES
        .iter()
        .find_map(|branch| {
            branch
                .chars
                .chars()
                .position(|m| m == c)
                .map(|i| branch.color_at(i))
        })
        .unwrap_or(FALLBACK)
}

/// CSS `hsl()` string for DOM elements. Brightness maps onto lightness 0–50%.
pub fn hsb_to_css(color: HsbColor) -> String {
    format!(
        "hsl({}, {}%, {}%)",
        color.h.round() as i32,
        color.s.round() as i32,
        (color.b / 2.0).round() as i32
    )
}
