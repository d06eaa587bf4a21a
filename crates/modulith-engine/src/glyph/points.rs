//! Character → cube-node mapping.
//!
//! Each character has a stable integer code (A–Z ↦ 1–26, Ñ ↦ 27,
//! 0–9 ↦ 28–37, `.,?!-` ↦ 38–42). Node `i` is lit iff bit `i` of the code
//! is set.

/// Latin letters in code order.
pub const LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
/// Digits in code order.
pub const DIGITS: &str = "0123456789";
/// Punctuation in code order.
pub const SYMBOLS: &str = ".,?!-";

/// Normalised positions (-0.5..0.5) of the eight nodes on the cube's front face,
/// clockwise from the top-left corner.
pub const NODE_POSITIONS: [[f32; 3]; 8] = [
    [-0.5, -0.5, 0.5],
    [0.0, -0.5, 0.5],
    [0.5, -0.5, 0.5],
    [0.5, 0.0, 0.5],
    [0.5, 0.5, 0.5],
    [0.0, 0.5, 0.5],
    [-0.5, 0.5, 0.5],
    [-0.5, 0.0, 0.5],
];

/// Stable integer code for a character; 0 for unsupported characters.
pub fn char_code(c: char) -> u8 {
    if let Some(i) = LETTERS.chars().position(|l| l == c) {
        return i as u8 + 1;
    }
    if c == 'Ñ' {
        return 27;
    }
    if let Some(i) = DIGITS.chars().position(|d| d == c) {
        return i as u8 + 28;
    }
    if let Some(i) = SYMBOLS.chars().position(|s| s == c) {
        return i as u8 + 38;
    }
    0
}

/// Set of lit node indices in [0, 8), stored as a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointSet(pub u8);

impl PointSet {
    pub fn contains(self, index: usize) -> bool {
        index < 8 && (self.0 >> index) & 1 == 1
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Lit node indices in ascending order.
    pub fn iter(self) -> impl Iterator<Item = usize> {
        (0..8).filter(move |&i| self.contains(i))
    }

    /// Node positions scaled to a cube of edge `size`.
    pub fn positions(self, size: f32) -> impl Iterator<Item = [f32; 3]> {
        self.iter().map(move |i| {
            let [x, y, z] = NODE_POSITIONS[i];
            [x * size, y * size, z * size]
        })
    }
}

/// Nodes lit for `c`.
pub fn points_of(c: char) -> PointSet {
    PointSet(char_code(c))
}
