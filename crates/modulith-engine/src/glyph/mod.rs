//! The modular alphabet: every supported character maps to a subset of
//! eight cube nodes and to a colour from its branch.
//!
//! Both lookups are pure and total. Unknown characters get an empty point
//! set and a neutral white style.

pub mod points;
pub mod style;

pub use points::{char_code, points_of, PointSet, NODE_POSITIONS, LETTERS, DIGITS, SYMBOLS};
pub use style::{style_of, hsb_to_css, HsbColor, Branch, BRANCHES};
