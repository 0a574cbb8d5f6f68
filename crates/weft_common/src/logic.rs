//! Four-state logic values for single-output covers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single logic value as it appears in a truth-table cover.
///
/// Unlike simulation-oriented four-state logic, these values describe cover
/// rows and latch initial states:
/// - `False` / `True` — a fixed input or output polarity
/// - `DontCare` — an input bit the cube does not constrain
/// - `Unknown` — an unspecified latch initial state
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[repr(u8)]
pub enum LogicValue {
    /// Logic low (`0` in a cover row).
    False = 0,
    /// Logic high (`1` in a cover row).
    True = 1,
    /// Unconstrained input bit (`-` in a cover row).
    DontCare = 2,
    /// Unspecified value; only meaningful as a latch initial state.
    Unknown = 3,
}

impl LogicValue {
    /// Converts a cover character to a [`LogicValue`].
    ///
    /// Accepts `0`, `1`, and `-`. `Unknown` has no cover spelling.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(LogicValue::False),
            '1' => Some(LogicValue::True),
            '-' => Some(LogicValue::DontCare),
            _ => None,
        }
    }
}

impl fmt::Display for LogicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicValue::False => write!(f, "0"),
            LogicValue::True => write!(f, "1"),
            LogicValue::DontCare => write!(f, "-"),
            LogicValue::Unknown => write!(f, "x"),
        }
    }
}
