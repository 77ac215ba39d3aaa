#![forbid(unsafe_code)]

//! Placement of content inside the space a container assigns to it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Horizontal placement of a child inside its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalAlignment {
    /// Flush with the left edge.
    #[default]
    Left,
    /// Centered horizontally.
    Center,
    /// Flush with the right edge.
    Right,
}

/// Vertical placement of a child inside its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAlignment {
    /// Flush with the top edge.
    #[default]
    Top,
    /// Centered vertically.
    Middle,
    /// Flush with the bottom edge.
    Bottom,
}

impl fmt::Display for HorizontalAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        })
    }
}

impl fmt::Display for VerticalAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Top => "top",
            Self::Middle => "middle",
            Self::Bottom => "bottom",
        })
    }
}
