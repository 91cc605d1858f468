// Theme module - Color constants and theme re-exports
//
// This module provides the color palette and theme helpers for the replay
// UI: a dark slate stage with teal nodes and packets, plus a few accents
// for status indicators.

pub mod default;

use ratatui::style::Color;

/// Stage background
/// RGB: (23, 29, 33)
pub const SLATE: Color = Color::Rgb(23, 29, 33);

/// Node outlines, labels and packet sprites
/// RGB: (119, 172, 181)
pub const BUBBLE_TEAL: Color = Color::Rgb(119, 172, 181);

/// Borders and titles
/// RGB: (122, 162, 247)
pub const SIGNAL_BLUE: Color = Color::Rgb(122, 162, 247);

/// Warnings (fast tick rates, paused state)
/// RGB: (255, 158, 100)
pub const AMBER: Color = Color::Rgb(255, 158, 100);

/// Very fast tick rates
/// RGB: (247, 118, 142)
pub const ALERT_RED: Color = Color::Rgb(247, 118, 142);

/// Healthy/default indicators, toggles that are ON
/// RGB: (158, 206, 106)
pub const LINK_GREEN: Color = Color::Rgb(158, 206, 106);

/// General text
/// RGB: (169, 177, 214)
pub const MUTED_TEXT: Color = Color::Rgb(169, 177, 214);

// Re-export theme functions for convenient access
pub use default::*;
