//! Colors for each entity kind.

use eframe::egui::Color32;

/// Maze walls
pub const WALL_COLOR: Color32 = Color32::RED;
/// The four walls framing the play area
pub const BOUNDARY_COLOR: Color32 = Color32::LIGHT_GRAY;
/// The player ball
pub const BALL_COLOR: Color32 = Color32::YELLOW;
/// The goal zone
pub const GOAL_COLOR: Color32 = Color32::GREEN;
/// The win banner text
pub const WIN_TEXT_COLOR: Color32 = Color32::GOLD;
