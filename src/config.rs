//! Game configuration.

use anyhow::{anyhow, Error};
use serde::{Deserialize, Serialize};

/// All tunables, read once at startup and passed explicitly to the
/// generator, simulation, and GUI.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MazeConfig {
    /// Number of cell rows in the maze
    pub rows: usize,
    /// Number of cell columns in the maze
    pub cols: usize,
    /// Initial window width, in points
    pub window_width: f32,
    /// Initial window height, in points
    pub window_height: f32,
    /// Velocity applied along the pressed axis, in cells per second
    pub move_speed: f32,
    /// Full thickness of a wall collider, in cells
    pub wall_thickness: f32,
    /// Ball radius, in cells
    pub ball_radius: f32,
    /// Side length of the goal zone, as a fraction of a cell
    pub goal_size: f32,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            rows: 20,
            cols: 20,
            window_width: 900.0,
            window_height: 900.0,
            move_speed: 5.0,
            wall_thickness: 0.1,
            ball_radius: 0.25,
            goal_size: 0.7,
        }
    }
}

impl MazeConfig {
    /// Reject configurations the generator and simulation cannot accept.
    pub fn validate(&self) -> Result<(), Error> {
        if self.rows < 1 || self.cols < 1 {
            return Err(anyhow!("maze dimensions must be positive"));
        }
        if self.window_width <= 0.0 || self.window_height <= 0.0 {
            return Err(anyhow!("window size must be positive"));
        }
        if self.move_speed <= 0.0 {
            return Err(anyhow!("move speed must be positive"));
        }
        if self.wall_thickness <= 0.0 || self.wall_thickness >= 1.0 {
            return Err(anyhow!("wall thickness must be between 0 and 1 cells"));
        }
        if self.ball_radius <= 0.0 || self.ball_radius >= 0.5 {
            return Err(anyhow!("ball radius must be between 0 and half a cell"));
        }
        if self.goal_size <= 0.0 || self.goal_size > 1.0 {
            return Err(anyhow!("goal size must be between 0 and 1 cells"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(MazeConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_rows_rejected() {
        let config = MazeConfig {
            rows: 0,
            ..Default::default()
        };
        let v = config.validate();
        assert!(v.is_err());
        assert_eq!(
            format!("{}", v.unwrap_err()),
            "maze dimensions must be positive"
        );
    }

    #[test]
    fn oversized_ball_rejected() {
        let config = MazeConfig {
            ball_radius: 0.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn negative_speed_rejected() {
        let config = MazeConfig {
            move_speed: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
