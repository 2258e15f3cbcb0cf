#![warn(missing_docs)]
//! A maze game: a randomized depth-first search carves a perfect maze, its
//! closed walls become rapier2d colliders, and the player steers a ball
//! from the top-left cell to the goal at the far corner.

pub mod config;
pub mod generator;
pub mod grid;
pub mod gui;
pub mod simulation;
