//! Fixed-step Snake: a tick-driven simulation with combo scoring and level
//! speed-up, decoupled from an interpolating renderer.

pub mod audio;
pub mod collaborators;
pub mod collision;
pub mod config;
pub mod controller;
pub mod food;
pub mod grid;
pub mod input;
pub mod interpolate;
pub mod renderer;
pub mod scheduler;
pub mod score;
pub mod scoring;
pub mod simulation;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
