//! SwingViz core: synthetic market table generation and swing
//! simulation for the volatility dashboard.

pub mod cache;
pub mod command;
pub mod config;
pub mod error;
pub mod generator;
pub mod pattern;
pub mod rng;
pub mod session;
pub mod simulator;
pub mod source;
pub mod types;
pub mod view;
