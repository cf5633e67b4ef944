//! Reusable UI components for Trimline

pub mod components;

pub use components::*;
