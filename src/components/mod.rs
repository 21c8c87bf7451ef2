//! UI components.

/// Canvas particle background and its engine.
pub mod particle_background;
