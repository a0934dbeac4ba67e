//! Turning a backend response into something worth looking at: cards, a vibe,
//! and a curator line.

pub mod phrases;
pub mod render;
pub mod vibe;
