//! Rendering contract
//!
//! Renderers consume a borrowed `Snapshot` and never touch the session.
//! The text renderer backs the native demo; browser front-ends draw from
//! the JSON snapshot exposed by the platform bindings.

pub mod text;

pub use text::TextRenderer;

use crate::sim::Snapshot;

/// Anything that can present a frame
pub trait Renderer {
    fn draw(&mut self, frame: &Snapshot<'_>);
}
