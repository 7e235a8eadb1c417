//! Room Design Render Library
//!
//! GPU drawing surface for the room layout engine. [`VelloSurface`] encodes
//! every frame the designer draws into a `vello::Scene` that the host
//! submits to its own `vello::Renderer`.

mod renderer;
mod vello_impl;

pub use renderer::{RenderResult, RendererError, TextLabel};
pub use vello_impl::VelloSurface;
