//! Text rendering of selected trees.
//!
//! Styling is injected through [`LabelStyle`] so the renderer itself never
//! touches terminal state.

mod label_style;
mod renderer;

pub use label_style::{AnsiStyle, LabelStyle, PlainStyle};
pub use renderer::TreeRenderer;
