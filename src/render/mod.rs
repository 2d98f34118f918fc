//! Rendering: world -> canvas mapping, ribbon geometry, canvas drawing.
//!
//! `view`, `ribbon` and `outline` are pure and run anywhere; `canvas` needs a browser.

mod canvas;
mod outline;
mod ribbon;
mod view;

pub use canvas::CanvasRenderer;
pub use ribbon::{arc_sweep, Circle, PathCommand, RibbonPath};
pub use view::ViewTransform;
