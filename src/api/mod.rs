//! Host-facing composition: a layer bound to its surface, render gating and
//! JSON configuration.

mod config;
mod layer_host;
mod render_gate;

pub use config::{ChartConfig, LayerTheme};
pub use layer_host::LayerHost;
pub use render_gate::{RenderGate, RenderStats};
