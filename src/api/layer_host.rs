use tracing::{debug, trace};

use crate::error::ChartResult;
use crate::layers::Layer;
use crate::render::{CanvasSurface, DrawContext};

use super::{RenderGate, RenderStats};

/// Binds one layer to the surface it draws on.
///
/// The host's two entry points map onto [`LayerHost::resize`] (size changed)
/// and [`LayerHost::set_layer`] (props changed). Both re-render only when
/// something visible changed.
pub struct LayerHost<L, C: DrawContext> {
    surface: CanvasSurface<C>,
    layer: L,
    gate: RenderGate,
}

impl<L, C> LayerHost<L, C>
where
    L: Layer + PartialEq,
    C: DrawContext,
{
    #[must_use]
    pub fn new(layer: L, surface: CanvasSurface<C>) -> Self {
        Self {
            surface,
            layer,
            gate: RenderGate::new(),
        }
    }

    #[must_use]
    pub fn layer(&self) -> &L {
        &self.layer
    }

    #[must_use]
    pub fn surface(&self) -> &CanvasSurface<C> {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut CanvasSurface<C> {
        &mut self.surface
    }

    #[must_use]
    pub fn render_stats(&self) -> RenderStats {
        self.gate.stats()
    }

    /// Replaces the layer props and renders unless they equal the props on
    /// screen. Returns whether a pass ran.
    pub fn set_layer(&mut self, layer: L) -> ChartResult<bool> {
        if self.gate.should_skip_render(&self.layer, &layer) {
            self.gate.record_skip();
            debug!(layer = self.layer.name(), "render skipped, props unchanged");
            return Ok(false);
        }
        self.layer = layer;
        self.render()?;
        Ok(true)
    }

    /// Applies a new logical size and renders when it changed.
    pub fn resize(&mut self, width: f64, height: f64) -> ChartResult<bool> {
        if !self.surface.resize(width, height)? {
            return Ok(false);
        }
        self.render()?;
        Ok(true)
    }

    /// Changes the device pixel ratio and redraws at the new resolution.
    pub fn set_pixel_ratio(&mut self, pixel_ratio: f64) -> ChartResult<()> {
        if pixel_ratio == self.surface.pixel_ratio() {
            return Ok(());
        }
        self.surface.set_pixel_ratio(pixel_ratio)?;
        self.gate.invalidate();
        self.render()
    }

    /// Unconditional pass: reset the canvas, then draw the layer.
    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.surface.reset_canvas()?;
        let (width, height) = (frame.width, frame.height);
        self.layer.render(width, height, frame.context)?;
        self.gate.record_render();
        trace!(layer = self.layer.name(), width, height, "layer rendered");
        Ok(())
    }

    #[must_use]
    pub fn into_parts(self) -> (L, CanvasSurface<C>) {
        (self.layer, self.surface)
    }
}
