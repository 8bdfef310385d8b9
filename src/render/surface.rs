use indexmap::IndexMap;
use tracing::debug;

use crate::core::SurfaceSize;
use crate::error::{ChartError, ChartResult};
use crate::render::DrawContext;

/// Handle returned by [`CanvasSurface::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type SizeListener = Box<dyn FnMut(SurfaceSize)>;

/// Drawing target prepared by [`CanvasSurface::reset_canvas`].
///
/// `width`/`height` are logical pixels; the context already carries the
/// pixel-ratio scale.
pub struct SurfaceFrame<'a, C: DrawContext> {
    pub width: f64,
    pub height: f64,
    pub context: &'a mut C,
}

/// Owns a drawing context plus its logical size and device pixel ratio.
///
/// The backing store is always `floor(size * pixel_ratio)` device pixels.
/// Listeners registered with [`CanvasSurface::subscribe`] are told about
/// every effective size change, in registration order.
pub struct CanvasSurface<C: DrawContext> {
    context: C,
    size: SurfaceSize,
    pixel_ratio: f64,
    listeners: IndexMap<SubscriptionId, SizeListener>,
    next_subscription: u64,
}

impl<C: DrawContext> CanvasSurface<C> {
    pub fn new(context: C, pixel_ratio: f64) -> ChartResult<Self> {
        validate_pixel_ratio(pixel_ratio)?;
        Ok(Self {
            context,
            size: SurfaceSize::default(),
            pixel_ratio,
            listeners: IndexMap::new(),
            next_subscription: 0,
        })
    }

    #[must_use]
    pub fn dimensions(&self) -> SurfaceSize {
        self.size
    }

    #[must_use]
    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    /// Device-pixel size of the backing store.
    #[must_use]
    pub fn backing_size(&self) -> (u32, u32) {
        backing_pixels(self.size, self.pixel_ratio)
    }

    /// Changes the device pixel ratio and reallocates the backing store.
    ///
    /// The ratio is kept unchanged when reallocation fails.
    pub fn set_pixel_ratio(&mut self, pixel_ratio: f64) -> ChartResult<()> {
        validate_pixel_ratio(pixel_ratio)?;
        if pixel_ratio == self.pixel_ratio {
            return Ok(());
        }
        let (width_px, height_px) = backing_pixels(self.size, pixel_ratio);
        self.context.resize_backing(width_px, height_px)?;
        self.pixel_ratio = pixel_ratio;
        debug!(pixel_ratio, width_px, height_px, "surface pixel ratio changed");
        Ok(())
    }

    /// Applies a new logical size.
    ///
    /// Returns `false` without side effects when the size is unchanged. A
    /// failed reallocation leaves the previous size in place.
    pub fn resize(&mut self, width: f64, height: f64) -> ChartResult<bool> {
        let size = SurfaceSize::new(width, height);
        if !size.is_valid() {
            return Err(ChartError::InvalidViewport { width, height });
        }
        if size == self.size {
            return Ok(false);
        }

        let (width_px, height_px) = backing_pixels(size, self.pixel_ratio);
        self.context.resize_backing(width_px, height_px)?;
        self.size = size;
        debug!(
            width,
            height,
            width_px,
            height_px,
            listeners = self.listeners.len(),
            "surface resized"
        );

        for listener in self.listeners.values_mut() {
            listener(size);
        }
        Ok(true)
    }

    /// Registers a size-change listener.
    pub fn subscribe(&mut self, listener: impl FnMut(SurfaceSize) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.insert(id, Box::new(listener));
        id
    }

    /// Removes a listener; returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.shift_remove(&id).is_some()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    /// Resets the transform, clears the whole backing store and applies the
    /// pixel-ratio scale so callers draw in logical pixels.
    pub fn reset_canvas(&mut self) -> ChartResult<SurfaceFrame<'_, C>> {
        let (width_px, height_px) = self.backing_size();
        self.context.reset_transform();
        self.context
            .clear_rect(0.0, 0.0, f64::from(width_px), f64::from(height_px))?;
        self.context.scale(self.pixel_ratio, self.pixel_ratio);
        Ok(SurfaceFrame {
            width: self.size.width,
            height: self.size.height,
            context: &mut self.context,
        })
    }

    #[must_use]
    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    #[must_use]
    pub fn into_context(self) -> C {
        self.context
    }
}

fn validate_pixel_ratio(pixel_ratio: f64) -> ChartResult<()> {
    if !pixel_ratio.is_finite() || pixel_ratio <= 0.0 {
        return Err(ChartError::InvalidData(format!(
            "pixel ratio must be finite and > 0, got {pixel_ratio}"
        )));
    }
    Ok(())
}

fn backing_pixels(size: SurfaceSize, pixel_ratio: f64) -> (u32, u32) {
    (
        device_pixels(size.width, pixel_ratio),
        device_pixels(size.height, pixel_ratio),
    )
}

fn device_pixels(logical: f64, pixel_ratio: f64) -> u32 {
    (logical * pixel_ratio).floor().clamp(0.0, f64::from(u32::MAX)) as u32
}
