use cairo::{Context, Format, ImageSurface, Operator};
use pango::FontDescription;

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, DrawContext, FontSpec, TextAlign, TextBaseline};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoDrawStats {
    pub fills: usize,
    pub strokes: usize,
    pub texts: usize,
}

/// Cairo + Pango + PangoCairo drawing context over an ARGB32 image surface.
///
/// Fill and stroke styles are tracked separately and applied as the Cairo
/// source right before painting; `fill`/`stroke` keep the current path like a
/// 2D canvas does.
#[derive(Debug)]
pub struct CairoContext {
    surface: ImageSurface,
    context: Context,
    fill_style: Color,
    stroke_style: Color,
    font: FontSpec,
    text_align: TextAlign,
    text_baseline: TextBaseline,
    stats: CairoDrawStats,
}

impl CairoContext {
    pub fn new(width_px: u32, height_px: u32) -> ChartResult<Self> {
        let (surface, context) = create_surface(width_px, height_px)?;
        Ok(Self::with_surface(surface, context, CairoDrawStats::default()))
    }

    fn with_surface(surface: ImageSurface, context: Context, stats: CairoDrawStats) -> Self {
        Self {
            surface,
            context,
            fill_style: Color::rgb(0.0, 0.0, 0.0),
            stroke_style: Color::rgb(0.0, 0.0, 0.0),
            font: FontSpec::default(),
            text_align: TextAlign::default(),
            text_baseline: TextBaseline::default(),
            stats,
        }
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    /// Paint operations issued since the last [`CairoContext::take_stats`].
    #[must_use]
    pub fn stats(&self) -> CairoDrawStats {
        self.stats
    }

    pub fn take_stats(&mut self) -> CairoDrawStats {
        std::mem::take(&mut self.stats)
    }

    /// Encodes the backing store as PNG.
    pub fn to_png_bytes(&self) -> ChartResult<Vec<u8>> {
        self.surface.flush();
        let mut bytes = Vec::new();
        self.surface
            .write_to_png(&mut bytes)
            .map_err(|err| ChartError::Backend(format!("failed to encode png: {err}")))?;
        Ok(bytes)
    }
}

impl DrawContext for CairoContext {
    fn reset_transform(&mut self) {
        self.context.identity_matrix();
    }

    fn scale(&mut self, x: f64, y: f64) {
        self.context.scale(x, y);
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.context.translate(x, y);
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()> {
        let path = self
            .context
            .copy_path()
            .map_err(|err| map_backend_error("failed to copy path", err))?;
        self.context
            .save()
            .map_err(|err| map_backend_error("failed to save state", err))?;
        self.context.new_path();
        self.context.set_operator(Operator::Clear);
        self.context.rectangle(x, y, width, height);
        self.context
            .fill()
            .map_err(|err| map_backend_error("failed to clear rectangle", err))?;
        self.context
            .restore()
            .map_err(|err| map_backend_error("failed to restore state", err))?;
        self.context.append_path(&path);
        Ok(())
    }

    fn begin_path(&mut self) {
        self.context.new_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.context.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.context.line_to(x, y);
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.context.rectangle(x, y, width, height);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) {
        self.context.arc(x, y, radius, start_angle, end_angle);
    }

    fn set_fill_style(&mut self, color: Color) {
        self.fill_style = color;
    }

    fn set_stroke_style(&mut self, color: Color) {
        self.stroke_style = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.context.set_line_width(width);
    }

    fn set_font(&mut self, font: &FontSpec) {
        self.font = font.clone();
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.text_align = align;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.text_baseline = baseline;
    }

    fn fill(&mut self) -> ChartResult<()> {
        apply_color(&self.context, self.fill_style);
        self.context
            .fill_preserve()
            .map_err(|err| map_backend_error("failed to fill path", err))?;
        self.stats.fills += 1;
        Ok(())
    }

    fn stroke(&mut self) -> ChartResult<()> {
        apply_color(&self.context, self.stroke_style);
        self.context
            .stroke_preserve()
            .map_err(|err| map_backend_error("failed to stroke path", err))?;
        self.stats.strokes += 1;
        Ok(())
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> ChartResult<()> {
        let layout = pangocairo::functions::create_layout(&self.context);
        let font_description =
            FontDescription::from_string(&format!("{} {}px", self.font.family, self.font.size_px));
        layout.set_font_description(Some(&font_description));
        layout.set_text(text);

        let (text_width, text_height) = layout.pixel_size();
        let baseline = f64::from(layout.baseline()) / f64::from(pango::SCALE);
        let left = match self.text_align {
            TextAlign::Left => x,
            TextAlign::Center => x - f64::from(text_width) / 2.0,
            TextAlign::Right => x - f64::from(text_width),
        };
        let top = match self.text_baseline {
            TextBaseline::Top => y,
            TextBaseline::Middle => y - f64::from(text_height) / 2.0,
            TextBaseline::Alphabetic => y - baseline,
            TextBaseline::Bottom => y - f64::from(text_height),
        };

        let path = self
            .context
            .copy_path()
            .map_err(|err| map_backend_error("failed to copy path", err))?;
        apply_color(&self.context, self.fill_style);
        self.context.new_path();
        self.context.move_to(left, top);
        pangocairo::functions::show_layout(&self.context, &layout);
        self.context.new_path();
        self.context.append_path(&path);
        self.stats.texts += 1;
        Ok(())
    }

    fn resize_backing(&mut self, width_px: u32, height_px: u32) -> ChartResult<()> {
        let (surface, context) = create_surface(width_px, height_px)?;
        // A reallocated canvas starts from default drawing state.
        *self = Self::with_surface(surface, context, self.stats);
        Ok(())
    }
}

fn create_surface(width_px: u32, height_px: u32) -> ChartResult<(ImageSurface, Context)> {
    let width = i32::try_from(width_px)
        .map_err(|_| ChartError::Backend(format!("surface width {width_px} is too large")))?;
    let height = i32::try_from(height_px)
        .map_err(|_| ChartError::Backend(format!("surface height {height_px} is too large")))?;
    let surface = ImageSurface::create(Format::ARgb32, width, height)
        .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
    let context = Context::new(&surface)
        .map_err(|err| map_backend_error("failed to create cairo context", err))?;
    Ok((surface, context))
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Backend(format!("{prefix}: {err}"))
}
