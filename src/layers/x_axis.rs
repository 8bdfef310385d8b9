use crate::core::{Interval, ScaleKind, TickFormat, Ticks, compute_ticks, make_scale};
use crate::error::ChartResult;
use crate::layers::{DEFAULT_AXIS_COLOR, Layer};
use crate::render::{Color, DrawContext, FontSpec, TextAlign, TextBaseline};

const HORIZONTAL_PADDING: f64 = 6.0;
const VERTICAL_PADDING: f64 = 4.0;

/// Tick labels along the top edge with a full-height gridline per tick.
#[derive(Debug, Clone, PartialEq)]
pub struct XAxisLayer {
    pub x_domain: Interval,
    pub scale_kind: ScaleKind,
    pub ticks: Option<Ticks>,
    pub tick_format: Option<TickFormat>,
    pub color: Color,
    pub font: FontSpec,
}

impl XAxisLayer {
    #[must_use]
    pub fn new(x_domain: Interval) -> Self {
        Self {
            x_domain,
            scale_kind: ScaleKind::Time,
            ticks: None,
            tick_format: None,
            color: DEFAULT_AXIS_COLOR,
            font: FontSpec::default(),
        }
    }

    #[must_use]
    pub fn with_scale_kind(mut self, kind: ScaleKind) -> Self {
        self.scale_kind = kind;
        self
    }

    #[must_use]
    pub fn with_ticks(mut self, ticks: Ticks) -> Self {
        self.ticks = Some(ticks);
        self
    }

    #[must_use]
    pub fn with_tick_format(mut self, format: TickFormat) -> Self {
        self.tick_format = Some(format);
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_font(mut self, font: FontSpec) -> Self {
        self.font = font;
        self
    }
}

impl Layer for XAxisLayer {
    fn name(&self) -> &'static str {
        "x-axis"
    }

    fn render(&self, width: f64, height: f64, context: &mut dyn DrawContext) -> ChartResult<()> {
        let x_scale =
            make_scale(self.scale_kind, self.x_domain, Interval::new(0.0, width)).rounded();
        let computed = compute_ticks(&x_scale, self.ticks.as_ref(), self.tick_format.as_ref());

        context.begin_path();
        context.set_text_align(TextAlign::Left);
        context.set_text_baseline(TextBaseline::Top);
        context.set_fill_style(self.color);
        context.set_font(&self.font);

        for &tick in &computed.ticks {
            let x = x_scale.apply(tick);
            let label = computed.format.format(tick).to_uppercase();
            context.fill_text(&label, x + HORIZONTAL_PADDING, VERTICAL_PADDING)?;
            context.move_to(x, 0.0);
            context.line_to(x, height);
        }

        context.set_stroke_style(self.color);
        context.stroke()
    }
}
