use crate::error::ChartResult;
use crate::render::{Color, FontSpec, TextAlign, TextBaseline};

/// Immediate-mode drawing target used by every layer.
///
/// Mirrors the subset of a 2D canvas context the layers need: a current
/// transform, a current path that `fill`/`stroke` paint without consuming,
/// separate fill and stroke styles, and anchored text. Calls that can reach a
/// real backend return `ChartResult`.
pub trait DrawContext {
    fn reset_transform(&mut self);
    fn scale(&mut self, x: f64, y: f64);
    fn translate(&mut self, x: f64, y: f64);

    /// Clears a rectangle under the current transform, leaving the current
    /// path intact.
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()>;

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64);

    fn set_fill_style(&mut self, color: Color);
    fn set_stroke_style(&mut self, color: Color);
    fn set_line_width(&mut self, width: f64);
    fn set_font(&mut self, font: &FontSpec);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);

    fn fill(&mut self) -> ChartResult<()>;
    fn stroke(&mut self) -> ChartResult<()>;
    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> ChartResult<()>;

    /// Reallocates the backing store to `width_px` x `height_px` device pixels.
    fn resize_backing(&mut self, width_px: u32, height_px: u32) -> ChartResult<()> {
        let _ = (width_px, height_px);
        Ok(())
    }
}

/// One call made against a [`RecordingContext`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    ResetTransform,
    Scale {
        x: f64,
        y: f64,
    },
    Translate {
        x: f64,
        y: f64,
    },
    ClearRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    BeginPath,
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Arc {
        x: f64,
        y: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    SetFillStyle(Color),
    SetStrokeStyle(Color),
    SetLineWidth(f64),
    SetFont(FontSpec),
    SetTextAlign(TextAlign),
    SetTextBaseline(TextBaseline),
    Fill,
    Stroke,
    FillText {
        text: String,
        x: f64,
        y: f64,
    },
    ResizeBacking {
        width_px: u32,
        height_px: u32,
    },
}

/// Headless context that records every call in order.
///
/// Used by tests and by hosts that replay frames onto their own backend.
#[derive(Debug, Default)]
pub struct RecordingContext {
    commands: Vec<DrawCommand>,
    backing_size: (u32, u32),
}

impl RecordingContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drains the recorded commands, leaving the recorder empty.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Last size passed to [`DrawContext::resize_backing`].
    #[must_use]
    pub fn backing_size(&self) -> (u32, u32) {
        self.backing_size
    }

    #[must_use]
    pub fn count_where(&self, predicate: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|command| predicate(command)).count()
    }

    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

impl DrawContext for RecordingContext {
    fn reset_transform(&mut self) {
        self.push(DrawCommand::ResetTransform);
    }

    fn scale(&mut self, x: f64, y: f64) {
        self.push(DrawCommand::Scale { x, y });
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.push(DrawCommand::Translate { x, y });
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()> {
        self.push(DrawCommand::ClearRect {
            x,
            y,
            width,
            height,
        });
        Ok(())
    }

    fn begin_path(&mut self) {
        self.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.push(DrawCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.push(DrawCommand::LineTo { x, y });
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.push(DrawCommand::Rect {
            x,
            y,
            width,
            height,
        });
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) {
        self.push(DrawCommand::Arc {
            x,
            y,
            radius,
            start_angle,
            end_angle,
        });
    }

    fn set_fill_style(&mut self, color: Color) {
        self.push(DrawCommand::SetFillStyle(color));
    }

    fn set_stroke_style(&mut self, color: Color) {
        self.push(DrawCommand::SetStrokeStyle(color));
    }

    fn set_line_width(&mut self, width: f64) {
        self.push(DrawCommand::SetLineWidth(width));
    }

    fn set_font(&mut self, font: &FontSpec) {
        self.push(DrawCommand::SetFont(font.clone()));
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.push(DrawCommand::SetTextAlign(align));
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.push(DrawCommand::SetTextBaseline(baseline));
    }

    fn fill(&mut self) -> ChartResult<()> {
        self.push(DrawCommand::Fill);
        Ok(())
    }

    fn stroke(&mut self) -> ChartResult<()> {
        self.push(DrawCommand::Stroke);
        Ok(())
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> ChartResult<()> {
        self.push(DrawCommand::FillText {
            text: text.to_owned(),
            x,
            y,
        });
        Ok(())
    }

    fn resize_backing(&mut self, width_px: u32, height_px: u32) -> ChartResult<()> {
        self.backing_size = (width_px, height_px);
        self.push(DrawCommand::ResizeBacking {
            width_px,
            height_px,
        });
        Ok(())
    }
}
