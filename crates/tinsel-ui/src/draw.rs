//! Abstract drawing surface and a recording implementation.
//!
//! The toolkit never rasterises anything itself. Widgets describe what to
//! draw through [`Surface`], which the host implements on top of its own
//! renderer. [`DrawList`] records the calls instead, which is what headless
//! tools and the test suite use.
//!
//! # Example
//!
//! ```
//! use tinsel_ui::draw::{DrawCommand, DrawList, Surface};
//! use tinsel_ui::style::Color;
//! use tinsel_core::geometry::Rect;
//!
//! let mut list = DrawList::new();
//! list.fill_rect(Rect::from_xywh(0, 0, 10, 10), Color::WHITE);
//! assert!(matches!(list.commands()[0], DrawCommand::FillRect { .. }));
//! ```

use crate::style::{Color, FontId, ImageId, Style};
use tinsel_core::geometry::{Point, Rect};

/// Text measurement provided by the host.
pub trait TextMetrics {
    /// Size of `text` when drawn with `font`, covering every line.
    fn measure(&self, font: FontId, text: &str) -> Point;

    fn line_height(&self, font: FontId) -> i32;
}

/// Drawing primitives provided by the host.
pub trait Surface: TextMetrics {
    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn stroke_rect(&mut self, rect: Rect, width: i32, color: Color);

    fn stroke_line(&mut self, from: Point, to: Point, width: i32, color: Color);

    fn fill_circle(&mut self, center: Point, radius: i32, color: Color);

    fn stroke_circle(&mut self, center: Point, radius: i32, width: i32, color: Color);

    /// Draws a single line of text with its top-left corner at `at`.
    fn draw_text(&mut self, text: &str, at: Point, font: FontId, color: Color);

    /// Blits the `src` part of `image` with its top-left corner at `at`.
    fn draw_image(&mut self, image: ImageId, at: Point, src: Rect);

    /// Draws text that may span several lines.
    fn draw_text_block(&mut self, text: &str, at: Point, font: FontId, color: Color) {
        let step = self.line_height(font);
        let mut at = at;
        for line in text.split('\n') {
            self.draw_text(line, at, font, color);
            at.y += step;
        }
    }
}

/// Monospace metrics with a fixed advance per character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedMetrics {
    pub advance: i32,
    pub line_height: i32,
}

impl Default for FixedMetrics {
    fn default() -> Self {
        Self {
            advance: 5,
            line_height: 8,
        }
    }
}

impl FixedMetrics {
    pub const fn new(advance: i32, line_height: i32) -> Self {
        Self {
            advance,
            line_height,
        }
    }
}

impl TextMetrics for FixedMetrics {
    fn measure(&self, _font: FontId, text: &str) -> Point {
        let mut lines = 0;
        let mut widest = 0;
        for line in text.split('\n') {
            lines += 1;
            widest = widest.max(line.chars().count() as i32);
        }
        Point::new(widest * self.advance, lines * self.line_height)
    }

    fn line_height(&self, _font: FontId) -> i32 {
        self.line_height
    }
}

/// A recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        width: i32,
        color: Color,
    },
    Line {
        from: Point,
        to: Point,
        width: i32,
        color: Color,
    },
    FillCircle {
        center: Point,
        radius: i32,
        color: Color,
    },
    StrokeCircle {
        center: Point,
        radius: i32,
        width: i32,
        color: Color,
    },
    Text {
        text: String,
        at: Point,
        font: FontId,
        color: Color,
    },
    Image {
        image: ImageId,
        at: Point,
        src: Rect,
    },
}

/// A [`Surface`] that records every call.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
    metrics: FixedMetrics,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metrics(metrics: FixedMetrics) -> Self {
        Self {
            commands: Vec::new(),
            metrics,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Text runs in the order they were drawn.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl TextMetrics for DrawList {
    fn measure(&self, font: FontId, text: &str) -> Point {
        self.metrics.measure(font, text)
    }

    fn line_height(&self, font: FontId) -> i32 {
        self.metrics.line_height(font)
    }
}

impl Surface for DrawList {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, width: i32, color: Color) {
        self.commands.push(DrawCommand::StrokeRect { rect, width, color });
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: i32, color: Color) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: i32, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Point, radius: i32, width: i32, color: Color) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            width,
            color,
        });
    }

    fn draw_text(&mut self, text: &str, at: Point, font: FontId, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            at,
            font,
            color,
        });
    }

    fn draw_image(&mut self, image: ImageId, at: Point, src: Rect) {
        self.commands.push(DrawCommand::Image { image, at, src });
    }
}

impl Style {
    /// Draws a filled box with border and drop shadow.
    pub fn draw_box(&self, surface: &mut dyn Surface, rect: Rect) {
        if !self.shadow.is_transparent() {
            let shadow = self.shadow.with_alpha(self.shadow.a / 2 + 1);
            surface.stroke_line(
                Point::new(rect.max.x + 1, rect.min.y + 1),
                Point::new(rect.max.x + 1, rect.max.y + 1),
                1,
                shadow,
            );
            surface.stroke_line(
                Point::new(rect.min.x + 1, rect.max.y + 1),
                Point::new(rect.max.x + 1, rect.max.y + 1),
                1,
                shadow,
            );
        }
        surface.fill_rect(rect, self.fill);
        if self.stroke > 0 {
            surface.stroke_rect(rect, self.stroke, self.border);
        }
    }

    pub fn draw_frame(&self, surface: &mut dyn Surface, rect: Rect) {
        if self.stroke > 0 {
            surface.stroke_rect(rect, self.stroke, self.border);
        }
    }

    pub fn draw_circle(&self, surface: &mut dyn Surface, center: Point, radius: i32) {
        let radius = radius.max(1);
        surface.fill_circle(center, radius, self.fill);
        if self.stroke > 0 {
            surface.stroke_circle(center, radius, self.stroke, self.border);
        }
    }

    /// Draws `text` inset by the margin from `at`.
    pub fn draw_text(&self, surface: &mut dyn Surface, at: Point, text: &str) {
        surface.draw_text_block(text, at + self.margin, self.font, self.writing);
    }

    pub fn measure_text(&self, metrics: &dyn TextMetrics, text: &str) -> Point {
        metrics.measure(self.font, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_metrics_multiline() {
        let metrics = FixedMetrics::new(6, 10);
        assert_eq!(metrics.measure(FontId::DEFAULT, "abc"), Point::new(18, 10));
        assert_eq!(metrics.measure(FontId::DEFAULT, "a\nlonger"), Point::new(36, 20));
        assert_eq!(metrics.measure(FontId::DEFAULT, ""), Point::new(0, 10));
    }

    #[test]
    fn test_text_block_splits_lines() {
        let mut list = DrawList::new();
        list.draw_text_block("one\ntwo", Point::new(4, 4), FontId::DEFAULT, Color::WHITE);
        let runs: Vec<_> = list
            .commands()
            .iter()
            .map(|command| match command {
                DrawCommand::Text { text, at, .. } => (text.clone(), *at),
                other => panic!("unexpected {:?}", other),
            })
            .collect();
        assert_eq!(
            runs,
            vec![
                ("one".to_string(), Point::new(4, 4)),
                ("two".to_string(), Point::new(4, 12)),
            ]
        );
    }

    #[test]
    fn test_draw_box_without_shadow_or_border() {
        let style = Style {
            shadow: Color::TRANSPARENT,
            stroke: 0,
            ..Style::default()
        };
        let mut list = DrawList::new();
        style.draw_box(&mut list, Rect::from_xywh(0, 0, 4, 4));
        assert_eq!(list.len(), 1);
        assert!(matches!(list.commands()[0], DrawCommand::FillRect { .. }));
    }
}
