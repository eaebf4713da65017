//! Style values for widgets.
//!
//! A [`Style`] is a plain value. Widgets keep one base style and derive the
//! variant for their current state with [`Style::for_state`] instead of
//! mutating the base in place.

use crate::state::WidgetState;
use tinsel_core::geometry::Point;

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const GRAY: Self = Self::rgb(128, 128, 128);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

/// Handle to a font owned by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FontId(pub u32);

impl FontId {
    pub const DEFAULT: Self = Self(0);
    pub const TINY: Self = Self(1);
}

/// Handle to an image owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(pub u32);

/// Visual style of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    /// Foreground accents such as check marks and cursors.
    pub fore: Color,
    pub border: Color,
    /// Drop shadow drawn one pixel right of and below the box.
    pub shadow: Color,
    pub fill: Color,
    /// Text color.
    pub writing: Color,
    /// Padding between the bounds and the content.
    pub margin: Point,
    /// Border thickness; zero disables the border.
    pub stroke: i32,
    pub font: FontId,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fore: Color::rgba(245, 245, 245, 245),
            border: Color::rgba(50, 50, 50, 245),
            shadow: Color::rgba(15, 15, 15, 191),
            fill: Color::rgba(0, 0, 245, 245),
            writing: Color::rgba(245, 245, 245, 245),
            margin: Point::new(2, 2),
            stroke: 1,
            font: FontId::DEFAULT,
        }
    }
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hover(self) -> Self {
        Self {
            border: Color::rgba(240, 240, 50, 250),
            ..self
        }
    }

    pub fn focus(self) -> Self {
        Self {
            border: Color::rgba(240, 240, 240, 245),
            writing: Color::rgba(245, 245, 245, 245),
            fill: Color::rgba(128, 128, 245, 245),
            ..self
        }
    }

    /// Pressed buttons are darker and lose their shadow.
    pub fn pressed(self) -> Self {
        Self {
            fill: Color::rgba(0, 0, 160, 245),
            shadow: Color::TRANSPARENT,
            ..self
        }
    }

    pub fn bar(self) -> Self {
        Self {
            fill: Color::rgba(80, 80, 96, 245),
            shadow: Color::TRANSPARENT,
            margin: Point::new(3, 1),
            ..self
        }
    }

    pub fn check(self) -> Self {
        Self {
            fill: Color::rgba(20, 20, 20, 245),
            fore: Color::rgba(50, 245, 50, 245),
            ..self
        }
    }

    pub fn knob(self) -> Self {
        Self {
            fill: Color::rgba(200, 200, 200, 245),
            border: Color::rgba(20, 20, 20, 245),
            ..self
        }
    }

    pub fn with_font(self, font: FontId) -> Self {
        Self { font, ..self }
    }

    pub fn with_margin(self, margin: Point) -> Self {
        Self { margin, ..self }
    }

    pub fn with_fill(self, fill: Color) -> Self {
        Self { fill, ..self }
    }

    /// Picks the variant matching the interaction state. Pressed wins over
    /// focus, which wins over hover.
    pub fn for_state(self, state: WidgetState) -> Self {
        if state.contains(WidgetState::PRESSED) {
            self.pressed()
        } else if state.contains(WidgetState::FOCUS) {
            self.focus()
        } else if state.contains(WidgetState::HOVER) {
            self.hover()
        } else {
            self
        }
    }
}
