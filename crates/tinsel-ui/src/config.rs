//! Toolkit configuration.

use crate::style::Style;

/// Settings owned by the [`Root`](crate::Root).
///
/// Durations are counted in frames, the unit the host reports hold times in.
#[derive(Debug, Clone, PartialEq)]
pub struct UiConfig {
    /// Frames a key must be held before editing actions repeat.
    pub key_repeat_delay: u32,
    /// Frames between repeats once the delay has passed.
    pub key_repeat_interval: u32,
    /// Pad axis magnitude below which no move event is emitted.
    pub pad_dead_zone: f32,
    /// Thickness of scrollers added with `add_vertical_scroller` and friends.
    pub scroller_thickness: i32,
    /// Default slider range.
    pub slider_low: i32,
    pub slider_high: i32,
    /// Style given to newly built widgets.
    pub default_style: Style,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            key_repeat_delay: 60,
            key_repeat_interval: 30,
            pad_dead_zone: 0.1,
            scroller_thickness: 8,
            slider_low: 0,
            slider_high: 100,
            default_style: Style::default(),
        }
    }
}

impl UiConfig {
    /// Returns true when a key held for `duration` frames should repeat.
    pub fn should_repeat(&self, duration: u32) -> bool {
        duration > self.key_repeat_delay
            && self.key_repeat_interval > 0
            && duration % self.key_repeat_interval == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat_schedule() {
        let config = UiConfig::default();
        let repeats: Vec<u32> = (0..=150).filter(|d| config.should_repeat(*d)).collect();
        assert_eq!(repeats, vec![90, 120, 150]);
    }

    #[test]
    fn test_zero_interval_never_repeats() {
        let config = UiConfig {
            key_repeat_interval: 0,
            ..UiConfig::default()
        };
        assert!(!config.should_repeat(1000));
    }
}
