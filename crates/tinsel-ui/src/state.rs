//! Per-widget state flags.

use bitflags::bitflags;

bitflags! {
    /// State flags carried by every widget node.
    ///
    /// `FOCUS`, `HOVER`, `DRAGGED` and `MARKED` mirror the root's interaction
    /// registers and are only ever set by the root. The rest are owned by the
    /// widget and its behavior.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct WidgetState: u16 {
        /// Receives keyboard input.
        const FOCUS   = 1 << 0;
        /// Under the pointer.
        const HOVER   = 1 << 1;
        /// Skipped by hit testing, still drawn.
        const PAUSED  = 1 << 2;
        /// Neither drawn nor hit tested, together with its subtree.
        const HIDDEN  = 1 << 3;
        /// Descendants outside the bounds are not hit tested.
        const CLIP    = 1 << 4;
        /// Not moved when the parent scrolls its content.
        const LOCKED  = 1 << 5;
        /// Between a drag start and its drop.
        const DRAGGED = 1 << 6;
        /// Highlighted for keyboard or gamepad selection.
        const MARKED  = 1 << 7;
        /// Transient pressed state of clickable widgets.
        const PRESSED = 1 << 8;
    }
}

impl WidgetState {
    /// Flags that exclude a node from hit testing.
    pub const UNHITTABLE: Self = Self::HIDDEN.union(Self::PAUSED);

    pub fn is_hidden(&self) -> bool {
        self.contains(Self::HIDDEN)
    }

    pub fn is_hittable(&self) -> bool {
        !self.intersects(Self::UNHITTABLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hittable() {
        assert!(WidgetState::empty().is_hittable());
        assert!(WidgetState::FOCUS.is_hittable());
        assert!(!WidgetState::HIDDEN.is_hittable());
        assert!(!(WidgetState::PAUSED | WidgetState::HOVER).is_hittable());
    }
}
