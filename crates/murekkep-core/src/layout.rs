//! Window size classification for touch and small screens.

/// Windows at most this wide (logical px) use the compact layout.
pub const COMPACT_MAX_WIDTH: f32 = 768.0;

/// Layout density for the editing chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutClass {
    /// Phones, tablets and touch screens: larger hit targets.
    Compact,
    #[default]
    Regular,
}

impl LayoutClass {
    /// Classify from window width and touch capability.
    pub fn classify(window_width: f32, max_touch_points: u32, has_touch_events: bool) -> Self {
        if window_width <= COMPACT_MAX_WIDTH || has_touch_events || max_touch_points > 0 {
            LayoutClass::Compact
        } else {
            LayoutClass::Regular
        }
    }

    pub fn is_compact(self) -> bool {
        self == LayoutClass::Compact
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrow_window_is_compact() {
        assert_eq!(LayoutClass::classify(768.0, 0, false), LayoutClass::Compact);
        assert_eq!(LayoutClass::classify(769.0, 0, false), LayoutClass::Regular);
    }

    #[test]
    fn test_touch_is_compact() {
        assert!(LayoutClass::classify(1920.0, 5, false).is_compact());
        assert!(LayoutClass::classify(1920.0, 0, true).is_compact());
    }
}
