//! Screen-space placement of the scaled overlay.

use serde::{Deserialize, Serialize};

/// Placement policy for the overlay rectangle.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    #[serde(rename = "bottom-left-of-screen")]
    BottomLeft,
}

/// Top-left origin for an `image`-sized overlay on a `screen`-sized display.
/// Bottom-left anchoring: x = 0, y = (screen height - image height) plus the
/// configured vertical offset.
pub fn anchored_origin(
    anchor: Anchor,
    screen: (i32, i32),
    image: (u32, u32),
    vertical_offset: i32,
) -> (i32, i32) {
    match anchor {
        Anchor::BottomLeft => (0, (screen.1 - image.1 as i32) + vertical_offset),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bottom_left_formula() {
        // 1080 - 200 = 880; 880 + (-38) = 842
        let (x, y) = anchored_origin(Anchor::BottomLeft, (1920, 1080), (650, 200), -38);
        assert_eq!((x, y), (0, 842));
    }

    #[test]
    fn test_zero_offset_sits_on_bottom_edge() {
        let (x, y) = anchored_origin(Anchor::BottomLeft, (1920, 1080), (100, 100), 0);
        assert_eq!((x, y), (0, 980));
    }

    #[test]
    fn test_anchor_serde_name() {
        let json = serde_json::to_string(&Anchor::BottomLeft).unwrap();
        assert_eq!(json, "\"bottom-left-of-screen\"");
        let back: Anchor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Anchor::BottomLeft);
    }
}
