//! Bounding boxes in grounding replies.
//!
//! Vision models asked to locate an object answer with boxes such as
//! `<|begin_of_box|>[[412, 218, 655, 560]]<|end_of_box|>`. Coordinates are
//! whatever scale the model uses (GLM vision models report 0-1000).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

const NUMBER: &str = r"\s*(-?\d+(?:\.\d+)?)\s*";

static BOX_PATTERN: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(&format!(r"\[{NUMBER},{NUMBER},{NUMBER},{NUMBER}\]")).ok()
});

/// Axis-aligned box given by its top-left and bottom-right corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BoundingBox {
    pub fn width(&self) -> f64 {
        (self.x2 - self.x1).abs()
    }

    pub fn height(&self) -> f64 {
        (self.y2 - self.y1).abs()
    }

    pub fn center(&self) -> (f64, f64) {
        ((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }
}

/// Every `[x1, y1, x2, y2]` in `text`, in order of appearance.
///
/// Box markers and nested `[[...]]` lists are tolerated because only the
/// innermost four-number lists are matched.
pub fn parse_boxes(text: &str) -> Vec<BoundingBox> {
    let Some(pattern) = BOX_PATTERN.as_ref() else {
        return Vec::new();
    };

    pattern
        .captures_iter(text)
        .filter_map(|caps| {
            let coord = |i: usize| caps.get(i)?.as_str().parse::<f64>().ok();
            Some(BoundingBox {
                x1: coord(1)?,
                y1: coord(2)?,
                x2: coord(3)?,
                y2: coord(4)?,
            })
        })
        .collect()
}
