//! Positioned output regions.
//!
//! A region is one absolutely positioned rectangle of the rendered sheet:
//! either a drawing shape or a cell (possibly spanning a merged range).

use serde::{Deserialize, Serialize};

use super::text::cell_text_markup;
use crate::common::xml::escape_markup;

/// What a region was produced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionKind {
    /// A drawing shape
    Shape,
    /// A cell or merged range
    Cell,
}

/// One rectangle of the layout, in points.
///
/// Coordinates are already scaled and rounded to two decimal places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedRegion {
    /// Source of the region
    pub kind: RegionKind,
    /// Address part of the element id: `"{col}.{row}"` of a shape's 0-based
    /// anchor, or the A1 reference of a cell
    pub id_suffix: String,
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
    /// Inline CSS for the region
    pub style: String,
    /// Display text (plain, not escaped)
    pub text: String,
}

impl PositionedRegion {
    /// Element id of the region inside a container.
    #[inline]
    pub fn element_id(&self, container_id: &str) -> String {
        format!("{}_{}", container_id, self.id_suffix)
    }

    /// The text ready for markup output.
    ///
    /// Cell text gets its first newline turned into a line break; shape text
    /// is only escaped.
    pub fn markup_text(&self) -> String {
        match self.kind {
            RegionKind::Cell => cell_text_markup(&self.text),
            RegionKind::Shape => escape_markup(&self.text),
        }
    }
}
