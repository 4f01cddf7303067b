//! Drawing overlay for Excel worksheets.
//!
//! Shapes drawn over a worksheet live in a separate drawing part reached
//! through the sheet's `<drawing r:id>` relationship. Each shape is anchored
//! to two cells plus EMU offsets inside those cells; this module reads those
//! anchors together with the preset geometry, fill and text of every shape.
//! Converting anchors to points is left to the layout layer, which owns the
//! column width and row offsets.

use serde::{Deserialize, Serialize};

use crate::common::XmlNode;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::PackURI;
use crate::ooxml::opc::PackageIndex;
use crate::ooxml::opc::constants::relationship_type;
use crate::ooxml::opc::error::OpcError;

use super::theme::ThemePalette;
use super::worksheet::WorksheetGrid;

/// Preset geometry of a shape (`<a:prstGeom prst="...">`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Geometry {
    /// `rect`
    Rect,
    /// `roundRect`
    RoundRect,
    /// `flowChartAlternateProcess`
    FlowChartAlternateProcess,
    /// `ellipse`
    Ellipse,
    /// Any other preset, laid out as a plain rectangle
    Other(String),
}

impl Geometry {
    /// Map a preset name to a geometry.
    pub fn from_preset(prst: &str) -> Self {
        match prst {
            "rect" => Geometry::Rect,
            "roundRect" => Geometry::RoundRect,
            "flowChartAlternateProcess" => Geometry::FlowChartAlternateProcess,
            "ellipse" => Geometry::Ellipse,
            other => Geometry::Other(other.to_string()),
        }
    }

    /// The preset name as written in the drawing part.
    pub fn preset(&self) -> &str {
        match self {
            Geometry::Rect => "rect",
            Geometry::RoundRect => "roundRect",
            Geometry::FlowChartAlternateProcess => "flowChartAlternateProcess",
            Geometry::Ellipse => "ellipse",
            Geometry::Other(name) => name,
        }
    }
}

/// One corner of a two-cell anchor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorPoint {
    /// Column (0-based)
    pub col: u32,
    /// Offset from the left edge of `col` (in EMUs)
    pub col_offset: i64,
    /// Row (0-based)
    pub row: u32,
    /// Offset from the top edge of `row` (in EMUs)
    pub row_offset: i64,
}

impl AnchorPoint {
    fn parse(corner: &XmlNode) -> Result<Self> {
        Ok(Self {
            col: required_number(corner, "col")?,
            col_offset: optional_offset(corner, "colOff")?,
            row: required_number(corner, "row")?,
            row_offset: optional_offset(corner, "rowOff")?,
        })
    }
}

/// A shape read from a `<xdr:twoCellAnchor>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawingShape {
    /// Preset geometry
    pub geometry: Geometry,
    /// Top-left corner
    pub from: AnchorPoint,
    /// Bottom-right corner
    pub to: AnchorPoint,
    /// Resolved fill colour ("RRGGBB")
    pub fill: Option<String>,
    /// Every text run of the shape, concatenated in document order
    pub text: String,
}

/// All supported shapes of one worksheet's drawing part, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawingOverlay {
    shapes: Vec<DrawingShape>,
}

impl DrawingOverlay {
    /// An overlay with no shapes.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the drawing attached to a worksheet.
    ///
    /// The drawing is optional: a sheet with no drawing reference, or whose
    /// reference does not lead to a part, yields an empty overlay.
    pub fn load(
        sheet_part: &PackURI,
        package: &PackageIndex,
        theme: &ThemePalette,
        grid: &WorksheetGrid,
    ) -> Result<Self> {
        let Some(partname) = Self::drawing_partname(sheet_part, package, grid)? else {
            return Ok(Self::empty());
        };

        match package.optional_part(&partname) {
            Some(xml) => Self::parse(&xml, theme),
            None => {
                log::warn!("drawing part {} referenced by {} is missing", partname, sheet_part);
                Ok(Self::empty())
            },
        }
    }

    fn drawing_partname(
        sheet_part: &PackURI,
        package: &PackageIndex,
        grid: &WorksheetGrid,
    ) -> Result<Option<PackURI>> {
        let Some(r_id) = grid.drawing_r_id() else {
            log::debug!("{} has no drawing", sheet_part);
            return Ok(None);
        };

        match package.resolve(sheet_part, r_id) {
            Ok(partname) => Ok(Some(partname)),
            Err(OpcError::RelationshipNotFound(_)) => {
                // Fall back to any drawing relationship the sheet declares
                let fallback = package.part_with_reltype(sheet_part, relationship_type::DRAWING)?;
                if fallback.is_none() {
                    log::warn!("drawing relationship {} of {} not found", r_id, sheet_part);
                }
                Ok(fallback)
            },
            Err(e) => Err(e.into()),
        }
    }

    /// Parse a drawing part.
    ///
    /// Only `twoCellAnchor` entries holding a preset-geometry shape are kept;
    /// pictures, charts, groups and one-cell or absolute anchors are skipped.
    pub fn parse(xml: &[u8], theme: &ThemePalette) -> Result<Self> {
        let root = XmlNode::parse(xml)?;
        let mut shapes = Vec::new();

        for anchor in root.elements() {
            match anchor.local_name() {
                "twoCellAnchor" => {
                    if let Some(shape) = Self::parse_anchor(anchor, theme)? {
                        shapes.push(shape);
                    }
                },
                other => log::debug!("skipping unsupported drawing anchor <{}>", other),
            }
        }

        Ok(Self { shapes })
    }

    fn parse_anchor(anchor: &XmlNode, theme: &ThemePalette) -> Result<Option<DrawingShape>> {
        let Some(sp_pr) = anchor.child("sp/spPr") else {
            log::debug!("skipping twoCellAnchor without a shape");
            return Ok(None);
        };
        let Some(prst_geom) = sp_pr.child("prstGeom") else {
            log::debug!("skipping shape without preset geometry");
            return Ok(None);
        };
        // A preset without a name still gets a plain box
        let prst = prst_geom.attribute("prst").unwrap_or_default();

        let from = anchor
            .child("from")
            .ok_or_else(|| missing_element("twoCellAnchor", "from"))?;
        let to = anchor
            .child("to")
            .ok_or_else(|| missing_element("twoCellAnchor", "to"))?;

        let text: String = anchor.descendants("t").into_iter().map(XmlNode::text).collect();

        Ok(Some(DrawingShape {
            geometry: Geometry::from_preset(prst),
            from: AnchorPoint::parse(from)?,
            to: AnchorPoint::parse(to)?,
            fill: Self::fill(sp_pr, theme),
            text,
        }))
    }

    fn fill(sp_pr: &XmlNode, theme: &ThemePalette) -> Option<String> {
        let solid = sp_pr.child("solidFill")?;

        if let Some(name) = solid.child("schemeClr").and_then(|c| c.attribute("val")) {
            return match theme.get(name) {
                Some(color) => color.map(str::to_string),
                None => {
                    log::warn!("theme colour {} not in palette", name);
                    None
                },
            };
        }

        solid
            .child("srgbClr")
            .and_then(|c| c.attribute("val"))
            .map(str::to_string)
    }

    /// The shapes, in document order.
    #[inline]
    pub fn shapes(&self) -> &[DrawingShape] {
        &self.shapes
    }

    /// Get the number of shapes.
    #[inline]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Check if the overlay has no shapes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

fn missing_element(parent: &str, child: &str) -> OoxmlError {
    OoxmlError::Xml(format!("<{}> is missing <{}>", parent, child))
}

fn required_number(corner: &XmlNode, name: &str) -> Result<u32> {
    let node = corner
        .child(name)
        .ok_or_else(|| missing_element(corner.local_name(), name))?;
    let value = node.text().trim();
    atoi_simd::parse::<u32, false, false>(value.as_bytes()).map_err(|_| OoxmlError::BadNumber {
        value: value.to_string(),
        context: format!("anchor {}", name),
    })
}

fn optional_offset(corner: &XmlNode, name: &str) -> Result<i64> {
    let Some(node) = corner.child(name) else {
        return Ok(0);
    };
    let value = node.text().trim();
    atoi_simd::parse::<i64, false, false>(value.as_bytes()).map_err(|_| OoxmlError::BadNumber {
        value: value.to_string(),
        context: format!("anchor {}", name),
    })
}
