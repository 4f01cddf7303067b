//! Parser for Excel workbook.xml files.
//!
//! This module reads the sheet list of the main workbook part and the index
//! of the active tab. Sheet entries still carry their relationship ID; turning
//! that into a worksheet part path is the workbook's job.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde::{Deserialize, Serialize};

use crate::ooxml::error::{OoxmlError, Result};

// Pre-allocate typical capacity for worksheets
const INITIAL_SHEETS_CAPACITY: usize = 16;

/// Visibility of a sheet tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SheetState {
    /// Shown in the tab bar (the default when `state` is absent)
    #[default]
    Visible,
    /// Hidden, can be unhidden from the UI
    Hidden,
    /// Hidden, can only be unhidden programmatically
    VeryHidden,
}

impl SheetState {
    /// Parse the `state` attribute; unknown values count as visible.
    pub fn from_attr(value: &str) -> Self {
        match value {
            "hidden" => SheetState::Hidden,
            "veryHidden" => SheetState::VeryHidden,
            _ => SheetState::Visible,
        }
    }
}

/// A `<sheet>` entry of workbook.xml.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetEntry {
    /// Display name
    pub name: String,
    /// `sheetId` attribute
    pub sheet_id: u32,
    /// Tab visibility
    pub state: SheetState,
    /// Relationship ID of the worksheet part
    pub relationship_id: String,
}

/// Parse workbook.xml content into its sheet entries and the active tab index.
///
/// The active index is clamped to the sheet list and is 0 for an empty one.
pub fn parse_workbook_xml(xml: &[u8]) -> Result<(Vec<SheetEntry>, usize)> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut sheets = Vec::with_capacity(INITIAL_SHEETS_CAPACITY);
    let mut active_tab = 0usize;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"sheet" => sheets.push(parse_sheet(e)?),
                b"workbookView" => {
                    for attr in e.attributes() {
                        let attr = attr?;
                        if attr.key.as_ref() == b"activeTab"
                            && let Ok(tab) = atoi_simd::parse::<usize, false, false>(&attr.value)
                        {
                            active_tab = tab;
                        }
                    }
                },
                _ => {},
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(OoxmlError::Xml(e.to_string())),
            _ => {},
        }
        buf.clear();
    }

    let active = active_tab.min(sheets.len().saturating_sub(1));
    Ok((sheets, active))
}

fn parse_sheet(e: &BytesStart<'_>) -> Result<SheetEntry> {
    let mut name = None;
    let mut sheet_id = None;
    let mut state = SheetState::Visible;
    let mut relationship_id = None;

    for attr in e.attributes() {
        let attr = attr?;
        match attr.key.as_ref() {
            b"name" => name = Some(attr.unescape_value()?.to_string()),
            b"sheetId" => {
                let id = atoi_simd::parse::<u32, false, false>(&attr.value).map_err(|_| OoxmlError::BadNumber {
                    value: String::from_utf8_lossy(&attr.value).into_owned(),
                    context: "sheetId".to_string(),
                })?;
                sheet_id = Some(id);
            },
            b"state" => state = SheetState::from_attr(&attr.unescape_value()?),
            key if key.ends_with(b":id") => {
                relationship_id = Some(attr.unescape_value()?.to_string());
            },
            _ => {},
        }
    }

    Ok(SheetEntry {
        name: name.ok_or_else(|| OoxmlError::missing_attribute("sheet", "name"))?,
        sheet_id: sheet_id.ok_or_else(|| OoxmlError::missing_attribute("sheet", "sheetId"))?,
        state,
        relationship_id: relationship_id
            .ok_or_else(|| OoxmlError::missing_attribute("sheet", "r:id"))?,
    })
}
