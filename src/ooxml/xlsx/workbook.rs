//! Excel workbook and sheet access.
//!
//! A [`Book`] opens the package once, reads the sheet list, the shared
//! strings and the theme palette, and keeps them for its whole lifetime.
//! Each call to [`Book::sheet`] builds an independent [`Sheet`] from those
//! shared, immutable pieces.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::layout::{self, LayoutOptions, PositionedRegion};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::{part_name, relationship_type};
use crate::ooxml::opc::error::OpcError;
use crate::ooxml::opc::{PackURI, PackageIndex, PartReader};

use super::drawing::{DrawingOverlay, DrawingShape};
use super::parsers::workbook_parser::{self, SheetState};
use super::shared_strings::SharedStrings;
use super::theme::ThemePalette;
use super::worksheet::WorksheetGrid;

/// A sheet as listed by the workbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetDescriptor {
    /// `sheetId` attribute
    pub id: u32,
    /// Display name
    pub name: String,
    /// Tab visibility
    pub state: SheetState,
    /// Absolute part name of the worksheet (e.g. "/xl/worksheets/sheet1.xml")
    pub part_path: String,
}

impl SheetDescriptor {
    /// File stem of the worksheet part ("sheet1").
    pub fn part_stem(&self) -> &str {
        let filename = self.part_path.rsplit('/').next().unwrap_or(&self.part_path);
        filename.rsplit_once('.').map_or(filename, |(stem, _)| stem)
    }
}

/// An opened workbook.
#[derive(Debug)]
pub struct Book {
    /// The underlying package
    package: PackageIndex,
    /// Part name of the workbook part
    workbook_part: PackURI,
    /// Sheets in tab order
    sheets: Vec<SheetDescriptor>,
    /// Active sheet index (0-based)
    active_sheet_index: usize,
    /// Shared strings table
    shared_strings: SharedStrings,
    /// Theme colour palette (empty when the workbook has no theme)
    theme: ThemePalette,
}

impl Book {
    /// Open a workbook from a file.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use sheetgrid::Book;
    ///
    /// let book = Book::open("flow.xlsx")?;
    /// for sheet in book.sheets() {
    ///     println!("{} -> {}", sheet.name, sheet.part_path);
    /// }
    /// # Ok::<(), sheetgrid::Error>(())
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_package(PackageIndex::open(path)?)
    }

    /// Load a workbook from the bytes of an .xlsx file.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_package(PackageIndex::from_bytes(data)?)
    }

    /// Load a workbook from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_package(PackageIndex::from_reader(reader)?)
    }

    /// Load a workbook from any part container.
    pub fn from_part_reader<R: PartReader + 'static>(reader: R) -> Result<Self> {
        Self::from_package(PackageIndex::from_part_reader(reader))
    }

    /// Load a workbook from an opened package.
    ///
    /// The workbook part and the shared strings are required; the theme is
    /// optional.
    pub fn from_package(package: PackageIndex) -> Result<Self> {
        let workbook_part = package.main_document_partname()?;
        let workbook_xml = package.part(&workbook_part)?;
        let (entries, active_sheet_index) = workbook_parser::parse_workbook_xml(&workbook_xml)?;

        let sheets = entries
            .into_iter()
            .map(|entry| {
                let part = package.resolve(&workbook_part, &entry.relationship_id)?;
                Ok(SheetDescriptor {
                    id: entry.sheet_id,
                    name: entry.name,
                    state: entry.state,
                    part_path: part.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let shared_strings_part = Self::related_part(
            &package,
            &workbook_part,
            relationship_type::SHARED_STRINGS,
            part_name::SHARED_STRINGS,
        )?;
        let shared_strings = SharedStrings::load(&package.part(&shared_strings_part)?)?;

        let theme_part = Self::related_part(
            &package,
            &workbook_part,
            relationship_type::THEME,
            part_name::THEME,
        )?;
        let theme = match package.optional_part(&theme_part) {
            Some(xml) => ThemePalette::load(&xml)?,
            None => {
                log::debug!("no theme part, shapes use literal fills only");
                ThemePalette::empty()
            },
        };

        Ok(Self {
            package,
            workbook_part,
            sheets,
            active_sheet_index,
            shared_strings,
            theme,
        })
    }

    /// Target of the workbook's first relationship of `reltype`, or the
    /// conventional part name when there is none.
    fn related_part(
        package: &PackageIndex,
        workbook_part: &PackURI,
        reltype: &str,
        fallback: &str,
    ) -> Result<PackURI> {
        match package.part_with_reltype(workbook_part, reltype)? {
            Some(part) => Ok(part),
            None => {
                log::debug!("no {} relationship, assuming {}", reltype, fallback);
                Ok(PackURI::new(fallback).map_err(OpcError::InvalidPackUri)?)
            },
        }
    }

    /// Sheets in tab order.
    #[inline]
    pub fn sheets(&self) -> &[SheetDescriptor] {
        &self.sheets
    }

    /// Names of all sheets in tab order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// The sheet selected when the workbook was last saved.
    pub fn active_sheet(&self) -> Option<&SheetDescriptor> {
        self.sheets.get(self.active_sheet_index)
    }

    /// Part name of the workbook part.
    #[inline]
    pub fn workbook_part(&self) -> &PackURI {
        &self.workbook_part
    }

    /// The shared strings table.
    #[inline]
    pub fn shared_strings(&self) -> &SharedStrings {
        &self.shared_strings
    }

    /// The theme colour palette.
    #[inline]
    pub fn theme(&self) -> &ThemePalette {
        &self.theme
    }

    /// The underlying package.
    #[inline]
    pub fn package(&self) -> &PackageIndex {
        &self.package
    }

    /// Find a sheet by display name, or by its worksheet part's file stem
    /// (`"sheet1"`).
    pub fn descriptor(&self, name: &str) -> Option<&SheetDescriptor> {
        self.sheets
            .iter()
            .find(|s| s.name == name)
            .or_else(|| self.sheets.iter().find(|s| s.part_stem() == name))
    }

    /// Load a sheet by display name or part stem.
    pub fn sheet(&self, name: &str) -> Result<Sheet> {
        let descriptor = self
            .descriptor(name)
            .ok_or_else(|| OoxmlError::SheetNotFound(name.to_string()))?;
        self.load_sheet(descriptor)
    }

    /// Load the sheet at a tab index.
    pub fn sheet_at(&self, index: usize) -> Result<Sheet> {
        let descriptor = self
            .sheets
            .get(index)
            .ok_or_else(|| OoxmlError::SheetNotFound(format!("index {}", index)))?;
        self.load_sheet(descriptor)
    }

    /// Load the sheet a descriptor points to.
    pub fn load_sheet(&self, descriptor: &SheetDescriptor) -> Result<Sheet> {
        let part = PackURI::new(descriptor.part_path.as_str()).map_err(OpcError::InvalidPackUri)?;
        let xml = self.package.part(&part)?;

        let grid = WorksheetGrid::load(&xml, &self.shared_strings)?;
        let drawing = DrawingOverlay::load(&part, &self.package, &self.theme, &grid)?;
        log::debug!(
            "loaded sheet {} with {} cells and {} shapes",
            descriptor.name,
            grid.len(),
            drawing.len()
        );

        Ok(Sheet {
            descriptor: descriptor.clone(),
            grid,
            drawing,
        })
    }
}

/// One loaded worksheet: its cell grid and drawing overlay.
#[derive(Debug, Clone)]
pub struct Sheet {
    descriptor: SheetDescriptor,
    grid: WorksheetGrid,
    drawing: DrawingOverlay,
}

impl Sheet {
    /// The workbook's entry for this sheet.
    #[inline]
    pub fn descriptor(&self) -> &SheetDescriptor {
        &self.descriptor
    }

    /// Display name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    /// The cell grid.
    #[inline]
    pub fn grid(&self) -> &WorksheetGrid {
        &self.grid
    }

    /// The drawing overlay.
    #[inline]
    pub fn drawing(&self) -> &DrawingOverlay {
        &self.drawing
    }

    /// The drawing shapes, in document order.
    #[inline]
    pub fn shapes(&self) -> &[DrawingShape] {
        self.drawing.shapes()
    }

    /// Lay out the sheet at a scale.
    pub fn render_regions(&self, scale: f64) -> Vec<PositionedRegion> {
        layout::render(&self.grid, self.drawing.shapes(), scale)
    }

    /// Render the sheet as markup at scale 1.0.
    ///
    /// Region ids are `{container_id}_{address}`.
    pub fn render(&self, container_id: &str, css_class: &str) -> String {
        let options = LayoutOptions::new()
            .with_container_id(container_id)
            .with_css_class(css_class);
        self.render_with_options(&options)
    }

    /// Render the sheet as markup.
    pub fn render_with_options(&self, options: &LayoutOptions) -> String {
        layout::to_markup(&self.render_regions(options.scale), options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::MemoryPartReader;

    fn reader() -> MemoryPartReader {
        MemoryPartReader::new()
            .with(
                "_rels/.rels",
                r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#,
            )
            .with(
                "xl/workbook.xml",
                r#"<workbook xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheets>
    <sheet name="Flow" sheetId="1" r:id="rId1"/>
    <sheet name="Hidden" sheetId="2" state="hidden" r:id="rId2"/>
  </sheets>
</workbook>"#,
            )
            .with(
                "xl/_rels/workbook.xml.rels",
                r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="/xl/worksheets/sheet2.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="strings.xml"/>
</Relationships>"#,
            )
            .with("xl/strings.xml", "<sst><si><t>Hello</t></si><si><t>World</t></si></sst>")
            .with(
                "xl/worksheets/sheet1.xml",
                r#"<worksheet><sheetFormatPr defaultColWidth="8.43" defaultRowHeight="15"/>
  <sheetData><row r="1"><c r="A1" t="s"><v>0</v></c></row></sheetData></worksheet>"#,
            )
            .with(
                "xl/worksheets/sheet2.xml",
                r#"<worksheet><sheetFormatPr defaultColWidth="8.43" defaultRowHeight="15"/><sheetData/></worksheet>"#,
            )
    }

    #[test]
    fn test_sheet_descriptors() {
        let book = Book::from_part_reader(reader()).unwrap();

        assert_eq!(book.sheet_names(), vec!["Flow", "Hidden"]);
        assert_eq!(book.sheets()[0].part_path, "/xl/worksheets/sheet1.xml");
        assert_eq!(book.sheets()[1].state, SheetState::Hidden);
        assert_eq!(book.sheets()[1].part_stem(), "sheet2");
        assert_eq!(book.active_sheet().unwrap().name, "Flow");
        assert_eq!(book.shared_strings().len(), 2);
        assert!(book.theme().is_empty());
    }

    #[test]
    fn test_sheet_lookup() {
        let book = Book::from_part_reader(reader()).unwrap();

        assert_eq!(book.sheet("Flow").unwrap().name(), "Flow");
        assert_eq!(book.sheet("sheet2").unwrap().name(), "Hidden");
        assert!(matches!(book.sheet("Nope"), Err(OoxmlError::SheetNotFound(_))));
        assert!(matches!(book.sheet_at(5), Err(OoxmlError::SheetNotFound(_))));
    }

    #[test]
    fn test_render() {
        let book = Book::from_part_reader(reader()).unwrap();
        let sheet = book.sheet("Flow").unwrap();

        assert_eq!(
            sheet.render("grid", "cell"),
            "<div class='cell' id='grid_A1' style='top:0.0pt;left:0.0pt;width:47.26pt;height:15.0pt'><span style='height:15.0pt'>Hello</span></div>\n"
        );
        assert!(sheet.shapes().is_empty());
    }

    #[test]
    fn test_missing_shared_strings() {
        let reader = MemoryPartReader::new().with(
            "xl/workbook.xml",
            "<workbook><sheets/></workbook>",
        );
        assert!(matches!(
            Book::from_part_reader(reader),
            Err(OoxmlError::Opc(OpcError::PartNotFound(_)))
        ));
    }
}
