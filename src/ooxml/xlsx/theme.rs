/// Theme colour palette for Excel workbooks.
///
/// Drawing shapes refer to fills by semantic slot name (`accent1`, `dk2`, ...)
/// rather than by value. This module reads the colour scheme of
/// `xl/theme/theme1.xml` so those names can be turned into RGB hex strings.
use crate::ooxml::error::{OoxmlError, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// One slot of the theme colour scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeColor {
    /// Slot name, the element's local name (e.g. "accent1", "dk1")
    pub name: String,
    /// Explicit RGB value (format: "RRGGBB")
    pub rgb: Option<String>,
    /// Last-known value of a system colour (format: "RRGGBB")
    pub system_color: Option<String>,
}

impl ThemeColor {
    /// The effective colour: explicit RGB first, then the system colour's
    /// last-known value.
    #[inline]
    pub fn value(&self) -> Option<&str> {
        self.rgb.as_deref().or(self.system_color.as_deref())
    }
}

/// Colour scheme of a workbook theme, in document order.
///
/// Every slot present in the scheme is kept, even when it resolves to no
/// colour, so callers can tell "no colour" apart from "unknown name".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemePalette {
    colors: Vec<ThemeColor>,
}

impl ThemePalette {
    /// An empty palette, used when the workbook has no theme part.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse the colour scheme of a theme part.
    pub fn load(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut colors: Vec<ThemeColor> = Vec::with_capacity(12);
        let mut buf = Vec::new();

        let mut in_color_scheme = false;
        // Depth below <a:clrScheme>; 1 is a colour slot.
        let mut depth = 0usize;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    if in_color_scheme {
                        depth += 1;
                        Self::visit(&mut colors, e, depth)?;
                    } else if e.local_name().as_ref() == b"clrScheme" {
                        in_color_scheme = true;
                        depth = 0;
                    }
                },
                Ok(Event::Empty(ref e)) => {
                    if in_color_scheme {
                        Self::visit(&mut colors, e, depth + 1)?;
                    }
                },
                Ok(Event::End(_)) => {
                    if in_color_scheme {
                        if depth == 0 {
                            in_color_scheme = false;
                        } else {
                            depth -= 1;
                        }
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e.to_string())),
                _ => {},
            }
            buf.clear();
        }

        Ok(Self { colors })
    }

    fn visit(colors: &mut Vec<ThemeColor>, e: &BytesStart<'_>, depth: usize) -> Result<()> {
        let local = e.local_name();
        match depth {
            1 => {
                let name = std::str::from_utf8(local.as_ref())
                    .map_err(|e| OoxmlError::Xml(e.to_string()))?
                    .to_string();
                colors.push(ThemeColor {
                    name,
                    rgb: None,
                    system_color: None,
                });
            },
            2 => {
                let Some(slot) = colors.last_mut() else {
                    return Ok(());
                };
                let wanted: &[u8] = match local.as_ref() {
                    b"srgbClr" => b"val",
                    b"sysClr" => b"lastClr",
                    _ => return Ok(()),
                };
                for attr in e.attributes() {
                    let attr = attr?;
                    if attr.key.local_name().as_ref() == wanted {
                        let value = attr.unescape_value()?.to_string();
                        if local.as_ref() == b"srgbClr" {
                            slot.rgb.get_or_insert(value);
                        } else {
                            slot.system_color.get_or_insert(value);
                        }
                    }
                }
            },
            _ => {},
        }
        Ok(())
    }

    /// Look up a slot by name.
    ///
    /// `None` means the scheme has no such slot; `Some(None)` means the slot
    /// exists but carries no usable colour.
    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.colors
            .iter()
            .find(|c| c.name == name)
            .map(ThemeColor::value)
    }

    /// Resolve a slot name to its RGB hex value, treating unknown slots as
    /// having no colour.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.get(name).flatten()
    }

    /// Get all slots in document order.
    #[inline]
    pub fn colors(&self) -> &[ThemeColor] {
        &self.colors
    }

    /// Get the number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Check if the palette is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THEME_XML: &[u8] = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme">
  <a:themeElements>
    <a:clrScheme name="Office">
      <a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>
      <a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>
      <a:dk2><a:srgbClr val="44546A"/></a:dk2>
      <a:accent1><a:srgbClr val="4472C4"/></a:accent1>
      <a:accent2><a:sysClr val="highlight"/></a:accent2>
      <a:hlink/>
    </a:clrScheme>
    <a:fontScheme name="Office">
      <a:majorFont><a:latin typeface="Calibri Light"/></a:majorFont>
    </a:fontScheme>
    <a:fmtScheme name="Office">
      <a:fillStyleLst><a:solidFill><a:srgbClr val="123456"/></a:solidFill></a:fillStyleLst>
    </a:fmtScheme>
  </a:themeElements>
</a:theme>"#;

    #[test]
    fn test_scheme_order_and_values() {
        let palette = ThemePalette::load(THEME_XML).unwrap();

        let names: Vec<&str> = palette.colors().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["dk1", "lt1", "dk2", "accent1", "accent2", "hlink"]);
        assert_eq!(palette.resolve("dk2"), Some("44546A"));
        assert_eq!(palette.resolve("accent1"), Some("4472C4"));
    }

    #[test]
    fn test_system_color_fallback() {
        let palette = ThemePalette::load(THEME_XML).unwrap();

        assert_eq!(palette.get("dk1"), Some(Some("000000")));
        assert_eq!(palette.get("lt1"), Some(Some("FFFFFF")));
    }

    #[test]
    fn test_absent_versus_unknown() {
        let palette = ThemePalette::load(THEME_XML).unwrap();

        assert_eq!(palette.get("accent2"), Some(None));
        assert_eq!(palette.get("hlink"), Some(None));
        assert_eq!(palette.get("accent6"), None);
        assert_eq!(palette.resolve("accent6"), None);
    }

    #[test]
    fn test_rgb_preferred_over_system_color() {
        let xml = br#"<a:theme xmlns:a="a"><a:themeElements><a:clrScheme>
            <a:accent3><a:sysClr val="x" lastClr="111111"/><a:srgbClr val="222222"/></a:accent3>
        </a:clrScheme></a:themeElements></a:theme>"#;
        let palette = ThemePalette::load(xml).unwrap();
        assert_eq!(palette.resolve("accent3"), Some("222222"));
    }

    #[test]
    fn test_fills_outside_scheme_ignored() {
        let palette = ThemePalette::load(THEME_XML).unwrap();
        assert_eq!(palette.len(), 6);
        assert!(ThemePalette::empty().is_empty());
    }
}
