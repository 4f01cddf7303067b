/// Markup output for positioned regions.
///
/// Each region becomes one absolutely positioned `<div>` holding a `<span>`
/// with its text, one line per region.
use super::config::LayoutOptions;
use super::region::PositionedRegion;
use crate::common::unit::format_pt;
use crate::common::xml::escape_markup;

/// Low-level writer that accumulates region markup.
pub(crate) struct MarkupWriter<'a> {
    /// The output buffer
    buffer: String,
    /// Current options
    options: &'a LayoutOptions,
}

impl<'a> MarkupWriter<'a> {
    /// Create a new writer with the given options.
    pub fn new(options: &'a LayoutOptions) -> Self {
        Self {
            buffer: String::with_capacity(4096),
            options,
        }
    }

    /// Write one region as a `<div>` line.
    pub fn write_region(&mut self, region: &PositionedRegion) {
        let id = escape_markup(&region.element_id(&self.options.container_id));

        self.buffer.push_str("<div class='");
        self.buffer.push_str(&escape_markup(&self.options.css_class));
        self.buffer.push_str("' id='");
        self.buffer.push_str(&id);
        self.buffer.push_str("' style='");
        self.buffer.push_str(&region.style);
        self.buffer.push_str("'><span style='height:");
        self.buffer.push_str(&format_pt(region.height));
        self.buffer.push_str("pt'>");
        self.buffer.push_str(&region.markup_text());
        self.buffer.push_str("</span></div>\n");
    }

    /// Consume the writer and return the markup.
    pub fn finish(self) -> String {
        self.buffer
    }
}

/// Render regions as markup, in the order given.
pub fn to_markup(regions: &[PositionedRegion], options: &LayoutOptions) -> String {
    let mut writer = MarkupWriter::new(options);
    for region in regions {
        writer.write_region(region);
    }
    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::RegionKind;

    #[test]
    fn test_region_markup() {
        let regions = vec![
            PositionedRegion {
                kind: RegionKind::Shape,
                id_suffix: "1.2".to_string(),
                x: 47.26,
                y: 30.0,
                width: 94.51,
                height: 45.0,
                style: "top:30.0pt;left:47.26pt;width:94.51pt;height:45.0pt;".to_string(),
                text: "Start".to_string(),
            },
            PositionedRegion {
                kind: RegionKind::Cell,
                id_suffix: "A1".to_string(),
                x: 0.0,
                y: 0.0,
                width: 47.26,
                height: 15.0,
                style: "top:0.0pt;left:0.0pt;width:47.26pt;height:15.0pt".to_string(),
                text: "Q&A\nnotes".to_string(),
            },
        ];

        let markup = to_markup(&regions, &LayoutOptions::new().with_container_id("flow").with_css_class("box"));
        assert_eq!(
            markup,
            "<div class='box' id='flow_1.2' style='top:30.0pt;left:47.26pt;width:94.51pt;height:45.0pt;'><span style='height:45.0pt'>Start</span></div>\n\
             <div class='box' id='flow_A1' style='top:0.0pt;left:0.0pt;width:47.26pt;height:15.0pt'><span style='height:15.0pt'>Q&amp;A<br />notes</span></div>\n"
        );
    }

    #[test]
    fn test_empty() {
        assert_eq!(to_markup(&[], &LayoutOptions::default()), "");
    }
}
