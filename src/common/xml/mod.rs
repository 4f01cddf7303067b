//! XML helpers shared by every part parser.

mod escape;
mod node;

pub use escape::{escape_markup, strip_tags};
pub use node::XmlNode;
