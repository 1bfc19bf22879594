//! List command rendering.

use quick_xml::escape::escape;

use scanql_core::models::FilterTermString;

/// A `get_<entities>` list command.
///
/// Renders to a single empty element, e.g.
/// `<get_tasks filter="name~scan first=1 rows=10" details="1"/>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetCommand {
    name: String,
    filter: FilterTermString,
    attributes: Vec<(String, String)>,
}

impl GetCommand {
    /// Command with an explicit element name (e.g. `get_info`).
    pub fn new(name: impl Into<String>, filter: FilterTermString) -> Self {
        Self {
            name: name.into(),
            filter,
            attributes: Vec::new(),
        }
    }

    /// `get_<entity>s` command for a regularly named entity.
    pub fn for_entity(entity: &str, filter: FilterTermString) -> Self {
        Self::new(format!("get_{entity}s"), filter)
    }

    /// Add an extra attribute, rendered after `filter` in insertion order.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn filter(&self) -> &FilterTermString {
        &self.filter
    }

    /// Render the command as XML.
    pub fn render(&self) -> String {
        let mut xml = format!(
            "<{} filter=\"{}\"",
            self.name,
            escape(self.filter.as_str())
        );
        for (name, value) in &self.attributes {
            xml.push_str(&format!(" {}=\"{}\"", name, escape(value.as_str())));
        }
        xml.push_str("/>");
        xml
    }
}
