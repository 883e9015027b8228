//! Owned XML element tree.
//!
//! ```text
//! Element
//! ├── name: String
//! ├── attributes: IndexMap<String, String>  (preserves document order)
//! └── children: Vec<Node>
//! ```

use indexmap::IndexMap;

/// A child of an [`Element`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An XML element with ordered attributes and children.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element with no attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Builder-style child append.
    pub fn with_child(mut self, child: Element) -> Self {
        self.push_child(child);
        self
    }

    /// Get an attribute value.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Set an attribute, keeping its position if it already exists.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn push_child(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    /// Iterate over child elements, skipping text.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Iterate over child elements with the given name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements().filter(move |e| e.name == name)
    }

    /// First child element with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|e| e.name == name)
    }

    /// First child element with the given name, mutably.
    pub fn child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.children.iter_mut().find_map(|node| match node {
            Node::Element(e) if e.name == name => Some(e),
            _ => None,
        })
    }

    /// Remove every child element with the given name, returning how many
    /// were removed.
    pub fn remove_children_named(&mut self, name: &str) -> usize {
        let before = self.children.len();
        self.children
            .retain(|node| !matches!(node, Node::Element(e) if e.name == name));
        before - self.children.len()
    }

    /// Concatenated direct text content.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(t) => Some(t.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_attr_keeps_position() {
        let mut e = Element::new("connection")
            .with_attr("class", "OpenStreetMap")
            .with_attr("port", "80");
        e.set_attr("class", "mapbox");
        e.set_attr("username", "u");
        let keys: Vec<_> = e.attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, ["class", "port", "username"]);
        assert_eq!(e.attr("class"), Some("mapbox"));
    }

    #[test]
    fn test_remove_children_named() {
        let mut layers = Element::new("layers")
            .with_child(Element::new("layer"))
            .with_child(Element::new("other"))
            .with_child(Element::new("layer"));
        assert_eq!(layers.remove_children_named("layer"), 2);
        assert_eq!(layers.elements().count(), 1);
        assert!(layers.child("other").is_some());
    }

    #[test]
    fn test_child_mut_finds_first_match() {
        let mut root = Element::new("style")
            .with_child(Element::new("style-rule").with_attr("element", "map"))
            .with_child(Element::new("style-rule").with_attr("element", "water"));
        root.child_mut("style-rule").unwrap().set_attr("element", "land");
        let elements: Vec<_> = root
            .children_named("style-rule")
            .filter_map(|e| e.attr("element"))
            .collect();
        assert_eq!(elements, ["land", "water"]);
    }

    #[test]
    fn test_child_outlives_lookup_name() {
        let root = Element::new("mapsource").with_child(Element::new("layers"));
        let found = {
            let name = String::from("layers");
            root.child(&name)
        };
        assert_eq!(found.map(|e| e.name.as_str()), Some("layers"));
        assert!(root.child("connection").is_none());
    }

    #[test]
    fn test_text_skips_elements() {
        let mut e = Element::new("p");
        e.children.push(Node::Text("a".into()));
        e.push_child(Element::new("b"));
        e.children.push(Node::Text("c".into()));
        assert_eq!(e.text(), "ac");
    }
}
