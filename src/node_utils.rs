use crate::parser::NodeRef;
use html5ever::{LocalName, QualName};
use kuchikikiki::{Attributes, ElementData, NodeData};
use std::cell::RefCell;

/// Element helpers implemented on [`NodeRef`].
///
/// This trait is automatically in scope when you import from
/// [`crate::parser`].
pub trait NodeExt {
    /// Return the local tag name of this node if it is an element (e.g.
    /// `"div"`, `"mark"`), or `None` for text / comment / document nodes.
    fn element_name(&self) -> Option<&str>;

    /// Look up an attribute by name and return its value, or `None` if the
    /// attribute is absent or this is not an element node.
    fn attr_value(&self, name: &str) -> Option<String>;

    /// Set (or overwrite) an attribute.  No-op on non-element nodes.
    fn set_attr_value(&self, name: &str, value: &str);

    /// Whether the whitespace-separated `class` attribute contains `class_name`.
    fn has_class(&self, class_name: &str) -> bool;

    /// Return the contents of a text node, or `None` for any other node.
    fn text_value(&self) -> Option<String>;
}

/// Create a new, detached HTML element node with the given tag name and no
/// attributes or children.
///
/// # Examples
///
/// ```rust
/// use vault_highlight::{new_html_element, NodeExt};
///
/// let mark = new_html_element("mark");
/// assert_eq!(mark.element_name(), Some("mark"));
/// ```
pub fn new_html_element(tag_name: &str) -> NodeRef {
    let name = QualName::new(None, html5ever::ns!(html), LocalName::from(tag_name));
    let attributes = Attributes {
        map: Default::default(),
    };
    NodeRef::new(NodeData::Element(ElementData {
        name,
        attributes: RefCell::new(attributes),
        template_contents: None,
    }))
}

/// Create a detached element carrying the given attributes, in order.
pub fn new_html_element_with_attrs(tag_name: &str, attrs: &[(&str, &str)]) -> NodeRef {
    let node = new_html_element(tag_name);
    for (name, value) in attrs {
        node.set_attr_value(name, value);
    }
    node
}

impl NodeExt for NodeRef {
    fn element_name(&self) -> Option<&str> {
        self.as_element().map(|e| e.name.local.as_ref())
    }

    fn attr_value(&self, name: &str) -> Option<String> {
        self.as_element()
            .and_then(|e| e.attributes.borrow().get(name).map(|v| v.to_string()))
    }

    fn set_attr_value(&self, name: &str, value: &str) {
        if let Some(e) = self.as_element() {
            e.attributes.borrow_mut().insert(name, value.to_string());
        }
    }

    fn has_class(&self, class_name: &str) -> bool {
        if class_name.is_empty() {
            return false;
        }
        self.attr_value("class")
            .map(|classes| classes.split_ascii_whitespace().any(|c| c == class_name))
            .unwrap_or(false)
    }

    fn text_value(&self) -> Option<String> {
        self.as_text().map(|t| t.borrow().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_html;

    #[test]
    fn has_class_matches_whole_tokens_only() {
        let doc = parse_html(r#"<div class="search-input  wide">x</div>"#);
        let div = doc.select_first("div").unwrap().as_node().clone();
        assert!(div.has_class("search-input"));
        assert!(div.has_class("wide"));
        assert!(!div.has_class("search"));
        assert!(!div.has_class(""));
        let text = div.first_child().unwrap();
        assert!(!text.has_class("search-input"));
    }

    #[test]
    fn new_element_with_attrs_serialises_attributes() {
        let mark = new_html_element_with_attrs("mark", &[("class", "search-highlight")]);
        mark.append(NodeRef::new_text("quick"));
        assert_eq!(mark.to_string(), r#"<mark class="search-highlight">quick</mark>"#);
        assert_eq!(mark.text_value(), None);
        assert_eq!(mark.first_child().unwrap().text_value().as_deref(), Some("quick"));
    }

    #[test]
    fn set_attr_value_on_text_node_is_a_no_op() {
        let text = NodeRef::new_text("plain");
        text.set_attr_value("class", "x");
        assert_eq!(text.attr_value("class"), None);
    }
}
