use crate::extractors::base::BaseExtractor;
use tree_sitter::Node;

/// HTML-specific helper utilities
pub(super) struct HTMLHelpers;

impl HTMLHelpers {
    /// The start_tag / self_closing_tag child holding the tag name and attributes
    pub(super) fn find_tag_container<'t>(base: &BaseExtractor, node: &Node<'t>) -> Option<Node<'t>> {
        base.find_child_by_types(node, &["start_tag", "self_closing_tag"])
    }

    /// Extract the lowercased tag name of an element node
    pub(super) fn extract_tag_name(base: &BaseExtractor, node: &Node) -> Option<String> {
        let container = Self::find_tag_container(base, node)?;
        let tag_name = base.find_child_by_type(&container, "tag_name")?;
        let text = base.get_node_text(&tag_name);
        let text = text.trim();
        if text.is_empty() {
            None
        } else {
            Some(text.to_ascii_lowercase())
        }
    }

    /// Lowercased attribute name and unquoted value
    pub(super) fn extract_attribute_name_value(
        base: &BaseExtractor,
        attr_node: &Node,
    ) -> (Option<String>, Option<String>) {
        let mut name = None;
        let mut value = None;

        let mut cursor = attr_node.walk();
        for child in attr_node.children(&mut cursor) {
            match child.kind() {
                "attribute_name" => {
                    let text = base.get_node_text(&child);
                    let text = text.trim();
                    if !text.is_empty() {
                        name = Some(text.to_ascii_lowercase());
                    }
                }
                "attribute_value" | "quoted_attribute_value" => {
                    let text = base.get_node_text(&child);
                    // Remove quotes if present
                    value = Some(text.trim_matches(|c| c == '"' || c == '\'').to_string());
                }
                _ => {}
            }
        }

        (name, value)
    }

    /// Value of the named attribute on an element, if present
    pub(super) fn attribute_value(base: &BaseExtractor, node: &Node, wanted: &str) -> Option<String> {
        let container = Self::find_tag_container(base, node)?;
        base.find_children_by_type(&container, "attribute")
            .iter()
            .find_map(|attr| match Self::extract_attribute_name_value(base, attr) {
                (Some(name), value) if name == wanted => Some(value.unwrap_or_default()),
                _ => None,
            })
    }
}
