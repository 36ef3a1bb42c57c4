// CSS Extractor Properties - css.properties.<name> tokens

use super::helpers::CssHelpers;
use crate::extractors::base::{BaseExtractor, Span, Token, TokenKind};
use once_cell::sync::Lazy;
use regex::Regex;
use tree_sitter::Node;

// `name:` at the start of a `{` / `;` / `}` delimited segment
static DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(--[\w-]+|-?[A-Za-z][\w-]*)\s*:").expect("declaration pattern is valid")
});

pub(super) struct PropertyExtractor;

impl PropertyExtractor {
    pub(super) fn extract_declaration(base: &mut BaseExtractor, node: Node) {
        let Some(property) = base.find_child_by_type(&node, "property_name") else {
            return;
        };
        let property = base.get_node_text(&property);
        if property.trim().is_empty() {
            return;
        }
        let name = format!("css.properties.{}", CssHelpers::property_feature_name(&property));
        base.push_token(name, TokenKind::CssProperty, Some(Span::from_node(&node)));
    }

    /// Pattern fallback when the stylesheet cannot be parsed
    ///
    /// Segments terminated by `{` are selectors or at-rule preludes (`a:hover {`)
    /// and are skipped.
    pub(super) fn scan_declarations(content: &str) -> Vec<Token> {
        let delimiters = content
            .char_indices()
            .filter(|(_, c)| matches!(c, '{' | '}' | ';'))
            .chain(std::iter::once((content.len(), '\0')));

        let mut tokens = Vec::new();
        let mut segment_start = 0;
        for (index, delimiter) in delimiters {
            let segment = &content[segment_start..index];
            if delimiter != '{' {
                if let Some(property) = DECLARATION.captures(segment).and_then(|caps| caps.get(1)) {
                    tokens.push(Token::new(
                        format!(
                            "css.properties.{}",
                            CssHelpers::property_feature_name(property.as_str())
                        ),
                        TokenKind::CssProperty,
                        Some(Span::from_byte_range(
                            content,
                            segment_start + property.start(),
                            index,
                        )),
                    ));
                }
            }
            segment_start = index + 1;
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_declarations() {
        let tokens = PropertyExtractor::scan_declarations("a:hover { color: red; --x: 1 }\nmargin: 0");
        let names: Vec<&str> = tokens.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "css.properties.color",
                "css.properties.custom-property",
                "css.properties.margin"
            ]
        );
        assert_eq!(tokens[2].span.unwrap().start_line, 2);
    }
}
