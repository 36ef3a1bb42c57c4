// CSS Extractor Helpers

pub(super) struct CssHelpers;

impl CssHelpers {
    /// Cut a buffer that ends in an unterminated block opener at its last `{`
    ///
    /// Editors hand over half-typed rules (`.hero {`); the tail before the brace
    /// is kept so spans of everything earlier stay valid.
    pub(super) fn guard_partial_buffer(content: &str) -> &str {
        if !content.trim_end().ends_with('{') {
            return content;
        }
        match content.rfind('{') {
            Some(index) => &content[..index],
            None => content,
        }
    }

    /// `@-webkit-keyframes` -> `-webkit-keyframes`
    pub(super) fn at_rule_name(keyword: &str) -> Option<String> {
        let name = keyword.trim().strip_prefix('@')?;
        if name.is_empty() {
            None
        } else {
            Some(name.to_ascii_lowercase())
        }
    }

    /// Custom properties all map to one feature key
    pub(super) fn property_feature_name(property: &str) -> String {
        let property = property.trim();
        if property.starts_with("--") {
            "custom-property".to_string()
        } else {
            property.to_ascii_lowercase()
        }
    }
}
