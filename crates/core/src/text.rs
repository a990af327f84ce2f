//! Display text (titles, descriptions) in chat-component form.

use serde::{Deserialize, Serialize};

/// Minimal text component: a literal string or a translation key.
///
/// Literals serialize as a bare JSON string, translations as
/// `{"translate": key, "with": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Text {
    /// Shown verbatim.
    Literal(String),
    /// Resolved through the language files of the consumer.
    Translatable {
        /// Translation key.
        translate: String,
        /// Arguments substituted into the translation.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        with: Vec<Text>,
    },
}

impl Text {
    /// Literal text.
    pub fn literal(text: impl Into<String>) -> Self {
        Text::Literal(text.into())
    }

    /// Translatable text without arguments.
    pub fn translatable(key: impl Into<String>) -> Self {
        Text::Translatable {
            translate: key.into(),
            with: Vec::new(),
        }
    }

    /// Translatable text with arguments.
    pub fn translatable_with(key: impl Into<String>, with: Vec<Text>) -> Self {
        Text::Translatable {
            translate: key.into(),
            with,
        }
    }
}

impl From<&str> for Text {
    fn from(value: &str) -> Self {
        Text::literal(value)
    }
}

impl From<String> for Text {
    fn from(value: String) -> Self {
        Text::Literal(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn literal_is_a_bare_string() {
        assert_eq!(serde_json::to_value(Text::literal("hi")).unwrap(), json!("hi"));
    }

    #[test]
    fn translatable_round_trips() {
        let text = Text::translatable_with("pack.nameAndSource", vec![Text::literal("x")]);
        let value = serde_json::to_value(&text).unwrap();
        assert_eq!(value, json!({"translate": "pack.nameAndSource", "with": ["x"]}));
        let back: Text = serde_json::from_value(value).unwrap();
        assert_eq!(back, text);
    }
}
