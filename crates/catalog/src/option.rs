//! One selectable option.

/// A selectable entry. Identity is `value`; everything else is display data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComboOption {
    /// Machine value committed into the selection model.
    pub value: String,
    /// Plain display text. May be empty when only `content` is provided.
    pub text: String,
    /// Rendered content (markup or plain text). Exact-match resolution
    /// compares against this field.
    pub content: String,
    /// Optional icon reference for the rendering layer.
    pub icon: Option<String>,
    /// Disabled options are shown but never focusable or committable.
    pub disabled: bool,
}

impl ComboOption {
    /// Create an option whose content equals its display text.
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            value: value.into(),
            content: text.clone(),
            text,
            icon: None,
            disabled: false,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Display label: `text`, falling back to `content` when `text` is empty.
    pub fn label(&self) -> &str {
        if self.text.is_empty() {
            &self.content
        } else {
            &self.text
        }
    }
}
