use crate::assertions;
use crate::error::ValidationError;
use crate::types::{ComponentType, TextInputData, TextInputStyle};
use crate::validation::should_validate;

use super::{resolvable, JsonBuilder};

/// Builder for a modal text field.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextInputBuilder {
    data: TextInputData,
}

impl TextInputBuilder {
    /// An empty text input.
    pub fn new() -> Self {
        Self::default()
    }

    /// The fields set so far.
    pub fn data(&self) -> &TextInputData {
        &self.data
    }

    /// Set the custom id the submitted value is keyed by.
    pub fn set_custom_id(mut self, custom_id: impl Into<String>) -> Self {
        self.data.custom_id = Some(custom_id.into());
        self
    }

    /// Text shown above the field.
    pub fn set_label(mut self, label: impl Into<String>) -> Self {
        self.data.label = Some(label.into());
        self
    }

    /// Single line or paragraph.
    pub fn set_style(mut self, style: TextInputStyle) -> Self {
        self.data.style = Some(style);
        self
    }

    /// Minimum length of the answer.
    pub fn set_min_length(mut self, min_length: u32) -> Self {
        self.data.min_length = Some(min_length);
        self
    }

    pub fn clear_min_length(mut self) -> Self {
        self.data.min_length = None;
        self
    }

    /// Maximum length of the answer.
    pub fn set_max_length(mut self, max_length: u32) -> Self {
        self.data.max_length = Some(max_length);
        self
    }

    pub fn clear_max_length(mut self) -> Self {
        self.data.max_length = None;
        self
    }

    /// Text shown while the field is empty.
    pub fn set_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.data.placeholder = Some(placeholder.into());
        self
    }

    pub fn clear_placeholder(mut self) -> Self {
        self.data.placeholder = None;
        self
    }

    /// Pre-fill the field.
    pub fn set_value(mut self, value: impl Into<String>) -> Self {
        self.data.value = Some(value.into());
        self
    }

    pub fn clear_value(mut self) -> Self {
        self.data.value = None;
        self
    }

    /// Whether the field must be filled in.
    pub fn set_required(mut self, required: bool) -> Self {
        self.data.required = Some(required);
        self
    }

    pub fn clear_required(mut self) -> Self {
        self.data.required = None;
        self
    }
}

impl From<TextInputData> for TextInputBuilder {
    fn from(data: TextInputData) -> Self {
        Self {
            data: TextInputData {
                kind: ComponentType::TextInput,
                ..data
            },
        }
    }
}

impl JsonBuilder for TextInputBuilder {
    type Data = TextInputData;

    fn to_json(&self, validation_override: Option<bool>) -> Result<TextInputData, ValidationError> {
        let data = self.data.clone();
        if should_validate(validation_override) {
            assertions::text_input(&data)?;
        }
        Ok(data)
    }
}

resolvable!(TextInputBuilder, TextInputData);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn name_input() -> TextInputBuilder {
        TextInputBuilder::new()
            .set_custom_id("name")
            .set_label("Your name")
            .set_style(TextInputStyle::Short)
    }

    #[test]
    fn builds_text_input() {
        let input = name_input()
            .set_min_length(2)
            .set_max_length(32)
            .set_placeholder("Jane")
            .set_value("J")
            .set_required(true);
        assert_eq!(
            input.to_value(None).unwrap(),
            json!({
                "type": 4,
                "custom_id": "name",
                "label": "Your name",
                "style": 1,
                "min_length": 2,
                "max_length": 32,
                "placeholder": "Jane",
                "value": "J",
                "required": true,
            })
        );
    }

    #[test]
    fn rejects_out_of_range_fields() {
        let err = name_input()
            .set_max_length(4001)
            .set_placeholder("p".repeat(101))
            .to_json(None)
            .unwrap_err();
        assert!(err.has_issue_at("max_length"));
        assert!(err.has_issue_at("placeholder"));

        assert!(name_input().set_value("v".repeat(4000)).to_json(None).is_ok());
        assert!(name_input().set_value("v".repeat(4001)).to_json(None).is_err());
    }

    #[test]
    fn style_and_label_are_required() {
        let err = TextInputBuilder::new()
            .set_custom_id("c")
            .to_json(None)
            .unwrap_err();
        assert!(err.has_issue_at("label"));
        assert!(err.has_issue_at("style"));
    }

    #[test]
    fn clear_setters_remove_keys() {
        let input = name_input()
            .set_min_length(1)
            .set_max_length(10)
            .set_placeholder("p")
            .set_value("v")
            .set_required(false)
            .clear_min_length()
            .clear_max_length()
            .clear_placeholder()
            .clear_value()
            .clear_required();
        assert_eq!(input, name_input());
    }

    #[test]
    fn round_trips_raw_data() {
        let value = json!({
            "type": 4,
            "custom_id": "bio",
            "label": "About you",
            "style": 2,
            "required": false,
        });
        let input = TextInputBuilder::from_value(value.clone()).unwrap();
        assert_eq!(input.data().style, Some(TextInputStyle::Paragraph));
        assert_eq!(input.to_value(None).unwrap(), value);
    }

    #[test]
    fn unknown_keys_are_kept() {
        let value = json!({
            "type": 4,
            "custom_id": "bio",
            "label": "About you",
            "style": 2,
            "id": 12,
        });
        let input = TextInputBuilder::from_value(value.clone()).unwrap();
        assert_eq!(input.data().extra.get("id"), Some(&json!(12)));
        assert_eq!(input.to_value(None).unwrap(), value);
    }
}
