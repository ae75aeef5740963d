use crate::assertions;
use crate::error::ValidationError;
use crate::types::{ButtonData, ButtonStyle, ComponentType, Emoji, Snowflake};
use crate::validation::should_validate;

use super::{resolvable, JsonBuilder};

/// Builder for a button of any shape.
///
/// Which shape the result has (link, custom id or premium) follows from the
/// style; mismatched fields are only reported by [`JsonBuilder::to_json`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ButtonBuilder {
    data: ButtonData,
}

impl ButtonBuilder {
    /// An empty button.
    pub fn new() -> Self {
        Self::default()
    }

    /// The fields set so far.
    pub fn data(&self) -> &ButtonData {
        &self.data
    }

    /// Set the style, which also picks the button shape.
    pub fn set_style(mut self, style: ButtonStyle) -> Self {
        self.data.style = Some(style);
        self
    }

    /// Set the URL of a link button.
    pub fn set_url(mut self, url: impl Into<String>) -> Self {
        self.data.url = Some(url.into());
        self
    }

    /// Set the custom id sent back with the interaction when clicked.
    pub fn set_custom_id(mut self, custom_id: impl Into<String>) -> Self {
        self.data.custom_id = Some(custom_id.into());
        self
    }

    /// Set the SKU a premium button offers.
    pub fn set_sku_id(mut self, sku_id: impl Into<Snowflake>) -> Self {
        self.data.sku_id = Some(sku_id.into());
        self
    }

    /// Emoji shown on the button.
    pub fn set_emoji(mut self, emoji: Emoji) -> Self {
        self.data.emoji = Some(emoji);
        self
    }

    /// Remove the emoji.
    pub fn clear_emoji(mut self) -> Self {
        self.data.emoji = None;
        self
    }

    /// Grey the button out.
    pub fn set_disabled(mut self, disabled: bool) -> Self {
        self.data.disabled = Some(disabled);
        self
    }

    /// Text shown on the button.
    pub fn set_label(mut self, label: impl Into<String>) -> Self {
        self.data.label = Some(label.into());
        self
    }

    /// Remove the label.
    pub fn clear_label(mut self) -> Self {
        self.data.label = None;
        self
    }
}

impl From<ButtonData> for ButtonBuilder {
    fn from(data: ButtonData) -> Self {
        Self {
            data: ButtonData {
                kind: ComponentType::Button,
                ..data
            },
        }
    }
}

impl JsonBuilder for ButtonBuilder {
    type Data = ButtonData;

    fn to_json(&self, validation_override: Option<bool>) -> Result<ButtonData, ValidationError> {
        let data = self.data.clone();
        if should_validate(validation_override) {
            assertions::button(&data)?;
        }
        Ok(data)
    }
}

resolvable!(ButtonBuilder, ButtonData);
