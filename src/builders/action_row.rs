use serde::de::IgnoredAny;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::assertions;
use crate::error::{BuilderError, ValidationError};
use crate::types::{ActionRowData, ComponentType};
use crate::validation::should_validate;

use super::{
    create_component_builder, resolvable, resolve, AnyComponentBuilder, ButtonBuilder,
    ChannelSelectMenuBuilder, JsonBuilder, MentionableSelectMenuBuilder, Resolvable,
    RoleSelectMenuBuilder, StringSelectMenuBuilder, TextInputBuilder, UserSelectMenuBuilder,
};

/// Builder for a row of components.
///
/// Children are kept as builders and only serialized (and validated) when
/// the row itself is.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActionRowBuilder {
    components: Vec<AnyComponentBuilder>,
    extra: Map<String, Value>,
}

/// Raw row whose children still need to go through the component factory.
#[derive(Deserialize)]
struct RawActionRow {
    #[serde(rename = "type", default)]
    _kind: IgnoredAny,
    #[serde(default)]
    components: Vec<Value>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl ActionRowBuilder {
    /// An empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// The child builders, in order.
    pub fn components(&self) -> &[AnyComponentBuilder] {
        &self.components
    }

    /// Append buttons.
    pub fn add_button_components<I>(mut self, buttons: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Resolvable<ButtonBuilder>>,
    {
        self.components.extend(
            buttons
                .into_iter()
                .map(|button| AnyComponentBuilder::Button(resolve(button))),
        );
        self
    }

    /// Append a string select menu.
    pub fn add_string_select_menu_component(
        mut self,
        menu: impl Into<Resolvable<StringSelectMenuBuilder>>,
    ) -> Self {
        self.components.push(AnyComponentBuilder::StringSelect(resolve(menu)));
        self
    }

    /// Append a user select menu.
    pub fn add_user_select_menu_component(
        mut self,
        menu: impl Into<Resolvable<UserSelectMenuBuilder>>,
    ) -> Self {
        self.components.push(AnyComponentBuilder::UserSelect(resolve(menu)));
        self
    }

    /// Append a role select menu.
    pub fn add_role_select_menu_component(
        mut self,
        menu: impl Into<Resolvable<RoleSelectMenuBuilder>>,
    ) -> Self {
        self.components.push(AnyComponentBuilder::RoleSelect(resolve(menu)));
        self
    }

    /// Append a mentionable select menu.
    pub fn add_mentionable_select_menu_component(
        mut self,
        menu: impl Into<Resolvable<MentionableSelectMenuBuilder>>,
    ) -> Self {
        self.components.push(AnyComponentBuilder::MentionableSelect(resolve(menu)));
        self
    }

    /// Append a channel select menu.
    pub fn add_channel_select_menu_component(
        mut self,
        menu: impl Into<Resolvable<ChannelSelectMenuBuilder>>,
    ) -> Self {
        self.components.push(AnyComponentBuilder::ChannelSelect(resolve(menu)));
        self
    }

    /// Append a text input. Only valid inside a modal.
    pub fn add_text_input_component(
        mut self,
        input: impl Into<Resolvable<TextInputBuilder>>,
    ) -> Self {
        self.components.push(AnyComponentBuilder::TextInput(resolve(input)));
        self
    }
}

impl From<ActionRowData> for ActionRowBuilder {
    fn from(data: ActionRowData) -> Self {
        Self {
            components: data.components.into_iter().map(AnyComponentBuilder::from).collect(),
            extra: data.extra,
        }
    }
}

impl JsonBuilder for ActionRowBuilder {
    type Data = ActionRowData;

    /// Serialize every child, then check the row's composition.
    ///
    /// A failing child is reported under `components[i]`.
    fn to_json(&self, validation_override: Option<bool>) -> Result<ActionRowData, ValidationError> {
        let components = self
            .components
            .iter()
            .enumerate()
            .map(|(index, component)| {
                component
                    .to_json(validation_override)
                    .map_err(|err| err.nested(&format!("components[{index}]")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let data = ActionRowData {
            kind: ComponentType::ActionRow,
            components,
            extra: self.extra.clone(),
        };
        if should_validate(validation_override) {
            assertions::action_row(&data)?;
        }
        Ok(data)
    }

    /// Every child is created through
    /// [`create_component_builder`], so an unknown child type fails the
    /// whole row.
    fn from_value(value: Value) -> Result<Self, BuilderError> {
        let raw: RawActionRow = serde_json::from_value(value)?;
        let components = raw
            .components
            .into_iter()
            .map(create_component_builder)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            components,
            extra: raw.extra,
        })
    }
}

resolvable!(ActionRowBuilder, ActionRowData);
