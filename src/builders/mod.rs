//! Fluent builders for components and modals.
//!
//! Every builder is a plain mutable accumulator of wire fields. Setters write
//! exactly one field and never validate; [`JsonBuilder::to_json`] is the one
//! place where the schema is enforced. A builder can therefore sit in an
//! invalid state between setters, e.g. a button with both a URL and a custom
//! id while its style is being changed.
//!
//! Builders are created empty (`new()` / `Default`), from typed wire data
//! (`From<…Data>`), or from raw JSON ([`JsonBuilder::from_value`]). Raw data
//! is parsed into owned storage, so the caller's `Value` is never aliased.
//!
//! # Examples
//!
//! ```
//! use discord_builders::prelude::*;
//!
//! let row = ActionRowBuilder::new().add_button_components([ButtonBuilder::new()
//!     .set_style(ButtonStyle::Primary)
//!     .set_custom_id("confirm")
//!     .set_label("Confirm")]);
//!
//! let json = row.to_value(None).unwrap();
//! assert_eq!(json["components"][0]["custom_id"], "confirm");
//! ```

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::trace;

use crate::error::{BuilderError, ValidationError};
use crate::types::{component::discriminant, ComponentData, ComponentType};

pub mod action_row;
pub mod button;
pub mod modal;
pub mod select_menu;
pub mod text_input;

pub use self::action_row::ActionRowBuilder;
pub use self::button::ButtonBuilder;
pub use self::modal::ModalBuilder;
pub use self::select_menu::{
    ChannelSelectMenuBuilder, MentionableSelectMenuBuilder, RoleSelectMenuBuilder,
    SelectMenuBuilder, StringSelectMenuBuilder, StringSelectMenuOptionBuilder,
    UserSelectMenuBuilder,
};
pub use self::text_input::TextInputBuilder;

// ===========================================================================
// JsonBuilder
// ===========================================================================

/// A builder that serializes to one wire object.
pub trait JsonBuilder: Default {
    /// The wire shape this builder produces.
    type Data: Serialize;

    /// Build the wire object.
    ///
    /// `validation_override` forces validation on (`Some(true)`) or off
    /// (`Some(false)`); `None` defers to
    /// [`is_validation_enabled`](crate::validation::is_validation_enabled).
    /// With validation off no check of any kind runs.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing every violated constraint when
    /// validation is on and the payload does not match its schema.
    fn to_json(&self, validation_override: Option<bool>) -> Result<Self::Data, ValidationError>;

    /// [`to_json`](Self::to_json), then convert to a `serde_json::Value`
    /// ready to be used as (part of) a request body.
    fn to_value(&self, validation_override: Option<bool>) -> Result<Value, BuilderError> {
        Ok(serde_json::to_value(self.to_json(validation_override)?)?)
    }

    /// Create a builder from raw wire JSON.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::MalformedInput`] if a field does not have its
    /// wire type. Shape rules are not checked here.
    fn from_value(value: Value) -> Result<Self, BuilderError>
    where
        Self: From<Self::Data>,
        Self::Data: DeserializeOwned,
    {
        Ok(Self::from(serde_json::from_value::<Self::Data>(value)?))
    }
}

// ===========================================================================
// Builder-or-data-or-initializer input
// ===========================================================================

/// Anything an add-method accepts in place of a finished builder.
///
/// * an existing builder, used as-is,
/// * wire data, wrapped in a new builder,
/// * an initializer, called with a fresh empty builder.
///
/// Builders and wire data convert with `.into()`; initializers are wrapped
/// with [`Resolvable::init`].
pub enum Resolvable<B: JsonBuilder> {
    Builder(B),
    Data(B::Data),
    Init(Box<dyn FnOnce(B) -> B>),
}

impl<B> Resolvable<B>
where
    B: JsonBuilder + From<B::Data>,
{
    /// Wrap an initializer that configures a fresh builder.
    pub fn init(initializer: impl FnOnce(B) -> B + 'static) -> Self {
        Self::Init(Box::new(initializer))
    }

    /// Turn the input into a concrete builder.
    pub fn resolve(self) -> B {
        match self {
            Self::Builder(builder) => builder,
            Self::Data(data) => B::from(data),
            Self::Init(initializer) => initializer(B::default()),
        }
    }
}

/// Resolve any accepted input into a builder.
pub(crate) fn resolve<B>(input: impl Into<Resolvable<B>>) -> B
where
    B: JsonBuilder + From<B::Data>,
{
    let input: Resolvable<B> = input.into();
    input.resolve()
}

/// `From` impls for a builder and its wire data into [`Resolvable`].
macro_rules! resolvable {
    ($builder:ty, $data:ty) => {
        impl From<$builder> for $crate::builders::Resolvable<$builder> {
            fn from(builder: $builder) -> Self {
                Self::Builder(builder)
            }
        }

        impl From<$data> for $crate::builders::Resolvable<$builder> {
            fn from(data: $data) -> Self {
                Self::Data(data)
            }
        }
    };
}
pub(crate) use resolvable;

// ===========================================================================
// Polymorphic component builder
// ===========================================================================

/// A builder of any component kind.
#[derive(Clone, Debug, PartialEq)]
pub enum AnyComponentBuilder {
    ActionRow(ActionRowBuilder),
    Button(ButtonBuilder),
    StringSelect(StringSelectMenuBuilder),
    TextInput(TextInputBuilder),
    UserSelect(UserSelectMenuBuilder),
    RoleSelect(RoleSelectMenuBuilder),
    MentionableSelect(MentionableSelectMenuBuilder),
    ChannelSelect(ChannelSelectMenuBuilder),
}

impl AnyComponentBuilder {
    /// The kind of component this builder produces.
    pub const fn kind(&self) -> ComponentType {
        match self {
            Self::ActionRow(_) => ComponentType::ActionRow,
            Self::Button(_) => ComponentType::Button,
            Self::StringSelect(_) => ComponentType::StringSelect,
            Self::TextInput(_) => ComponentType::TextInput,
            Self::UserSelect(_) => ComponentType::UserSelect,
            Self::RoleSelect(_) => ComponentType::RoleSelect,
            Self::MentionableSelect(_) => ComponentType::MentionableSelect,
            Self::ChannelSelect(_) => ComponentType::ChannelSelect,
        }
    }

    /// Build the wire object of whichever kind this is.
    ///
    /// # Errors
    ///
    /// See [`JsonBuilder::to_json`].
    pub fn to_json(&self, validation_override: Option<bool>) -> Result<ComponentData, ValidationError> {
        Ok(match self {
            Self::ActionRow(row) => ComponentData::ActionRow(row.to_json(validation_override)?),
            Self::Button(button) => ComponentData::Button(button.to_json(validation_override)?),
            Self::StringSelect(menu) => {
                ComponentData::StringSelect(menu.to_json(validation_override)?)
            }
            Self::TextInput(input) => ComponentData::TextInput(input.to_json(validation_override)?),
            Self::UserSelect(menu) => ComponentData::UserSelect(menu.to_json(validation_override)?),
            Self::RoleSelect(menu) => ComponentData::RoleSelect(menu.to_json(validation_override)?),
            Self::MentionableSelect(menu) => {
                ComponentData::MentionableSelect(menu.to_json(validation_override)?)
            }
            Self::ChannelSelect(menu) => {
                ComponentData::ChannelSelect(menu.to_json(validation_override)?)
            }
        })
    }

    /// [`to_json`](Self::to_json) as a `serde_json::Value`.
    ///
    /// # Errors
    ///
    /// See [`JsonBuilder::to_value`].
    pub fn to_value(&self, validation_override: Option<bool>) -> Result<Value, BuilderError> {
        Ok(serde_json::to_value(self.to_json(validation_override)?)?)
    }
}

impl From<ComponentData> for AnyComponentBuilder {
    fn from(data: ComponentData) -> Self {
        match data {
            ComponentData::ActionRow(data) => Self::ActionRow(data.into()),
            ComponentData::Button(data) => Self::Button(data.into()),
            ComponentData::StringSelect(data) => Self::StringSelect(data.into()),
            ComponentData::TextInput(data) => Self::TextInput(data.into()),
            ComponentData::UserSelect(data) => Self::UserSelect(data.into()),
            ComponentData::RoleSelect(data) => Self::RoleSelect(data.into()),
            ComponentData::MentionableSelect(data) => Self::MentionableSelect(data.into()),
            ComponentData::ChannelSelect(data) => Self::ChannelSelect(data.into()),
        }
    }
}

macro_rules! any_component_from {
    ($($variant:ident($builder:ty)),* $(,)?) => {
        $(
            impl From<$builder> for AnyComponentBuilder {
                fn from(builder: $builder) -> Self {
                    Self::$variant(builder)
                }
            }
        )*
    };
}

any_component_from! {
    ActionRow(ActionRowBuilder),
    Button(ButtonBuilder),
    StringSelect(StringSelectMenuBuilder),
    TextInput(TextInputBuilder),
    UserSelect(UserSelectMenuBuilder),
    RoleSelect(RoleSelectMenuBuilder),
    MentionableSelect(MentionableSelectMenuBuilder),
    ChannelSelect(ChannelSelectMenuBuilder),
}

/// Create the builder matching the `type` discriminant of raw component
/// JSON.
///
/// # Errors
///
/// Returns [`BuilderError::UnknownComponentType`] if `type` is absent, not an
/// integer, or not a known component kind, and
/// [`BuilderError::MalformedInput`] if the remaining fields do not have their
/// wire types.
pub fn create_component_builder(value: Value) -> Result<AnyComponentBuilder, BuilderError> {
    let kind = discriminant(&value).map_err(|found| {
        trace!(discriminant = %found, "rejected unknown component type");
        BuilderError::UnknownComponentType(found)
    })?;

    Ok(match kind {
        ComponentType::ActionRow => ActionRowBuilder::from_value(value)?.into(),
        ComponentType::Button => ButtonBuilder::from_value(value)?.into(),
        ComponentType::StringSelect => StringSelectMenuBuilder::from_value(value)?.into(),
        ComponentType::TextInput => TextInputBuilder::from_value(value)?.into(),
        ComponentType::UserSelect => UserSelectMenuBuilder::from_value(value)?.into(),
        ComponentType::RoleSelect => RoleSelectMenuBuilder::from_value(value)?.into(),
        ComponentType::MentionableSelect => MentionableSelectMenuBuilder::from_value(value)?.into(),
        ComponentType::ChannelSelect => ChannelSelectMenuBuilder::from_value(value)?.into(),
    })
}

// ===========================================================================
// Tests
// ===========================================================================
