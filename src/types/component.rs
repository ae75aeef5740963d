//! Wire models for message components.
//!
//! Every optional field is an `Option` skipped when absent, so a payload
//! serializes with exactly the keys that were set. Builders may hold any
//! combination of fields; which combinations are legal is decided by
//! [`crate::assertions`] at serialization time.

use serde::{
    de::{Deserializer, Error as DeError},
    Deserialize, Serialize,
};
use serde_json::{Map, Value};
use serde_repr::{Deserialize_repr, Serialize_repr};

use super::{channel::ChannelType, Snowflake};

// ---------------------------------------------------------------------------
// Discriminants
// ---------------------------------------------------------------------------

/// The integer `type` tag carried by every component object.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize_repr, Serialize_repr)]
#[repr(u8)]
pub enum ComponentType {
    ActionRow = 1,
    Button = 2,
    StringSelect = 3,
    TextInput = 4,
    UserSelect = 5,
    RoleSelect = 6,
    MentionableSelect = 7,
    ChannelSelect = 8,
}

impl ComponentType {
    /// Human-readable name, used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::ActionRow => "action row",
            Self::Button => "button",
            Self::StringSelect => "string select menu",
            Self::TextInput => "text input",
            Self::UserSelect => "user select menu",
            Self::RoleSelect => "role select menu",
            Self::MentionableSelect => "mentionable select menu",
            Self::ChannelSelect => "channel select menu",
        }
    }

    /// Whether this is one of the five select menu kinds.
    pub const fn is_select_menu(self) -> bool {
        matches!(
            self,
            Self::StringSelect
                | Self::UserSelect
                | Self::RoleSelect
                | Self::MentionableSelect
                | Self::ChannelSelect
        )
    }
}

impl TryFrom<u64> for ComponentType {
    type Error = u64;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Ok(match value {
            1 => Self::ActionRow,
            2 => Self::Button,
            3 => Self::StringSelect,
            4 => Self::TextInput,
            5 => Self::UserSelect,
            6 => Self::RoleSelect,
            7 => Self::MentionableSelect,
            8 => Self::ChannelSelect,
            other => return Err(other),
        })
    }
}

/// Read the `type` discriminant of a raw component object.
///
/// Returns the discriminant as found (`null` when absent) if it is not an
/// integer naming a known component kind.
pub(crate) fn discriminant(value: &Value) -> Result<ComponentType, Value> {
    let raw = value.get("type");
    raw.and_then(Value::as_u64)
        .and_then(|n| ComponentType::try_from(n).ok())
        .ok_or_else(|| raw.cloned().unwrap_or(Value::Null))
}

// ---------------------------------------------------------------------------
// Emoji
// ---------------------------------------------------------------------------

/// Partial emoji shown on buttons and select options.
///
/// The shape is strict: keys other than `id`, `name` and `animated` are kept
/// in `extra` so they survive unvalidated serialization, and are rejected by
/// validation.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Emoji {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animated: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Emoji {
    /// A unicode emoji, e.g. `"🙂"`.
    pub fn unicode(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// A custom guild emoji.
    pub fn custom(id: impl Into<Snowflake>, name: impl Into<String>, animated: bool) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            animated: animated.then_some(true),
            extra: Map::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------

/// Visual style of a button, which also selects its shape.
///
/// Unrecognised integers are kept as [`ButtonStyle::Unknown`] so raw data can
/// be ingested and rejected by validation rather than by the parser.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
#[serde(from = "u8", into = "u8")]
pub enum ButtonStyle {
    Primary,
    Secondary,
    Success,
    Danger,
    Link,
    Premium,
    Unknown(u8),
}

impl ButtonStyle {
    /// Whether this style belongs to the custom-id family.
    pub const fn uses_custom_id(self) -> bool {
        matches!(
            self,
            Self::Primary | Self::Secondary | Self::Success | Self::Danger
        )
    }
}

impl From<u8> for ButtonStyle {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Primary,
            2 => Self::Secondary,
            3 => Self::Success,
            4 => Self::Danger,
            5 => Self::Link,
            6 => Self::Premium,
            unknown => Self::Unknown(unknown),
        }
    }
}

impl From<ButtonStyle> for u8 {
    fn from(value: ButtonStyle) -> Self {
        match value {
            ButtonStyle::Primary => 1,
            ButtonStyle::Secondary => 2,
            ButtonStyle::Success => 3,
            ButtonStyle::Danger => 4,
            ButtonStyle::Link => 5,
            ButtonStyle::Premium => 6,
            ButtonStyle::Unknown(unknown) => unknown,
        }
    }
}

/// A button, in any of its three shapes (link, custom id, premium).
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ButtonData {
    #[serde(rename = "type")]
    pub kind: ComponentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ButtonStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku_id: Option<Snowflake>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<Emoji>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    /// Keys outside the button shape.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ButtonData {
    fn default() -> Self {
        Self {
            kind: ComponentType::Button,
            style: None,
            custom_id: None,
            url: None,
            sku_id: None,
            label: None,
            emoji: None,
            disabled: None,
            extra: Map::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Select menus
// ---------------------------------------------------------------------------

/// Fields shared by all five select menu kinds.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SelectMenuBase {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_values: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_values: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
}

/// One choice of a string select menu.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StringSelectMenuOptionData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<Emoji>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<bool>,
    /// Keys outside the wire shape, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A select menu with developer-defined string options.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StringSelectMenuData {
    #[serde(rename = "type")]
    pub kind: ComponentType,
    #[serde(flatten)]
    pub base: SelectMenuBase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<StringSelectMenuOptionData>>,
    /// Keys outside the wire shape, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for StringSelectMenuData {
    fn default() -> Self {
        Self {
            kind: ComponentType::StringSelect,
            base: SelectMenuBase::default(),
            options: None,
            extra: Map::new(),
        }
    }
}

/// Kind of entity an auto-populated select menu pre-selects.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectDefaultValueType {
    Channel,
    Role,
    User,
}

/// A pre-selected entity of a channel, role, user or mentionable select.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
pub struct SelectDefaultValue {
    pub id: Snowflake,
    #[serde(rename = "type")]
    pub kind: SelectDefaultValueType,
}

impl SelectDefaultValue {
    pub fn channel(id: impl Into<Snowflake>) -> Self {
        Self {
            id: id.into(),
            kind: SelectDefaultValueType::Channel,
        }
    }

    pub fn role(id: impl Into<Snowflake>) -> Self {
        Self {
            id: id.into(),
            kind: SelectDefaultValueType::Role,
        }
    }

    pub fn user(id: impl Into<Snowflake>) -> Self {
        Self {
            id: id.into(),
            kind: SelectDefaultValueType::User,
        }
    }
}

/// A select menu populated with the guild's channels.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ChannelSelectMenuData {
    #[serde(rename = "type")]
    pub kind: ComponentType,
    #[serde(flatten)]
    pub base: SelectMenuBase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_types: Option<Vec<ChannelType>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_values: Option<Vec<SelectDefaultValue>>,
    /// Keys outside the wire shape, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ChannelSelectMenuData {
    fn default() -> Self {
        Self {
            kind: ComponentType::ChannelSelect,
            base: SelectMenuBase::default(),
            channel_types: None,
            default_values: None,
            extra: Map::new(),
        }
    }
}

/// A select menu populated with the guild's roles.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RoleSelectMenuData {
    #[serde(rename = "type")]
    pub kind: ComponentType,
    #[serde(flatten)]
    pub base: SelectMenuBase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_values: Option<Vec<SelectDefaultValue>>,
    /// Keys outside the wire shape, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for RoleSelectMenuData {
    fn default() -> Self {
        Self {
            kind: ComponentType::RoleSelect,
            base: SelectMenuBase::default(),
            default_values: None,
            extra: Map::new(),
        }
    }
}

/// A select menu populated with users.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct UserSelectMenuData {
    #[serde(rename = "type")]
    pub kind: ComponentType,
    #[serde(flatten)]
    pub base: SelectMenuBase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_values: Option<Vec<SelectDefaultValue>>,
    /// Keys outside the wire shape, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for UserSelectMenuData {
    fn default() -> Self {
        Self {
            kind: ComponentType::UserSelect,
            base: SelectMenuBase::default(),
            default_values: None,
            extra: Map::new(),
        }
    }
}

/// A select menu populated with both users and roles.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MentionableSelectMenuData {
    #[serde(rename = "type")]
    pub kind: ComponentType,
    #[serde(flatten)]
    pub base: SelectMenuBase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_values: Option<Vec<SelectDefaultValue>>,
    /// Keys outside the wire shape, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for MentionableSelectMenuData {
    fn default() -> Self {
        Self {
            kind: ComponentType::MentionableSelect,
            base: SelectMenuBase::default(),
            default_values: None,
            extra: Map::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Text input
// ---------------------------------------------------------------------------

/// Single-line or multi-line text input.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize_repr, Serialize_repr)]
#[repr(u8)]
pub enum TextInputStyle {
    Short = 1,
    Paragraph = 2,
}

/// A text field, only valid inside a modal.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TextInputData {
    #[serde(rename = "type")]
    pub kind: ComponentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<TextInputStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Keys outside the wire shape, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for TextInputData {
    fn default() -> Self {
        Self {
            kind: ComponentType::TextInput,
            custom_id: None,
            label: None,
            style: None,
            min_length: None,
            max_length: None,
            required: None,
            value: None,
            placeholder: None,
            extra: Map::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Action row and the component union
// ---------------------------------------------------------------------------

/// A horizontal row of components.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ActionRowData {
    #[serde(rename = "type")]
    pub kind: ComponentType,
    pub components: Vec<ComponentData>,
    /// Keys outside the wire shape, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ActionRowData {
    fn default() -> Self {
        Self {
            kind: ComponentType::ActionRow,
            components: Vec::new(),
            extra: Map::new(),
        }
    }
}

/// Any component object, discriminated by its `type` field.
///
/// Serializes as the inner object (which carries its own `type`);
/// deserializes by reading `type` first and parsing the matching shape.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ComponentData {
    ActionRow(ActionRowData),
    Button(ButtonData),
    StringSelect(StringSelectMenuData),
    TextInput(TextInputData),
    UserSelect(UserSelectMenuData),
    RoleSelect(RoleSelectMenuData),
    MentionableSelect(MentionableSelectMenuData),
    ChannelSelect(ChannelSelectMenuData),
}

impl ComponentData {
    /// The `type` tag this payload carries.
    pub const fn kind(&self) -> ComponentType {
        match self {
            Self::ActionRow(data) => data.kind,
            Self::Button(data) => data.kind,
            Self::StringSelect(data) => data.kind,
            Self::TextInput(data) => data.kind,
            Self::UserSelect(data) => data.kind,
            Self::RoleSelect(data) => data.kind,
            Self::MentionableSelect(data) => data.kind,
            Self::ChannelSelect(data) => data.kind,
        }
    }
}

impl<'de> Deserialize<'de> for ComponentData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let kind = discriminant(&value)
            .map_err(|found| DeError::custom(format_args!("unknown component type: {found}")))?;

        let parsed = match kind {
            ComponentType::ActionRow => serde_json::from_value(value).map(Self::ActionRow),
            ComponentType::Button => serde_json::from_value(value).map(Self::Button),
            ComponentType::StringSelect => serde_json::from_value(value).map(Self::StringSelect),
            ComponentType::TextInput => serde_json::from_value(value).map(Self::TextInput),
            ComponentType::UserSelect => serde_json::from_value(value).map(Self::UserSelect),
            ComponentType::RoleSelect => serde_json::from_value(value).map(Self::RoleSelect),
            ComponentType::MentionableSelect => {
                serde_json::from_value(value).map(Self::MentionableSelect)
            }
            ComponentType::ChannelSelect => serde_json::from_value(value).map(Self::ChannelSelect),
        };

        parsed.map_err(DeError::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
