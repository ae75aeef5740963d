//! Typed representations of the component wire format.
//!
//! These mirror the Discord API docs for message components and modal
//! callback data. Field names match the wire (snake_case) and discriminants
//! are the API's small integers, so a value serializes byte-for-byte into
//! what the API expects.

/// Channel kinds offered by channel select menus.
pub mod channel;

/// Buttons, select menus, text inputs, action rows and the component union.
pub mod component;

/// Modal callback data.
pub mod modal;

/// Discord IDs are snowflakes transmitted as strings in JSON.
pub type Snowflake = String;

pub use self::channel::ChannelType;
pub use self::component::{
    ActionRowData, ButtonData, ButtonStyle, ChannelSelectMenuData, ComponentData, ComponentType,
    Emoji, MentionableSelectMenuData, RoleSelectMenuData, SelectDefaultValue,
    SelectDefaultValueType, SelectMenuBase, StringSelectMenuData, StringSelectMenuOptionData,
    TextInputData, TextInputStyle, UserSelectMenuData,
};
pub use self::modal::ModalData;
