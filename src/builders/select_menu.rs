//! Builders for the five select menu kinds and string select options.
//!
//! The shared fields (custom id, placeholder, value bounds, disabled) live in
//! [`SelectMenuBase`] and are set through the [`SelectMenuBuilder`] trait.

use std::ops::Range;

use crate::assertions;
use crate::error::ValidationError;
use crate::types::{
    ChannelSelectMenuData, ChannelType, ComponentType, Emoji, MentionableSelectMenuData,
    RoleSelectMenuData, SelectDefaultValue, SelectMenuBase, Snowflake, StringSelectMenuData,
    StringSelectMenuOptionData, UserSelectMenuData,
};
use crate::validation::should_validate;

use super::{resolvable, resolve, JsonBuilder, Resolvable};

// ---------------------------------------------------------------------------
// Shared setters
// ---------------------------------------------------------------------------

/// Setters common to every select menu builder.
pub trait SelectMenuBuilder: Sized {
    /// The shared fields set so far.
    fn base(&self) -> &SelectMenuBase;

    /// Mutable access to the shared fields.
    fn base_mut(&mut self) -> &mut SelectMenuBase;

    /// Set the custom id sent back with the interaction on submit.
    fn set_custom_id(mut self, custom_id: impl Into<String>) -> Self {
        self.base_mut().custom_id = Some(custom_id.into());
        self
    }

    /// Text shown while nothing is chosen.
    fn set_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.base_mut().placeholder = Some(placeholder.into());
        self
    }

    /// Remove the placeholder.
    fn clear_placeholder(mut self) -> Self {
        self.base_mut().placeholder = None;
        self
    }

    /// Minimum number of items that must be chosen.
    fn set_min_values(mut self, min_values: u32) -> Self {
        self.base_mut().min_values = Some(min_values);
        self
    }

    /// Maximum number of items that can be chosen.
    fn set_max_values(mut self, max_values: u32) -> Self {
        self.base_mut().max_values = Some(max_values);
        self
    }

    /// Grey the menu out.
    fn set_disabled(mut self, disabled: bool) -> Self {
        self.base_mut().disabled = Some(disabled);
        self
    }
}

macro_rules! select_menu_builder {
    ($(#[$meta:meta])* $builder:ident, $data:ident, $kind:expr, $predicate:path) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq)]
        pub struct $builder {
            data: $data,
        }

        impl $builder {
            /// An empty builder of this kind.
            pub fn new() -> Self {
                Self::default()
            }

            /// The fields set so far.
            pub fn data(&self) -> &$data {
                &self.data
            }
        }

        impl From<$data> for $builder {
            fn from(data: $data) -> Self {
                Self {
                    data: $data { kind: $kind, ..data },
                }
            }
        }

        impl SelectMenuBuilder for $builder {
            fn base(&self) -> &SelectMenuBase {
                &self.data.base
            }

            fn base_mut(&mut self) -> &mut SelectMenuBase {
                &mut self.data.base
            }
        }

        impl JsonBuilder for $builder {
            type Data = $data;

            fn to_json(&self, validation_override: Option<bool>) -> Result<$data, ValidationError> {
                let data = self.data.clone();
                if should_validate(validation_override) {
                    $predicate(&data)?;
                }
                Ok(data)
            }
        }

        resolvable!($builder, $data);
    };
}

select_menu_builder!(
    /// Builder for a select menu with developer-defined options.
    StringSelectMenuBuilder,
    StringSelectMenuData,
    ComponentType::StringSelect,
    assertions::string_select
);

select_menu_builder!(
    /// Builder for a select menu listing the guild's channels.
    ChannelSelectMenuBuilder,
    ChannelSelectMenuData,
    ComponentType::ChannelSelect,
    assertions::channel_select
);

select_menu_builder!(
    /// Builder for a select menu listing the guild's roles.
    RoleSelectMenuBuilder,
    RoleSelectMenuData,
    ComponentType::RoleSelect,
    assertions::role_select
);

select_menu_builder!(
    /// Builder for a select menu listing users.
    UserSelectMenuBuilder,
    UserSelectMenuData,
    ComponentType::UserSelect,
    assertions::user_select
);

select_menu_builder!(
    /// Builder for a select menu listing both users and roles.
    MentionableSelectMenuBuilder,
    MentionableSelectMenuData,
    ComponentType::MentionableSelect,
    assertions::mentionable_select
);

// ---------------------------------------------------------------------------
// String select
// ---------------------------------------------------------------------------

fn resolve_options<I>(options: I) -> impl Iterator<Item = StringSelectMenuOptionData>
where
    I: IntoIterator,
    I::Item: Into<Resolvable<StringSelectMenuOptionBuilder>>,
{
    options
        .into_iter()
        .map(|option| StringSelectMenuOptionBuilder::into_data(resolve(option)))
}

/// Clamp a splice window to `0..len`.
fn splice_range(len: usize, index: usize, delete_count: usize) -> Range<usize> {
    let start = index.min(len);
    let end = start.saturating_add(delete_count).min(len);
    start..end
}

impl StringSelectMenuBuilder {
    /// The options added so far.
    pub fn options(&self) -> &[StringSelectMenuOptionData] {
        self.data.options.as_deref().unwrap_or_default()
    }

    /// Append options. Each may be an option builder, option data, or an
    /// initializer wrapped in [`Resolvable::init`].
    pub fn add_options<I>(mut self, options: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Resolvable<StringSelectMenuOptionBuilder>>,
    {
        self.data
            .options
            .get_or_insert_with(Vec::new)
            .extend(resolve_options(options));
        self
    }

    /// Replace all options.
    pub fn set_options<I>(mut self, options: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Resolvable<StringSelectMenuOptionBuilder>>,
    {
        self.data.options = Some(Vec::new());
        self.add_options(options)
    }

    /// Remove `delete_count` options starting at `index` and insert
    /// `options` in their place. Out of range windows are clamped.
    pub fn splice_options<I>(mut self, index: usize, delete_count: usize, options: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Resolvable<StringSelectMenuOptionBuilder>>,
    {
        let replacement: Vec<_> = resolve_options(options).collect();
        let current = self.data.options.get_or_insert_with(Vec::new);
        let range = splice_range(current.len(), index, delete_count);
        current.splice(range, replacement);
        self
    }
}

/// Builder for one option of a string select menu.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StringSelectMenuOptionBuilder {
    data: StringSelectMenuOptionData,
}

impl StringSelectMenuOptionBuilder {
    /// An empty option.
    pub fn new() -> Self {
        Self::default()
    }

    /// The fields set so far.
    pub fn data(&self) -> &StringSelectMenuOptionData {
        &self.data
    }

    /// Unwrap into the raw option, skipping validation.
    pub fn into_data(self) -> StringSelectMenuOptionData {
        self.data
    }

    /// Text shown to the user for this option.
    pub fn set_label(mut self, label: impl Into<String>) -> Self {
        self.data.label = Some(label.into());
        self
    }

    /// Set the value sent back when this option is chosen.
    pub fn set_value(mut self, value: impl Into<String>) -> Self {
        self.data.value = Some(value.into());
        self
    }

    /// Secondary text under the label.
    pub fn set_description(mut self, description: impl Into<String>) -> Self {
        self.data.description = Some(description.into());
        self
    }

    /// Remove the description.
    pub fn clear_description(mut self) -> Self {
        self.data.description = None;
        self
    }

    /// Emoji shown next to the label.
    pub fn set_emoji(mut self, emoji: Emoji) -> Self {
        self.data.emoji = Some(emoji);
        self
    }

    /// Remove the emoji.
    pub fn clear_emoji(mut self) -> Self {
        self.data.emoji = None;
        self
    }

    /// Whether this option is pre-selected.
    pub fn set_default(mut self, default: bool) -> Self {
        self.data.default = Some(default);
        self
    }
}

impl From<StringSelectMenuOptionData> for StringSelectMenuOptionBuilder {
    fn from(data: StringSelectMenuOptionData) -> Self {
        Self { data }
    }
}

impl JsonBuilder for StringSelectMenuOptionBuilder {
    type Data = StringSelectMenuOptionData;

    fn to_json(
        &self,
        validation_override: Option<bool>,
    ) -> Result<StringSelectMenuOptionData, ValidationError> {
        let data = self.data.clone();
        if should_validate(validation_override) {
            assertions::string_select_option(&data)?;
        }
        Ok(data)
    }
}

resolvable!(StringSelectMenuOptionBuilder, StringSelectMenuOptionData);

// ---------------------------------------------------------------------------
// Auto-populated selects
// ---------------------------------------------------------------------------

impl ChannelSelectMenuBuilder {
    /// Restrict the menu to these channel types.
    pub fn add_channel_types(mut self, types: impl IntoIterator<Item = ChannelType>) -> Self {
        self.data
            .channel_types
            .get_or_insert_with(Vec::new)
            .extend(types);
        self
    }

    /// Replace the allowed channel types.
    pub fn set_channel_types(mut self, types: impl IntoIterator<Item = ChannelType>) -> Self {
        self.data.channel_types = Some(Vec::new());
        self.add_channel_types(types)
    }

    /// Pre-select channels by id.
    pub fn add_default_channels<S: Into<Snowflake>>(
        mut self,
        ids: impl IntoIterator<Item = S>,
    ) -> Self {
        self.data
            .default_values
            .get_or_insert_with(Vec::new)
            .extend(ids.into_iter().map(SelectDefaultValue::channel));
        self
    }

    /// Replace the pre-selected channels.
    pub fn set_default_channels<S: Into<Snowflake>>(
        mut self,
        ids: impl IntoIterator<Item = S>,
    ) -> Self {
        self.data.default_values = Some(Vec::new());
        self.add_default_channels(ids)
    }
}

impl RoleSelectMenuBuilder {
    /// Pre-select roles by id.
    pub fn add_default_roles<S: Into<Snowflake>>(mut self, ids: impl IntoIterator<Item = S>) -> Self {
        self.data
            .default_values
            .get_or_insert_with(Vec::new)
            .extend(ids.into_iter().map(SelectDefaultValue::role));
        self
    }

    /// Replace the pre-selected roles.
    pub fn set_default_roles<S: Into<Snowflake>>(mut self, ids: impl IntoIterator<Item = S>) -> Self {
        self.data.default_values = Some(Vec::new());
        self.add_default_roles(ids)
    }
}

impl UserSelectMenuBuilder {
    /// Pre-select users by id.
    pub fn add_default_users<S: Into<Snowflake>>(mut self, ids: impl IntoIterator<Item = S>) -> Self {
        self.data
            .default_values
            .get_or_insert_with(Vec::new)
            .extend(ids.into_iter().map(SelectDefaultValue::user));
        self
    }

    /// Replace the pre-selected users.
    pub fn set_default_users<S: Into<Snowflake>>(mut self, ids: impl IntoIterator<Item = S>) -> Self {
        self.data.default_values = Some(Vec::new());
        self.add_default_users(ids)
    }
}

impl MentionableSelectMenuBuilder {
    /// Pre-select roles by id.
    pub fn add_default_roles<S: Into<Snowflake>>(mut self, ids: impl IntoIterator<Item = S>) -> Self {
        self.data
            .default_values
            .get_or_insert_with(Vec::new)
            .extend(ids.into_iter().map(SelectDefaultValue::role));
        self
    }

    /// Pre-select users by id.
    pub fn add_default_users<S: Into<Snowflake>>(mut self, ids: impl IntoIterator<Item = S>) -> Self {
        self.data
            .default_values
            .get_or_insert_with(Vec::new)
            .extend(ids.into_iter().map(SelectDefaultValue::user));
        self
    }

    /// Append pre-selected values of mixed kinds.
    pub fn add_default_values(mut self, values: impl IntoIterator<Item = SelectDefaultValue>) -> Self {
        self.data
            .default_values
            .get_or_insert_with(Vec::new)
            .extend(values);
        self
    }

    /// Replace the pre-selected values.
    pub fn set_default_values(mut self, values: impl IntoIterator<Item = SelectDefaultValue>) -> Self {
        self.data.default_values = Some(Vec::new());
        self.add_default_values(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuilderError;
    use serde_json::json;

    fn option(value: &str) -> StringSelectMenuOptionBuilder {
        StringSelectMenuOptionBuilder::new()
            .set_label(value)
            .set_value(value)
    }

    fn values(menu: &StringSelectMenuBuilder) -> Vec<&str> {
        menu.options()
            .iter()
            .filter_map(|option| option.value.as_deref())
            .collect()
    }

    #[test]
    fn builds_string_select() {
        let menu = StringSelectMenuBuilder::new()
            .set_custom_id("pick")
            .set_placeholder("choose")
            .set_min_values(1)
            .set_max_values(2)
            .add_options([option("a"), option("b").set_default(true)]);

        assert_eq!(
            menu.to_value(None).unwrap(),
            json!({
                "type": 3,
                "custom_id": "pick",
                "placeholder": "choose",
                "min_values": 1,
                "max_values": 2,
                "options": [
                    {"label": "a", "value": "a"},
                    {"label": "b", "value": "b", "default": true},
                ],
            })
        );
    }

    #[test]
    fn options_accept_builders_data_and_initializers() {
        let menu = StringSelectMenuBuilder::new()
            .add_options([option("a")])
            .add_options([StringSelectMenuOptionData {
                label: Some("b".into()),
                value: Some("b".into()),
                ..Default::default()
            }])
            .add_options([Resolvable::init(|option: StringSelectMenuOptionBuilder| {
                option.set_label("c").set_value("c")
            })]);
        assert_eq!(values(&menu), ["a", "b", "c"]);
    }

    #[test]
    fn set_and_splice_options() {
        let menu = StringSelectMenuBuilder::new()
            .set_options([option("a"), option("b"), option("c")])
            .splice_options(1, 1, [option("x"), option("y")]);
        assert_eq!(values(&menu), ["a", "x", "y", "c"]);

        let menu = menu.splice_options(10, 3, [option("z")]);
        assert_eq!(values(&menu), ["a", "x", "y", "c", "z"]);

        let menu = menu.splice_options(0, usize::MAX, Vec::<StringSelectMenuOptionBuilder>::new());
        assert!(menu.options().is_empty());

        let menu = menu.set_options([option("only")]).set_options([option("new")]);
        assert_eq!(values(&menu), ["new"]);
    }

    #[test]
    fn invalid_options_are_reported_once_in_place() {
        let err = StringSelectMenuBuilder::new()
            .set_custom_id("pick")
            .add_options([option("a"), StringSelectMenuOptionBuilder::new().set_label("b")])
            .to_json(None)
            .unwrap_err();
        assert_eq!(err.issues().len(), 1);
        assert!(err.has_issue_at("options[1].value"));
    }

    #[test]
    fn clear_setters_remove_keys() {
        let option = option("a")
            .set_description("")
            .set_emoji(Emoji::unicode("🙂"))
            .clear_description()
            .clear_emoji();
        assert_eq!(
            option.to_value(None).unwrap(),
            json!({"label": "a", "value": "a"})
        );

        let menu = UserSelectMenuBuilder::new()
            .set_custom_id("u")
            .set_placeholder("who?")
            .clear_placeholder();
        assert_eq!(menu.base().placeholder, None);
    }

    #[test]
    fn option_builder_validates_alone() {
        assert!(option("a").set_description("first").to_json(None).is_ok());
        let err = StringSelectMenuOptionBuilder::new()
            .set_value("v")
            .to_json(None)
            .unwrap_err();
        assert!(err.has_issue_at("label"));
    }

    #[test]
    fn custom_id_is_required() {
        let err = StringSelectMenuBuilder::new().to_json(None).unwrap_err();
        assert!(err.has_issue_at("custom_id"));
        assert!(StringSelectMenuBuilder::new().to_json(Some(false)).is_ok());
    }

    #[test]
    fn channel_select_with_types_and_defaults() {
        let menu = ChannelSelectMenuBuilder::new()
            .set_custom_id("where")
            .add_channel_types([ChannelType::GuildText, ChannelType::GuildVoice])
            .add_default_channels(["10", "11"]);
        assert_eq!(
            menu.to_value(None).unwrap(),
            json!({
                "type": 8,
                "custom_id": "where",
                "channel_types": [0, 2],
                "default_values": [
                    {"id": "10", "type": "channel"},
                    {"id": "11", "type": "channel"},
                ],
            })
        );

        let menu = menu
            .set_channel_types([ChannelType::GuildForum])
            .set_default_channels(Vec::<String>::new());
        assert_eq!(menu.data().channel_types, Some(vec![ChannelType::GuildForum]));
        assert_eq!(menu.to_value(None).unwrap()["default_values"], json!([]));
    }

    #[test]
    fn role_and_user_defaults() {
        let roles = RoleSelectMenuBuilder::new()
            .set_custom_id("roles")
            .add_default_roles(["1"])
            .set_default_roles(["2", "3"]);
        assert_eq!(roles.data().default_values.as_ref().map(Vec::len), Some(2));
        assert!(roles.to_json(None).is_ok());

        let users = UserSelectMenuBuilder::new()
            .set_custom_id("users")
            .set_disabled(true)
            .add_default_users([String::from("4")]);
        assert_eq!(
            users.to_value(None).unwrap(),
            json!({
                "type": 5,
                "custom_id": "users",
                "disabled": true,
                "default_values": [{"id": "4", "type": "user"}],
            })
        );
    }

    #[test]
    fn mentionable_accepts_mixed_defaults() {
        let menu = MentionableSelectMenuBuilder::new()
            .set_custom_id("who")
            .add_default_roles(["1"])
            .add_default_users(["2"]);
        assert!(menu.to_json(None).is_ok());

        let menu = menu.set_default_values([SelectDefaultValue::channel("3")]);
        let err = menu.to_json(None).unwrap_err();
        assert!(err.has_issue_at("default_values[0].type"));
    }

    #[test]
    fn round_trips_raw_data() {
        let value = json!({
            "type": 6,
            "custom_id": "roles",
            "placeholder": "pick roles",
            "min_values": 0,
            "max_values": 3,
            "default_values": [{"id": "5", "type": "role"}],
        });
        let menu = RoleSelectMenuBuilder::from_value(value.clone()).unwrap();
        assert_eq!(menu.base().placeholder.as_deref(), Some("pick roles"));
        assert_eq!(menu.to_value(None).unwrap(), value);
    }

    #[test]
    fn empty_lists_survive_round_trips() {
        let value = json!({"type": 3, "custom_id": "pick", "options": []});
        let menu = StringSelectMenuBuilder::from_value(value.clone()).unwrap();
        assert!(menu.options().is_empty());
        assert_eq!(menu.to_value(Some(false)).unwrap(), value);

        let value = json!({
            "type": 8,
            "custom_id": "c",
            "channel_types": [],
            "default_values": [],
        });
        let menu = ChannelSelectMenuBuilder::from_value(value.clone()).unwrap();
        assert_eq!(menu.to_value(None).unwrap(), value);

        let menu = StringSelectMenuBuilder::new().set_custom_id("pick");
        assert!(menu.to_value(Some(false)).unwrap().get("options").is_none());
        let menu = menu.set_options(Vec::<StringSelectMenuOptionBuilder>::new());
        assert_eq!(menu.to_value(Some(false)).unwrap()["options"], json!([]));
    }

    #[test]
    fn unknown_keys_survive_round_trips() {
        let value = json!({"type": 6, "custom_id": "r", "id": 8});
        let menu = RoleSelectMenuBuilder::from_value(value.clone()).unwrap();
        assert_eq!(menu.data().extra.get("id"), Some(&json!(8)));
        assert_eq!(menu.to_value(None).unwrap(), value);

        let value = json!({
            "type": 3,
            "custom_id": "pick",
            "options": [{"label": "a", "value": "a", "id": 2}],
        });
        let menu = StringSelectMenuBuilder::from_value(value.clone()).unwrap();
        assert_eq!(menu.to_value(None).unwrap(), value);
    }

    #[test]
    fn unknown_channel_types_ingest_then_fail_validation() {
        let value = json!({"type": 8, "custom_id": "c", "channel_types": [0, 99]});
        let menu = ChannelSelectMenuBuilder::from_value(value.clone()).unwrap();
        assert_eq!(
            menu.data().channel_types,
            Some(vec![ChannelType::GuildText, ChannelType::Unknown(99)])
        );
        let err = menu.to_json(None).unwrap_err();
        assert!(err.has_issue_at("channel_types[1]"));
        assert_eq!(menu.to_value(Some(false)).unwrap(), value);
    }

    #[test]
    fn mistyped_raw_fields_are_malformed() {
        let err = StringSelectMenuBuilder::from_value(json!({"type": 3, "min_values": "one"}))
            .unwrap_err();
        assert!(matches!(err, BuilderError::MalformedInput(_)));
    }

    #[test]
    fn splice_range_clamps() {
        assert_eq!(splice_range(3, 1, 1), 1..2);
        assert_eq!(splice_range(3, 5, 1), 3..3);
        assert_eq!(splice_range(3, 2, usize::MAX), 2..3);
    }
}
