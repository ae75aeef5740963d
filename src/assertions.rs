//! Schema predicates, one per component kind.
//!
//! Predicates never stop at the first failure: every violated constraint is
//! collected into an [`Issue`] so callers can report all of them at once.
//! Containers only check their own composition here; children are validated
//! by their own builders' `to_json`, and container builders re-root child
//! issues under `components[i]`.

use serde_json::{json, Map, Value};
use tracing::trace;
use url::Url;

use crate::error::{Issue, Rule, ValidationError};
use crate::types::{
    ActionRowData, ButtonData, ButtonStyle, ChannelSelectMenuData, ComponentData, ComponentType,
    Emoji, MentionableSelectMenuData, ModalData, RoleSelectMenuData, SelectDefaultValue,
    SelectDefaultValueType, SelectMenuBase, StringSelectMenuData, StringSelectMenuOptionData,
    TextInputData, UserSelectMenuData,
};

pub const CUSTOM_ID_MAX_LENGTH: usize = 100;
pub const BUTTON_LABEL_MAX_LENGTH: usize = 80;
pub const BUTTON_ROW_MAX: usize = 5;
pub const LINK_SCHEMES: &[&str] = &["http", "https", "discord"];

pub const SELECT_PLACEHOLDER_MAX_LENGTH: usize = 150;
pub const SELECT_VALUES_MAX: u64 = 25;
pub const SELECT_OPTIONS_MAX: usize = 25;
pub const OPTION_LABEL_MAX_LENGTH: usize = 80;
pub const OPTION_VALUE_MAX_LENGTH: usize = 100;
pub const OPTION_DESCRIPTION_MAX_LENGTH: usize = 100;

pub const TEXT_INPUT_LABEL_MAX_LENGTH: usize = 45;
pub const TEXT_INPUT_LENGTH_MAX: u64 = 4000;
pub const TEXT_INPUT_PLACEHOLDER_MAX_LENGTH: usize = 100;

pub const MODAL_TITLE_MAX_LENGTH: usize = 45;
pub const MODAL_ROWS_MAX: usize = 5;

// ---------------------------------------------------------------------------
// Issue collector
// ---------------------------------------------------------------------------

fn join(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_owned()
    } else {
        format!("{prefix}.{field}")
    }
}

#[derive(Default)]
struct Issues(Vec<Issue>);

impl Issues {
    fn push(&mut self, path: impl Into<String>, rule: Rule, actual: Option<Value>) {
        self.0.push(Issue {
            path: path.into(),
            rule,
            actual,
        });
    }

    fn kind(&mut self, actual: ComponentType, expected: ComponentType) {
        if actual != expected {
            self.push(
                "type",
                Rule::UnexpectedType {
                    expected: expected.name(),
                },
                Some(json!(actual)),
            );
        }
    }

    /// Character-length check on an optional string. `min` of 0 only
    /// bounds the maximum.
    fn length(&mut self, path: impl Into<String>, value: Option<&str>, min: usize, max: usize) {
        let Some(value) = value else { return };
        let len = value.chars().count();
        if len < min || len > max {
            self.push(path, Rule::Length { min, max }, Some(json!(value)));
        }
    }

    /// Like [`Issues::length`], but the string must be present.
    fn required_length(
        &mut self,
        path: impl Into<String>,
        value: Option<&str>,
        min: usize,
        max: usize,
    ) {
        match value {
            None => self.push(path, Rule::Required, None),
            Some(_) => self.length(path, value, min, max),
        }
    }

    fn range(&mut self, path: &str, value: Option<u32>, min: u64, max: u64) {
        let Some(value) = value else { return };
        if u64::from(value) < min || u64::from(value) > max {
            self.push(path, Rule::Range { min, max }, Some(json!(value)));
        }
    }

    /// `field` is present although the shape is owned by `owner`. Cites both
    /// fields when both are set.
    fn conflict(
        &mut self,
        field: &'static str,
        present: bool,
        owner: &'static str,
        owner_present: bool,
        context: &'static str,
    ) {
        if !present {
            return;
        }
        let rule = if owner_present {
            Rule::MutuallyExclusive { other: owner }
        } else {
            Rule::Forbidden { context }
        };
        self.push(field, rule, None);
    }

    fn unknown_keys(&mut self, prefix: &str, extra: &Map<String, Value>) {
        for (key, value) in extra {
            self.push(join(prefix, key), Rule::UnknownKey, Some(value.clone()));
        }
    }

    fn emoji(&mut self, prefix: &str, emoji: Option<&Emoji>) {
        if let Some(emoji) = emoji {
            self.unknown_keys(prefix, &emoji.extra);
        }
    }

    fn link_url(&mut self, path: &str, raw: &str) {
        match Url::parse(raw) {
            Err(_) => self.push(path, Rule::InvalidUrl, Some(json!(raw))),
            Ok(url) if !LINK_SCHEMES.contains(&url.scheme()) => self.push(
                path,
                Rule::UrlScheme {
                    allowed: LINK_SCHEMES,
                },
                Some(json!(raw)),
            ),
            Ok(_) => {}
        }
    }

    fn finish(self, kind: &'static str) -> Result<(), ValidationError> {
        if self.0.is_empty() {
            return Ok(());
        }
        trace!(component = kind, issues = self.0.len(), "payload failed validation");
        Err(ValidationError::new(self.0))
    }
}

// ---------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------

/// A button must match exactly one of the link, custom-id or premium shapes.
///
/// Link and custom-id buttons need a `label` or an `emoji`. Emoji-only
/// buttons pass, as the API accepts them, although stricter builders demand
/// `label` itself. Premium buttons carry neither.
pub fn button(data: &ButtonData) -> Result<(), ValidationError> {
    let mut issues = Issues::default();
    issues.kind(data.kind, ComponentType::Button);
    issues.unknown_keys("", &data.extra);

    let has_custom_id = data.custom_id.is_some();
    let has_url = data.url.is_some();
    let has_sku = data.sku_id.is_some();
    let has_content = data.label.is_some() || data.emoji.is_some();

    match data.style {
        None => issues.push("style", Rule::Required, None),
        Some(ButtonStyle::Link) => {
            match data.url.as_deref() {
                Some(url) => issues.link_url("url", url),
                None => issues.push("url", Rule::Required, None),
            }
            issues.conflict("custom_id", has_custom_id, "url", has_url, "link buttons");
            issues.conflict("sku_id", has_sku, "url", has_url, "link buttons");
            if !has_content {
                issues.push("label", Rule::RequiredOneOf { other: "emoji" }, None);
            }
        }
        Some(style) if style.uses_custom_id() => {
            issues.required_length(
                "custom_id",
                data.custom_id.as_deref(),
                1,
                CUSTOM_ID_MAX_LENGTH,
            );
            issues.conflict("url", has_url, "custom_id", has_custom_id, "custom id buttons");
            issues.conflict("sku_id", has_sku, "custom_id", has_custom_id, "custom id buttons");
            if !has_content {
                issues.push("label", Rule::RequiredOneOf { other: "emoji" }, None);
            }
        }
        Some(ButtonStyle::Premium) => {
            if !has_sku {
                issues.push("sku_id", Rule::Required, None);
            }
            issues.conflict("custom_id", has_custom_id, "sku_id", has_sku, "premium buttons");
            issues.conflict("url", has_url, "sku_id", has_sku, "premium buttons");
            let forbidden = Rule::Forbidden {
                context: "premium buttons",
            };
            if data.label.is_some() {
                issues.push("label", forbidden.clone(), None);
            }
            if data.emoji.is_some() {
                issues.push("emoji", forbidden, None);
            }
        }
        Some(other) => issues.push(
            "style",
            Rule::UnexpectedType {
                expected: "a button style between 1 and 6",
            },
            Some(json!(u8::from(other))),
        ),
    }

    issues.length("label", data.label.as_deref(), 1, BUTTON_LABEL_MAX_LENGTH);
    issues.emoji("emoji", data.emoji.as_ref());
    issues.finish(ComponentType::Button.name())
}

// ---------------------------------------------------------------------------
// Select menus
// ---------------------------------------------------------------------------

fn select_base(issues: &mut Issues, base: &SelectMenuBase) {
    issues.required_length(
        "custom_id",
        base.custom_id.as_deref(),
        1,
        CUSTOM_ID_MAX_LENGTH,
    );
    issues.length(
        "placeholder",
        base.placeholder.as_deref(),
        0,
        SELECT_PLACEHOLDER_MAX_LENGTH,
    );
    issues.range("min_values", base.min_values, 0, SELECT_VALUES_MAX);
    issues.range("max_values", base.max_values, 0, SELECT_VALUES_MAX);
}

fn default_values(
    issues: &mut Issues,
    values: &[SelectDefaultValue],
    allowed: &[SelectDefaultValueType],
    expected: &'static str,
) {
    for (index, value) in values.iter().enumerate() {
        if !allowed.contains(&value.kind) {
            issues.push(
                format!("default_values[{index}].type"),
                Rule::UnexpectedType { expected },
                Some(json!(value.kind)),
            );
        }
    }
}

fn string_option_into(issues: &mut Issues, prefix: &str, option: &StringSelectMenuOptionData) {
    issues.required_length(
        join(prefix, "label"),
        option.label.as_deref(),
        1,
        OPTION_LABEL_MAX_LENGTH,
    );
    issues.required_length(
        join(prefix, "value"),
        option.value.as_deref(),
        1,
        OPTION_VALUE_MAX_LENGTH,
    );
    issues.length(
        join(prefix, "description"),
        option.description.as_deref(),
        1,
        OPTION_DESCRIPTION_MAX_LENGTH,
    );
    issues.emoji(&join(prefix, "emoji"), option.emoji.as_ref());
}

/// A single string select option on its own.
pub fn string_select_option(option: &StringSelectMenuOptionData) -> Result<(), ValidationError> {
    let mut issues = Issues::default();
    string_option_into(&mut issues, "", option);
    issues.finish("string select option")
}

pub fn string_select(data: &StringSelectMenuData) -> Result<(), ValidationError> {
    let mut issues = Issues::default();
    issues.kind(data.kind, ComponentType::StringSelect);
    select_base(&mut issues, &data.base);
    let options = data.options.as_deref().unwrap_or_default();
    if options.len() > SELECT_OPTIONS_MAX {
        issues.push(
            "options",
            Rule::Count {
                min: 0,
                max: SELECT_OPTIONS_MAX,
            },
            Some(json!(options.len())),
        );
    }
    for (index, option) in options.iter().enumerate() {
        string_option_into(&mut issues, &format!("options[{index}]"), option);
    }
    issues.finish(ComponentType::StringSelect.name())
}

pub fn channel_select(data: &ChannelSelectMenuData) -> Result<(), ValidationError> {
    let mut issues = Issues::default();
    issues.kind(data.kind, ComponentType::ChannelSelect);
    select_base(&mut issues, &data.base);
    let channel_types = data.channel_types.as_deref().unwrap_or_default();
    for (index, channel_type) in channel_types.iter().enumerate() {
        if !channel_type.is_known() {
            issues.push(
                format!("channel_types[{index}]"),
                Rule::UnexpectedType {
                    expected: "a known channel type",
                },
                Some(json!(channel_type)),
            );
        }
    }
    default_values(
        &mut issues,
        data.default_values.as_deref().unwrap_or_default(),
        &[SelectDefaultValueType::Channel],
        "channel",
    );
    issues.finish(ComponentType::ChannelSelect.name())
}

pub fn role_select(data: &RoleSelectMenuData) -> Result<(), ValidationError> {
    let mut issues = Issues::default();
    issues.kind(data.kind, ComponentType::RoleSelect);
    select_base(&mut issues, &data.base);
    default_values(
        &mut issues,
        data.default_values.as_deref().unwrap_or_default(),
        &[SelectDefaultValueType::Role],
        "role",
    );
    issues.finish(ComponentType::RoleSelect.name())
}

pub fn user_select(data: &UserSelectMenuData) -> Result<(), ValidationError> {
    let mut issues = Issues::default();
    issues.kind(data.kind, ComponentType::UserSelect);
    select_base(&mut issues, &data.base);
    default_values(
        &mut issues,
        data.default_values.as_deref().unwrap_or_default(),
        &[SelectDefaultValueType::User],
        "user",
    );
    issues.finish(ComponentType::UserSelect.name())
}

pub fn mentionable_select(data: &MentionableSelectMenuData) -> Result<(), ValidationError> {
    let mut issues = Issues::default();
    issues.kind(data.kind, ComponentType::MentionableSelect);
    select_base(&mut issues, &data.base);
    default_values(
        &mut issues,
        data.default_values.as_deref().unwrap_or_default(),
        &[SelectDefaultValueType::Role, SelectDefaultValueType::User],
        "role or user",
    );
    issues.finish(ComponentType::MentionableSelect.name())
}

// ---------------------------------------------------------------------------
// Text input
// ---------------------------------------------------------------------------

pub fn text_input(data: &TextInputData) -> Result<(), ValidationError> {
    let mut issues = Issues::default();
    issues.kind(data.kind, ComponentType::TextInput);
    issues.required_length(
        "custom_id",
        data.custom_id.as_deref(),
        1,
        CUSTOM_ID_MAX_LENGTH,
    );
    issues.required_length(
        "label",
        data.label.as_deref(),
        1,
        TEXT_INPUT_LABEL_MAX_LENGTH,
    );
    if data.style.is_none() {
        issues.push("style", Rule::Required, None);
    }
    issues.range("min_length", data.min_length, 0, TEXT_INPUT_LENGTH_MAX);
    issues.range("max_length", data.max_length, 1, TEXT_INPUT_LENGTH_MAX);
    issues.length(
        "placeholder",
        data.placeholder.as_deref(),
        0,
        TEXT_INPUT_PLACEHOLDER_MAX_LENGTH,
    );
    issues.length("value", data.value.as_deref(), 0, TEXT_INPUT_LENGTH_MAX as usize);
    issues.finish(ComponentType::TextInput.name())
}

// ---------------------------------------------------------------------------
// Containers
// ---------------------------------------------------------------------------

/// A row holds 1 to 5 buttons, or exactly one select menu or text input.
pub fn action_row(data: &ActionRowData) -> Result<(), ValidationError> {
    let mut issues = Issues::default();
    issues.kind(data.kind, ComponentType::ActionRow);

    let kinds: Vec<ComponentType> = data.components.iter().map(ComponentData::kind).collect();
    let only_buttons = kinds.iter().all(|kind| *kind == ComponentType::Button);

    if kinds.is_empty() || (only_buttons && kinds.len() > BUTTON_ROW_MAX) {
        issues.push(
            "components",
            Rule::Count {
                min: 1,
                max: BUTTON_ROW_MAX,
            },
            Some(json!(kinds.len())),
        );
    } else if !only_buttons {
        for (index, kind) in kinds.iter().enumerate() {
            if *kind == ComponentType::ActionRow {
                issues.push(
                    format!("components[{index}].type"),
                    Rule::UnexpectedType {
                        expected: "a button, select menu or text input",
                    },
                    Some(json!(kind)),
                );
            }
        }
        if kinds.len() > 1 {
            issues.push("components", Rule::RowComposition, None);
        }
    }

    issues.finish(ComponentType::ActionRow.name())
}

/// A modal needs a title, a custom id, and 1 to 5 rows of one text input
/// each.
pub fn modal(data: &ModalData) -> Result<(), ValidationError> {
    let mut issues = Issues::default();
    issues.required_length("title", data.title.as_deref(), 1, MODAL_TITLE_MAX_LENGTH);
    issues.required_length(
        "custom_id",
        data.custom_id.as_deref(),
        1,
        CUSTOM_ID_MAX_LENGTH,
    );

    let rows = data.components.len();
    if rows == 0 || rows > MODAL_ROWS_MAX {
        issues.push(
            "components",
            Rule::Count {
                min: 1,
                max: MODAL_ROWS_MAX,
            },
            Some(json!(rows)),
        );
    }
    for (index, row) in data.components.iter().enumerate() {
        let single_text_input = matches!(row.components.as_slice(), [ComponentData::TextInput(_)]);
        if !single_text_input {
            issues.push(
                format!("components[{index}].components"),
                Rule::UnexpectedType {
                    expected: "exactly one text input",
                },
                None,
            );
        }
    }

    issues.finish("modal")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
