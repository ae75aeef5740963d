//! Fluent, validating builders for Discord message components and modals.
//!
//! Wire shapes live in [`types`], builders in [`builders`], and the schema
//! predicates every builder runs on `to_json` in [`assertions`]. Validation
//! can be switched off process-wide with [`validation::disable_validators`]
//! or per call by passing `Some(false)` to `to_json`.
//!
//! Raw component JSON (e.g. from a received message) is turned back into
//! builders with [`builders::create_component_builder`].

pub mod assertions;
pub mod builders;
pub mod error;
pub mod types;
pub mod validation;

pub use builders::create_component_builder;
pub use error::{BuilderError, Issue, Rule, ValidationError};
pub use validation::{disable_validators, enable_validators, is_validation_enabled};

/// Everything needed to build components, in one import.
pub mod prelude {
    pub use crate::builders::{
        create_component_builder, ActionRowBuilder, AnyComponentBuilder, ButtonBuilder,
        ChannelSelectMenuBuilder, JsonBuilder, MentionableSelectMenuBuilder, ModalBuilder,
        Resolvable, RoleSelectMenuBuilder, SelectMenuBuilder, StringSelectMenuBuilder,
        StringSelectMenuOptionBuilder, TextInputBuilder, UserSelectMenuBuilder,
    };
    pub use crate::error::{BuilderError, ValidationError};
    pub use crate::types::*;
    pub use crate::validation::{disable_validators, enable_validators, is_validation_enabled};
}
