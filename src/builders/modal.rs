use serde::Deserialize;
use serde_json::{Map, Value};

use crate::assertions;
use crate::error::{BuilderError, ValidationError};
use crate::types::ModalData;
use crate::validation::should_validate;

use super::{resolve, ActionRowBuilder, JsonBuilder, Resolvable};

/// Builder for the callback data of a modal interaction response.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModalBuilder {
    title: Option<String>,
    custom_id: Option<String>,
    components: Vec<ActionRowBuilder>,
    extra: Map<String, Value>,
}

#[derive(Deserialize)]
struct RawModal {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    custom_id: Option<String>,
    #[serde(default)]
    components: Vec<Value>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl ModalBuilder {
    /// An empty modal.
    pub fn new() -> Self {
        Self::default()
    }

    /// The title set so far.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The custom id set so far.
    pub fn custom_id(&self) -> Option<&str> {
        self.custom_id.as_deref()
    }

    /// The rows added so far.
    pub fn components(&self) -> &[ActionRowBuilder] {
        &self.components
    }

    /// Text shown at the top of the modal.
    pub fn set_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the custom id sent back with the submission.
    pub fn set_custom_id(mut self, custom_id: impl Into<String>) -> Self {
        self.custom_id = Some(custom_id.into());
        self
    }

    /// Append rows. Row data is wrapped in a new row builder.
    pub fn add_action_rows<I>(mut self, rows: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Resolvable<ActionRowBuilder>>,
    {
        self.components.extend(rows.into_iter().map(resolve));
        self
    }

    /// Replace all rows.
    pub fn set_action_rows(mut self, rows: impl IntoIterator<Item = ActionRowBuilder>) -> Self {
        self.components = rows.into_iter().collect();
        self
    }
}

impl From<ModalData> for ModalBuilder {
    fn from(data: ModalData) -> Self {
        Self {
            title: data.title,
            custom_id: data.custom_id,
            components: data.components.into_iter().map(ActionRowBuilder::from).collect(),
            extra: data.extra,
        }
    }
}

impl JsonBuilder for ModalBuilder {
    type Data = ModalData;

    /// Serialize every row, then check the modal's own fields.
    fn to_json(&self, validation_override: Option<bool>) -> Result<ModalData, ValidationError> {
        let components = self
            .components
            .iter()
            .enumerate()
            .map(|(index, row)| {
                row.to_json(validation_override)
                    .map_err(|err| err.nested(&format!("components[{index}]")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let data = ModalData {
            title: self.title.clone(),
            custom_id: self.custom_id.clone(),
            components,
            extra: self.extra.clone(),
        };
        if should_validate(validation_override) {
            assertions::modal(&data)?;
        }
        Ok(data)
    }

    /// Rows are created through [`ActionRowBuilder::from_value`], so their
    /// children go through the component factory.
    fn from_value(value: Value) -> Result<Self, BuilderError> {
        let raw: RawModal = serde_json::from_value(value)?;
        let components = raw
            .components
            .into_iter()
            .map(ActionRowBuilder::from_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            title: raw.title,
            custom_id: raw.custom_id,
            components,
            extra: raw.extra,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::{SelectMenuBuilder, StringSelectMenuBuilder, TextInputBuilder};
    use crate::error::Rule;
    use crate::types::{ActionRowData, TextInputStyle};
    use serde_json::json;

    fn input_row(custom_id: &str) -> ActionRowBuilder {
        ActionRowBuilder::new().add_text_input_component(
            TextInputBuilder::new()
                .set_custom_id(custom_id)
                .set_label(custom_id)
                .set_style(TextInputStyle::Paragraph),
        )
    }

    fn feedback() -> ModalBuilder {
        ModalBuilder::new()
            .set_title("Feedback")
            .set_custom_id("feedback")
    }

    #[test]
    fn builds_modal() {
        let modal = feedback().add_action_rows([input_row("body")]);
        assert_eq!(
            modal.to_value(None).unwrap(),
            json!({
                "title": "Feedback",
                "custom_id": "feedback",
                "components": [{
                    "type": 1,
                    "components": [{
                        "type": 4,
                        "custom_id": "body",
                        "label": "body",
                        "style": 2,
                    }],
                }],
            })
        );
    }

    #[test]
    fn title_custom_id_and_rows_are_required() {
        let err = ModalBuilder::new().to_json(None).unwrap_err();
        assert!(err.has_issue_at("title"));
        assert!(err.has_issue_at("custom_id"));
        assert!(err.has_issue_at("components"));

        assert!(ModalBuilder::new().to_json(Some(false)).is_ok());
    }

    #[test]
    fn rejects_more_than_five_rows() {
        let rows: Vec<_> = (0..6).map(|i| input_row(&format!("field{i}"))).collect();
        let err = feedback().set_action_rows(rows).to_json(None).unwrap_err();
        assert_eq!(err.issues()[0].rule, Rule::Count { min: 1, max: 5 });
    }

    #[test]
    fn rows_must_hold_one_text_input() {
        let select_row = ActionRowBuilder::new()
            .add_string_select_menu_component(StringSelectMenuBuilder::new().set_custom_id("pick"));
        let err = feedback()
            .add_action_rows([select_row])
            .to_json(None)
            .unwrap_err();
        assert!(err.has_issue_at("components[0].components"));
    }

    #[test]
    fn row_issues_are_nested() {
        let err = feedback()
            .add_action_rows([input_row("ok"), ActionRowBuilder::new()])
            .to_json(None)
            .unwrap_err();
        assert!(err.has_issue_at("components[1].components"));

        let bad_input = ActionRowBuilder::new()
            .add_text_input_component(TextInputBuilder::new().set_custom_id("x"));
        let err = feedback()
            .add_action_rows([bad_input])
            .to_json(None)
            .unwrap_err();
        assert!(err.has_issue_at("components[0].components[0].label"));
    }

    #[test]
    fn add_action_rows_accepts_row_data() {
        let data: ActionRowData = input_row("body").to_json(None).unwrap();
        let modal = feedback().add_action_rows([data]);
        assert_eq!(modal.components().len(), 1);
        assert!(modal.to_json(None).is_ok());
    }

    #[test]
    fn set_action_rows_replaces() {
        let modal = feedback()
            .add_action_rows([input_row("a"), input_row("b")])
            .set_action_rows([input_row("c")]);
        assert_eq!(modal.components(), [input_row("c")]);
    }

    #[test]
    fn round_trips_raw_data() {
        let value = json!({
            "title": "Report",
            "custom_id": "report",
            "components": [
                {"type": 1, "components": [
                    {"type": 4, "custom_id": "what", "label": "What happened", "style": 2,
                     "min_length": 10, "required": true},
                ]},
                {"type": 1, "components": [
                    {"type": 4, "custom_id": "where", "label": "Where", "style": 1},
                ]},
            ],
        });
        let modal = ModalBuilder::from_value(value.clone()).unwrap();
        assert_eq!(modal.title(), Some("Report"));
        assert_eq!(modal.components().len(), 2);
        assert_eq!(modal.to_value(None).unwrap(), value);
    }

    #[test]
    fn unknown_nested_type_fails_ingestion() {
        let err = ModalBuilder::from_value(json!({
            "title": "x",
            "custom_id": "x",
            "components": [{"type": 1, "components": [{"type": 42}]}],
        }))
        .unwrap_err();
        assert!(matches!(err, BuilderError::UnknownComponentType(_)));
    }

    #[test]
    fn unknown_keys_survive_round_trips() {
        let value = json!({
            "title": "x",
            "custom_id": "x",
            "id": 3,
            "components": [{"type": 1, "id": 4, "components": [
                {"type": 4, "custom_id": "t", "label": "t", "style": 1, "id": 5},
            ]}],
        });
        let modal = ModalBuilder::from_value(value.clone()).unwrap();
        assert_eq!(modal.to_value(None).unwrap(), value);
    }

    #[test]
    fn ingested_value_is_copied() {
        let mut value = json!({
            "title": "Report",
            "custom_id": "report",
            "components": [{"type": 1, "components": [
                {"type": 4, "custom_id": "what", "label": "What", "style": 2},
            ]}],
        });
        let modal = ModalBuilder::from_value(value.clone()).unwrap();
        let before = modal.clone();

        value["title"] = json!("changed");
        value["components"][0]["components"][0]["label"] = json!("changed");
        value["components"].as_array_mut().unwrap().clear();
        assert_eq!(modal, before);
        assert_eq!(modal.title(), Some("Report"));
        assert_eq!(modal.components().len(), 1);
    }

    #[test]
    fn returned_data_is_detached() {
        let modal = feedback().add_action_rows([input_row("body")]);
        let mut data = modal.to_json(None).unwrap();
        data.title = Some("changed".into());
        data.components[0].components.clear();
        data.components.push(ActionRowData::default());

        let again = modal.to_json(None).unwrap();
        assert_eq!(again.title.as_deref(), Some("Feedback"));
        assert_eq!(again.components.len(), 1);
        assert_eq!(again.components[0].components.len(), 1);
    }
}
