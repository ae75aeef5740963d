use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::component::ActionRowData;

/// Callback data of a modal interaction response.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ModalData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    pub components: Vec<ActionRowData>,
    /// Keys outside the wire shape, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
