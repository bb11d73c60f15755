//! Serde shapes of the OBO graph JSON format. Only the parts consumed by the
//! reader are modelled; unknown fields are ignored.

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct OboJson {
    #[serde(default)]
    pub graphs: Vec<JsonGraph>,
}

#[derive(Debug, Default, Deserialize)]
pub struct JsonGraph {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub lbl: Option<String>,
    #[serde(default)]
    pub nodes: Vec<JsonNode>,
    #[serde(default)]
    pub edges: Vec<JsonEdge>,
    #[serde(default)]
    pub meta: Option<JsonMeta>,
}

#[derive(Debug, Default, Deserialize)]
pub struct JsonNode {
    pub id: String,
    #[serde(default)]
    pub lbl: String,
    #[serde(default, rename = "type")]
    pub json_type: String,
    #[serde(default)]
    pub meta: Option<JsonMeta>,
}

#[derive(Debug, Default, Deserialize)]
pub struct JsonEdge {
    pub sub: String,
    pub pred: String,
    pub obj: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonMeta {
    #[serde(default)]
    pub basic_property_values: Vec<JsonProperty>,
    #[serde(default)]
    pub subsets: Vec<String>,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub synonyms: Vec<JsonSynonym>,
    #[serde(default)]
    pub comments: Vec<String>,
    #[serde(default)]
    pub definition: Option<JsonDefinition>,
    #[serde(default)]
    pub xrefs: Vec<JsonXref>,
    #[serde(default)]
    pub deprecated: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct JsonProperty {
    pub pred: String,
    #[serde(default)]
    pub val: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct JsonSynonym {
    pub pred: String,
    #[serde(default)]
    pub val: String,
    #[serde(default)]
    pub xrefs: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct JsonDefinition {
    #[serde(default)]
    pub val: String,
    #[serde(default)]
    pub xrefs: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct JsonXref {
    #[serde(default)]
    pub val: String,
}
