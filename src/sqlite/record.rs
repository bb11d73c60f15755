//! Document shapes persisted in the store. Empty optional fields are left out
//! of the serialized documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    graph::OboGraph,
    meta::{BasicPropertyValue, Meta},
    term::Term,
};

const CURIES: [(&str, &str); 5] = [
    ("http://www.geneontology.org/formats/oboInOwl#date", "date"),
    (
        "http://www.geneontology.org/formats/oboInOwl#saved-by",
        "savedBy",
    ),
    (
        "http://www.geneontology.org/formats/oboInOwl#auto-generated-by",
        "generatedBy",
    ),
    (
        "http://www.geneontology.org/formats/oboInOwl#default-namespace",
        "namespace",
    ),
    (
        "http://www.geneontology.org/formats/oboInOwl#hasOBOFormatVersion",
        "oboFormat",
    ),
];

/// Compact alias of a well-known predicate IRI.
pub fn curie(pred: &str) -> Option<&'static str> {
    CURIES
        .iter()
        .find(|(iri, _)| *iri == pred)
        .map(|(_, curie)| *curie)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub pred: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub curie: String,
}

impl From<&BasicPropertyValue> for PropertyRecord {
    fn from(p: &BasicPropertyValue) -> Self {
        Self {
            pred: p.pred.clone(),
            value: p.value.clone(),
            curie: curie(&p.pred).unwrap_or_default().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphMetadata {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyRecord>,
}

impl From<&Meta> for GraphMetadata {
    fn from(meta: &Meta) -> Self {
        Self {
            namespace: meta.namespace().to_string(),
            version: meta.version().to_string(),
            properties: properties(meta),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphRecord {
    pub id: String,
    pub iri: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,
    pub metadata: GraphMetadata,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GraphRecord {
    pub fn from_graph(graph: &OboGraph) -> Self {
        let stamp = release_time(graph);
        Self {
            id: graph.id().to_string(),
            iri: graph.iri().to_string(),
            label: graph.label().to_string(),
            metadata: GraphMetadata::from(graph.meta()),
            created_at: stamp,
            updated_at: stamp,
        }
    }
}

/// Release date of the graph, or now when the graph carries none.
pub fn release_time(graph: &OboGraph) -> DateTime<Utc> {
    graph
        .timestamp()
        .map(|t| t.and_utc())
        .unwrap_or_else(Utc::now)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionRecord {
    pub value: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub xrefs: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct XrefRecord {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymRecord {
    pub value: String,
    pub pred: String,
    pub scope: String,
    pub is_exact: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub xrefs: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermMetadata {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<DefinitionRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subsets: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub xrefs: Vec<XrefRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synonyms: Vec<SynonymRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyRecord>,
}

impl From<&Meta> for TermMetadata {
    fn from(meta: &Meta) -> Self {
        Self {
            namespace: meta.namespace().to_string(),
            definition: meta.definition().map(|d| DefinitionRecord {
                value: d.value.clone(),
                xrefs: d.xrefs.clone(),
            }),
            comments: meta.comments().into_iter().map(str::to_string).collect(),
            subsets: meta.subsets().to_vec(),
            xrefs: meta
                .xrefs()
                .iter()
                .map(|x| XrefRecord {
                    value: x.value.clone(),
                })
                .collect(),
            synonyms: meta
                .synonyms()
                .iter()
                .map(|s| SynonymRecord {
                    value: s.value.clone(),
                    pred: s.pred.clone(),
                    scope: s.scope().to_string(),
                    is_exact: s.is_exact(),
                    xrefs: s.xrefs.clone(),
                })
                .collect(),
            properties: properties(meta),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermRecord {
    pub id: String,
    pub iri: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,
    pub rdf_type: String,
    pub deprecated: bool,
    /// Document id of the owning graph record.
    pub graph_id: String,
    #[serde(default)]
    pub metadata: TermMetadata,
}

impl TermRecord {
    pub fn from_term(term: &Term, graph_doc_id: &str) -> Self {
        Self {
            id: term.id().to_string(),
            iri: term.iri().to_string(),
            label: term.label().to_string(),
            rdf_type: term.rdf_type().to_string(),
            deprecated: term.is_deprecated(),
            graph_id: graph_doc_id.to_string(),
            metadata: TermMetadata::from(term.meta()),
        }
    }
}

/// Edge document: child term (`_from`) to parent term (`_to`), labeled by the
/// predicate term's document id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipRecord {
    #[serde(rename = "_from")]
    pub from: String,
    #[serde(rename = "_to")]
    pub to: String,
    pub predicate: String,
}

fn properties(meta: &Meta) -> Vec<PropertyRecord> {
    meta.basic_property_values()
        .iter()
        .map(PropertyRecord::from)
        .collect()
}
