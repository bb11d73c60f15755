use std::{borrow::Borrow, fmt, sync::OnceLock};

use serde::{Deserialize, Serialize};

use crate::meta::Meta;

/// Short, case-sensitive identifier of a term, unique within one graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new<T: Into<String>>(id: T) -> Self {
        NodeId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        NodeId(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        NodeId(value)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RdfType {
    Class,
    Property,
    Individual,
    Other(String),
}

impl RdfType {
    pub fn parse(value: &str) -> Self {
        match value {
            "CLASS" => RdfType::Class,
            "PROPERTY" => RdfType::Property,
            "INDIVIDUAL" => RdfType::Individual,
            other => RdfType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RdfType::Class => "CLASS",
            RdfType::Property => "PROPERTY",
            RdfType::Individual => "INDIVIDUAL",
            RdfType::Other(other) => other,
        }
    }
}

impl fmt::Display for RdfType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn empty_meta() -> &'static Meta {
    static EMPTY: OnceLock<Meta> = OnceLock::new();
    EMPTY.get_or_init(Meta::default)
}

/// A node of the ontology graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    id: NodeId,
    rdf_type: RdfType,
    label: String,
    iri: String,
    meta: Option<Meta>,
}

impl Term {
    pub fn new<L: Into<String>, I: Into<String>>(
        id: NodeId,
        rdf_type: RdfType,
        label: L,
        iri: I,
    ) -> Self {
        Self {
            id,
            rdf_type,
            label: label.into(),
            iri: iri.into(),
            meta: None,
        }
    }

    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn rdf_type(&self) -> &RdfType {
        &self.rdf_type
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn iri(&self) -> &str {
        &self.iri
    }

    pub fn has_meta(&self) -> bool {
        self.meta.is_some()
    }

    /// The attached metadata, or an empty one.
    pub fn meta(&self) -> &Meta {
        match &self.meta {
            Some(meta) => meta,
            None => empty_meta(),
        }
    }

    pub fn is_deprecated(&self) -> bool {
        let meta = self.meta();
        meta.is_deprecated() || meta.has_deprecated_property()
    }
}

/// A directed, predicate-labeled edge: `subject --predicate--> object`.
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    object: NodeId,
    subject: NodeId,
    predicate: NodeId,
    meta: Option<Meta>,
}

impl Relationship {
    pub fn new(object: NodeId, subject: NodeId, predicate: NodeId) -> Self {
        Self {
            object,
            subject,
            predicate,
            meta: None,
        }
    }

    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Parent end of the edge.
    pub fn object(&self) -> &NodeId {
        &self.object
    }

    /// Child end of the edge.
    pub fn subject(&self) -> &NodeId {
        &self.subject
    }

    pub fn predicate(&self) -> &NodeId {
        &self.predicate
    }

    pub fn has_meta(&self) -> bool {
        self.meta.is_some()
    }

    pub fn meta(&self) -> &Meta {
        match &self.meta {
            Some(meta) => meta,
            None => empty_meta(),
        }
    }
}
