//! Property/value assertions attached to graphs and terms: definitions,
//! synonyms, cross references, comments, subsets and free-form basic
//! properties. Every accessor returns an empty value for unset fields.

use std::fmt;

use serde::{Deserialize, Serialize};

const EXACT_SYNONYM: &str = "hasExactSynonym";
const NARROW_SYNONYM: &str = "hasNarrowSynonym";
const BROAD_SYNONYM: &str = "hasBroadSynonym";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicPropertyValue {
    pub pred: String,
    pub value: String,
}

impl BasicPropertyValue {
    pub fn new<P: Into<String>, V: Into<String>>(pred: P, value: V) -> Self {
        Self {
            pred: pred.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub value: String,
    pub xrefs: Vec<String>,
}

impl Definition {
    pub fn new<V: Into<String>>(value: V, xrefs: Vec<String>) -> Self {
        Self {
            value: value.into(),
            xrefs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SynonymScope {
    Exact,
    Narrow,
    Broad,
    Related,
}

impl SynonymScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            SynonymScope::Exact => "EXACT",
            SynonymScope::Narrow => "NARROW",
            SynonymScope::Broad => "BROAD",
            SynonymScope::Related => "RELATED",
        }
    }
}

impl fmt::Display for SynonymScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Synonym {
    pub pred: String,
    pub value: String,
    pub xrefs: Vec<String>,
}

impl Synonym {
    pub fn new<P: Into<String>, V: Into<String>>(pred: P, value: V) -> Self {
        Self::with_xrefs(pred, value, Vec::new())
    }

    pub fn with_xrefs<P: Into<String>, V: Into<String>>(
        pred: P,
        value: V,
        xrefs: Vec<String>,
    ) -> Self {
        Self {
            pred: pred.into(),
            value: value.into(),
            xrefs,
        }
    }

    /// OBO-style scope derived from the predicate; unknown predicates are RELATED.
    pub fn scope(&self) -> SynonymScope {
        match short_predicate(&self.pred) {
            EXACT_SYNONYM => SynonymScope::Exact,
            NARROW_SYNONYM => SynonymScope::Narrow,
            BROAD_SYNONYM => SynonymScope::Broad,
            _ => SynonymScope::Related,
        }
    }

    pub fn is_exact(&self) -> bool {
        short_predicate(&self.pred) == EXACT_SYNONYM
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Xref {
    pub value: String,
}

impl Xref {
    pub fn new<V: Into<String>>(value: V) -> Self {
        Self {
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Meta {
    pub definition: Option<Definition>,
    pub basic_property_values: Vec<BasicPropertyValue>,
    pub synonyms: Vec<Synonym>,
    pub xrefs: Vec<Xref>,
    pub comments: Vec<String>,
    pub subsets: Vec<String>,
    pub version: String,
    pub deprecated: bool,
}

impl Meta {
    pub fn basic_property_values(&self) -> &[BasicPropertyValue] {
        &self.basic_property_values
    }

    pub fn definition(&self) -> Option<&Definition> {
        self.definition.as_ref()
    }

    pub fn synonyms(&self) -> &[Synonym] {
        &self.synonyms
    }

    pub fn xrefs(&self) -> &[Xref] {
        &self.xrefs
    }

    pub fn xrefs_values(&self) -> Vec<&str> {
        self.xrefs.iter().map(|x| x.value.as_str()).collect()
    }

    pub fn subsets(&self) -> &[String] {
        &self.subsets
    }

    /// Ontology version; only set on graph level metadata.
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecated
    }

    /// Explicit comments, or the values of `#comment` basic properties when none were set.
    pub fn comments(&self) -> Vec<&str> {
        if !self.comments.is_empty() {
            return self.comments.iter().map(String::as_str).collect();
        }
        self.basic_property_values
            .iter()
            .filter(|p| p.pred.ends_with("#comment"))
            .map(|p| p.value.as_str())
            .collect()
    }

    /// Default namespace of an ontology or the OBO namespace of a term.
    pub fn namespace(&self) -> &str {
        self.basic_property_values
            .iter()
            .find(|p| {
                p.pred.ends_with("#hasOBONamespace") || p.pred.ends_with("#default-namespace")
            })
            .map(|p| p.value.as_str())
            .unwrap_or("")
    }

    pub(crate) fn has_deprecated_property(&self) -> bool {
        self.basic_property_values
            .iter()
            .any(|p| p.pred.ends_with("#deprecated"))
    }
}

fn short_predicate(pred: &str) -> &str {
    crate::id::extract_id(pred)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_meta_accessors_return_empty_values() {
        let meta = Meta::default();
        assert!(meta.xrefs().is_empty());
        assert!(meta.xrefs_values().is_empty());
        assert!(meta.synonyms().is_empty());
        assert!(meta.comments().is_empty());
        assert!(meta.definition().is_none());
        assert_eq!(meta.namespace(), "");
        assert_eq!(meta.version(), "");
    }

    #[test]
    fn namespace_from_either_predicate() {
        let meta = Meta {
            basic_property_values: vec![
                BasicPropertyValue::new("http://purl.org/dc/elements/1.1/creator", "someone"),
                BasicPropertyValue::new(
                    "http://www.geneontology.org/formats/oboInOwl#default-namespace",
                    "sequence",
                ),
            ],
            ..Meta::default()
        };
        assert_eq!(meta.namespace(), "sequence");

        let meta = Meta {
            basic_property_values: vec![BasicPropertyValue::new(
                "http://www.geneontology.org/formats/oboInOwl#hasOBONamespace",
                "dicty_phenotypes",
            )],
            ..Meta::default()
        };
        assert_eq!(meta.namespace(), "dicty_phenotypes");
    }

    #[test]
    fn comments_fall_back_to_properties() {
        let mut meta = Meta {
            basic_property_values: vec![BasicPropertyValue::new(
                "http://www.w3.org/2000/01/rdf-schema#comment",
                "from a property",
            )],
            ..Meta::default()
        };
        assert_eq!(meta.comments(), vec!["from a property"]);
        meta.comments = vec!["explicit".into()];
        assert_eq!(meta.comments(), vec!["explicit"]);
    }

    #[test]
    fn synonym_scopes() {
        assert_eq!(
            Synonym::new("hasExactSynonym", "a").scope(),
            SynonymScope::Exact
        );
        assert_eq!(
            Synonym::new("hasNarrowSynonym", "a").scope(),
            SynonymScope::Narrow
        );
        assert_eq!(
            Synonym::new(
                "http://www.geneontology.org/formats/oboInOwl#hasBroadSynonym",
                "a"
            )
            .scope(),
            SynonymScope::Broad
        );
        assert_eq!(
            Synonym::new("hasRelatedSynonym", "a").scope(),
            SynonymScope::Related
        );
        assert_eq!(Synonym::new("whatever", "a").scope(), SynonymScope::Related);
        assert!(Synonym::new("hasExactSynonym", "a").is_exact());
        assert!(!Synonym::new("hasBroadSynonym", "a").is_exact());
        assert_eq!(SynonymScope::Related.to_string(), "RELATED");
    }

    #[test]
    fn deprecated_property_detection() {
        let meta = Meta {
            basic_property_values: vec![BasicPropertyValue::new(
                "http://www.w3.org/2002/07/owl#deprecated",
                "true",
            )],
            ..Meta::default()
        };
        assert!(meta.has_deprecated_property());
        assert!(!meta.is_deprecated());
    }
}
