use ahash::AHashMap;
use chrono::NaiveDateTime;

use crate::{
    bfs,
    errors::OboGraphError,
    meta::Meta,
    term::{NodeId, RdfType, Relationship, Term},
};

const DATE_LAYOUT: &str = "%m:%d:%Y %H:%M";

type Adjacency = AHashMap<NodeId, AHashMap<NodeId, Relationship>>;

/// In-memory OBO graph. Terms live in a single arena keyed by [`NodeId`];
/// edges are indexed twice, downward by object and upward by subject.
#[derive(Debug, Clone, Default)]
pub struct OboGraph {
    id: String,
    iri: String,
    label: String,
    meta: Meta,
    nodes: AHashMap<NodeId, Term>,
    edges_down: Adjacency,
    edges_up: Adjacency,
}

impl OboGraph {
    pub fn new<I: Into<String>, R: Into<String>>(id: I, iri: R, meta: Meta) -> Self {
        Self {
            id: id.into(),
            iri: iri.into(),
            meta,
            ..Self::default()
        }
    }

    pub fn with_label<L: Into<String>>(mut self, label: L) -> Self {
        self.label = label.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn iri(&self) -> &str {
        &self.iri
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    /// Release date taken from the `#date` graph property (`MM:DD:YYYY HH:MM`).
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        self.meta
            .basic_property_values()
            .iter()
            .find(|p| p.pred.ends_with("#date"))
            .and_then(|p| NaiveDateTime::parse_from_str(p.value.trim(), DATE_LAYOUT).ok())
    }

    pub fn exists_term(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get_term(&self, id: &str) -> Option<&Term> {
        self.nodes.get(id)
    }

    pub fn terms(&self) -> Vec<&Term> {
        self.nodes.values().collect()
    }

    pub fn terms_by_type(&self, rdf_type: &RdfType) -> Vec<&Term> {
        self.nodes
            .values()
            .filter(|t| t.rdf_type() == rdf_type)
            .collect()
    }

    pub fn term_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn relationships(&self) -> Vec<&Relationship> {
        self.edges_down
            .values()
            .flat_map(|subjects| subjects.values())
            .collect()
    }

    pub fn relationship_count(&self) -> usize {
        self.edges_down.values().map(|subjects| subjects.len()).sum()
    }

    /// Edge between a parent (object) and a child (subject).
    pub fn get_relationship(&self, object: &str, subject: &str) -> Option<&Relationship> {
        self.edges_down.get(object)?.get(subject)
    }

    pub fn children(&self, id: &str) -> Vec<&Term> {
        self.neighbor_terms(&self.edges_down, id)
    }

    pub fn parents(&self, id: &str) -> Vec<&Term> {
        self.neighbor_terms(&self.edges_up, id)
    }

    pub fn ancestors(&self, id: &str) -> Vec<&Term> {
        bfs::ancestors(self, id)
    }

    pub fn descendents(&self, id: &str) -> Vec<&Term> {
        bfs::descendents(self, id)
    }

    pub fn descendents_dfs(&self, id: &str) -> Vec<&Term> {
        bfs::descendents_dfs(self, id)
    }

    /// Adds a term, replacing any term with the same id.
    pub fn add_term(&mut self, term: Term) {
        self.nodes.insert(term.id().clone(), term);
    }

    /// Upserts all three terms and links them.
    pub fn add_relationship(&mut self, object: Term, subject: Term, predicate: Term) {
        let rel = Relationship::new(
            object.id().clone(),
            subject.id().clone(),
            predicate.id().clone(),
        );
        self.add_term(object);
        self.add_term(subject);
        self.add_term(predicate);
        self.link(rel);
    }

    /// Links existing terms; fails on the first unknown id (object, subject, predicate).
    pub fn add_relationship_with_id(
        &mut self,
        object: &str,
        subject: &str,
        predicate: &str,
    ) -> Result<(), OboGraphError> {
        for (role, id) in [("object", object), ("subject", subject), ("predicate", predicate)] {
            if !self.nodes.contains_key(id) {
                return Err(OboGraphError::missing_node(role, id));
            }
        }
        self.link(Relationship::new(object.into(), subject.into(), predicate.into()));
        Ok(())
    }

    pub(crate) fn child_ids(&self, id: &str) -> impl Iterator<Item = &NodeId> {
        self.edges_down.get(id).into_iter().flat_map(|m| m.keys())
    }

    pub(crate) fn parent_ids(&self, id: &str) -> impl Iterator<Item = &NodeId> {
        self.edges_up.get(id).into_iter().flat_map(|m| m.keys())
    }

    fn link(&mut self, rel: Relationship) {
        self.edges_up
            .entry(rel.subject().clone())
            .or_default()
            .insert(rel.object().clone(), rel.clone());
        self.edges_down
            .entry(rel.object().clone())
            .or_default()
            .insert(rel.subject().clone(), rel);
    }

    fn neighbor_terms<'a>(&'a self, index: &'a Adjacency, id: &str) -> Vec<&'a Term> {
        if !self.nodes.contains_key(id) {
            return Vec::new();
        }
        index
            .get(id)
            .into_iter()
            .flat_map(|m| m.keys())
            .filter_map(|nid| self.nodes.get(nid))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::BasicPropertyValue;

    fn class(id: &str) -> Term {
        Term::new(id.into(), RdfType::Class, id, format!("http://x/{id}"))
    }

    fn is_a() -> Term {
        Term::new("is_a".into(), RdfType::Property, "subClassOf", "http://x/is_a")
    }

    #[test]
    fn add_relationship_upserts_terms() {
        let mut graph = OboGraph::new("g", "http://x/g", Meta::default());
        graph.add_relationship(class("B"), class("A"), is_a());
        assert_eq!(graph.term_count(), 3);
        assert_eq!(graph.relationship_count(), 1);
        let rel = graph.get_relationship("B", "A").expect("edge");
        assert_eq!(rel.predicate().as_str(), "is_a");
        assert!(graph.get_relationship("A", "B").is_none());
    }

    #[test]
    fn add_relationship_with_id_reports_first_missing_role() {
        let mut graph = OboGraph::new("g", "http://x/g", Meta::default());
        graph.add_term(class("A"));
        let err = graph
            .add_relationship_with_id("X", "Y", "Z")
            .expect_err("missing object");
        assert!(matches!(err, OboGraphError::MissingNode { role: "object", .. }));
        let err = graph
            .add_relationship_with_id("A", "Y", "Z")
            .expect_err("missing subject");
        assert!(matches!(err, OboGraphError::MissingNode { role: "subject", .. }));
        let err = graph
            .add_relationship_with_id("A", "A", "Z")
            .expect_err("missing predicate");
        assert!(matches!(err, OboGraphError::MissingNode { role: "predicate", .. }));
        assert_eq!(graph.relationship_count(), 0);
        assert!(graph.children("A").is_empty());
        assert!(graph.parents("A").is_empty());
    }

    #[test]
    fn add_term_replaces_whole_term() {
        let mut graph = OboGraph::new("g", "http://x/g", Meta::default());
        graph.add_term(class("A").with_meta(Meta {
            subsets: vec!["old".into()],
            ..Meta::default()
        }));
        graph.add_term(Term::new("A".into(), RdfType::Individual, "new", "http://x/A2"));
        let term = graph.get_term("A").expect("term");
        assert_eq!(term.label(), "new");
        assert!(!term.has_meta());
        assert!(term.meta().subsets().is_empty());
        assert_eq!(graph.terms_by_type(&RdfType::Individual).len(), 1);
        assert!(graph.terms_by_type(&RdfType::Class).is_empty());
    }

    #[test]
    fn unknown_ids_have_no_neighbors() {
        let graph = OboGraph::new("g", "http://x/g", Meta::default());
        assert!(graph.children("nope").is_empty());
        assert!(graph.parents("nope").is_empty());
        assert!(graph.get_term("nope").is_none());
    }

    #[test]
    fn timestamp_from_date_property() {
        let meta = Meta {
            basic_property_values: vec![BasicPropertyValue::new(
                "http://www.geneontology.org/formats/oboInOwl#date",
                "06:21:2018 13:11",
            )],
            ..Meta::default()
        };
        let graph = OboGraph::new("g", "http://x/g", meta);
        let ts = graph.timestamp().expect("timestamp");
        assert_eq!(ts.format("%Y-%m-%d %H:%M").to_string(), "2018-06-21 13:11");

        let graph = OboGraph::new("g", "http://x/g", Meta::default());
        assert!(graph.timestamp().is_none());
    }
}
