//! Builds an [`OboGraph`] from an OBO graph JSON document.

use std::{fs::File, io::BufReader, io::Read, path::Path};

use crate::{
    errors::OboGraphError,
    graph::OboGraph,
    id::extract_id,
    meta::{BasicPropertyValue, Definition, Meta, Synonym, Xref},
    obojson::{JsonGraph, JsonMeta, JsonNode, OboJson},
    term::{NodeId, RdfType, Term},
};

/// Well-known OWL/RDFS properties seeded before the document's own nodes so
/// that edges using them always resolve.
const BUILTIN_PROPERTIES: [(&str, &str, &str); 5] = [
    (
        "is_a",
        "subClassOf",
        "http://www.w3.org/2000/01/rdf-schema#subClassOf",
    ),
    (
        "subPropertyOf",
        "subPropertyOf",
        "http://www.w3.org/2000/01/rdf-schema#subPropertyOf",
    ),
    (
        "inverseOf",
        "inverseOf",
        "http://www.w3.org/2002/07/owl#inverseOf",
    ),
    (
        "type",
        "type",
        "https://www.w3.org/1999/02/22-rdf-syntax-ns#type",
    ),
    (
        "topObjectProperty",
        "topObjectProperty",
        "http://www.w3.org/2002/07/owl#topObjectProperty",
    ),
];

pub fn build_graph<R: Read>(reader: R) -> Result<OboGraph, OboGraphError> {
    let doc: OboJson = serde_json::from_reader(reader)?;
    let json = doc
        .graphs
        .into_iter()
        .next()
        .ok_or(OboGraphError::EmptyGraph)?;
    graph_from_json(json)
}

pub fn build_graph_from_path<P: AsRef<Path>>(path: P) -> Result<OboGraph, OboGraphError> {
    let file = File::open(path)?;
    build_graph(BufReader::new(file))
}

fn graph_from_json(json: JsonGraph) -> Result<OboGraph, OboGraphError> {
    let meta = json.meta.as_ref().map(graph_meta).unwrap_or_default();
    let mut graph = OboGraph::new(extract_id(&json.id), json.id.as_str(), meta)
        .with_label(json.lbl.unwrap_or_default());
    for (id, label, iri) in BUILTIN_PROPERTIES {
        graph.add_term(Term::new(NodeId::from(id), RdfType::Property, label, iri));
    }
    for node in &json.nodes {
        graph.add_term(term_from_json(node));
    }
    for edge in &json.edges {
        graph
            .add_relationship_with_id(
                extract_id(&edge.obj),
                extract_id(&edge.sub),
                extract_id(&edge.pred),
            )
            .map_err(|err| match err {
                OboGraphError::MissingNode { role, id } => OboGraphError::dangling(format!(
                    "{role} {id} in edge {} {} {}",
                    edge.sub, edge.pred, edge.obj
                )),
                other => other,
            })?;
    }
    Ok(graph)
}

fn term_from_json(node: &JsonNode) -> Term {
    let term = Term::new(
        NodeId::from(extract_id(&node.id)),
        RdfType::parse(&node.json_type),
        node.lbl.as_str(),
        node.id.as_str(),
    );
    match &node.meta {
        Some(meta) => term.with_meta(term_meta(meta)),
        None => term,
    }
}

fn graph_meta(json: &JsonMeta) -> Meta {
    Meta {
        version: json.version.clone(),
        ..base_meta(json)
    }
}

fn term_meta(json: &JsonMeta) -> Meta {
    Meta {
        synonyms: json
            .synonyms
            .iter()
            .map(|s| Synonym::with_xrefs(s.pred.as_str(), s.val.as_str(), s.xrefs.clone()))
            .collect(),
        definition: json
            .definition
            .as_ref()
            .map(|d| Definition::new(d.val.as_str(), d.xrefs.clone())),
        comments: json.comments.clone(),
        ..base_meta(json)
    }
}

fn base_meta(json: &JsonMeta) -> Meta {
    Meta {
        basic_property_values: json
            .basic_property_values
            .iter()
            .map(|p| BasicPropertyValue::new(p.pred.as_str(), p.val.as_str()))
            .collect(),
        subsets: json.subsets.clone(),
        xrefs: json.xrefs.iter().map(|x| Xref::new(x.val.as_str())).collect(),
        deprecated: json.deprecated,
        ..Meta::default()
    }
}
