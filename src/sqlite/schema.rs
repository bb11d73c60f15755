use rusqlite::Connection;

use crate::{
    config::CollectionParams,
    errors::OboGraphError,
    sqlite::collection::{self, CollectionKind, EdgeDefinition},
    sqlite::statement,
};

/// Creates the collections, named graph and indexes when missing. Safe to
/// call on every open.
pub fn ensure_schema(conn: &Connection, collections: &CollectionParams) -> Result<(), OboGraphError> {
    conn.execute_batch(statement::GRAPH_REGISTRY)
        .map_err(|e| OboGraphError::storage("create graph registry", e))?;
    let wanted = [
        (&collections.graph_info, CollectionKind::Document),
        (&collections.term, CollectionKind::Document),
        (&collections.relationship, CollectionKind::Edge),
    ];
    for (name, kind) in wanted {
        if !collection::collection_exists(conn, name)? {
            collection::create_collection(conn, name, kind)?;
        }
    }
    conn.execute_batch(&statement::term_indexes(&collections.term))
        .map_err(|e| OboGraphError::storage("create term indexes", e))?;
    let wanted = EdgeDefinition {
        collection: collections.relationship.clone(),
        from: collections.term.clone(),
        to: collections.term.clone(),
    };
    if !collection::graph_exists(conn, &collections.obo_graph)? {
        return collection::create_named_graph(conn, &collections.obo_graph, &wanted);
    }
    let stored = collection::edge_definition(conn, &collections.obo_graph)?;
    if stored != wanted {
        return Err(OboGraphError::invalid_input(format!(
            "graph {} links {} through {}, not {} through {}",
            collections.obo_graph, stored.from, stored.collection, wanted.from, wanted.collection
        )));
    }
    Ok(())
}
