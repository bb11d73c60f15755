//! SQLite-backed document store for OBO graphs.
//!
//! Graph metadata, terms and relationships live in three collections (JSON
//! documents with store-assigned `_key` / `_id`). Terms are scoped by the
//! document id of their graph record, so several ontologies share one term
//! collection. Every step of a sync runs in its own transaction.

mod collection;
mod record;
mod schema;
mod staging;
mod statement;

use rusqlite::{Connection, params};
use serde_json::json;

pub use collection::{CollectionKind, DocRef, EdgeDefinition};
pub use record::{
    DefinitionRecord, GraphMetadata, GraphRecord, PropertyRecord, RelationshipRecord,
    SynonymRecord, TermMetadata, TermRecord, XrefRecord, curie,
};
pub use schema::ensure_schema;

use crate::{
    cache::DocRefCache,
    config::{CollectionParams, ConnectParams},
    errors::OboGraphError,
    graph::OboGraph,
    storage::{DataSource, TermStats},
    term::NodeId,
};

use self::{record::release_time, staging::StagingCollection};

pub struct SqliteDataSource {
    conn: Connection,
    collections: CollectionParams,
}

impl SqliteDataSource {
    pub fn open(
        connect: &ConnectParams,
        collections: CollectionParams,
    ) -> Result<Self, OboGraphError> {
        connect.validate()?;
        collections.validate()?;
        let conn = if connect.is_in_memory() {
            Connection::open_in_memory()
        } else {
            Connection::open(&connect.database)
        }
        .map_err(|e| OboGraphError::storage(format!("open {}", connect.database), e))?;
        conn.busy_timeout(connect.busy_timeout())
            .map_err(|e| OboGraphError::storage("set busy timeout", e))?;
        ensure_schema(&conn, &collections)?;
        tracing::debug!(database = %connect.database, "opened document store");
        Ok(Self { conn, collections })
    }

    pub fn open_in_memory(collections: CollectionParams) -> Result<Self, OboGraphError> {
        Self::open(&ConnectParams::in_memory(), collections)
    }

    pub fn collections(&self) -> &CollectionParams {
        &self.collections
    }

    /// Stored metadata of the graph with this ontology id.
    pub fn graph_record(&self, graph_id: &str) -> Result<Option<GraphRecord>, OboGraphError> {
        Ok(self.find_graph(graph_id)?.map(|(_, record)| record))
    }

    /// Stored term of a graph, deprecated ones included.
    pub fn term_record(
        &self,
        graph_id: &str,
        term_id: &str,
    ) -> Result<Option<TermRecord>, OboGraphError> {
        let Some((graph, _)) = self.find_graph(graph_id)? else {
            return Ok(None);
        };
        Ok(self.find_term(&graph.id, term_id)?.map(|(_, record)| record))
    }

    pub fn term_count(&self, graph_id: &str) -> Result<usize, OboGraphError> {
        self.count_for_graph(graph_id, &statement::count_terms(&self.collections.term))
    }

    pub fn deprecated_term_count(&self, graph_id: &str) -> Result<usize, OboGraphError> {
        self.count_for_graph(
            graph_id,
            &statement::count_deprecated_terms(&self.collections.term),
        )
    }

    pub fn relationship_count(&self, graph_id: &str) -> Result<usize, OboGraphError> {
        self.count_for_graph(
            graph_id,
            &statement::count_relationships(
                &self.collections.relationship,
                &self.collections.term,
            ),
        )
    }

    /// Ids of the stored parents of a term, in insertion order of the edges.
    pub fn parent_ids(&self, graph_id: &str, term_id: &str) -> Result<Vec<String>, OboGraphError> {
        let Some((graph, _)) = self.find_graph(graph_id)? else {
            return Ok(Vec::new());
        };
        let Some((term, _)) = self.find_term(&graph.id, term_id)? else {
            return Ok(Vec::new());
        };
        collection::string_column(
            &self.conn,
            &statement::outbound_ids(&self.collections.relationship, &self.collections.term),
            params![term.id],
            "list parents",
        )
    }

    fn find_graph(&self, graph_id: &str) -> Result<Option<(DocRef, GraphRecord)>, OboGraphError> {
        collection::find_one(
            &self.conn,
            &statement::find_document(&self.collections.graph_info),
            params![graph_id],
            "find graph",
        )
    }

    fn find_term(
        &self,
        graph_doc_id: &str,
        term_id: &str,
    ) -> Result<Option<(DocRef, TermRecord)>, OboGraphError> {
        collection::find_one(
            &self.conn,
            &statement::find_term(&self.collections.term),
            params![graph_doc_id, term_id],
            "find term",
        )
    }

    fn count_for_graph(&self, graph_id: &str, sql: &str) -> Result<usize, OboGraphError> {
        let Some((graph, _)) = self.find_graph(graph_id)? else {
            return Ok(0);
        };
        collection::count(&self.conn, sql, params![graph.id], "count documents")
    }

    fn graph_doc(&self, graph: &OboGraph) -> Result<DocRef, OboGraphError> {
        self.find_graph(graph.id())?
            .map(|(doc, _)| doc)
            .ok_or_else(|| OboGraphError::not_found(format!("graph {}", graph.id())))
    }

    fn resolve_term(
        &self,
        cache: &DocRefCache,
        graph_doc_id: &str,
        id: &NodeId,
    ) -> Result<String, OboGraphError> {
        cache.get_or_resolve(id, || {
            self.find_term(graph_doc_id, id.as_str())?
                .map(|(doc, _)| doc.id)
                .ok_or_else(|| OboGraphError::not_found(format!("term {id}")))
        })
    }

    fn term_records(&self, graph: &OboGraph, graph_doc_id: &str) -> Vec<TermRecord> {
        graph
            .terms()
            .into_iter()
            .map(|term| TermRecord::from_term(term, graph_doc_id))
            .collect()
    }

    fn relationship_records(
        &self,
        graph: &OboGraph,
        graph_doc_id: &str,
    ) -> Result<Vec<RelationshipRecord>, OboGraphError> {
        let cache = DocRefCache::new();
        let mut records = Vec::with_capacity(graph.relationship_count());
        for rel in graph.relationships() {
            records.push(RelationshipRecord {
                from: self.resolve_term(&cache, graph_doc_id, rel.subject())?,
                to: self.resolve_term(&cache, graph_doc_id, rel.object())?,
                predicate: self.resolve_term(&cache, graph_doc_id, rel.predicate())?,
            });
        }
        tracing::debug!(resolved = cache.len(), "resolved term documents");
        Ok(records)
    }
}

impl DataSource for SqliteDataSource {
    fn exists_obo_graph(&self, graph: &OboGraph) -> bool {
        match self.find_graph(graph.id()) {
            Ok(found) => found.is_some(),
            Err(err) => {
                tracing::warn!(graph = graph.id(), error = %err, "graph existence check failed");
                false
            }
        }
    }

    fn save_obo_graph_info(&self, graph: &OboGraph) -> Result<(), OboGraphError> {
        let record = GraphRecord::from_graph(graph);
        collection::insert_document(&self.conn, &self.collections.graph_info, &record)?;
        Ok(())
    }

    fn update_obo_graph_info(&self, graph: &OboGraph) -> Result<(), OboGraphError> {
        let doc = self.graph_doc(graph)?;
        let metadata = serde_json::to_value(GraphMetadata::from(graph.meta()))
            .map_err(|e| OboGraphError::storage("update graph info", e))?;
        collection::update_document(
            &self.conn,
            &self.collections.graph_info,
            doc.key,
            &[
                ("metadata", metadata),
                ("updated_at", json!(release_time(graph))),
            ],
        )
    }

    fn save_terms(&self, graph: &OboGraph) -> Result<usize, OboGraphError> {
        let doc = self.graph_doc(graph)?;
        let records = self.term_records(graph, &doc.id);
        collection::bulk_import(&self.conn, &self.collections.term, &records)
    }

    fn save_relationships(&self, graph: &OboGraph) -> Result<usize, OboGraphError> {
        let doc = self.graph_doc(graph)?;
        let records = self.relationship_records(graph, &doc.id)?;
        collection::bulk_import_edges(&self.conn, &self.collections.relationship, &records)
    }

    fn save_or_update_terms(&self, graph: &OboGraph) -> Result<TermStats, OboGraphError> {
        let doc = self.graph_doc(graph)?;
        let staging = StagingCollection::create(&self.conn, CollectionKind::Document)?;
        let records = self.term_records(graph, &doc.id);
        collection::bulk_import(&self.conn, staging.name(), &records)?;

        let op = "reconcile terms";
        let term = &self.collections.term;
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| OboGraphError::storage(op, e))?;
        let updated = tx
            .execute(&statement::update_terms(term, staging.name()), params![doc.id])
            .map_err(|e| OboGraphError::storage("update terms", e))?;
        let deleted = tx
            .execute(&statement::deprecate_terms(term, staging.name()), params![doc.id])
            .map_err(|e| OboGraphError::storage("deprecate terms", e))?;
        let created = tx
            .execute(&statement::insert_terms(term, staging.name()), params![doc.id])
            .map_err(|e| OboGraphError::storage("insert terms", e))?;
        tx.commit().map_err(|e| OboGraphError::storage(op, e))?;
        Ok(TermStats {
            created,
            updated,
            deleted,
        })
    }

    fn save_new_relationships(&self, graph: &OboGraph) -> Result<usize, OboGraphError> {
        let doc = self.graph_doc(graph)?;
        let edge = collection::edge_definition(&self.conn, &self.collections.obo_graph)?;
        let records = self.relationship_records(graph, &doc.id)?;
        let staging = StagingCollection::create(&self.conn, CollectionKind::Edge)?;
        collection::bulk_import_edges(&self.conn, staging.name(), &records)?;
        self.conn
            .execute(
                &statement::insert_new_relationships(&edge.collection, &edge.to, staging.name()),
                params![doc.id],
            )
            .map_err(|e| OboGraphError::storage("insert new relationships", e))
    }
}
