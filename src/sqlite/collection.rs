//! Document-store primitives on top of SQLite: collections are tables holding
//! a JSON `doc` column plus store-assigned `_key` / `_id`; edge collections add
//! `_from` / `_to`. A named graph records which edge collection links which
//! vertex collections.

use rusqlite::{Connection, OptionalExtension, params, params_from_iter, types::Value as SqlValue};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{errors::OboGraphError, sqlite::record::RelationshipRecord, sqlite::statement};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectionKind {
    Document,
    Edge,
}

/// Store-assigned references of a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocRef {
    pub id: String,
    pub key: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeDefinition {
    pub collection: String,
    pub from: String,
    pub to: String,
}

pub fn collection_exists(conn: &Connection, name: &str) -> Result<bool, OboGraphError> {
    let found: Option<i64> = conn
        .query_row(statement::COLLECTION_EXISTS, params![name], |row| row.get(0))
        .optional()
        .map_err(|e| OboGraphError::storage(format!("check collection {name}"), e))?;
    Ok(found.is_some())
}

pub fn create_collection(
    conn: &Connection,
    name: &str,
    kind: CollectionKind,
) -> Result<(), OboGraphError> {
    let sql = match kind {
        CollectionKind::Document => statement::create_document_collection(name),
        CollectionKind::Edge => statement::create_edge_collection(name),
    };
    conn.execute_batch(&sql)
        .map_err(|e| OboGraphError::storage(format!("create collection {name}"), e))
}

pub fn remove_collection(conn: &Connection, name: &str) -> Result<(), OboGraphError> {
    conn.execute_batch(&statement::drop_collection(name))
        .map_err(|e| OboGraphError::storage(format!("remove collection {name}"), e))
}

pub fn graph_exists(conn: &Connection, name: &str) -> Result<bool, OboGraphError> {
    let found: Option<i64> = conn
        .query_row(statement::GRAPH_EXISTS, params![name], |row| row.get(0))
        .optional()
        .map_err(|e| OboGraphError::storage(format!("check graph {name}"), e))?;
    Ok(found.is_some())
}

pub fn create_named_graph(
    conn: &Connection,
    name: &str,
    edge: &EdgeDefinition,
) -> Result<(), OboGraphError> {
    conn.execute(
        statement::CREATE_GRAPH,
        params![name, edge.collection, edge.from, edge.to],
    )
    .map_err(|e| OboGraphError::storage(format!("create graph {name}"), e))?;
    Ok(())
}

pub fn edge_definition(conn: &Connection, name: &str) -> Result<EdgeDefinition, OboGraphError> {
    conn.query_row(statement::GRAPH_EDGE_DEFINITION, params![name], |row| {
        Ok(EdgeDefinition {
            collection: row.get(0)?,
            from: row.get(1)?,
            to: row.get(2)?,
        })
    })
    .optional()
    .map_err(|e| OboGraphError::storage(format!("read graph {name}"), e))?
    .ok_or_else(|| OboGraphError::not_found(format!("named graph {name}")))
}

pub fn insert_document<T: Serialize>(
    conn: &Connection,
    collection: &str,
    doc: &T,
) -> Result<DocRef, OboGraphError> {
    let op = format!("insert into {collection}");
    let body = serde_json::to_string(doc).map_err(|e| OboGraphError::storage(&op, e))?;
    conn.execute(&statement::insert_document(collection), params![body])
        .map_err(|e| OboGraphError::storage(&op, e))?;
    let key = conn.last_insert_rowid();
    Ok(DocRef {
        id: format!("{collection}/{key}"),
        key,
    })
}

/// Imports all documents in one transaction and returns the number created.
pub fn bulk_import<T: Serialize>(
    conn: &Connection,
    collection: &str,
    docs: &[T],
) -> Result<usize, OboGraphError> {
    let op = format!("bulk import into {collection}");
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| OboGraphError::storage(&op, e))?;
    let mut created = 0;
    {
        let mut stmt = tx
            .prepare(&statement::insert_document(collection))
            .map_err(|e| OboGraphError::storage(&op, e))?;
        for doc in docs {
            let body = serde_json::to_string(doc).map_err(|e| OboGraphError::storage(&op, e))?;
            created += stmt
                .execute(params![body])
                .map_err(|e| OboGraphError::storage(&op, e))?;
        }
    }
    tx.commit().map_err(|e| OboGraphError::storage(&op, e))?;
    Ok(created)
}

pub fn bulk_import_edges(
    conn: &Connection,
    collection: &str,
    edges: &[RelationshipRecord],
) -> Result<usize, OboGraphError> {
    let op = format!("bulk import into {collection}");
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| OboGraphError::storage(&op, e))?;
    let mut created = 0;
    {
        let mut stmt = tx
            .prepare(&statement::insert_edge(collection))
            .map_err(|e| OboGraphError::storage(&op, e))?;
        for edge in edges {
            let body = serde_json::to_string(edge).map_err(|e| OboGraphError::storage(&op, e))?;
            created += stmt
                .execute(params![edge.from, edge.to, body])
                .map_err(|e| OboGraphError::storage(&op, e))?;
        }
    }
    tx.commit().map_err(|e| OboGraphError::storage(&op, e))?;
    Ok(created)
}

/// Sets top-level fields of a stored document in place; other fields are kept.
pub fn update_document(
    conn: &Connection,
    collection: &str,
    key: i64,
    fields: &[(&str, Value)],
) -> Result<(), OboGraphError> {
    let op = format!("update {collection}/{key}");
    if fields.is_empty() {
        return Ok(());
    }
    let mut args = Vec::with_capacity(fields.len() * 2 + 1);
    let mut setters = Vec::with_capacity(fields.len());
    for (idx, (field, value)) in fields.iter().enumerate() {
        setters.push(format!("?{}, json(?{})", idx * 2 + 1, idx * 2 + 2));
        args.push(SqlValue::Text(format!("$.{field}")));
        args.push(SqlValue::Text(value.to_string()));
    }
    args.push(SqlValue::Integer(key));
    let sql = format!(
        r#"UPDATE "{collection}" SET doc = json_set(doc, {}) WHERE _key = ?{}"#,
        setters.join(", "),
        args.len()
    );
    let affected = conn
        .execute(&sql, params_from_iter(args.iter()))
        .map_err(|e| OboGraphError::storage(&op, e))?;
    if affected == 0 {
        return Err(OboGraphError::not_found(format!("document {collection}/{key}")));
    }
    Ok(())
}

/// Point lookup returning the references and decoded body of one document.
pub fn find_one<T: DeserializeOwned>(
    conn: &Connection,
    sql: &str,
    args: impl rusqlite::Params,
    operation: &str,
) -> Result<Option<(DocRef, T)>, OboGraphError> {
    let row = conn
        .query_row(sql, args, |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?, row.get::<_, String>(2)?))
        })
        .optional()
        .map_err(|e| OboGraphError::storage(operation, e))?;
    match row {
        Some((id, key, body)) => {
            let doc = serde_json::from_str(&body).map_err(|e| OboGraphError::storage(operation, e))?;
            Ok(Some((DocRef { id, key }, doc)))
        }
        None => Ok(None),
    }
}

pub fn count(
    conn: &Connection,
    sql: &str,
    args: impl rusqlite::Params,
    operation: &str,
) -> Result<usize, OboGraphError> {
    let total: i64 = conn
        .query_row(sql, args, |row| row.get(0))
        .map_err(|e| OboGraphError::storage(operation, e))?;
    Ok(total as usize)
}

pub fn string_column(
    conn: &Connection,
    sql: &str,
    args: impl rusqlite::Params,
    operation: &str,
) -> Result<Vec<String>, OboGraphError> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| OboGraphError::storage(operation, e))?;
    let rows = stmt
        .query_map(args, |row| row.get(0))
        .map_err(|e| OboGraphError::storage(operation, e))?;
    let mut values = Vec::new();
    for value in rows {
        values.push(value.map_err(|e| OboGraphError::storage(operation, e))?);
    }
    Ok(values)
}
