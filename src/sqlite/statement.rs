//! SQL text for the document store. Collection names are validated
//! identifiers and are always double quoted. `?1` is the document id of the
//! graph record that scopes terms.

pub(crate) const GRAPH_REGISTRY: &str = r#"
    CREATE TABLE IF NOT EXISTS _graphs (
        name            TEXT PRIMARY KEY,
        edge_collection TEXT NOT NULL,
        from_collection TEXT NOT NULL,
        to_collection   TEXT NOT NULL
    );
"#;

pub(crate) const COLLECTION_EXISTS: &str =
    "SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1";

pub(crate) const GRAPH_EXISTS: &str = "SELECT 1 FROM _graphs WHERE name=?1";

pub(crate) const CREATE_GRAPH: &str =
    "INSERT INTO _graphs(name, edge_collection, from_collection, to_collection) VALUES(?1, ?2, ?3, ?4)";

pub(crate) const GRAPH_EDGE_DEFINITION: &str =
    "SELECT edge_collection, from_collection, to_collection FROM _graphs WHERE name=?1";

fn assign_id_trigger(name: &str) -> String {
    format!(
        r#"
        CREATE TRIGGER IF NOT EXISTS "{name}_assign_id" AFTER INSERT ON "{name}"
        WHEN NEW._id IS NULL
        BEGIN
            UPDATE "{name}" SET _id = '{name}/' || NEW._key WHERE _key = NEW._key;
        END;
        "#
    )
}

pub(crate) fn create_document_collection(name: &str) -> String {
    format!(
        r#"
        CREATE TABLE IF NOT EXISTS "{name}" (
            _key INTEGER PRIMARY KEY AUTOINCREMENT,
            _id  TEXT UNIQUE,
            doc  TEXT NOT NULL
        );
        {trigger}
        CREATE INDEX IF NOT EXISTS "{name}_doc_id_idx" ON "{name}"(json_extract(doc, '$.id'));
        "#,
        trigger = assign_id_trigger(name)
    )
}

pub(crate) fn create_edge_collection(name: &str) -> String {
    format!(
        r#"
        CREATE TABLE IF NOT EXISTS "{name}" (
            _key  INTEGER PRIMARY KEY AUTOINCREMENT,
            _id   TEXT UNIQUE,
            _from TEXT NOT NULL,
            _to   TEXT NOT NULL,
            doc   TEXT NOT NULL
        );
        {trigger}
        CREATE INDEX IF NOT EXISTS "{name}_from_idx" ON "{name}"(_from);
        CREATE INDEX IF NOT EXISTS "{name}_to_idx" ON "{name}"(_to);
        "#,
        trigger = assign_id_trigger(name)
    )
}

pub(crate) fn term_indexes(term: &str) -> String {
    format!(
        r#"
        CREATE INDEX IF NOT EXISTS "{term}_label_idx" ON "{term}"(json_extract(doc, '$.label'));
        CREATE INDEX IF NOT EXISTS "{term}_graph_idx"
            ON "{term}"(json_extract(doc, '$.graph_id'), json_extract(doc, '$.id'));
        "#
    )
}

pub(crate) fn drop_collection(name: &str) -> String {
    format!(r#"DROP TABLE IF EXISTS "{name}""#)
}

pub(crate) fn insert_document(collection: &str) -> String {
    format!(r#"INSERT INTO "{collection}"(doc) VALUES(?1)"#)
}

pub(crate) fn insert_edge(collection: &str) -> String {
    format!(r#"INSERT INTO "{collection}"(_from, _to, doc) VALUES(?1, ?2, ?3)"#)
}

pub(crate) fn find_document(collection: &str) -> String {
    format!(
        r#"SELECT _id, _key, doc FROM "{collection}" WHERE json_extract(doc, '$.id') = ?1 LIMIT 1"#
    )
}

pub(crate) fn find_term(term: &str) -> String {
    format!(
        r#"
        SELECT _id, _key, doc FROM "{term}"
        WHERE json_extract(doc, '$.graph_id') = ?1 AND json_extract(doc, '$.id') = ?2
        LIMIT 1
        "#
    )
}

pub(crate) fn count_terms(term: &str) -> String {
    format!(r#"SELECT COUNT(*) FROM "{term}" WHERE json_extract(doc, '$.graph_id') = ?1"#)
}

pub(crate) fn count_deprecated_terms(term: &str) -> String {
    format!(
        r#"
        SELECT COUNT(*) FROM "{term}"
        WHERE json_extract(doc, '$.graph_id') = ?1 AND json_extract(doc, '$.deprecated') = 1
        "#
    )
}

pub(crate) fn count_relationships(relationship: &str, term: &str) -> String {
    format!(
        r#"
        SELECT COUNT(*) FROM "{relationship}" AS r
        JOIN "{term}" AS t ON t._id = r._from
        WHERE json_extract(t.doc, '$.graph_id') = ?1
        "#
    )
}

/// Outbound one-hop neighbor ids of a term document through an edge collection.
pub(crate) fn outbound_ids(relationship: &str, term: &str) -> String {
    format!(
        r#"
        SELECT json_extract(n.doc, '$.id') FROM "{relationship}" AS e
        JOIN "{term}" AS n ON n._id = e._to
        WHERE e._from = ?1
        ORDER BY e._key
        "#
    )
}

/// latest ∩ existing: refresh label, deprecation flag and metadata in place.
pub(crate) fn update_terms(term: &str, staging: &str) -> String {
    format!(
        r#"
        UPDATE "{term}" SET doc = json_set(
            "{term}".doc,
            '$.label', json(coalesce(s.doc -> '$.label', '""')),
            '$.deprecated', json(s.doc -> '$.deprecated'),
            '$.metadata', json(s.doc -> '$.metadata')
        )
        FROM "{staging}" AS s
        WHERE json_extract("{term}".doc, '$.graph_id') = ?1
          AND json_extract(s.doc, '$.graph_id') = ?1
          AND json_extract(s.doc, '$.id') = json_extract("{term}".doc, '$.id')
        "#
    )
}

/// existing − latest: soft delete. Terms deprecated earlier are left alone.
pub(crate) fn deprecate_terms(term: &str, staging: &str) -> String {
    format!(
        r#"
        UPDATE "{term}" SET doc = json_set(doc, '$.deprecated', json('true'))
        WHERE json_extract(doc, '$.graph_id') = ?1
          AND json_extract(doc, '$.deprecated') IS NOT 1
          AND json_extract(doc, '$.id') NOT IN (
              SELECT json_extract(s.doc, '$.id') FROM "{staging}" AS s
              WHERE json_extract(s.doc, '$.graph_id') = ?1
          )
        "#
    )
}

/// latest − existing: copy staged documents into the permanent collection.
pub(crate) fn insert_terms(term: &str, staging: &str) -> String {
    format!(
        r#"
        INSERT INTO "{term}"(doc)
        SELECT s.doc FROM "{staging}" AS s
        WHERE json_extract(s.doc, '$.graph_id') = ?1
          AND json_extract(s.doc, '$.id') NOT IN (
              SELECT json_extract(e.doc, '$.id') FROM "{term}" AS e
              WHERE json_extract(e.doc, '$.graph_id') = ?1
          )
        ORDER BY s._key
        "#
    )
}

/// For every term of the graph, copy staged edges whose target id is not yet
/// an outbound neighbor through the named graph's edge collection.
pub(crate) fn insert_new_relationships(relationship: &str, term: &str, staging: &str) -> String {
    format!(
        r#"
        INSERT INTO "{relationship}"(_from, _to, doc)
        SELECT z._from, z._to, z.doc
        FROM "{staging}" AS z
        JOIN "{term}" AS src ON src._id = z._from
        JOIN "{term}" AS dst ON dst._id = z._to
        WHERE json_extract(src.doc, '$.graph_id') = ?1
          AND json_extract(dst.doc, '$.id') NOT IN (
              SELECT json_extract(n.doc, '$.id') FROM "{relationship}" AS e
              JOIN "{term}" AS n ON n._id = e._to
              WHERE e._from = z._from
          )
        ORDER BY z._key
        "#
    )
}
