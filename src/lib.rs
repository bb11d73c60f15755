//! OBO graph (OBOGraphs JSON) reading, in-memory traversal and
//! synchronization into a SQLite-backed document store.
//! Run Criterion benchmarks with `cargo bench` to inspect reports under `target/criterion`.

pub mod bfs;
pub mod cache;
pub mod config;
pub mod errors;
pub mod graph;
pub mod id;
pub mod load;
pub mod logging;
pub mod meta;
pub mod obojson;
pub mod reader;
pub mod sqlite;
pub mod storage;
pub mod term;

pub use crate::config::{CollectionParams, ConnectParams};
pub use crate::errors::OboGraphError;
pub use crate::graph::OboGraph;
pub use crate::id::extract_id;
pub use crate::load::{UploadInformation, load_from_reader, load_graph};
pub use crate::meta::{BasicPropertyValue, Definition, Meta, Synonym, SynonymScope, Xref};
pub use crate::reader::{build_graph, build_graph_from_path};
pub use crate::sqlite::SqliteDataSource;
pub use crate::storage::{DataSource, TermStats};
pub use crate::term::{NodeId, RdfType, Relationship, Term};
