//! Storage trait bridging the in-memory [`OboGraph`] with a persistent store.
//! The synchronization engine in [`crate::load`] drives a store only through
//! this trait; [`crate::sqlite::SqliteDataSource`] is the shipped
//! implementation.

use serde::{Deserialize, Serialize};

use crate::{errors::OboGraphError, graph::OboGraph};

/// Outcome of a term reconciliation. `deleted` counts soft deletions: terms
/// flagged deprecated because they are absent from the latest graph.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermStats {
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
}

pub trait DataSource {
    /// Whether graph metadata with this graph's id is already stored. Store
    /// failures resolve to `false`.
    fn exists_obo_graph(&self, graph: &OboGraph) -> bool;
    fn save_obo_graph_info(&self, graph: &OboGraph) -> Result<(), OboGraphError>;
    fn update_obo_graph_info(&self, graph: &OboGraph) -> Result<(), OboGraphError>;
    fn save_terms(&self, graph: &OboGraph) -> Result<usize, OboGraphError>;
    fn save_relationships(&self, graph: &OboGraph) -> Result<usize, OboGraphError>;
    fn save_or_update_terms(&self, graph: &OboGraph) -> Result<TermStats, OboGraphError>;
    /// Inserts only relationships whose endpoints are not linked yet.
    fn save_new_relationships(&self, graph: &OboGraph) -> Result<usize, OboGraphError>;
}

impl<'a, D> DataSource for &'a D
where
    D: DataSource + ?Sized,
{
    fn exists_obo_graph(&self, graph: &OboGraph) -> bool {
        (*self).exists_obo_graph(graph)
    }

    fn save_obo_graph_info(&self, graph: &OboGraph) -> Result<(), OboGraphError> {
        (*self).save_obo_graph_info(graph)
    }

    fn update_obo_graph_info(&self, graph: &OboGraph) -> Result<(), OboGraphError> {
        (*self).update_obo_graph_info(graph)
    }

    fn save_terms(&self, graph: &OboGraph) -> Result<usize, OboGraphError> {
        (*self).save_terms(graph)
    }

    fn save_relationships(&self, graph: &OboGraph) -> Result<usize, OboGraphError> {
        (*self).save_relationships(graph)
    }

    fn save_or_update_terms(&self, graph: &OboGraph) -> Result<TermStats, OboGraphError> {
        (*self).save_or_update_terms(graph)
    }

    fn save_new_relationships(&self, graph: &OboGraph) -> Result<usize, OboGraphError> {
        (*self).save_new_relationships(graph)
    }
}
