//! Synchronizes an OBO graph into a [`DataSource`]: a graph seen for the
//! first time is bulk loaded, a known graph is reconciled against what the
//! store already holds.

use std::io::Read;

use serde::Serialize;

use crate::{
    errors::OboGraphError,
    graph::OboGraph,
    reader::build_graph,
    storage::{DataSource, TermStats},
};

/// Summary of one sync call.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UploadInformation {
    /// True when the graph was not stored before this call.
    pub is_created: bool,
    /// Relationships written by this call.
    pub relationship_stats: usize,
    pub term_stats: TermStats,
}

pub fn load_from_reader<R, D>(reader: R, source: &D) -> Result<UploadInformation, OboGraphError>
where
    R: Read,
    D: DataSource + ?Sized,
{
    let graph = build_graph(reader)?;
    load_graph(&graph, source)
}

pub fn load_graph<D>(graph: &OboGraph, source: &D) -> Result<UploadInformation, OboGraphError>
where
    D: DataSource + ?Sized,
{
    if source.exists_obo_graph(graph) {
        persist_existing(graph, source)
    } else {
        persist_new(graph, source)
    }
}

fn persist_new<D>(graph: &OboGraph, source: &D) -> Result<UploadInformation, OboGraphError>
where
    D: DataSource + ?Sized,
{
    source.save_obo_graph_info(graph)?;
    let created = source.save_terms(graph)?;
    tracing::info!(graph = graph.id(), created, "saved terms");
    let relationships = source.save_relationships(graph)?;
    tracing::info!(graph = graph.id(), relationships, "saved relationships");
    Ok(UploadInformation {
        is_created: true,
        relationship_stats: relationships,
        term_stats: TermStats {
            created,
            ..TermStats::default()
        },
    })
}

fn persist_existing<D>(graph: &OboGraph, source: &D) -> Result<UploadInformation, OboGraphError>
where
    D: DataSource + ?Sized,
{
    source.update_obo_graph_info(graph)?;
    let stats = source.save_or_update_terms(graph)?;
    tracing::info!(
        graph = graph.id(),
        created = stats.created,
        updated = stats.updated,
        deleted = stats.deleted,
        "reconciled terms"
    );
    let relationships = source.save_new_relationships(graph)?;
    tracing::info!(graph = graph.id(), relationships, "saved new relationships");
    Ok(UploadInformation {
        is_created: false,
        relationship_stats: relationships,
        term_stats: stats,
    })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    /// Records the calls it receives; `fail` names a step that errors.
    #[derive(Default)]
    struct Recorder {
        exists: bool,
        fail: Option<&'static str>,
        calls: RefCell<Vec<&'static str>>,
    }

    impl Recorder {
        fn step(&self, name: &'static str) -> Result<(), OboGraphError> {
            self.calls.borrow_mut().push(name);
            if self.fail == Some(name) {
                return Err(OboGraphError::storage(name, "boom"));
            }
            Ok(())
        }
    }

    impl DataSource for Recorder {
        fn exists_obo_graph(&self, _: &OboGraph) -> bool {
            self.exists
        }

        fn save_obo_graph_info(&self, _: &OboGraph) -> Result<(), OboGraphError> {
            self.step("save_obo_graph_info")
        }

        fn update_obo_graph_info(&self, _: &OboGraph) -> Result<(), OboGraphError> {
            self.step("update_obo_graph_info")
        }

        fn save_terms(&self, graph: &OboGraph) -> Result<usize, OboGraphError> {
            self.step("save_terms").map(|_| graph.term_count())
        }

        fn save_relationships(&self, graph: &OboGraph) -> Result<usize, OboGraphError> {
            self.step("save_relationships")
                .map(|_| graph.relationship_count())
        }

        fn save_or_update_terms(&self, graph: &OboGraph) -> Result<TermStats, OboGraphError> {
            self.step("save_or_update_terms").map(|_| TermStats {
                updated: graph.term_count(),
                ..TermStats::default()
            })
        }

        fn save_new_relationships(&self, _: &OboGraph) -> Result<usize, OboGraphError> {
            self.step("save_new_relationships").map(|_| 0)
        }
    }

    const DOC: &str = r#"{"graphs":[{"id":"http://x/t.owl","nodes":[
        {"id":"http://x/A","lbl":"a","type":"CLASS"},
        {"id":"http://x/B","lbl":"b","type":"CLASS"}],
        "edges":[{"sub":"http://x/B","pred":"is_a","obj":"http://x/A"}]}]}"#;

    #[test]
    fn new_graph_takes_bulk_path() {
        let store = Recorder::default();
        let info = load_from_reader(DOC.as_bytes(), &store).unwrap();
        assert!(info.is_created);
        assert_eq!(info.term_stats.created, 7);
        assert_eq!(info.relationship_stats, 1);
        assert_eq!(
            *store.calls.borrow(),
            vec!["save_obo_graph_info", "save_terms", "save_relationships"]
        );
    }

    #[test]
    fn existing_graph_takes_reconcile_path() {
        let store = Recorder {
            exists: true,
            ..Recorder::default()
        };
        let info = load_from_reader(DOC.as_bytes(), &store).unwrap();
        assert!(!info.is_created);
        assert_eq!(info.term_stats.updated, 7);
        assert_eq!(
            *store.calls.borrow(),
            vec![
                "update_obo_graph_info",
                "save_or_update_terms",
                "save_new_relationships"
            ]
        );
    }

    #[test]
    fn failure_stops_remaining_steps() {
        let store = Recorder {
            fail: Some("save_terms"),
            ..Recorder::default()
        };
        let err = load_from_reader(DOC.as_bytes(), &store).unwrap_err();
        assert!(err.to_string().contains("save_terms"));
        assert_eq!(
            *store.calls.borrow(),
            vec!["save_obo_graph_info", "save_terms"]
        );
    }

    #[test]
    fn decode_failure_touches_no_store() {
        let store = Recorder::default();
        let err = load_from_reader("{".as_bytes(), &store).unwrap_err();
        assert!(err.is_decode_failure());
        assert!(store.calls.borrow().is_empty());
    }
}
