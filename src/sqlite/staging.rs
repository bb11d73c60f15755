use rand::{Rng, distributions::Alphanumeric};
use rusqlite::Connection;

use crate::{
    errors::OboGraphError,
    sqlite::collection::{self, CollectionKind},
};

const NAME_LEN: usize = 10;

/// Temporary collection that lives for one reconciliation and is dropped with
/// the guard. A failed drop is logged and otherwise ignored.
pub struct StagingCollection<'c> {
    conn: &'c Connection,
    name: String,
}

impl<'c> StagingCollection<'c> {
    pub fn create(conn: &'c Connection, kind: CollectionKind) -> Result<Self, OboGraphError> {
        let mut name = random_name();
        while collection::collection_exists(conn, &name)? {
            name = random_name();
        }
        collection::create_collection(conn, &name, kind)?;
        tracing::debug!(collection = %name, "created staging collection");
        Ok(Self { conn, name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for StagingCollection<'_> {
    fn drop(&mut self) {
        match collection::remove_collection(self.conn, &self.name) {
            Ok(()) => tracing::debug!(collection = %self.name, "dropped staging collection"),
            Err(err) => {
                tracing::warn!(collection = %self.name, error = %err, "failed to drop staging collection")
            }
        }
    }
}

fn random_name() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .map(char::from)
        .filter(char::is_ascii_alphabetic)
        .take(NAME_LEN)
        .collect();
    format!("temp_{suffix}")
}
