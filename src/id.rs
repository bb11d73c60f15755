/// Extracts the short identifier from an IRI: the last path segment, and within
/// it the part after the last `#` when present.
pub fn extract_id(iri: &str) -> &str {
    let last = iri.rsplit('/').next().unwrap_or(iri);
    match last.rsplit_once('#') {
        Some((_, fragment)) => fragment,
        None => last,
    }
}
