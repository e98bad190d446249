use uuid::Uuid;

/// Derive the short registration folio for a participant/target pair: the
/// last five hex characters of each id, participant first.
///
/// Folios are intentionally short and human-readable; they are NOT unique by
/// construction. Lookups scoped to a single event or workshop make collisions
/// unlikely in practice, and a collision resolves to the first match.
pub fn derive(participant_id: Uuid, target_id: Uuid) -> String {
    let p = participant_id.simple().to_string();
    let t = target_id.simple().to_string();
    format!("{}{}", &p[p.len() - 5..], &t[t.len() - 5..])
}
