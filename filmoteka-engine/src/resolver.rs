//! Cast name resolution: find-or-create actors by normalized name.

use filmoteka_catalog::normalize;
use filmoteka_catalog::store::{ActorStore, StoreError};
use filmoteka_catalog::types::Actor;

/// Resolve raw cast names to actor records, creating missing ones.
///
/// Lookup is by folded name, so "Іван Миколайчук" and "іван миколайчук"
/// resolve to the same record; a newly created actor keeps the cleaned
/// (not folded) spelling. The output preserves first-appearance order
/// and holds each actor once even when the input repeats a name. Blank
/// names are skipped.
pub fn resolve_actors<S: ActorStore>(
    store: &S,
    names: &[String],
) -> Result<Vec<Actor>, StoreError> {
    let mut resolved: Vec<Actor> = Vec::with_capacity(names.len());
    for raw in names {
        let name = normalize::clean(raw);
        if name.is_empty() {
            continue;
        }
        let folded = normalize::fold(&name);
        let actor = match store.actor_by_folded_name(&folded)? {
            Some(existing) => existing,
            None => store.create_actor(&name)?,
        };
        if !resolved.iter().any(|a| a.id == actor.id) {
            resolved.push(actor);
        }
    }
    Ok(resolved)
}
