//! Lookup table of raw keys that already have a remote record.
//!
//! Built once per run from query result rows and shared read-only
//! across all drafts. Useful even when empty at run start: it lets an
//! interrupted upload resume, or an enrichment pass find its targets.
//! Matches from this table take precedence over any hardcoded matching
//! files upstream.

use itemforge_domain::traits::ExistingLookup;
use itemforge_domain::{EntityId, PropertyId};
use std::collections::HashMap;
use tracing::{info, warn};

/// Strip the URI component off a query result, keeping the last path
/// segment: `http://…/entity/Q42` becomes `Q42`. Plain codes pass
/// through unchanged.
pub fn sanitize_entity_uri(value: &str) -> &str {
    value.rsplit('/').next().unwrap_or(value)
}

/// The SELECT that seeds the table for one unique-id property.
/// Executing it is the caller's concern.
pub fn items_query(prop: &PropertyId) -> String {
    format!(
        "SELECT DISTINCT ?item ?value WHERE {{?item p:{prop} ?statement. \
         OPTIONAL {{ ?item wdt:{prop} ?value. }}}}"
    )
}

/// Raw-key -> remote-id table of already-uploaded rows.
#[derive(Debug, Clone, Default)]
pub struct ExistingItems(HashMap<String, EntityId>);

impl ExistingItems {
    /// Build the table from `(entity_uri, raw_key)` result rows.
    ///
    /// Entity URIs are sanitized first; rows whose sanitized entity is
    /// not a well-formed identifier are skipped with a warning rather
    /// than poisoning the table.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut table = HashMap::new();
        for (entity, raw_key) in rows {
            let code = sanitize_entity_uri(&entity);
            match EntityId::new(code) {
                Ok(id) => {
                    table.insert(raw_key, id);
                }
                Err(_) => {
                    warn!(entity = %entity, "skipping row with malformed entity id");
                }
            }
        }
        info!(entries = table.len(), "indexed existing records");
        Self(table)
    }

    /// Number of indexed raw keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether anything is indexed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl ExistingLookup for ExistingItems {
    fn existing_id_for(&self, raw_key: &str) -> Option<EntityId> {
        self.0.get(raw_key).cloned()
    }
}
