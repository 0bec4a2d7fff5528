use std::collections::BTreeMap;

use rusqlite::{Connection, params};

use super::{Preferences, StoreError};

/// A single row-level mutation derived from two map states.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum Change<'a> {
    Upsert { key: &'a str, value: &'a str },
    Remove { key: &'a str },
}

pub(super) fn apply_pragmas(connection: &Connection) -> Result<(), StoreError> {
    connection.execute_batch(
        "PRAGMA journal_mode=WAL;
         PRAGMA synchronous = NORMAL;
         PRAGMA busy_timeout=5000;
         PRAGMA temp_store=MEMORY;",
    )?;
    Ok(())
}

pub(super) fn apply_schema(connection: &Connection) -> Result<(), StoreError> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS preferences (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );",
    )?;
    Ok(())
}

pub(super) fn load_all(connection: &Connection) -> Result<Preferences, StoreError> {
    let mut stmt = connection.prepare("SELECT key, value FROM preferences")?;
    let rows = stmt
        .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
        .collect::<Result<BTreeMap<_, _>, _>>()?;
    Ok(rows)
}

/// Compute the row mutations that turn `before` into `after`.
pub(super) fn diff<'a>(before: &'a Preferences, after: &'a Preferences) -> Vec<Change<'a>> {
    let removed = before
        .keys()
        .filter(|key| !after.contains_key(*key))
        .map(|key| Change::Remove { key });
    let upserted = after
        .iter()
        .filter(|(key, value)| before.get(*key) != Some(*value))
        .map(|(key, value)| Change::Upsert { key, value });
    removed.chain(upserted).collect()
}

/// Apply all changes inside one transaction; nothing is written on error.
pub(super) fn write_changes(
    connection: &mut Connection,
    changes: &[Change<'_>],
) -> Result<(), StoreError> {
    let tx = connection.transaction()?;
    for change in changes {
        match change {
            Change::Upsert { key, value } => {
                tx.prepare_cached(
                    "INSERT INTO preferences (key, value) VALUES (?1, ?2)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                )?
                .execute(params![key, value])?;
            }
            Change::Remove { key } => {
                tx.prepare_cached("DELETE FROM preferences WHERE key = ?1")?
                    .execute(params![key])?;
            }
        }
    }
    tx.commit()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> Preferences {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn diff_reports_removals_then_changed_values() {
        let before = map(&[("a", "1"), ("b", "2"), ("c", "3")]);
        let after = map(&[("a", "1"), ("b", "20"), ("d", "4")]);
        let changes = diff(&before, &after);
        assert_eq!(
            changes,
            vec![
                Change::Remove { key: "c" },
                Change::Upsert { key: "b", value: "20" },
                Change::Upsert { key: "d", value: "4" },
            ]
        );
    }

    #[test]
    fn identical_maps_produce_no_changes() {
        let same = map(&[("a", "1")]);
        assert!(diff(&same, &same.clone()).is_empty());
    }
}
