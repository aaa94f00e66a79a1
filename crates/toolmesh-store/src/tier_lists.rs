//! TierListStore implementation
//!
//! Buckets are stored as one JSON object per list (`{"s": [...], ...}`);
//! consensus reads whole lists anyway, so there is nothing to index inside.

use crate::{SqliteStore, StoreError};
use rusqlite::{params, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use toolmesh_domain::traits::TierListStore;
use toolmesh_domain::{TierBuckets, TierList, TierListId, ToolId};

const COLUMNS: &str = "id, user_id, category_id, tiers, is_public, upvotes, created_at";

#[derive(Serialize, Deserialize, Default)]
struct BucketsRow {
    s: Vec<String>,
    a: Vec<String>,
    b: Vec<String>,
    c: Vec<String>,
    d: Vec<String>,
}

fn encode_buckets(buckets: &TierBuckets) -> Result<String, StoreError> {
    let to_strings = |tools: &[ToolId]| tools.iter().map(|t| t.as_str().to_string()).collect();
    let row = BucketsRow {
        s: to_strings(&buckets.s),
        a: to_strings(&buckets.a),
        b: to_strings(&buckets.b),
        c: to_strings(&buckets.c),
        d: to_strings(&buckets.d),
    };
    Ok(serde_json::to_string(&row)?)
}

fn decode_buckets(raw: &str) -> Result<TierBuckets, StoreError> {
    let row: BucketsRow = serde_json::from_str(raw)?;
    let to_ids = |tokens: Vec<String>| tokens.into_iter().map(ToolId::new).collect();
    Ok(TierBuckets {
        s: to_ids(row.s),
        a: to_ids(row.a),
        b: to_ids(row.b),
        c: to_ids(row.c),
        d: to_ids(row.d),
    })
}

fn row_to_list(row: &Row<'_>) -> rusqlite::Result<TierList> {
    let id_bytes: Vec<u8> = row.get(0)?;
    let id = SqliteStore::bytes_to_id(&id_bytes)
        .map(TierListId::from_value)
        .map_err(|e| SqliteStore::column_error(0, e))?;

    let tiers_raw: String = row.get(3)?;
    let tiers = decode_buckets(&tiers_raw).map_err(|e| SqliteStore::column_error(3, e))?;

    Ok(TierList {
        id,
        user_id: row.get(1)?,
        category_id: row.get(2)?,
        tiers,
        is_public: row.get::<_, i64>(4)? != 0,
        upvotes: row.get::<_, i64>(5)? as u32,
        created_at: row.get::<_, i64>(6)? as u64,
    })
}

impl TierListStore for SqliteStore {
    type Error = StoreError;

    fn insert_list(&mut self, list: TierList) -> Result<TierListId, Self::Error> {
        self.conn().execute(
            "INSERT INTO tier_lists (id, user_id, category_id, tiers, is_public, upvotes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                SqliteStore::id_to_bytes(list.id.value()),
                list.user_id,
                list.category_id,
                encode_buckets(&list.tiers)?,
                list.is_public as i64,
                list.upvotes as i64,
                list.created_at as i64,
            ],
        )?;
        Ok(list.id)
    }

    fn public_lists_for(&self, category_id: &str) -> Result<Vec<TierList>, Self::Error> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {} FROM tier_lists WHERE category_id = ?1 AND is_public = 1",
            COLUMNS
        ))?;

        let lists = stmt
            .query_map(params![category_id], row_to_list)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(lists)
    }

    fn increment_upvotes(&mut self, id: TierListId) -> Result<Option<TierList>, Self::Error> {
        let id_bytes = SqliteStore::id_to_bytes(id.value());

        let changed = self.conn().execute(
            "UPDATE tier_lists SET upvotes = upvotes + 1 WHERE id = ?1",
            params![id_bytes],
        )?;

        if changed == 0 {
            return Ok(None);
        }

        let list = self
            .conn()
            .query_row(
                &format!("SELECT {} FROM tier_lists WHERE id = ?1", COLUMNS),
                params![id_bytes],
                row_to_list,
            )
            .optional()?;
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolmesh_domain::Tier;

    fn list(category: &str, public: bool) -> TierList {
        let mut tiers = TierBuckets::default();
        tiers.bucket_mut(Tier::S).push(ToolId::new("nextjs"));
        tiers.bucket_mut(Tier::B).push(ToolId::new("remix"));
        TierList::new("user-1".to_string(), category.to_string(), tiers, public, 1_000)
    }

    #[test]
    fn test_insert_and_roundtrip() {
        let mut store = SqliteStore::new(":memory:").unwrap();
        let l = list("frameworks", true);
        store.insert_list(l.clone()).unwrap();

        let lists = store.public_lists_for("frameworks").unwrap();
        assert_eq!(lists, vec![l]);
    }

    #[test]
    fn test_private_lists_excluded() {
        let mut store = SqliteStore::new(":memory:").unwrap();
        store.insert_list(list("frameworks", true)).unwrap();
        store.insert_list(list("frameworks", false)).unwrap();
        store.insert_list(list("bundlers", true)).unwrap();

        assert_eq!(store.public_lists_for("frameworks").unwrap().len(), 1);
    }

    #[test]
    fn test_increment_upvotes() {
        let mut store = SqliteStore::new(":memory:").unwrap();
        let l = list("frameworks", true);
        let id = store.insert_list(l).unwrap();

        let updated = store.increment_upvotes(id).unwrap().unwrap();
        assert_eq!(updated.upvotes, 1);

        assert!(store.increment_upvotes(TierListId::new()).unwrap().is_none());
    }
}
