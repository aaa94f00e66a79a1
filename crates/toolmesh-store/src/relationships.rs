//! RelationshipStore implementation

use crate::{decode_strings, encode_strings, SqliteStore, StoreError};
use rusqlite::{params, OptionalExtension, Row};
use toolmesh_domain::traits::RelationshipStore;
use toolmesh_domain::{RelationKind, Relationship, RelationshipId, ToolId, ToolPair};

const COLUMNS: &str =
    "id, tool_lo, tool_hi, kind, strength, evidence, community_votes, created_at, updated_at";

fn row_to_relationship(row: &Row<'_>) -> rusqlite::Result<Relationship> {
    let id_bytes: Vec<u8> = row.get(0)?;
    let id = SqliteStore::bytes_to_id(&id_bytes)
        .map(RelationshipId::from_value)
        .map_err(|e| SqliteStore::column_error(0, e))?;

    let lo: String = row.get(1)?;
    let hi: String = row.get(2)?;

    let kind_str: String = row.get(3)?;
    let kind = RelationKind::parse(&kind_str).ok_or_else(|| {
        SqliteStore::column_error(
            3,
            StoreError::InvalidData(format!("Unknown relation kind: {}", kind_str)),
        )
    })?;

    let evidence_raw: String = row.get(5)?;
    let evidence =
        decode_strings(&evidence_raw).map_err(|e| SqliteStore::column_error(5, e))?;

    Ok(Relationship {
        id,
        pair: ToolPair::new(ToolId::new(lo), ToolId::new(hi)),
        kind,
        strength: row.get(4)?,
        evidence,
        community_votes: row.get::<_, i64>(6)? as u32,
        created_at: row.get::<_, i64>(7)? as u64,
        updated_at: row.get::<_, i64>(8)? as u64,
    })
}

impl RelationshipStore for SqliteStore {
    type Error = StoreError;

    fn insert_relationship(&mut self, rel: Relationship) -> Result<RelationshipId, Self::Error> {
        self.conn().execute(
            "INSERT INTO relationships
                (id, tool_lo, tool_hi, kind, strength, evidence, community_votes, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                SqliteStore::id_to_bytes(rel.id.value()),
                rel.pair.lo().as_str(),
                rel.pair.hi().as_str(),
                rel.kind.as_str(),
                rel.strength,
                encode_strings(&rel.evidence)?,
                rel.community_votes as i64,
                rel.created_at as i64,
                rel.updated_at as i64,
            ],
        )?;
        Ok(rel.id)
    }

    fn relationship_between(
        &self,
        pair: &ToolPair,
        kind: RelationKind,
    ) -> Result<Option<Relationship>, Self::Error> {
        let rel = self
            .conn()
            .query_row(
                &format!(
                    "SELECT {} FROM relationships
                     WHERE tool_lo = ?1 AND tool_hi = ?2 AND kind = ?3",
                    COLUMNS
                ),
                params![pair.lo().as_str(), pair.hi().as_str(), kind.as_str()],
                row_to_relationship,
            )
            .optional()?;
        Ok(rel)
    }

    fn relationships_for(&self, tool: &ToolId) -> Result<Vec<Relationship>, Self::Error> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {} FROM relationships WHERE tool_lo = ?1 OR tool_hi = ?1",
            COLUMNS
        ))?;

        let rels = stmt
            .query_map(params![tool.as_str()], row_to_relationship)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rels)
    }

    fn relationships_by_kind(
        &self,
        kind: RelationKind,
        limit: usize,
    ) -> Result<Vec<Relationship>, Self::Error> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {} FROM relationships WHERE kind = ?1
             ORDER BY created_at DESC LIMIT ?2",
            COLUMNS
        ))?;

        let rels = stmt
            .query_map(params![kind.as_str(), limit as i64], row_to_relationship)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rels)
    }

    fn increment_votes(
        &mut self,
        id: RelationshipId,
        now: u64,
    ) -> Result<Option<Relationship>, Self::Error> {
        let id_bytes = SqliteStore::id_to_bytes(id.value());

        let changed = self.conn().execute(
            "UPDATE relationships
             SET community_votes = community_votes + 1, updated_at = ?2
             WHERE id = ?1",
            params![id_bytes, now as i64],
        )?;

        if changed == 0 {
            return Ok(None);
        }

        let rel = self
            .conn()
            .query_row(
                &format!("SELECT {} FROM relationships WHERE id = ?1", COLUMNS),
                params![id_bytes],
                row_to_relationship,
            )
            .optional()?;
        Ok(rel)
    }
}
