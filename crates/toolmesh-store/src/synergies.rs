//! SynergyStore implementation

use crate::{SqliteStore, StoreError};
use rusqlite::{params, OptionalExtension, Row};
use toolmesh_domain::traits::SynergyStore;
use toolmesh_domain::{Synergy, SynergyId, SynergyKind, ToolId, ToolPair};

const COLUMNS: &str = "id, tool_lo, tool_hi, kind, score, description, bonus_effect";

fn row_to_synergy(row: &Row<'_>) -> rusqlite::Result<Synergy> {
    let id_bytes: Vec<u8> = row.get(0)?;
    let id = SqliteStore::bytes_to_id(&id_bytes)
        .map(SynergyId::from_value)
        .map_err(|e| SqliteStore::column_error(0, e))?;

    let lo: String = row.get(1)?;
    let hi: String = row.get(2)?;

    let kind_str: String = row.get(3)?;
    let kind = SynergyKind::parse(&kind_str).ok_or_else(|| {
        SqliteStore::column_error(
            3,
            StoreError::InvalidData(format!("Unknown synergy kind: {}", kind_str)),
        )
    })?;

    Ok(Synergy {
        id,
        pair: ToolPair::new(ToolId::new(lo), ToolId::new(hi)),
        kind,
        score: row.get::<_, i64>(4)? as i32,
        description: row.get(5)?,
        bonus_effect: row.get(6)?,
    })
}

impl SynergyStore for SqliteStore {
    type Error = StoreError;

    fn insert_synergy(&mut self, synergy: Synergy) -> Result<(), Self::Error> {
        self.conn().execute(
            "INSERT INTO synergies (id, tool_lo, tool_hi, kind, score, description, bonus_effect)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                SqliteStore::id_to_bytes(synergy.id.value()),
                synergy.pair.lo().as_str(),
                synergy.pair.hi().as_str(),
                synergy.kind.as_str(),
                synergy.score as i64,
                synergy.description,
                synergy.bonus_effect,
            ],
        )?;
        Ok(())
    }

    fn synergy_between(&self, pair: &ToolPair) -> Result<Option<Synergy>, Self::Error> {
        let synergy = self
            .conn()
            .query_row(
                &format!(
                    "SELECT {} FROM synergies WHERE tool_lo = ?1 AND tool_hi = ?2",
                    COLUMNS
                ),
                params![pair.lo().as_str(), pair.hi().as_str()],
                row_to_synergy,
            )
            .optional()?;
        Ok(synergy)
    }

    fn synergies_for(&self, tool: &ToolId) -> Result<Vec<Synergy>, Self::Error> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {} FROM synergies WHERE tool_lo = ?1 OR tool_hi = ?1",
            COLUMNS
        ))?;

        let synergies = stmt
            .query_map(params![tool.as_str()], row_to_synergy)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(synergies)
    }
}
