//! MigrationStore implementation
//!
//! Migration paths are directed, so `from_tool`/`to_tool` keep their insert
//! order; only the pairwise tables canonicalize. Resources are stored as a
//! JSON array of `{title, url}` objects.

use crate::{decode_strings, encode_strings, SqliteStore, StoreError};
use rusqlite::{params, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use toolmesh_domain::traits::{MigrationStore, WriteOutcome};
use toolmesh_domain::{Difficulty, MigrationPath, MigrationResource, PathId, ToolId};

const COLUMNS: &str = "id, from_tool, to_tool, difficulty, estimated_hours, steps, gotchas, \
                       resources, successes, reports, created_at";

#[derive(Serialize, Deserialize)]
struct ResourceRow {
    title: String,
    url: String,
}

fn encode_resources(resources: &[MigrationResource]) -> Result<String, StoreError> {
    let rows: Vec<ResourceRow> = resources
        .iter()
        .map(|r| ResourceRow {
            title: r.title.clone(),
            url: r.url.clone(),
        })
        .collect();
    Ok(serde_json::to_string(&rows)?)
}

fn decode_resources(raw: &str) -> Result<Vec<MigrationResource>, StoreError> {
    let rows: Vec<ResourceRow> = serde_json::from_str(raw)?;
    Ok(rows
        .into_iter()
        .map(|r| MigrationResource {
            title: r.title,
            url: r.url,
        })
        .collect())
}

fn row_to_path(row: &Row<'_>) -> rusqlite::Result<MigrationPath> {
    let id_bytes: Vec<u8> = row.get(0)?;
    let id = SqliteStore::bytes_to_id(&id_bytes)
        .map(PathId::from_value)
        .map_err(|e| SqliteStore::column_error(0, e))?;

    let from: String = row.get(1)?;
    let to: String = row.get(2)?;

    let difficulty_str: String = row.get(3)?;
    let difficulty = Difficulty::parse(&difficulty_str).ok_or_else(|| {
        SqliteStore::column_error(
            3,
            StoreError::InvalidData(format!("Unknown difficulty: {}", difficulty_str)),
        )
    })?;

    let steps_raw: String = row.get(5)?;
    let gotchas_raw: String = row.get(6)?;
    let resources_raw: String = row.get(7)?;

    Ok(MigrationPath {
        id,
        from: ToolId::new(from),
        to: ToolId::new(to),
        difficulty,
        estimated_hours: row.get(4)?,
        steps: decode_strings(&steps_raw).map_err(|e| SqliteStore::column_error(5, e))?,
        gotchas: decode_strings(&gotchas_raw).map_err(|e| SqliteStore::column_error(6, e))?,
        resources: decode_resources(&resources_raw)
            .map_err(|e| SqliteStore::column_error(7, e))?,
        successes: row.get::<_, i64>(8)? as u32,
        reports: row.get::<_, i64>(9)? as u32,
        created_at: row.get::<_, i64>(10)? as u64,
    })
}

impl MigrationStore for SqliteStore {
    type Error = StoreError;

    fn insert_path(&mut self, path: MigrationPath) -> Result<PathId, Self::Error> {
        self.conn().execute(
            "INSERT INTO migration_paths
                (id, from_tool, to_tool, difficulty, estimated_hours, steps, gotchas,
                 resources, successes, reports, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                SqliteStore::id_to_bytes(path.id.value()),
                path.from.as_str(),
                path.to.as_str(),
                path.difficulty.as_str(),
                path.estimated_hours,
                encode_strings(&path.steps)?,
                encode_strings(&path.gotchas)?,
                encode_resources(&path.resources)?,
                path.successes as i64,
                path.reports as i64,
                path.created_at as i64,
            ],
        )?;
        Ok(path.id)
    }

    fn path(&self, id: PathId) -> Result<Option<MigrationPath>, Self::Error> {
        let path = self
            .conn()
            .query_row(
                &format!("SELECT {} FROM migration_paths WHERE id = ?1", COLUMNS),
                params![SqliteStore::id_to_bytes(id.value())],
                row_to_path,
            )
            .optional()?;
        Ok(path)
    }

    fn paths_from(&self, tool: &ToolId) -> Result<Vec<MigrationPath>, Self::Error> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {} FROM migration_paths WHERE from_tool = ?1",
            COLUMNS
        ))?;

        let paths = stmt
            .query_map(params![tool.as_str()], row_to_path)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(paths)
    }

    fn paths_to(&self, tool: &ToolId) -> Result<Vec<MigrationPath>, Self::Error> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {} FROM migration_paths WHERE to_tool = ?1",
            COLUMNS
        ))?;

        let paths = stmt
            .query_map(params![tool.as_str()], row_to_path)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(paths)
    }

    fn update_path_outcome(
        &mut self,
        id: PathId,
        successes: u32,
        reports: u32,
        expected_reports: u32,
    ) -> Result<WriteOutcome, Self::Error> {
        let changed = self.conn().execute(
            "UPDATE migration_paths SET successes = ?2, reports = ?3
             WHERE id = ?1 AND reports = ?4",
            params![
                SqliteStore::id_to_bytes(id.value()),
                successes as i64,
                reports as i64,
                expected_reports as i64,
            ],
        )?;

        Ok(if changed == 1 {
            WriteOutcome::Applied
        } else {
            WriteOutcome::Conflict
        })
    }
}
