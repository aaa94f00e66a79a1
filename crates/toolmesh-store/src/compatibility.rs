//! CompatibilityStore implementation
//!
//! The score table holds one row per canonical pair; `update_score` is a
//! guarded statement keyed on the expected report count, which is what makes
//! the engine's read-modify-write loop safe against concurrent reporters.

use crate::{decode_strings, encode_strings, SqliteStore, StoreError};
use rusqlite::{params, OptionalExtension, Row};
use toolmesh_domain::traits::{CompatibilityStore, WriteOutcome};
use toolmesh_domain::{
    CompatibilityReport, CompatibilityScore, Experience, ReportId, ScoreBreakdown, ToolId,
    ToolPair,
};

const REPORT_COLUMNS: &str = "id, tool_lo, tool_hi, user_id, score, experience, gotchas, tips, \
                              project_context, upvotes, created_at";

const SCORE_COLUMNS: &str = "tool_lo, tool_hi, overall_score, setup_ease, documentation, \
                             community_support, performance_together, report_count, score_total, \
                             integration_guide, boilerplate_url, last_updated";

fn row_to_report(row: &Row<'_>) -> rusqlite::Result<CompatibilityReport> {
    let id_bytes: Vec<u8> = row.get(0)?;
    let id = SqliteStore::bytes_to_id(&id_bytes)
        .map(ReportId::from_value)
        .map_err(|e| SqliteStore::column_error(0, e))?;

    let lo: String = row.get(1)?;
    let hi: String = row.get(2)?;

    let experience_str: String = row.get(5)?;
    let experience = Experience::parse(&experience_str).ok_or_else(|| {
        SqliteStore::column_error(
            5,
            StoreError::InvalidData(format!("Unknown experience: {}", experience_str)),
        )
    })?;

    let gotchas_raw: String = row.get(6)?;
    let tips_raw: String = row.get(7)?;

    Ok(CompatibilityReport {
        id,
        pair: ToolPair::new(ToolId::new(lo), ToolId::new(hi)),
        user_id: row.get(3)?,
        score: row.get::<_, i64>(4)? as u8,
        experience,
        gotchas: decode_strings(&gotchas_raw).map_err(|e| SqliteStore::column_error(6, e))?,
        tips: decode_strings(&tips_raw).map_err(|e| SqliteStore::column_error(7, e))?,
        project_context: row.get(8)?,
        upvotes: row.get::<_, i64>(9)? as u32,
        created_at: row.get::<_, i64>(10)? as u64,
    })
}

fn row_to_score(row: &Row<'_>) -> rusqlite::Result<CompatibilityScore> {
    let lo: String = row.get(0)?;
    let hi: String = row.get(1)?;

    Ok(CompatibilityScore {
        pair: ToolPair::new(ToolId::new(lo), ToolId::new(hi)),
        overall_score: row.get::<_, i64>(2)? as u8,
        breakdown: ScoreBreakdown {
            setup_ease: row.get::<_, i64>(3)? as u8,
            documentation: row.get::<_, i64>(4)? as u8,
            community_support: row.get::<_, i64>(5)? as u8,
            performance_together: row.get::<_, i64>(6)? as u8,
        },
        report_count: row.get::<_, i64>(7)? as u32,
        score_total: row.get::<_, i64>(8)? as u64,
        integration_guide: row.get(9)?,
        boilerplate_url: row.get(10)?,
        last_updated: row.get::<_, i64>(11)? as u64,
    })
}

impl CompatibilityStore for SqliteStore {
    type Error = StoreError;

    fn append_report(&mut self, report: CompatibilityReport) -> Result<ReportId, Self::Error> {
        self.conn().execute(
            "INSERT INTO compatibility_reports
                (id, tool_lo, tool_hi, user_id, score, experience, gotchas, tips,
                 project_context, upvotes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                SqliteStore::id_to_bytes(report.id.value()),
                report.pair.lo().as_str(),
                report.pair.hi().as_str(),
                report.user_id,
                report.score as i64,
                report.experience.as_str(),
                encode_strings(&report.gotchas)?,
                encode_strings(&report.tips)?,
                report.project_context,
                report.upvotes as i64,
                report.created_at as i64,
            ],
        )?;
        Ok(report.id)
    }

    fn reports_for(
        &self,
        pair: &ToolPair,
        limit: usize,
    ) -> Result<Vec<CompatibilityReport>, Self::Error> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {} FROM compatibility_reports
             WHERE tool_lo = ?1 AND tool_hi = ?2
             ORDER BY created_at DESC LIMIT ?3",
            REPORT_COLUMNS
        ))?;

        let reports = stmt
            .query_map(
                params![pair.lo().as_str(), pair.hi().as_str(), limit as i64],
                row_to_report,
            )?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(reports)
    }

    fn upvote_report(&mut self, id: ReportId) -> Result<Option<CompatibilityReport>, Self::Error> {
        let id_bytes = SqliteStore::id_to_bytes(id.value());

        let changed = self.conn().execute(
            "UPDATE compatibility_reports SET upvotes = upvotes + 1 WHERE id = ?1",
            params![id_bytes],
        )?;

        if changed == 0 {
            return Ok(None);
        }

        let report = self
            .conn()
            .query_row(
                &format!(
                    "SELECT {} FROM compatibility_reports WHERE id = ?1",
                    REPORT_COLUMNS
                ),
                params![id_bytes],
                row_to_report,
            )
            .optional()?;
        Ok(report)
    }

    fn score_for(&self, pair: &ToolPair) -> Result<Option<CompatibilityScore>, Self::Error> {
        let score = self
            .conn()
            .query_row(
                &format!(
                    "SELECT {} FROM compatibility_scores WHERE tool_lo = ?1 AND tool_hi = ?2",
                    SCORE_COLUMNS
                ),
                params![pair.lo().as_str(), pair.hi().as_str()],
                row_to_score,
            )
            .optional()?;
        Ok(score)
    }

    fn insert_score(&mut self, score: &CompatibilityScore) -> Result<WriteOutcome, Self::Error> {
        // OR IGNORE + changes(): a racing first-reporter loses cleanly and
        // the engine retries as an update.
        let changed = self.conn().execute(
            "INSERT OR IGNORE INTO compatibility_scores
                (tool_lo, tool_hi, overall_score, setup_ease, documentation,
                 community_support, performance_together, report_count, score_total,
                 integration_guide, boilerplate_url, last_updated)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                score.pair.lo().as_str(),
                score.pair.hi().as_str(),
                score.overall_score as i64,
                score.breakdown.setup_ease as i64,
                score.breakdown.documentation as i64,
                score.breakdown.community_support as i64,
                score.breakdown.performance_together as i64,
                score.report_count as i64,
                score.score_total as i64,
                score.integration_guide,
                score.boilerplate_url,
                score.last_updated as i64,
            ],
        )?;

        Ok(if changed == 1 {
            WriteOutcome::Applied
        } else {
            WriteOutcome::Conflict
        })
    }

    fn update_score(
        &mut self,
        score: &CompatibilityScore,
        expected_report_count: u32,
    ) -> Result<WriteOutcome, Self::Error> {
        let changed = self.conn().execute(
            "UPDATE compatibility_scores
             SET overall_score = ?3, setup_ease = ?4, documentation = ?5,
                 community_support = ?6, performance_together = ?7,
                 report_count = ?8, score_total = ?9, integration_guide = ?10,
                 boilerplate_url = ?11, last_updated = ?12
             WHERE tool_lo = ?1 AND tool_hi = ?2 AND report_count = ?13",
            params![
                score.pair.lo().as_str(),
                score.pair.hi().as_str(),
                score.overall_score as i64,
                score.breakdown.setup_ease as i64,
                score.breakdown.documentation as i64,
                score.breakdown.community_support as i64,
                score.breakdown.performance_together as i64,
                score.report_count as i64,
                score.score_total as i64,
                score.integration_guide,
                score.boilerplate_url,
                score.last_updated as i64,
                expected_report_count as i64,
            ],
        )?;

        Ok(if changed == 1 {
            WriteOutcome::Applied
        } else {
            WriteOutcome::Conflict
        })
    }

    fn scores_for(
        &self,
        tool: &ToolId,
        limit: usize,
    ) -> Result<Vec<CompatibilityScore>, Self::Error> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {} FROM compatibility_scores
             WHERE tool_lo = ?1 OR tool_hi = ?1
             ORDER BY overall_score DESC LIMIT ?2",
            SCORE_COLUMNS
        ))?;

        let scores = stmt
            .query_map(params![tool.as_str(), limit as i64], row_to_score)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(scores)
    }

    fn top_scores(&self, limit: usize) -> Result<Vec<CompatibilityScore>, Self::Error> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {} FROM compatibility_scores
             ORDER BY overall_score DESC LIMIT ?1",
            SCORE_COLUMNS
        ))?;

        let scores = stmt
            .query_map(params![limit as i64], row_to_score)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(scores)
    }
}
