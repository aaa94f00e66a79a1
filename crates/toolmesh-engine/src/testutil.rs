//! In-memory store used by the engine unit tests
//!
//! Implements every store trait over plain vectors, plus two failure knobs:
//! `fail_names` makes the directory error on every lookup, and
//! `inject_conflicts(n)` makes the next `n` guarded writes lose as if a
//! concurrent writer had won.

use std::collections::HashMap;
use toolmesh_domain::traits::{
    CompatibilityStore, MigrationStore, RelationshipStore, SynergyStore, TierListStore,
    ToolDirectory, WriteOutcome,
};
use toolmesh_domain::{
    CompatibilityReport, CompatibilityScore, Difficulty, MigrationPath, PathId, RelationKind,
    Relationship, RelationshipId, ReportId, Synergy, SynergyKind, Tier, TierBuckets, TierList,
    TierListId, ToolId, ToolPair,
};

#[derive(Default)]
pub struct MemStore {
    relationships: Vec<Relationship>,
    reports: Vec<CompatibilityReport>,
    scores: Vec<CompatibilityScore>,
    synergies: Vec<Synergy>,
    paths: Vec<MigrationPath>,
    lists: Vec<TierList>,
    names: HashMap<ToolId, String>,
    pub fail_names: bool,
    pending_conflicts: u32,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_relationship(&mut self, a: &str, b: &str, kind: RelationKind, strength: f64) {
        let rel = Relationship::new(
            ToolPair::new(ToolId::new(a), ToolId::new(b)),
            kind,
            strength,
            vec![],
            1_000,
        )
        .expect("test strength in range");
        self.relationships.push(rel);
    }

    pub fn add_synergy(
        &mut self,
        a: &str,
        b: &str,
        kind: SynergyKind,
        score: i32,
        bonus: Option<&str>,
    ) {
        self.synergies.push(Synergy::new(
            ToolPair::new(ToolId::new(a), ToolId::new(b)),
            kind,
            score,
            "seeded".to_string(),
            bonus.map(str::to_string),
        ));
    }

    pub fn add_path(&mut self, from: &str, to: &str, difficulty: Difficulty) -> PathId {
        let path = MigrationPath::new(
            ToolId::new(from),
            ToolId::new(to),
            difficulty,
            8.0,
            vec![],
            vec![],
            vec![],
            1_000,
        );
        let id = path.id;
        self.paths.push(path);
        id
    }

    pub fn add_tier_list(
        &mut self,
        category: &str,
        is_public: bool,
        upvotes: u32,
        placements: &[(Tier, &[&str])],
    ) {
        let mut tiers = TierBuckets::default();
        for (tier, tools) in placements {
            for tool in *tools {
                tiers.bucket_mut(*tier).push(ToolId::new(*tool));
            }
        }
        let mut list = TierList::new(
            "user".to_string(),
            category.to_string(),
            tiers,
            is_public,
            1_000,
        );
        list.upvotes = upvotes;
        self.lists.push(list);
    }

    pub fn set_name(&mut self, tool: &str, name: &str) {
        self.names.insert(ToolId::new(tool), name.to_string());
    }

    /// Make the next `n` guarded writes report a conflict
    pub fn inject_conflicts(&mut self, n: u32) {
        self.pending_conflicts = n;
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    fn take_conflict(&mut self) -> bool {
        if self.pending_conflicts > 0 {
            self.pending_conflicts -= 1;
            true
        } else {
            false
        }
    }
}

impl RelationshipStore for MemStore {
    type Error = String;

    fn insert_relationship(&mut self, rel: Relationship) -> Result<RelationshipId, Self::Error> {
        let id = rel.id;
        self.relationships.push(rel);
        Ok(id)
    }

    fn relationship_between(
        &self,
        pair: &ToolPair,
        kind: RelationKind,
    ) -> Result<Option<Relationship>, Self::Error> {
        Ok(self
            .relationships
            .iter()
            .find(|r| &r.pair == pair && r.kind == kind)
            .cloned())
    }

    fn relationships_for(&self, tool: &ToolId) -> Result<Vec<Relationship>, Self::Error> {
        Ok(self
            .relationships
            .iter()
            .filter(|r| r.pair.contains(tool))
            .cloned()
            .collect())
    }

    fn relationships_by_kind(
        &self,
        kind: RelationKind,
        limit: usize,
    ) -> Result<Vec<Relationship>, Self::Error> {
        let mut rels: Vec<Relationship> = self
            .relationships
            .iter()
            .filter(|r| r.kind == kind)
            .cloned()
            .collect();
        rels.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rels.truncate(limit);
        Ok(rels)
    }

    fn increment_votes(
        &mut self,
        id: RelationshipId,
        now: u64,
    ) -> Result<Option<Relationship>, Self::Error> {
        let Some(rel) = self.relationships.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        rel.community_votes += 1;
        rel.updated_at = now;
        Ok(Some(rel.clone()))
    }
}

impl CompatibilityStore for MemStore {
    type Error = String;

    fn append_report(&mut self, report: CompatibilityReport) -> Result<ReportId, Self::Error> {
        let id = report.id;
        self.reports.push(report);
        Ok(id)
    }

    fn reports_for(
        &self,
        pair: &ToolPair,
        limit: usize,
    ) -> Result<Vec<CompatibilityReport>, Self::Error> {
        let mut reports: Vec<CompatibilityReport> = self
            .reports
            .iter()
            .filter(|r| &r.pair == pair)
            .cloned()
            .collect();
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        reports.truncate(limit);
        Ok(reports)
    }

    fn upvote_report(&mut self, id: ReportId) -> Result<Option<CompatibilityReport>, Self::Error> {
        let Some(report) = self.reports.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        report.upvotes += 1;
        Ok(Some(report.clone()))
    }

    fn score_for(&self, pair: &ToolPair) -> Result<Option<CompatibilityScore>, Self::Error> {
        Ok(self.scores.iter().find(|s| &s.pair == pair).cloned())
    }

    fn insert_score(&mut self, score: &CompatibilityScore) -> Result<WriteOutcome, Self::Error> {
        if self.take_conflict() || self.scores.iter().any(|s| s.pair == score.pair) {
            return Ok(WriteOutcome::Conflict);
        }
        self.scores.push(score.clone());
        Ok(WriteOutcome::Applied)
    }

    fn update_score(
        &mut self,
        score: &CompatibilityScore,
        expected_report_count: u32,
    ) -> Result<WriteOutcome, Self::Error> {
        if self.take_conflict() {
            return Ok(WriteOutcome::Conflict);
        }
        let Some(existing) = self
            .scores
            .iter_mut()
            .find(|s| s.pair == score.pair && s.report_count == expected_report_count)
        else {
            return Ok(WriteOutcome::Conflict);
        };
        *existing = score.clone();
        Ok(WriteOutcome::Applied)
    }

    fn scores_for(
        &self,
        tool: &ToolId,
        limit: usize,
    ) -> Result<Vec<CompatibilityScore>, Self::Error> {
        let mut scores: Vec<CompatibilityScore> = self
            .scores
            .iter()
            .filter(|s| s.pair.contains(tool))
            .cloned()
            .collect();
        scores.sort_by(|a, b| b.overall_score.cmp(&a.overall_score));
        scores.truncate(limit);
        Ok(scores)
    }

    fn top_scores(&self, limit: usize) -> Result<Vec<CompatibilityScore>, Self::Error> {
        let mut scores = self.scores.clone();
        scores.sort_by(|a, b| b.overall_score.cmp(&a.overall_score));
        scores.truncate(limit);
        Ok(scores)
    }
}

impl SynergyStore for MemStore {
    type Error = String;

    fn insert_synergy(&mut self, synergy: Synergy) -> Result<(), Self::Error> {
        self.synergies.push(synergy);
        Ok(())
    }

    fn synergy_between(&self, pair: &ToolPair) -> Result<Option<Synergy>, Self::Error> {
        Ok(self.synergies.iter().find(|s| &s.pair == pair).cloned())
    }

    fn synergies_for(&self, tool: &ToolId) -> Result<Vec<Synergy>, Self::Error> {
        Ok(self
            .synergies
            .iter()
            .filter(|s| s.pair.contains(tool))
            .cloned()
            .collect())
    }
}

impl MigrationStore for MemStore {
    type Error = String;

    fn insert_path(&mut self, path: MigrationPath) -> Result<PathId, Self::Error> {
        let id = path.id;
        self.paths.push(path);
        Ok(id)
    }

    fn path(&self, id: PathId) -> Result<Option<MigrationPath>, Self::Error> {
        Ok(self.paths.iter().find(|p| p.id == id).cloned())
    }

    fn paths_from(&self, tool: &ToolId) -> Result<Vec<MigrationPath>, Self::Error> {
        Ok(self
            .paths
            .iter()
            .filter(|p| &p.from == tool)
            .cloned()
            .collect())
    }

    fn paths_to(&self, tool: &ToolId) -> Result<Vec<MigrationPath>, Self::Error> {
        Ok(self
            .paths
            .iter()
            .filter(|p| &p.to == tool)
            .cloned()
            .collect())
    }

    fn update_path_outcome(
        &mut self,
        id: PathId,
        successes: u32,
        reports: u32,
        expected_reports: u32,
    ) -> Result<WriteOutcome, Self::Error> {
        if self.take_conflict() {
            return Ok(WriteOutcome::Conflict);
        }
        let Some(path) = self
            .paths
            .iter_mut()
            .find(|p| p.id == id && p.reports == expected_reports)
        else {
            return Ok(WriteOutcome::Conflict);
        };
        path.successes = successes;
        path.reports = reports;
        Ok(WriteOutcome::Applied)
    }
}

impl TierListStore for MemStore {
    type Error = String;

    fn insert_list(&mut self, list: TierList) -> Result<TierListId, Self::Error> {
        let id = list.id;
        self.lists.push(list);
        Ok(id)
    }

    fn public_lists_for(&self, category_id: &str) -> Result<Vec<TierList>, Self::Error> {
        Ok(self
            .lists
            .iter()
            .filter(|l| l.is_public && l.category_id == category_id)
            .cloned()
            .collect())
    }

    fn increment_upvotes(&mut self, id: TierListId) -> Result<Option<TierList>, Self::Error> {
        let Some(list) = self.lists.iter_mut().find(|l| l.id == id) else {
            return Ok(None);
        };
        list.upvotes += 1;
        Ok(Some(list.clone()))
    }
}

impl ToolDirectory for MemStore {
    type Error = String;

    fn display_name(&self, tool: &ToolId) -> Result<Option<String>, Self::Error> {
        if self.fail_names {
            return Err("directory unavailable".to_string());
        }
        Ok(self.names.get(tool).cloned())
    }
}
