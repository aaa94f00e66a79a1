//! Migration paths between tools
//!
//! Unlike relationships, a migration path is directed: moving from Webpack to
//! Vite is not the same journey as the reverse. Success tracking keeps exact
//! counts; the percentage is derived on read.

use crate::{PathId, ToolId};

/// How hard a migration is expected to be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    /// Mostly mechanical, hours of work
    Easy,

    /// Some rework required
    Moderate,

    /// Significant architectural changes
    Hard,

    /// Expect a rewrite in places
    Painful,
}

impl Difficulty {
    /// Stable string form used for storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Moderate => "moderate",
            Difficulty::Hard => "hard",
            Difficulty::Painful => "painful",
        }
    }

    /// Parse from the stable string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "easy" => Some(Difficulty::Easy),
            "moderate" => Some(Difficulty::Moderate),
            "hard" => Some(Difficulty::Hard),
            "painful" => Some(Difficulty::Painful),
            _ => None,
        }
    }
}

/// External resource attached to a migration path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationResource {
    /// Human-readable title
    pub title: String,

    /// Link to the resource
    pub url: String,
}

/// A curated, directed migration route from one tool to another
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationPath {
    /// Unique identifier
    pub id: PathId,

    /// Tool being migrated away from
    pub from: ToolId,

    /// Tool being migrated to
    pub to: ToolId,

    /// Expected difficulty
    pub difficulty: Difficulty,

    /// Rough effort estimate in hours
    pub estimated_hours: f64,

    /// Ordered migration steps
    pub steps: Vec<String>,

    /// Pitfalls reported along the way
    pub gotchas: Vec<String>,

    /// Supporting guides and writeups
    pub resources: Vec<MigrationResource>,

    /// Migrations reported as successful
    pub successes: u32,

    /// Total outcome reports received
    pub reports: u32,

    /// When the path was created (ms since Unix epoch)
    pub created_at: u64,
}

impl MigrationPath {
    /// Create a path with no outcome reports yet
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        from: ToolId,
        to: ToolId,
        difficulty: Difficulty,
        estimated_hours: f64,
        steps: Vec<String>,
        gotchas: Vec<String>,
        resources: Vec<MigrationResource>,
        created_at: u64,
    ) -> Self {
        Self {
            id: PathId::new(),
            from,
            to,
            difficulty,
            estimated_hours,
            steps,
            gotchas,
            resources,
            successes: 0,
            reports: 0,
            created_at,
        }
    }

    /// Fold one outcome report into the counters
    pub fn fold_outcome(&mut self, succeeded: bool) {
        self.reports += 1;
        if succeeded {
            self.successes += 1;
        }
    }

    /// Success percentage 0–100, rounded; 0 when nothing has been reported
    pub fn success_rate(&self) -> u8 {
        if self.reports == 0 {
            return 0;
        }
        (self.successes as f64 / self.reports as f64 * 100.0).round() as u8
    }
}
