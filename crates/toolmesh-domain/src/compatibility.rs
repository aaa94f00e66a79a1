//! Compatibility reports and their derived aggregate
//!
//! A [`CompatibilityReport`] is one user's raw observation of how well two
//! tools worked together; the log of reports is append-only. The derived
//! [`CompatibilityScore`] is the continuously updated aggregate for the pair.
//! The aggregate keeps an exact running sum next to the rounded display score
//! so repeated updates cannot accumulate rounding drift.

use crate::{ReportId, ToolPair};

/// How the integration went for the reporting user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Experience {
    /// Worked without friction
    Smooth,

    /// Worked with small workarounds
    MinorIssues,

    /// Required significant effort
    MajorIssues,

    /// Could not be made to work
    Incompatible,
}

impl Experience {
    /// Stable string form used for storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Experience::Smooth => "smooth",
            Experience::MinorIssues => "minor_issues",
            Experience::MajorIssues => "major_issues",
            Experience::Incompatible => "incompatible",
        }
    }

    /// Parse from the stable string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "smooth" => Some(Experience::Smooth),
            "minor_issues" => Some(Experience::MinorIssues),
            "major_issues" => Some(Experience::MajorIssues),
            "incompatible" => Some(Experience::Incompatible),
            _ => None,
        }
    }
}

/// One user's point observation about a tool pair
///
/// Immutable once created, apart from the community upvote counter.
#[derive(Debug, Clone, PartialEq)]
pub struct CompatibilityReport {
    /// Unique identifier
    pub id: ReportId,

    /// The pair being reported on
    pub pair: ToolPair,

    /// Reporting user (opaque, identity lives elsewhere)
    pub user_id: String,

    /// Overall score for the pairing, 0–100
    pub score: u8,

    /// Qualitative experience bucket
    pub experience: Experience,

    /// Pitfalls the user hit
    pub gotchas: Vec<String>,

    /// Advice for others attempting the pairing
    pub tips: Vec<String>,

    /// Optional description of the project the pairing was tried in
    pub project_context: Option<String>,

    /// Community upvotes on this report
    pub upvotes: u32,

    /// When the report was filed (ms since Unix epoch)
    pub created_at: u64,
}

/// Per-dimension sub-scores of a compatibility aggregate
///
/// Reports carry only a single overall score, so the breakdown is seeded
/// from the first report and not re-aggregated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBreakdown {
    /// How easy initial setup is
    pub setup_ease: u8,

    /// Quality of combined documentation
    pub documentation: u8,

    /// Community help available for the pairing
    pub community_support: u8,

    /// Runtime behavior of the tools together
    pub performance_together: u8,
}

impl ScoreBreakdown {
    /// Seed every dimension with the same value
    pub fn uniform(score: u8) -> Self {
        Self {
            setup_ease: score,
            documentation: score,
            community_support: score,
            performance_together: score,
        }
    }
}

/// The derived, continuously updated aggregate for a pair
///
/// Exactly one aggregate exists per unordered pair; the canonical pair key
/// guarantees that at the storage layer.
#[derive(Debug, Clone, PartialEq)]
pub struct CompatibilityScore {
    /// The pair this aggregate covers
    pub pair: ToolPair,

    /// Rounded mean of all report scores, 0–100
    pub overall_score: u8,

    /// Per-dimension sub-scores (seeded, not re-aggregated)
    pub breakdown: ScoreBreakdown,

    /// Number of reports folded into the aggregate
    pub report_count: u32,

    /// Exact sum of all report scores; `overall_score` is derived from this
    pub score_total: u64,

    /// Curated how-to for integrating the pair
    pub integration_guide: Option<String>,

    /// Link to starter code for the pairing
    pub boilerplate_url: Option<String>,

    /// When the aggregate last changed (ms since Unix epoch)
    pub last_updated: u64,
}

impl CompatibilityScore {
    /// Create the aggregate from the first report for a pair
    pub fn from_first_report(pair: ToolPair, score: u8, now: u64) -> Self {
        Self {
            pair,
            overall_score: score,
            breakdown: ScoreBreakdown::uniform(score),
            report_count: 1,
            score_total: score as u64,
            integration_guide: None,
            boilerplate_url: None,
            last_updated: now,
        }
    }

    /// Placeholder aggregate created when a guide is attached to a pair
    /// that has no reports yet
    pub fn guide_placeholder(pair: ToolPair, guide: String, url: Option<String>, now: u64) -> Self {
        Self {
            pair,
            overall_score: 70,
            breakdown: ScoreBreakdown::uniform(70),
            report_count: 0,
            score_total: 0,
            integration_guide: Some(guide),
            boilerplate_url: url,
            last_updated: now,
        }
    }

    /// Fold one more report score into the aggregate
    ///
    /// The rounded display score is recomputed from the exact running sum,
    /// so the order reports arrive in cannot change the result.
    pub fn fold_report(&mut self, score: u8, now: u64) {
        self.report_count += 1;
        self.score_total += score as u64;
        self.overall_score =
            (self.score_total as f64 / self.report_count as f64).round() as u8;
        self.last_updated = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ToolId;

    fn pair() -> ToolPair {
        ToolPair::new(ToolId::new("convex"), ToolId::new("nextjs"))
    }

    #[test]
    fn test_first_report_seeds_breakdown() {
        let agg = CompatibilityScore::from_first_report(pair(), 85, 1000);
        assert_eq!(agg.overall_score, 85);
        assert_eq!(agg.breakdown, ScoreBreakdown::uniform(85));
        assert_eq!(agg.report_count, 1);
        assert_eq!(agg.score_total, 85);
    }

    #[test]
    fn test_fold_is_exact_mean() {
        let mut agg = CompatibilityScore::from_first_report(pair(), 80, 1000);
        agg.fold_report(100, 2000);

        assert_eq!(agg.report_count, 2);
        assert_eq!(agg.overall_score, 90);
        assert_eq!(agg.last_updated, 2000);
    }

    #[test]
    fn test_fold_order_independent() {
        let scores = [37u8, 91, 12, 64, 88, 3];

        let mut forward = CompatibilityScore::from_first_report(pair(), scores[0], 0);
        for &s in &scores[1..] {
            forward.fold_report(s, 0);
        }

        let mut backward =
            CompatibilityScore::from_first_report(pair(), *scores.last().unwrap(), 0);
        for &s in scores[..scores.len() - 1].iter().rev() {
            backward.fold_report(s, 0);
        }

        assert_eq!(forward.overall_score, backward.overall_score);
        assert_eq!(forward.score_total, backward.score_total);
    }

    #[test]
    fn test_breakdown_untouched_by_fold() {
        let mut agg = CompatibilityScore::from_first_report(pair(), 40, 0);
        agg.fold_report(100, 1);
        assert_eq!(agg.breakdown, ScoreBreakdown::uniform(40));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::ToolId;
    use proptest::prelude::*;

    proptest! {
        /// Property: the aggregate stays within [0, 100] for in-range reports
        #[test]
        fn test_overall_score_bounded(scores in proptest::collection::vec(0u8..=100, 1..50)) {
            let pair = ToolPair::new(ToolId::new("a"), ToolId::new("b"));
            let mut agg = CompatibilityScore::from_first_report(pair, scores[0], 0);
            for &s in &scores[1..] {
                agg.fold_report(s, 0);
            }

            prop_assert!(agg.overall_score <= 100);
            prop_assert_eq!(agg.report_count as usize, scores.len());
            prop_assert_eq!(agg.score_total, scores.iter().map(|&s| s as u64).sum::<u64>());
        }
    }
}
