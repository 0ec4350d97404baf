use serde::{Deserialize, Serialize};

use crate::SCHEMA_VERSION;
use crate::rules::classify::Verdict;
use crate::rules::eval::{ListMatch, ScoreResult, TriggeredRule};
use crate::signals::model::SignalBundle;

/// Per-card result handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub verdict: Verdict,
    pub score: u8,
    pub reasons: Vec<String>,
    pub company_name: Option<String>,
    pub list_match: Option<ListMatch>,
    /// Extra filter that forced a GHOST verdict, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forced_by: Option<String>,
}

impl Assessment {
    pub fn new(result: &ScoreResult, verdict: Verdict, forced_by: Option<&str>) -> Self {
        Self {
            verdict,
            score: result.score,
            reasons: result.reasons.clone(),
            company_name: result.company_name.clone(),
            list_match: result.list_match,
            forced_by: forced_by.map(str::to_string),
        }
    }

    pub fn is_trusted(&self) -> bool {
        self.list_match == Some(ListMatch::Trusted)
    }
}

/// Top-level ghostjob report for one listing.
///
/// Deterministic for identical listing text and configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub schema_version: String,
    pub tool: ToolInfo,
    pub listing: ListingInfo,
    pub signals: SignalBundle,
    pub rules: RulesInfo,
    pub assessment: Assessment,
}

impl Report {
    /// `triggered` is kept in evaluation order.
    pub fn new(
        tool: ToolInfo,
        listing: ListingInfo,
        signals: SignalBundle,
        catalog: RulesCatalogInfo,
        triggered: Vec<TriggeredRule>,
        assessment: Assessment,
    ) -> Self {
        let rules = RulesInfo {
            catalog,
            triggered: triggered
                .into_iter()
                .map(|r| TriggeredRuleInfo {
                    rule_id: r.rule_id.to_string(),
                    points: r.points,
                    reason: r.reason,
                })
                .collect(),
        };

        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            tool,
            listing,
            signals,
            rules,
            assessment,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.assessment.verdict.exit_code()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
    pub commit: Option<String>,
}

/// The listing text this report describes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingInfo {
    pub path: Option<String>,
    pub size_bytes: u64,
    pub word_count: u32,
    pub hash: ListingHash,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingHash {
    pub algorithm: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesInfo {
    pub catalog: RulesCatalogInfo,
    pub triggered: Vec<TriggeredRuleInfo>,
}

/// Which rule table and cutoff produced the verdict.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RulesCatalogInfo {
    pub catalog_version: String,
    pub profile: String,
    pub threshold: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggeredRuleInfo {
    pub rule_id: String,
    pub points: i32,
    pub reason: String,
}

/// Tally of one rescoring pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassStats {
    pub total: usize,
    pub flagged: usize,
    pub suspicious: usize,
    pub clean: usize,
}

impl PassStats {
    pub fn record(&mut self, verdict: Verdict) {
        self.total += 1;
        match verdict {
            Verdict::Ghost => self.flagged += 1,
            Verdict::Suspicious => self.suspicious += 1,
            Verdict::Clean => self.clean += 1,
        }
    }
}
