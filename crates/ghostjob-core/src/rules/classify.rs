//! Verdict policy for scored listings.
//!
//! The policy is intentionally small and explainable:
//!
//!   - score >= threshold → GHOST
//!   - else score >= 30   → SUSPICIOUS
//!   - else               → CLEAN
//!
//! Company list matches and the optional extra filters sit on top of it.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rules::eval::{ListMatch, ScoreResult};
use crate::signals::model::SignalBundle;

/// Fixed lower cutoff for the middle band.
pub const SUSPICIOUS_CUTOFF: u8 = 30;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Ghost,
    Suspicious,
    Clean,
}

impl Verdict {
    /// CI-style exit code: CLEAN 0, SUSPICIOUS 1, GHOST 2.
    pub fn exit_code(&self) -> i32 {
        match self {
            Verdict::Clean => 0,
            Verdict::Suspicious => 1,
            Verdict::Ghost => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Ghost => "GHOST",
            Verdict::Suspicious => "SUSPICIOUS",
            Verdict::Clean => "CLEAN",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ghost cutoff in `0..=100`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(try_from = "u8", into = "u8")]
pub struct Threshold(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("threshold {0} is outside 0..=100")]
pub struct ThresholdOutOfRange(pub u8);

impl Threshold {
    pub const DEFAULT: Threshold = Threshold(50);
    pub const MAX: u8 = 100;

    pub fn new(value: u8) -> Option<Self> {
        (value <= Self::MAX).then_some(Self(value))
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    /// Accepts an integer in range; anything else yields `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        value
            .as_u64()
            .and_then(|n| u8::try_from(n).ok())
            .and_then(Self::new)
    }

    /// Like [`Threshold::from_value`], falling back to the default.
    pub fn coerce_value(value: &Value) -> Self {
        Self::from_value(value).unwrap_or_else(|| {
            tracing::warn!(%value, "threshold out of range, using default");
            Self::DEFAULT
        })
    }

    /// Parses free-form user input; unparseable or out-of-range text falls
    /// back to the default.
    pub fn parse_input(input: &str) -> Self {
        match input.trim().parse::<i64>() {
            Ok(n) if (0..=i64::from(Self::MAX)).contains(&n) => Self(n as u8),
            _ => {
                tracing::warn!(input, "threshold input rejected, using default");
                Self::DEFAULT
            }
        }
    }
}

impl TryFrom<u8> for Threshold {
    type Error = ThresholdOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(ThresholdOutOfRange(value))
    }
}

impl From<Threshold> for u8 {
    fn from(threshold: Threshold) -> Self {
        threshold.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub fn classify(score: u8, threshold: Threshold) -> Verdict {
    if score >= threshold.get() {
        Verdict::Ghost
    } else if score >= SUSPICIOUS_CUTOFF {
        Verdict::Suspicious
    } else {
        Verdict::Clean
    }
}

/// Classifies a full score result. A list match decides the verdict
/// regardless of the threshold.
pub fn classify_result(result: &ScoreResult, threshold: Threshold) -> Verdict {
    match result.list_match {
        Some(ListMatch::Trusted) => Verdict::Clean,
        Some(ListMatch::Blocked) => Verdict::Ghost,
        None => classify(result.score, threshold),
    }
}

/// Optional hide-everything-like-this switches. All off by default.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExtraFilters {
    pub hide_no_salary: bool,
    pub hide_old_jobs: bool,
    pub old_job_days: u32,
    pub hide_high_applicants: bool,
    pub max_applicants: u32,
}

impl ExtraFilters {
    pub const DEFAULT_OLD_JOB_DAYS: u32 = 60;
    pub const DEFAULT_MAX_APPLICANTS: u32 = 500;

    /// Name of the first filter that matches `bundle`, if any.
    pub fn forced_by(&self, bundle: &SignalBundle) -> Option<&'static str> {
        if self.hide_no_salary && !bundle.salary.listed {
            return Some("hideNoSalary");
        }
        if self.hide_old_jobs && bundle.age_days.is_some_and(|d| d >= self.old_job_days) {
            return Some("hideOldJobs");
        }
        if self.hide_high_applicants
            && bundle
                .applicant_count
                .is_some_and(|n| n >= self.max_applicants)
        {
            return Some("hideHighApplicants");
        }
        None
    }

    /// Applies the filters to a verdict. Listed companies are never forced.
    pub fn apply(
        &self,
        verdict: Verdict,
        bundle: &SignalBundle,
        result: &ScoreResult,
    ) -> (Verdict, Option<&'static str>) {
        if result.list_match.is_some() {
            return (verdict, None);
        }
        match self.forced_by(bundle) {
            Some(filter) => (Verdict::Ghost, Some(filter)),
            None => (verdict, None),
        }
    }
}

impl Default for ExtraFilters {
    fn default() -> Self {
        Self {
            hide_no_salary: false,
            hide_old_jobs: false,
            old_job_days: Self::DEFAULT_OLD_JOB_DAYS,
            hide_high_applicants: false,
            max_applicants: Self::DEFAULT_MAX_APPLICANTS,
        }
    }
}
