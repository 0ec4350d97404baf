use serde::{Deserialize, Serialize};

use crate::rules::catalog::RuleId;

/// Observations extracted from one listing.
/// Maps to the `signals` object in the ghostjob report.
///
/// Built fresh for every scoring pass and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalBundle {
    /// Days since posting. `None` when no relative-time phrase was found.
    pub age_days: Option<u32>,
    pub reposted: bool,
    pub applicant_count: Option<u32>,
    pub salary: SalaryInfo,
    pub company: CompanyInfo,
    pub requirements: RequirementInfo,
    pub description: DescriptionInfo,
    /// Red-flag phrase keys in table order.
    pub red_flags: Vec<RuleId>,
    #[serde(skip)]
    pub raw_text_lower: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeInfo {
    pub days: Option<u32>,
    pub reposted: bool,
}

/// Pay information. Amounts are whole currency units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryInfo {
    pub listed: bool,
    pub low: Option<u64>,
    pub high: Option<u64>,
    /// Only known for an explicit low-high range.
    pub range_width: Option<u64>,
    /// Only evaluated when no amount is listed.
    pub competitive_phrase: bool,
    /// Only evaluated when no amount is listed.
    pub doe_only: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInfo {
    /// Trimmed display name, original casing.
    pub name: Option<String>,
    pub is_staffing_agency: bool,
    pub for_client: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementInfo {
    pub is_entry_level: bool,
    /// Largest `N` across every "N+ years experience" phrase; 0 when absent.
    pub max_years_required: u32,
    pub distinct_tech_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionInfo {
    pub word_count: u32,
    pub has_team_mention: bool,
    pub has_specifics: bool,
    pub has_interview_info: bool,
    pub has_manager_name: bool,
    pub has_benefits: bool,
    pub buzzword_count: u32,
}
