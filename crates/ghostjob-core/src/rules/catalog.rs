//! Rule catalog: stable rule keys, the calibrated point table and profiles.
//!
//! Point values are fixed calibration constants. Positive values raise the
//! ghost likelihood, negative values ("good signs") lower it.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub enum Category {
    #[serde(rename = "age")]
    Age,
    #[serde(rename = "applicants")]
    Applicants,
    #[serde(rename = "salary")]
    Salary,
    #[serde(rename = "company")]
    Company,
    #[serde(rename = "requirements")]
    Requirements,
    #[serde(rename = "description")]
    Description,
    #[serde(rename = "redFlags")]
    RedFlags,
    #[serde(rename = "goodSigns")]
    GoodSigns,
    #[serde(rename = "overrides")]
    Overrides,
}

/// Stable identifier of a scoring rule, serialized as `category.ruleName`.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub enum RuleId {
    #[serde(rename = "age.over90Days")]
    AgeOver90,
    #[serde(rename = "age.over60Days")]
    AgeOver60,
    #[serde(rename = "age.over30Days")]
    AgeOver30,
    #[serde(rename = "age.reposted")]
    Reposted,
    #[serde(rename = "applicants.over1000")]
    ApplicantsOver1000,
    #[serde(rename = "applicants.over500")]
    ApplicantsOver500,
    #[serde(rename = "applicants.over200")]
    ApplicantsOver200,
    #[serde(rename = "salary.notListed")]
    SalaryNotListed,
    #[serde(rename = "salary.hugeRange")]
    SalaryHugeRange,
    #[serde(rename = "salary.competitivePay")]
    CompetitivePay,
    #[serde(rename = "salary.doeOnly")]
    DoeOnly,
    #[serde(rename = "company.noInfo")]
    NoCompanyInfo,
    #[serde(rename = "company.staffingAgency")]
    StaffingAgency,
    #[serde(rename = "company.hiringForClient")]
    HiringForClient,
    #[serde(rename = "requirements.entryLevelSenior")]
    EntryLevelSenior,
    #[serde(rename = "requirements.unrealisticStack")]
    UnrealisticStack,
    #[serde(rename = "description.tooShort")]
    DescriptionTooShort,
    #[serde(rename = "description.noTeamInfo")]
    NoTeamInfo,
    #[serde(rename = "description.noSpecifics")]
    NoSpecifics,
    #[serde(rename = "description.buzzwordOverload")]
    BuzzwordOverload,
    #[serde(rename = "redFlags.fastPaced")]
    FastPaced,
    #[serde(rename = "redFlags.family")]
    Family,
    #[serde(rename = "redFlags.manyHats")]
    ManyHats,
    #[serde(rename = "redFlags.selfStarter")]
    SelfStarter,
    #[serde(rename = "redFlags.unlimitedPto")]
    UnlimitedPto,
    #[serde(rename = "redFlags.groundFloor")]
    GroundFloor,
    #[serde(rename = "redFlags.rockstar")]
    Rockstar,
    #[serde(rename = "redFlags.hustle")]
    Hustle,
    #[serde(rename = "redFlags.urgent")]
    Urgent,
    #[serde(rename = "goodSigns.salaryListed")]
    SalaryListed,
    #[serde(rename = "goodSigns.specificTeam")]
    SpecificTeam,
    #[serde(rename = "goodSigns.recentPost")]
    RecentPost,
    #[serde(rename = "goodSigns.lowApplicants")]
    LowApplicants,
    #[serde(rename = "goodSigns.benefits")]
    Benefits,
    #[serde(rename = "goodSigns.interviewInfo")]
    InterviewInfo,
    #[serde(rename = "goodSigns.hiringManager")]
    HiringManager,
    #[serde(rename = "overrides.blockedCompany")]
    BlockedCompany,
}

impl RuleId {
    pub const ALL: [RuleId; 37] = [
        RuleId::AgeOver90,
        RuleId::AgeOver60,
        RuleId::AgeOver30,
        RuleId::Reposted,
        RuleId::ApplicantsOver1000,
        RuleId::ApplicantsOver500,
        RuleId::ApplicantsOver200,
        RuleId::SalaryNotListed,
        RuleId::SalaryHugeRange,
        RuleId::CompetitivePay,
        RuleId::DoeOnly,
        RuleId::NoCompanyInfo,
        RuleId::StaffingAgency,
        RuleId::HiringForClient,
        RuleId::EntryLevelSenior,
        RuleId::UnrealisticStack,
        RuleId::DescriptionTooShort,
        RuleId::NoTeamInfo,
        RuleId::NoSpecifics,
        RuleId::BuzzwordOverload,
        RuleId::FastPaced,
        RuleId::Family,
        RuleId::ManyHats,
        RuleId::SelfStarter,
        RuleId::UnlimitedPto,
        RuleId::GroundFloor,
        RuleId::Rockstar,
        RuleId::Hustle,
        RuleId::Urgent,
        RuleId::SalaryListed,
        RuleId::SpecificTeam,
        RuleId::RecentPost,
        RuleId::LowApplicants,
        RuleId::Benefits,
        RuleId::InterviewInfo,
        RuleId::HiringManager,
        RuleId::BlockedCompany,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::AgeOver90 => "age.over90Days",
            RuleId::AgeOver60 => "age.over60Days",
            RuleId::AgeOver30 => "age.over30Days",
            RuleId::Reposted => "age.reposted",
            RuleId::ApplicantsOver1000 => "applicants.over1000",
            RuleId::ApplicantsOver500 => "applicants.over500",
            RuleId::ApplicantsOver200 => "applicants.over200",
            RuleId::SalaryNotListed => "salary.notListed",
            RuleId::SalaryHugeRange => "salary.hugeRange",
            RuleId::CompetitivePay => "salary.competitivePay",
            RuleId::DoeOnly => "salary.doeOnly",
            RuleId::NoCompanyInfo => "company.noInfo",
            RuleId::StaffingAgency => "company.staffingAgency",
            RuleId::HiringForClient => "company.hiringForClient",
            RuleId::EntryLevelSenior => "requirements.entryLevelSenior",
            RuleId::UnrealisticStack => "requirements.unrealisticStack",
            RuleId::DescriptionTooShort => "description.tooShort",
            RuleId::NoTeamInfo => "description.noTeamInfo",
            RuleId::NoSpecifics => "description.noSpecifics",
            RuleId::BuzzwordOverload => "description.buzzwordOverload",
            RuleId::FastPaced => "redFlags.fastPaced",
            RuleId::Family => "redFlags.family",
            RuleId::ManyHats => "redFlags.manyHats",
            RuleId::SelfStarter => "redFlags.selfStarter",
            RuleId::UnlimitedPto => "redFlags.unlimitedPto",
            RuleId::GroundFloor => "redFlags.groundFloor",
            RuleId::Rockstar => "redFlags.rockstar",
            RuleId::Hustle => "redFlags.hustle",
            RuleId::Urgent => "redFlags.urgent",
            RuleId::SalaryListed => "goodSigns.salaryListed",
            RuleId::SpecificTeam => "goodSigns.specificTeam",
            RuleId::RecentPost => "goodSigns.recentPost",
            RuleId::LowApplicants => "goodSigns.lowApplicants",
            RuleId::Benefits => "goodSigns.benefits",
            RuleId::InterviewInfo => "goodSigns.interviewInfo",
            RuleId::HiringManager => "goodSigns.hiringManager",
            RuleId::BlockedCompany => "overrides.blockedCompany",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            RuleId::AgeOver90 | RuleId::AgeOver60 | RuleId::AgeOver30 | RuleId::Reposted => {
                Category::Age
            }
            RuleId::ApplicantsOver1000 | RuleId::ApplicantsOver500 | RuleId::ApplicantsOver200 => {
                Category::Applicants
            }
            RuleId::SalaryNotListed
            | RuleId::SalaryHugeRange
            | RuleId::CompetitivePay
            | RuleId::DoeOnly => Category::Salary,
            RuleId::NoCompanyInfo | RuleId::StaffingAgency | RuleId::HiringForClient => {
                Category::Company
            }
            RuleId::EntryLevelSenior | RuleId::UnrealisticStack => Category::Requirements,
            RuleId::DescriptionTooShort
            | RuleId::NoTeamInfo
            | RuleId::NoSpecifics
            | RuleId::BuzzwordOverload => Category::Description,
            RuleId::FastPaced
            | RuleId::Family
            | RuleId::ManyHats
            | RuleId::SelfStarter
            | RuleId::UnlimitedPto
            | RuleId::GroundFloor
            | RuleId::Rockstar
            | RuleId::Hustle
            | RuleId::Urgent => Category::RedFlags,
            RuleId::SalaryListed
            | RuleId::SpecificTeam
            | RuleId::RecentPost
            | RuleId::LowApplicants
            | RuleId::Benefits
            | RuleId::InterviewInfo
            | RuleId::HiringManager => Category::GoodSigns,
            RuleId::BlockedCompany => Category::Overrides,
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub points: i32,
    pub reason: String,
}

impl Rule {
    fn new(points: i32, reason: &str) -> Self {
        Self {
            points,
            reason: reason.to_string(),
        }
    }
}

/// Weighted rule registry keyed by [`RuleId`]. Read-only while scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleTable(BTreeMap<RuleId, Rule>);

impl RuleTable {
    /// The calibration shipped with the detector.
    pub fn standard() -> Self {
        let entries = [
            (RuleId::AgeOver90, Rule::new(30, "Posted 90+ days ago")),
            (RuleId::AgeOver60, Rule::new(20, "Posted 60+ days ago")),
            (RuleId::AgeOver30, Rule::new(10, "Posted 30+ days ago")),
            (RuleId::Reposted, Rule::new(15, "Reposted listing")),
            (
                RuleId::ApplicantsOver1000,
                Rule::new(25, "1000+ applicants but still open"),
            ),
            (RuleId::ApplicantsOver500, Rule::new(20, "500+ applicants")),
            (RuleId::ApplicantsOver200, Rule::new(10, "200+ applicants")),
            (RuleId::SalaryNotListed, Rule::new(15, "No salary listed")),
            (
                RuleId::SalaryHugeRange,
                Rule::new(15, "Salary range is $50K+ wide"),
            ),
            (
                RuleId::CompetitivePay,
                Rule::new(10, "\"Competitive salary\" usually means low"),
            ),
            (RuleId::DoeOnly, Rule::new(10, "DOE without any range")),
            (RuleId::NoCompanyInfo, Rule::new(20, "No company information")),
            (RuleId::StaffingAgency, Rule::new(10, "Staffing agency posting")),
            (
                RuleId::HiringForClient,
                Rule::new(15, "\"Hiring for client\" - less accountable"),
            ),
            (
                RuleId::EntryLevelSenior,
                Rule::new(25, "Entry level but wants 5+ years exp"),
            ),
            (
                RuleId::UnrealisticStack,
                Rule::new(20, "Wants 10+ different technologies"),
            ),
            (
                RuleId::DescriptionTooShort,
                Rule::new(15, "Description under 100 words"),
            ),
            (RuleId::NoTeamInfo, Rule::new(10, "No team or manager mentioned")),
            (RuleId::NoSpecifics, Rule::new(10, "No specific responsibilities")),
            (
                RuleId::BuzzwordOverload,
                Rule::new(15, "Too many buzzwords, no substance"),
            ),
            (RuleId::FastPaced, Rule::new(5, "\"Fast-paced\" = overworked")),
            (RuleId::Family, Rule::new(10, "\"Like a family\" = no boundaries")),
            (RuleId::ManyHats, Rule::new(10, "\"Wear many hats\" = understaffed")),
            (RuleId::SelfStarter, Rule::new(5, "\"Self-starter\" = no support")),
            (
                RuleId::UnlimitedPto,
                Rule::new(5, "\"Unlimited PTO\" usually means less"),
            ),
            (
                RuleId::GroundFloor,
                Rule::new(10, "\"Ground floor\" = low pay, high risk"),
            ),
            (RuleId::Rockstar, Rule::new(10, "\"Rockstar/Ninja\" = bad culture")),
            (RuleId::Hustle, Rule::new(10, "\"Hustle\" = burnout")),
            (
                RuleId::Urgent,
                Rule::new(15, "\"Urgent hire\" = desperation or fake"),
            ),
            (RuleId::SalaryListed, Rule::new(-10, "Salary listed")),
            (RuleId::SpecificTeam, Rule::new(-10, "Specific team mentioned")),
            (RuleId::RecentPost, Rule::new(-10, "Posted recently")),
            (RuleId::LowApplicants, Rule::new(-5, "Reasonable applicant count")),
            (RuleId::Benefits, Rule::new(-5, "Benefits detailed")),
            (RuleId::InterviewInfo, Rule::new(-5, "Interview process described")),
            (RuleId::HiringManager, Rule::new(-10, "Hiring manager named")),
            (RuleId::BlockedCompany, Rule::new(100, "Blocked company")),
        ];

        Self(entries.into_iter().collect())
    }

    pub fn get(&self, id: RuleId) -> Option<&Rule> {
        self.0.get(&id)
    }

    /// Replaces the weight of one rule, keeping its reason.
    pub fn with_points(mut self, id: RuleId, points: i32) -> Self {
        if let Some(rule) = self.0.get_mut(&id) {
            rule.points = points;
        }
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Named selection of enabled rules over a weight table.
///
/// Lets lighter and heavier detectors share one scoring engine: a profile
/// only decides which rules may fire and how much each is worth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub enabled: BTreeSet<RuleId>,
    pub rules: RuleTable,
}

impl Profile {
    pub const STANDARD: &'static str = "standard";
    pub const BASIC: &'static str = "basic";

    /// Every rule enabled.
    pub fn standard() -> Self {
        Self {
            name: Self::STANDARD.to_string(),
            enabled: RuleId::ALL.into_iter().collect(),
            rules: RuleTable::standard(),
        }
    }

    /// Posting age, applicant volume and salary presence only.
    pub fn basic() -> Self {
        let enabled = [
            RuleId::AgeOver90,
            RuleId::AgeOver60,
            RuleId::AgeOver30,
            RuleId::Reposted,
            RuleId::ApplicantsOver1000,
            RuleId::ApplicantsOver500,
            RuleId::ApplicantsOver200,
            RuleId::SalaryNotListed,
            RuleId::SalaryListed,
            RuleId::RecentPost,
            RuleId::LowApplicants,
            RuleId::BlockedCompany,
        ];

        Self {
            name: Self::BASIC.to_string(),
            enabled: enabled.into_iter().collect(),
            rules: RuleTable::standard(),
        }
    }

    /// Enables whole categories. The blocked-company override is always on.
    pub fn from_categories(name: impl Into<String>, categories: &[Category]) -> Self {
        let enabled = RuleId::ALL
            .into_iter()
            .filter(|id| id.category() == Category::Overrides || categories.contains(&id.category()))
            .collect();

        Self {
            name: name.into(),
            enabled,
            rules: RuleTable::standard(),
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            Self::STANDARD => Some(Self::standard()),
            Self::BASIC => Some(Self::basic()),
            _ => None,
        }
    }

    pub fn without_category(mut self, category: Category) -> Self {
        self.enabled.retain(|id| id.category() != category);
        self
    }

    pub fn with_rules(mut self, rules: RuleTable) -> Self {
        self.rules = rules;
        self
    }

    pub fn is_enabled(&self, id: RuleId) -> bool {
        self.enabled.contains(&id)
    }

    /// The rule for `id` when it is enabled and present in the table.
    pub fn rule(&self, id: RuleId) -> Option<&Rule> {
        if self.is_enabled(id) {
            self.rules.get(id)
        } else {
            None
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_covers_every_rule() {
        let table = RuleTable::standard();
        assert_eq!(table.len(), RuleId::ALL.len());
        for id in RuleId::ALL {
            assert!(table.get(id).is_some(), "missing {id}");
        }
    }

    #[test]
    fn good_signs_are_negative_and_red_flags_positive() {
        let table = RuleTable::standard();
        for id in RuleId::ALL {
            let points = table.get(id).unwrap().points;
            match id.category() {
                Category::GoodSigns => assert!(points < 0, "{id} should lower the score"),
                _ => assert!(points > 0, "{id} should raise the score"),
            }
        }
    }

    #[test]
    fn rule_id_serializes_as_dotted_key() {
        for id in RuleId::ALL {
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.as_str()));
        }
    }

    #[test]
    fn rule_table_round_trips_through_json() {
        let table = RuleTable::standard().with_points(RuleId::Reposted, 25);
        let json = serde_json::to_string(&table).unwrap();
        assert!(json.contains("\"age.reposted\":{\"points\":25"));

        let back: RuleTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn basic_profile_skips_text_analysis() {
        let basic = Profile::basic();
        assert!(basic.rule(RuleId::AgeOver90).is_some());
        assert!(basic.rule(RuleId::FastPaced).is_none());
        assert!(basic.rule(RuleId::DescriptionTooShort).is_none());
        assert!(basic.rule(RuleId::NoCompanyInfo).is_none());
    }

    #[test]
    fn category_profiles_keep_overrides() {
        let profile = Profile::from_categories("age-only", &[Category::Age]);
        assert!(profile.is_enabled(RuleId::AgeOver30));
        assert!(profile.is_enabled(RuleId::BlockedCompany));
        assert!(!profile.is_enabled(RuleId::SalaryNotListed));

        let trimmed = Profile::standard().without_category(Category::RedFlags);
        assert!(!trimmed.is_enabled(RuleId::Hustle));
        assert!(trimmed.is_enabled(RuleId::Reposted));
    }

    #[test]
    fn profiles_resolve_by_name() {
        assert_eq!(Profile::by_name("Standard"), Some(Profile::standard()));
        assert_eq!(Profile::by_name(" basic "), Some(Profile::basic()));
        assert_eq!(Profile::by_name("advanced"), None);
    }
}
