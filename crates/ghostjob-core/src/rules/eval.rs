use serde::{Deserialize, Serialize};

use crate::lists::ListStore;
use crate::rules::catalog::{Profile, RuleId};
use crate::signals::model::SignalBundle;

pub const MIN_SCORE: i32 = 0;
pub const MAX_SCORE: i32 = 100;

/// A rule that fired for one listing, with the points it contributed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggeredRule {
    pub rule_id: RuleId,
    pub points: i32,
    pub reason: String,
}

/// Which company list short-circuited scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListMatch {
    Trusted,
    Blocked,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Clamped to `[0, 100]`.
    pub score: u8,
    /// Reason strings in evaluation order. Duplicates are kept.
    pub reasons: Vec<String>,
    pub triggered: Vec<TriggeredRule>,
    pub company_name: Option<String>,
    pub list_match: Option<ListMatch>,
}

/// Running total for one scoring pass.
struct Tally<'a> {
    profile: &'a Profile,
    total: i32,
    triggered: Vec<TriggeredRule>,
}

impl<'a> Tally<'a> {
    fn new(profile: &'a Profile) -> Self {
        Self {
            profile,
            total: 0,
            triggered: Vec::new(),
        }
    }

    /// Applies `id` when `cond` holds and the profile enables it.
    fn apply(&mut self, cond: bool, id: RuleId) {
        if !cond {
            return;
        }
        if let Some(rule) = self.profile.rule(id) {
            self.total = self.total.saturating_add(rule.points);
            self.triggered.push(TriggeredRule {
                rule_id: id,
                points: rule.points,
                reason: rule.reason.clone(),
            });
        }
    }

    fn finish(self, company_name: Option<String>) -> ScoreResult {
        ScoreResult {
            score: self.total.clamp(MIN_SCORE, MAX_SCORE) as u8,
            reasons: self.triggered.iter().map(|t| t.reason.clone()).collect(),
            triggered: self.triggered,
            company_name,
            list_match: None,
        }
    }
}

/// Scores one listing.
///
/// Trusted companies short-circuit to 0 and blocked companies to 100 before
/// any rule runs. Otherwise every enabled rule is evaluated in a fixed order;
/// the order only shapes `reasons`, never the total.
pub fn score(bundle: &SignalBundle, profile: &Profile, lists: &ListStore) -> ScoreResult {
    let company_name = bundle.company.name.clone();

    if let Some(name) = company_name.as_deref() {
        if lists.trusts(name) {
            return ScoreResult {
                score: MIN_SCORE as u8,
                reasons: vec![],
                triggered: vec![],
                company_name,
                list_match: Some(ListMatch::Trusted),
            };
        }

        if lists.blocks(name) {
            let reason = profile
                .rules
                .get(RuleId::BlockedCompany)
                .map(|r| r.reason.clone())
                .unwrap_or_else(|| "Blocked company".to_string());
            return ScoreResult {
                score: MAX_SCORE as u8,
                reasons: vec![reason.clone()],
                triggered: vec![TriggeredRule {
                    rule_id: RuleId::BlockedCompany,
                    points: MAX_SCORE,
                    reason,
                }],
                company_name,
                list_match: Some(ListMatch::Blocked),
            };
        }
    }

    let mut tally = Tally::new(profile);

    if let Some(days) = bundle.age_days {
        if days >= 90 {
            tally.apply(true, RuleId::AgeOver90);
        } else if days >= 60 {
            tally.apply(true, RuleId::AgeOver60);
        } else if days >= 30 {
            tally.apply(true, RuleId::AgeOver30);
        } else if days < 7 {
            tally.apply(true, RuleId::RecentPost);
        }
    }
    tally.apply(bundle.reposted, RuleId::Reposted);

    if let Some(count) = bundle.applicant_count {
        if count >= 1000 {
            tally.apply(true, RuleId::ApplicantsOver1000);
        } else if count >= 500 {
            tally.apply(true, RuleId::ApplicantsOver500);
        } else if count >= 200 {
            tally.apply(true, RuleId::ApplicantsOver200);
        } else if count < 50 {
            tally.apply(true, RuleId::LowApplicants);
        }
    }

    let salary = &bundle.salary;
    if salary.listed {
        tally.apply(true, RuleId::SalaryListed);
        tally.apply(
            salary.range_width.is_some_and(|w| w > 50_000),
            RuleId::SalaryHugeRange,
        );
    } else {
        tally.apply(true, RuleId::SalaryNotListed);
    }
    tally.apply(salary.competitive_phrase, RuleId::CompetitivePay);
    tally.apply(salary.doe_only, RuleId::DoeOnly);

    let company = &bundle.company;
    tally.apply(company.name.is_none(), RuleId::NoCompanyInfo);
    tally.apply(company.is_staffing_agency, RuleId::StaffingAgency);
    tally.apply(company.for_client, RuleId::HiringForClient);

    let reqs = &bundle.requirements;
    tally.apply(
        reqs.is_entry_level && reqs.max_years_required >= 5,
        RuleId::EntryLevelSenior,
    );
    tally.apply(reqs.distinct_tech_count >= 10, RuleId::UnrealisticStack);

    // An empty fragment carries no description to judge.
    let desc = &bundle.description;
    if desc.word_count > 0 {
        tally.apply(desc.word_count < 100, RuleId::DescriptionTooShort);
        tally.apply(!desc.has_team_mention, RuleId::NoTeamInfo);
        tally.apply(!desc.has_specifics, RuleId::NoSpecifics);
        tally.apply(desc.buzzword_count >= 5, RuleId::BuzzwordOverload);

        tally.apply(desc.has_team_mention, RuleId::SpecificTeam);
        tally.apply(desc.has_interview_info, RuleId::InterviewInfo);
        tally.apply(desc.has_manager_name, RuleId::HiringManager);
        tally.apply(desc.has_benefits, RuleId::Benefits);
    }

    for flag in &bundle.red_flags {
        tally.apply(true, *flag);
    }

    tally.finish(company_name)
}
