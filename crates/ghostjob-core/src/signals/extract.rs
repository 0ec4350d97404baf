use std::collections::BTreeSet;

use crate::rules::catalog::RuleId;
use crate::signals::model::*;
use crate::signals::patterns::{self, AgeUnit};

/// Answers "what text sits under this selector?" for one listing card.
///
/// This is the only structural capability the extractors need, which keeps
/// them independent of any concrete rendering tree. Closures work directly:
///
/// ```
/// use ghostjob_core::signals::extract::{extract_company, NameLookup};
///
/// let lookup = |sel: &str| (sel == ".company-name").then(|| "Acme Corp".to_string());
/// let info = extract_company("Software Engineer", Some(&lookup as &dyn NameLookup));
/// assert_eq!(info.name.as_deref(), Some("Acme Corp"));
/// ```
pub trait NameLookup {
    fn text_at(&self, selector: &str) -> Option<String>;
}

impl<F> NameLookup for F
where
    F: Fn(&str) -> Option<String>,
{
    fn text_at(&self, selector: &str) -> Option<String> {
        self(selector)
    }
}

/// Runs every extractor over one listing.
///
/// Never fails: a signal that cannot be found is recorded as absent.
pub fn extract_bundle(text: &str, lookup: Option<&dyn NameLookup>) -> SignalBundle {
    let age = extract_age(text);
    let raw_text_lower = text.to_lowercase();

    SignalBundle {
        age_days: age.days,
        reposted: age.reposted,
        applicant_count: extract_applicants(text),
        salary: extract_salary(text),
        company: extract_company(text, lookup),
        requirements: extract_requirements(text),
        description: extract_description(text),
        red_flags: match_red_flags(&raw_text_lower),
        raw_text_lower,
    }
}

/// Posting age in days plus an independent repost marker.
pub fn extract_age(text: &str) -> AgeInfo {
    let reposted = patterns::REPOST.is_match(text);

    for (regex, unit) in patterns::AGE_PATTERNS.iter() {
        let Some(caps) = regex.captures(text) else {
            continue;
        };
        let count = || caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok());

        let days = match unit {
            AgeUnit::Minutes | AgeUnit::Hours | AgeUnit::Today => Some(0),
            AgeUnit::Yesterday => Some(1),
            AgeUnit::Days => count(),
            AgeUnit::Weeks => count().and_then(|n| n.checked_mul(7)),
            AgeUnit::Months => count().and_then(|n| n.checked_mul(30)),
        };

        // An unparseable count falls through to the next phrase.
        if days.is_some() {
            return AgeInfo { days, reposted };
        }
    }

    AgeInfo {
        days: None,
        reposted,
    }
}

pub fn extract_applicants(text: &str) -> Option<u32> {
    patterns::APPLICANT_PATTERNS.iter().find_map(|regex| {
        let caps = regex.captures(text)?;
        caps.get(1)?.as_str().replace(',', "").parse::<u32>().ok()
    })
}

pub fn extract_salary(text: &str) -> SalaryInfo {
    if let Some(caps) = patterns::SALARY.captures(text) {
        let amount = |digits: usize, suffix: usize| -> Option<u64> {
            let base = caps
                .get(digits)?
                .as_str()
                .replace(',', "")
                .parse::<u64>()
                .ok()?;
            if caps.get(suffix).is_some() {
                base.checked_mul(1_000)
            } else {
                Some(base)
            }
        };

        let low = amount(1, 2);
        let high = amount(3, 4);
        let range_width = match (low, high) {
            (Some(lo), Some(hi)) => Some(lo.abs_diff(hi)),
            _ => None,
        };

        return SalaryInfo {
            listed: true,
            low,
            high,
            range_width,
            competitive_phrase: false,
            doe_only: false,
        };
    }

    SalaryInfo {
        listed: false,
        competitive_phrase: patterns::COMPETITIVE_PAY.is_match(text),
        doe_only: patterns::DOE.is_match(text),
        ..Default::default()
    }
}

pub fn extract_company(text: &str, lookup: Option<&dyn NameLookup>) -> CompanyInfo {
    let name = lookup.and_then(|lookup| {
        patterns::COMPANY_SELECTORS.iter().find_map(|selector| {
            let found = lookup.text_at(selector)?;
            let trimmed = found.trim();
            let len = trimmed.chars().count();
            (2..=100).contains(&len).then(|| trimmed.to_string())
        })
    });

    let text_lower = text.to_lowercase();
    let name_lower = name.as_deref().map(str::to_lowercase).unwrap_or_default();
    let is_staffing_agency = patterns::STAFFING_AGENCIES
        .iter()
        .any(|agency| text_lower.contains(agency) || name_lower.contains(agency));

    CompanyInfo {
        name,
        is_staffing_agency,
        for_client: patterns::FOR_CLIENT.is_match(text),
    }
}

pub fn extract_requirements(text: &str) -> RequirementInfo {
    let max_years_required = patterns::YEARS_REQUIRED
        .captures_iter(text)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
        .max()
        .unwrap_or(0);

    let techs: BTreeSet<String> = patterns::TECH_KEYWORDS
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect();

    RequirementInfo {
        is_entry_level: patterns::ENTRY_LEVEL.is_match(text),
        max_years_required,
        distinct_tech_count: techs.len() as u32,
    }
}

pub fn extract_description(text: &str) -> DescriptionInfo {
    DescriptionInfo {
        word_count: text.split_whitespace().count() as u32,
        has_team_mention: patterns::TEAM_MENTION.is_match(text),
        has_specifics: patterns::SPECIFICS.is_match(text),
        has_interview_info: patterns::INTERVIEW_INFO.is_match(text),
        has_manager_name: patterns::MANAGER_NAMED.is_match(text),
        has_benefits: patterns::BENEFITS.is_match(text),
        buzzword_count: patterns::BUZZWORDS.find_iter(text).count() as u32,
    }
}

/// Every red-flag key whose phrase occurs in `text_lower`. Not exclusive.
pub fn match_red_flags(text_lower: &str) -> Vec<RuleId> {
    patterns::RED_FLAG_PATTERNS
        .iter()
        .filter(|(regex, _)| regex.is_match(text_lower))
        .map(|(_, key)| *key)
        .collect()
}
