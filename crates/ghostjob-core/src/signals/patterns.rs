//! Compiled patterns and fixed vocabularies used by the extractors.
//!
//! Every regex here is a literal that is known to compile, so the `expect`
//! calls can only fire on a programming error in this file.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::rules::catalog::RuleId;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static listing pattern")
}

/// Relative posting-time units, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AgeUnit {
    Minutes,
    Hours,
    Today,
    Yesterday,
    Days,
    Weeks,
    Months,
}

pub(crate) static AGE_PATTERNS: Lazy<Vec<(Regex, AgeUnit)>> = Lazy::new(|| {
    vec![
        (compile(r"(?i)(\d+)\s*(?:minute|min)s?\s*ago"), AgeUnit::Minutes),
        (compile(r"(?i)(\d+)\s*(?:hour|hr)s?\s*ago"), AgeUnit::Hours),
        (compile(r"(?i)\b(?:just now|today)\b"), AgeUnit::Today),
        (compile(r"(?i)\byesterday\b"), AgeUnit::Yesterday),
        (compile(r"(?i)(\d+)\+?\s*days?\s*ago"), AgeUnit::Days),
        (compile(r"(?i)(\d+)\+?\s*(?:week|wk)s?\s*ago"), AgeUnit::Weeks),
        (compile(r"(?i)(\d+)\+?\s*(?:month|mo)s?\s*ago"), AgeUnit::Months),
    ]
});

pub(crate) static REPOST: Lazy<Regex> = Lazy::new(|| compile(r"(?i)repost"));

pub(crate) static APPLICANT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        compile(r"(?i)(\d{1,3}(?:,\d{3})+|\d+)\+?\s*applicants?"),
        compile(r"(?i)over\s*(\d{1,3}(?:,\d{3})+|\d+)\s*applicants?"),
    ]
});

/// `$85,000 - $95,000`, `$120k to $140k`, `$45`.
pub(crate) static SALARY: Lazy<Regex> = Lazy::new(|| {
    compile(
        r"(?i)\$\s*(\d[\d,]*)(?:\.\d+)?(k\b)?(?:\s*(?:-|–|—|to)\s*\$?\s*(\d[\d,]*)(?:\.\d+)?(k\b)?)?",
    )
});

pub(crate) static COMPETITIVE_PAY: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)competitive\s+(?:salary|pay|compensation)"));

/// Matched against the original text: lowercase "doe" is too often a surname.
pub(crate) static DOE: Lazy<Regex> =
    Lazy::new(|| compile(r"\bD\.?O\.?E\b|(?i:depends on experience)"));

pub(crate) static FOR_CLIENT: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)hiring for (?:a |our )?client|confidential client"));

/// Structural lookups for the company name, first hit wins.
pub const COMPANY_SELECTORS: &[&str] = &[
    ".job-card-container__company-name",
    ".company-name",
    "[data-testid=\"company-name\"]",
    ".employer-name",
    "[class*=\"company\"]",
    "[class*=\"Company\"]",
    "[class*=\"employer\"]",
    "[data-company]",
];

pub const STAFFING_AGENCIES: &[&str] = &[
    "robert half",
    "randstad",
    "adecco",
    "manpower",
    "kelly services",
    "apex systems",
    "tek systems",
    "insight global",
    "cybercoders",
    "kforce",
    "modis",
    "aerotek",
    "beacon hill",
    "staffing",
    "recruiting",
];

pub(crate) static ENTRY_LEVEL: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?i)entry[- ]?level|\bjunior\b|\bassociate\b|\bnew grad|0-2 years")
});

pub(crate) static YEARS_REQUIRED: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)(\d+)\+?\s*(?:years?|yrs?)(?:\s*of)?\s*(?:experience|exp)\b"));

pub(crate) static TECH_KEYWORDS: Lazy<Regex> = Lazy::new(|| {
    compile(
        r"(?i)\b(python|java|javascript|typescript|react|angular|vue|node|sql|aws|azure|gcp|docker|kubernetes|terraform|git|agile|scrum|linux|graphql|mongodb|postgresql|redis|kafka|jenkins)\b",
    )
});

pub(crate) static TEAM_MENTION: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)team of|reporting to|\bmanager\b|join our \w+ team"));

pub(crate) static SPECIFICS: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)you will|you'll|responsibilities include|working on"));

pub(crate) static INTERVIEW_INFO: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)interview|screening|hiring process"));

pub(crate) static MANAGER_NAMED: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?i)hiring manager|recruiter:|posted by|reporting to|\breports? to\b")
});

pub(crate) static BENEFITS: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?i)401\(?k\)?|\bhealth\b|\bdental\b|\bvision\b|\bpto\b|\bremote\b|\bhybrid\b|benefits include")
});

pub(crate) static BUZZWORDS: Lazy<Regex> = Lazy::new(|| {
    compile(
        r"(?i)\b(synergy|leverage|innovative|dynamic|passionate|driven|proactive|stakeholder|bandwidth|scalable|robust|disrupt|paradigm)\b",
    )
});

/// Red-flag phrases, evaluated against lowercased text in this order.
pub(crate) static RED_FLAG_PATTERNS: Lazy<Vec<(Regex, RuleId)>> = Lazy::new(|| {
    vec![
        (compile(r"fast[- ]?paced"), RuleId::FastPaced),
        (compile(r"like a family|we(?:'re| are) family"), RuleId::Family),
        (compile(r"wear many hats"), RuleId::ManyHats),
        (compile(r"self[- ]?starter"), RuleId::SelfStarter),
        (
            compile(r"unlimited (?:pto|paid time off|vacation)"),
            RuleId::UnlimitedPto,
        ),
        (
            compile(r"ground[- ]?floor|early[- ]?stage startup"),
            RuleId::GroundFloor,
        ),
        (compile(r"rock\s?star|ninja|guru|wizard"), RuleId::Rockstar),
        (compile(r"hustle|grind"), RuleId::Hustle),
        (
            compile(r"immediate(?:ly)? (?:hire|start)|urgent(?:ly)? (?:hiring|need)"),
            RuleId::Urgent,
        ),
    ]
});
