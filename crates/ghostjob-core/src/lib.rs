pub mod error;
pub mod lists;
pub mod page;
pub mod pass;
pub mod report;
pub mod rules;
pub mod settings;
pub mod signals;
pub mod util;

use std::path::Path;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

use crate::report::model::{ListingHash, ListingInfo, Report, RulesCatalogInfo, ToolInfo};
use crate::settings::ScanContext;
use crate::signals::extract::NameLookup;

pub use crate::pass::{Evaluation, assess};

pub const TOOL_NAME: &str = "ghostjob";

/// JSON schema version of ghostjob reports.
/// Bumped only when the report layout changes semantically.
pub const SCHEMA_VERSION: &str = "0.1.0";

pub const RULE_CATALOG_VERSION: &str = "1.0.0";

/// Scores listing text and wraps the result in a report.
pub fn scan_text(
    text: &str,
    path: Option<String>,
    lookup: Option<&dyn NameLookup>,
    tool: ToolInfo,
    ctx: &ScanContext,
) -> Report {
    let eval = assess(text, lookup, ctx);

    let listing = ListingInfo {
        path,
        size_bytes: text.len() as u64,
        word_count: eval.signals.description.word_count,
        hash: ListingHash {
            algorithm: "sha256".to_string(),
            value: hex::encode(Sha256::digest(text.as_bytes())),
        },
    };

    let catalog = RulesCatalogInfo {
        catalog_version: RULE_CATALOG_VERSION.to_string(),
        profile: ctx.profile.name.clone(),
        threshold: ctx.threshold.get(),
    };

    Report::new(
        tool,
        listing,
        eval.signals,
        catalog,
        eval.result.triggered,
        eval.assessment,
    )
}

/// Reads a listing from disk and scores it.
///
/// `company` stands in for the structural company lookup a rendered card
/// would provide.
pub fn scan_file(
    path: &Path,
    company: Option<&str>,
    tool: ToolInfo,
    ctx: &ScanContext,
) -> Result<Report> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read listing {}", path.display()))?;

    let lookup = |_: &str| company.map(str::to_string);
    let lookup = company.is_some().then_some(&lookup as &dyn NameLookup);

    Ok(scan_text(
        &text,
        Some(path.display().to_string()),
        lookup,
        tool,
        ctx,
    ))
}
