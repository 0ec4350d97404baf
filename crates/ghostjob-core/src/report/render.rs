use crate::TOOL_NAME;
use crate::report::model::Report;

pub fn render_text(report: &Report) -> String {
    let a = &report.assessment;
    let mut out = String::new();

    out.push_str(&format!("{} {}\n", TOOL_NAME, report.tool.version));
    if let Some(path) = &report.listing.path {
        out.push_str(&format!("Listing: {path}\n"));
    }
    out.push_str(&format!("Words: {}\n", report.listing.word_count));
    out.push_str(&format!(
        "Company: {}\n",
        a.company_name.as_deref().unwrap_or("(unknown)")
    ));
    out.push_str(&format!(
        "Verdict: {} (score {}/100, threshold {})\n",
        a.verdict, a.score, report.rules.catalog.threshold
    ));
    if let Some(m) = a.list_match {
        out.push_str(&format!("List match: {m:?}\n"));
    }
    if let Some(filter) = &a.forced_by {
        out.push_str(&format!("Forced by filter: {filter}\n"));
    }

    out.push_str("Triggered rules:\n");
    for r in &report.rules.triggered {
        out.push_str(&format!("  - {} [{:+}] {}\n", r.rule_id, r.points, r.reason));
    }
    out
}
