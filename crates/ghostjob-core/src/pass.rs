//! Full rescoring passes over the cards of a page.

use std::time::Instant;

use crate::page::scheduler::{RescanScheduler, Trigger};
use crate::page::{CardNode, Page, find_cards};
use crate::report::model::{Assessment, PassStats};
use crate::report::treatment::Treatment;
use crate::rules::classify::classify_result;
use crate::rules::eval::{ScoreResult, score};
use crate::settings::{DisplaySettings, ScanContext, Settings};
use crate::signals::extract::{NameLookup, extract_bundle};
use crate::signals::model::SignalBundle;

/// Draws results onto the page.
pub trait Presenter<C> {
    /// Removes every decoration left by the previous pass.
    fn clear(&mut self);
    fn present(&mut self, card: &C, assessment: &Assessment, treatment: &Treatment);
}

/// Everything produced while assessing one listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub signals: SignalBundle,
    pub result: ScoreResult,
    pub assessment: Assessment,
}

/// Extracts, scores and classifies one listing.
pub fn assess(text: &str, lookup: Option<&dyn NameLookup>, ctx: &ScanContext) -> Evaluation {
    let signals = extract_bundle(text, lookup);
    let result = score(&signals, &ctx.profile, &ctx.lists);
    let verdict = classify_result(&result, ctx.threshold);
    let (verdict, forced_by) = ctx.filters.apply(verdict, &signals, &result);
    let assessment = Assessment::new(&result, verdict, forced_by);

    tracing::debug!(
        score = result.score,
        verdict = %assessment.verdict,
        company = ?result.company_name,
        "listing scored"
    );

    Evaluation {
        signals,
        result,
        assessment,
    }
}

/// Owns the scan configuration and rescan timing for one page.
#[derive(Debug)]
pub struct Scanner {
    enabled: bool,
    ctx: ScanContext,
    display: DisplaySettings,
    scheduler: RescanScheduler,
    last: PassStats,
}

impl Scanner {
    pub fn new(settings: &Settings) -> Self {
        Self {
            enabled: settings.enabled,
            ctx: settings.scan_context(),
            display: settings.display,
            scheduler: RescanScheduler::new(),
            last: PassStats::default(),
        }
    }

    /// Picks up changed settings, e.g. after a list edit.
    pub fn update(&mut self, settings: &Settings) {
        self.enabled = settings.enabled;
        self.ctx = settings.scan_context();
        self.display = settings.display;
    }

    pub fn context(&self) -> &ScanContext {
        &self.ctx
    }

    pub fn last_stats(&self) -> PassStats {
        self.last
    }

    pub fn notify(&mut self, trigger: Trigger, now: Instant) -> bool {
        self.scheduler.notify(trigger, now)
    }

    /// Runs a pass if the debounce deadline has passed.
    pub fn tick<P, R>(&mut self, now: Instant, page: &P, presenter: &mut R) -> Option<PassStats>
    where
        P: Page,
        R: Presenter<P::Card>,
    {
        if self.scheduler.poll(now) {
            self.run_pass(page, presenter)
        } else {
            None
        }
    }

    /// Rescores every card on the page. Returns `None` when disabled or
    /// when a pass is already in progress.
    pub fn run_pass<P, R>(&mut self, page: &P, presenter: &mut R) -> Option<PassStats>
    where
        P: Page,
        R: Presenter<P::Card>,
    {
        if !self.enabled {
            return None;
        }
        if self.scheduler.start_pass().is_err() {
            tracing::debug!("pass already running, skipped");
            return None;
        }

        presenter.clear();
        let mut stats = PassStats::default();

        for card in find_cards(page) {
            let text = card.text();
            let eval = assess(&text, Some(&card as &dyn NameLookup), &self.ctx);
            stats.record(eval.assessment.verdict);

            let treatment = Treatment::for_assessment(&eval.assessment, &self.display);
            presenter.present(&card, &eval.assessment, &treatment);
        }

        self.scheduler.finish_pass();
        self.last = stats;

        tracing::info!(
            total = stats.total,
            flagged = stats.flagged,
            suspicious = stats.suspicious,
            clean = stats.clean,
            "pass complete"
        );
        Some(stats)
    }
}
