//! Listing card discovery over an abstract rendered page.

pub mod scheduler;

use std::collections::HashSet;

use crate::signals::extract::NameLookup;

/// Cards must exceed this size on both axes to be scored.
pub const MIN_CARD_PX: u32 = 50;

const LINKEDIN: &[&str] = &[
    ".job-card-container",
    ".jobs-search-results__list-item",
    "[data-job-id]",
    ".scaffold-layout__list-item",
];
const INDEED: &[&str] = &[
    ".job_seen_beacon",
    ".jobsearch-ResultsList > li",
    "[data-jk]",
    ".result",
];
const GLASSDOOR: &[&str] = &[
    "[data-test=\"jobListing\"]",
    ".react-job-listing",
    "li[data-id]",
];
const ZIPRECRUITER: &[&str] = &[".job_result", "[data-job-id]"];
const GENERIC: &[&str] = &[
    "[class*=\"job-card\"]",
    "[class*=\"job-listing\"]",
    "[data-job-id]",
];

/// A rendered listing card.
pub trait CardNode: NameLookup {
    /// Stable identity of the underlying node. Two selectors matching the
    /// same node yield the same key.
    fn key(&self) -> u64;
    /// Concatenated visible text.
    fn text(&self) -> String;
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn is_visible(&self) -> bool {
        self.width() > MIN_CARD_PX && self.height() > MIN_CARD_PX
    }
}

/// Read access to the page hosting the listings.
pub trait Page {
    type Card: CardNode;

    fn hostname(&self) -> &str;
    fn query_all(&self, selector: &str) -> Vec<Self::Card>;
}

/// Card selectors for a job board, falling back to generic ones.
pub fn selectors_for_host(hostname: &str) -> &'static [&'static str] {
    let host = hostname.to_ascii_lowercase();
    if host.contains("linkedin") {
        LINKEDIN
    } else if host.contains("indeed") {
        INDEED
    } else if host.contains("glassdoor") {
        GLASSDOOR
    } else if host.contains("ziprecruiter") {
        ZIPRECRUITER
    } else {
        GENERIC
    }
}

/// Every visible card on the page, each node once, in discovery order.
pub fn find_cards<P: Page>(page: &P) -> Vec<P::Card> {
    let mut seen = HashSet::new();
    let mut cards = Vec::new();

    for selector in selectors_for_host(page.hostname()) {
        for card in page.query_all(selector) {
            if card.is_visible() && seen.insert(card.key()) {
                cards.push(card);
            }
        }
    }

    tracing::debug!(host = page.hostname(), count = cards.len(), "cards discovered");
    cards
}
