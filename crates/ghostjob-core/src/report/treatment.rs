//! How a scored card should be decorated.
//!
//! The engine decides what to show; the host page decides how to draw it.

use serde::{Deserialize, Serialize};

use crate::report::model::Assessment;
use crate::rules::classify::Verdict;
use crate::settings::DisplaySettings;

pub const GHOST_REASON_LIMIT: usize = 4;
pub const SUSPICIOUS_REASON_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardStyle {
    Ghost,
    Suspicious,
    Trusted,
    /// Removed from view.
    Hidden,
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Treatment {
    pub style: CardStyle,
    /// Score shown next to the card, if any.
    pub score_label: Option<u8>,
    pub reasons: Vec<String>,
    /// Offer trust/block buttons for the card's company.
    pub actions: bool,
}

impl Treatment {
    fn plain() -> Self {
        Self {
            style: CardStyle::Plain,
            score_label: None,
            reasons: vec![],
            actions: false,
        }
    }

    pub fn for_assessment(assessment: &Assessment, display: &DisplaySettings) -> Self {
        let highlight = display.highlight_mode;
        let top = |limit: usize| -> Vec<String> {
            if display.show_reasons {
                assessment.reasons.iter().take(limit).cloned().collect()
            } else {
                vec![]
            }
        };
        let actions = assessment.company_name.is_some();

        if assessment.is_trusted() {
            return Self {
                style: if highlight {
                    CardStyle::Trusted
                } else {
                    CardStyle::Plain
                },
                ..Self::plain()
            };
        }

        match assessment.verdict {
            Verdict::Ghost if !highlight => Self {
                style: CardStyle::Hidden,
                ..Self::plain()
            },
            Verdict::Ghost => Self {
                style: CardStyle::Ghost,
                score_label: Some(assessment.score),
                reasons: top(GHOST_REASON_LIMIT),
                actions,
            },
            Verdict::Suspicious if !highlight => Self::plain(),
            Verdict::Suspicious => Self {
                style: CardStyle::Suspicious,
                score_label: display.show_scores.then_some(assessment.score),
                reasons: top(SUSPICIOUS_REASON_LIMIT),
                actions,
            },
            Verdict::Clean => Self {
                score_label: (display.show_scores && highlight).then_some(assessment.score),
                ..Self::plain()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::eval::ListMatch;

    fn assessment(verdict: Verdict, score: u8, reasons: usize) -> Assessment {
        Assessment {
            verdict,
            score,
            reasons: (0..reasons).map(|i| format!("reason {i}")).collect(),
            company_name: Some("Acme".into()),
            list_match: None,
            forced_by: None,
        }
    }

    #[test]
    fn ghost_gets_badge_and_four_reasons() {
        let t = Treatment::for_assessment(&assessment(Verdict::Ghost, 80, 6), &DisplaySettings::default());
        assert_eq!(t.style, CardStyle::Ghost);
        assert_eq!(t.score_label, Some(80));
        assert_eq!(t.reasons.len(), 4);
        assert!(t.actions);
    }

    #[test]
    fn ghost_badge_shows_even_without_scores() {
        let display = DisplaySettings {
            show_scores: false,
            ..Default::default()
        };
        let t = Treatment::for_assessment(&assessment(Verdict::Ghost, 80, 1), &display);
        assert_eq!(t.score_label, Some(80));
    }

    #[test]
    fn suspicious_gets_three_reasons() {
        let t = Treatment::for_assessment(
            &assessment(Verdict::Suspicious, 40, 6),
            &DisplaySettings::default(),
        );
        assert_eq!(t.style, CardStyle::Suspicious);
        assert_eq!(t.reasons, vec!["reason 0", "reason 1", "reason 2"]);
    }

    #[test]
    fn highlight_off_hides_ghosts() {
        let display = DisplaySettings {
            highlight_mode: false,
            ..Default::default()
        };
        let ghost = Treatment::for_assessment(&assessment(Verdict::Ghost, 90, 3), &display);
        assert_eq!(ghost.style, CardStyle::Hidden);
        assert!(ghost.reasons.is_empty());

        let sus = Treatment::for_assessment(&assessment(Verdict::Suspicious, 40, 3), &display);
        assert_eq!(sus, Treatment::plain());
    }

    #[test]
    fn reasons_can_be_turned_off() {
        let display = DisplaySettings {
            show_reasons: false,
            ..Default::default()
        };
        let t = Treatment::for_assessment(&assessment(Verdict::Ghost, 90, 3), &display);
        assert!(t.reasons.is_empty());
    }

    #[test]
    fn trusted_cards_get_outline_only() {
        let mut a = assessment(Verdict::Clean, 0, 0);
        a.list_match = Some(ListMatch::Trusted);
        let t = Treatment::for_assessment(&a, &DisplaySettings::default());
        assert_eq!(t.style, CardStyle::Trusted);
        assert_eq!(t.score_label, None);
    }

    #[test]
    fn clean_shows_score_when_enabled() {
        let t = Treatment::for_assessment(&assessment(Verdict::Clean, 10, 1), &DisplaySettings::default());
        assert_eq!(t.style, CardStyle::Plain);
        assert_eq!(t.score_label, Some(10));
        assert!(!t.actions);
    }

    #[test]
    fn actions_need_a_company() {
        let mut a = assessment(Verdict::Ghost, 90, 1);
        a.company_name = None;
        assert!(!Treatment::for_assessment(&a, &DisplaySettings::default()).actions);
    }
}
