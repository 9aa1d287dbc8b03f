//! Pure decisions about what the content page shows after a submission. The browser layer only
//! executes a [`SubmitPlan`]; nothing here touches the DOM.

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::model::{SubmitOutcome, SubmitSummary};

pub const SUBMIT_FAILED: &str = "Submit failed.";
pub const SUBMIT_NETWORK_ERROR: &str = "Network error while submitting.";

/// Glyph that prefixes the nav score badges.
pub const BADGE_STAR: char = '\u{2605}';

/// Placement bonus tiers, keyed by the exact point value the server awards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementBonus {
    First,
    Second,
    Third,
    Hundred,
    Fifty,
}

impl PlacementBonus {
    pub const ALL: [PlacementBonus; 5] = [
        PlacementBonus::First,
        PlacementBonus::Second,
        PlacementBonus::Third,
        PlacementBonus::Hundred,
        PlacementBonus::Fifty,
    ];

    /// Only these exact values get a label; `499.6` is not `500`. Anything else renders no
    /// bonus note.
    pub fn from_points(points: f64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.points() as f64 == points)
    }

    pub fn points(self) -> i64 {
        match self {
            PlacementBonus::First => 500,
            PlacementBonus::Second => 300,
            PlacementBonus::Third => 150,
            PlacementBonus::Hundred => 100,
            PlacementBonus::Fifty => 50,
        }
    }

    /// Medal headline for the podium tiers.
    pub fn headline(self) -> Option<&'static str> {
        match self {
            PlacementBonus::First => Some("\u{1F947} First to solve!"),
            PlacementBonus::Second => Some("\u{1F948} Second to solve!"),
            PlacementBonus::Third => Some("\u{1F949} Third to solve!"),
            PlacementBonus::Hundred | PlacementBonus::Fifty => None,
        }
    }

    /// The emphasised part of the note.
    pub fn detail(self) -> String {
        match self.headline() {
            Some(_) => format!("(+{} bonus)", self.points()),
            None => format!("+{} placement bonus", self.points()),
        }
    }
}

/// Contents of the `submit-result` region.
#[derive(Clone, Debug, PartialEq)]
pub enum Panel {
    Sealed {
        base: f64,
        bonus: Option<PlacementBonus>,
    },
    Abandoned,
    Failed {
        message: String,
    },
}

/// A floating "+N" visual.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreFloat {
    pub points: f64,
    pub label: &'static str,
    pub delay_ms: u32,
}

impl ScoreFloat {
    pub fn text(&self) -> String {
        if self.label.is_empty() {
            format!("+{}", self.points)
        } else {
            format!("+{} {}", self.points, self.label)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redirect {
    pub url: String,
    pub delay_ms: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SubmitPlan {
    pub panel: Panel,
    pub floats: Vec<ScoreFloat>,
    pub badge_delta: Option<f64>,
    pub redirect: Option<Redirect>,
}

impl SubmitPlan {
    fn failed(message: impl Into<String>) -> Self {
        Self {
            panel: Panel::Failed {
                message: message.into(),
            },
            floats: Vec::new(),
            badge_delta: None,
            redirect: None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.panel, Panel::Failed { .. })
    }
}

/// Turns the result of a submit call into everything the page should do about it.
pub fn plan_submission(
    sent: bool,
    result: Result<SubmitOutcome, ClientError>,
    config: &ClientConfig,
) -> SubmitPlan {
    match result {
        Err(_) => SubmitPlan::failed(SUBMIT_NETWORK_ERROR),
        Ok(SubmitOutcome::Rejected { message }) => {
            SubmitPlan::failed(message.unwrap_or_else(|| SUBMIT_FAILED.to_string()))
        }
        Ok(SubmitOutcome::Accepted(summary)) => plan_accepted(sent, &summary, config),
    }
}

fn plan_accepted(sent: bool, summary: &SubmitSummary, config: &ClientConfig) -> SubmitPlan {
    let completed = summary.completed_or(sent);
    let base = summary.base_points();
    let bonus = summary.bonus();
    let total = summary.total();

    let panel = if completed {
        Panel::Sealed {
            base,
            bonus: PlacementBonus::from_points(bonus),
        }
    } else {
        Panel::Abandoned
    };

    let mut floats = Vec::new();
    if completed && base > 0.0 {
        floats.push(ScoreFloat {
            points: base,
            label: "pts",
            delay_ms: 0,
        });
    }
    // Delayed so the two floats don't overlap.
    if bonus > 0.0 {
        floats.push(ScoreFloat {
            points: bonus,
            label: "bonus!",
            delay_ms: config.bonus_float_delay_ms,
        });
    }

    let badge_delta = (completed && total > 0.0).then_some(total);

    let redirect = if summary.revealed {
        Some(Redirect {
            url: config.chapters_url(true),
            delay_ms: config.reveal_redirect_delay_ms,
        })
    } else if completed {
        Some(Redirect {
            url: config.chapters_url(false),
            delay_ms: config.chapters_redirect_delay_ms,
        })
    } else {
        None
    };

    SubmitPlan {
        panel,
        floats,
        badge_delta,
        redirect,
    }
}

/// Where a content page is in its submit cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    RedirectScheduled,
    /// Terminal until the user clicks again.
    Failed,
}

impl SubmissionState {
    pub fn settled(plan: &SubmitPlan) -> Self {
        if plan.is_failure() {
            SubmissionState::Failed
        } else if plan.redirect.is_some() {
            SubmissionState::RedirectScheduled
        } else {
            SubmissionState::Idle
        }
    }
}

/// Adds `delta` to whatever number a badge currently shows. Non-digits are stripped before
/// parsing and unparseable text counts as zero. A fractional delta is shown as is.
pub fn bump_badge_text(current: &str, delta: f64) -> String {
    let digits: String = current.chars().filter(|c| c.is_ascii_digit()).collect();
    let value = digits.parse::<f64>().unwrap_or(0.0);
    format!("{} {}", BADGE_STAR, value + delta)
}

/// Parses a `data-time-limit` value as whole seconds.
pub fn parse_time_limit(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|r| r.trim().parse::<u64>().ok())
}

/// Formats seconds as `MM:SS`. Minutes keep counting past 59.
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accepted(summary: SubmitSummary) -> Result<SubmitOutcome, ClientError> {
        Ok(SubmitOutcome::Accepted(summary))
    }

    fn completed_with_bonus(bonus: f64) -> SubmitSummary {
        SubmitSummary {
            completed: Some(true),
            chapter_points: Some(100.0),
            bonus_points: Some(bonus),
            ..SubmitSummary::default()
        }
    }

    fn sealed(bonus: Option<PlacementBonus>) -> Panel {
        Panel::Sealed { base: 100.0, bonus }
    }

    #[test]
    fn test_placement_labels_exact_values_only() {
        let config = ClientConfig::default();
        for (points, tier) in [
            (500.0, PlacementBonus::First),
            (300.0, PlacementBonus::Second),
            (150.0, PlacementBonus::Third),
            (100.0, PlacementBonus::Hundred),
            (50.0, PlacementBonus::Fifty),
        ] {
            let plan = plan_submission(true, accepted(completed_with_bonus(points)), &config);
            assert_eq!(plan.panel, sealed(Some(tier)));
        }

        // 200 is a real server value but has no label.
        let plan = plan_submission(true, accepted(completed_with_bonus(200.0)), &config);
        assert_eq!(plan.panel, sealed(None));
        assert!(plan.floats.iter().any(|f| f.points == 200.0));
    }

    #[test]
    fn test_fractional_bonus_is_not_rounded_into_a_tier() {
        let config = ClientConfig::default();
        let body = r#"{"ok": true, "completed": true, "chapter_points": 100,
                       "bonus_points": 499.6, "total_points": 599.6}"#;
        let plan = plan_submission(
            true,
            SubmitOutcome::from_json(body).map_err(ClientError::from),
            &config,
        );
        assert_eq!(plan.panel, sealed(None));
        assert_eq!(
            plan.floats[1],
            ScoreFloat {
                points: 499.6,
                label: "bonus!",
                delay_ms: 700
            }
        );
        assert_eq!(plan.floats[1].text(), "+499.6 bonus!");
        assert_eq!(plan.badge_delta, Some(599.6));

        assert_eq!(PlacementBonus::from_points(500.5), None);
        assert_eq!(PlacementBonus::from_points(49.999), None);
        assert_eq!(PlacementBonus::from_points(-500.0), None);
        assert_eq!(
            PlacementBonus::from_points(500.0),
            Some(PlacementBonus::First)
        );
    }

    #[test]
    fn test_fractional_base_is_shown_as_sent() {
        let config = ClientConfig::default();
        let body = r#"{"ok": true, "completed": true, "score": 85.6}"#;
        let plan = plan_submission(
            true,
            SubmitOutcome::from_json(body).map_err(ClientError::from),
            &config,
        );
        assert_eq!(
            plan.panel,
            Panel::Sealed {
                base: 85.6,
                bonus: None
            }
        );
        assert_eq!(plan.floats.len(), 1);
        assert_eq!(plan.floats[0].text(), "+85.6 pts");
    }

    #[test]
    fn test_placement_text() {
        let expected = [
            (
                PlacementBonus::First,
                Some("\u{1F947} First to solve!"),
                "(+500 bonus)",
            ),
            (
                PlacementBonus::Second,
                Some("\u{1F948} Second to solve!"),
                "(+300 bonus)",
            ),
            (
                PlacementBonus::Third,
                Some("\u{1F949} Third to solve!"),
                "(+150 bonus)",
            ),
            (PlacementBonus::Hundred, None, "+100 placement bonus"),
            (PlacementBonus::Fifty, None, "+50 placement bonus"),
        ];
        for (tier, headline, detail) in expected {
            assert_eq!(tier.headline(), headline, "{:?}", tier);
            assert_eq!(tier.detail(), detail, "{:?}", tier);
            assert_eq!(
                PlacementBonus::from_points(tier.points() as f64),
                Some(tier)
            );
        }
    }

    #[test]
    fn test_floats_are_staggered() {
        let config = ClientConfig::default();
        let plan = plan_submission(true, accepted(completed_with_bonus(300.0)), &config);
        assert_eq!(
            plan.floats,
            vec![
                ScoreFloat {
                    points: 100.0,
                    label: "pts",
                    delay_ms: 0
                },
                ScoreFloat {
                    points: 300.0,
                    label: "bonus!",
                    delay_ms: 700
                },
            ]
        );
        assert_eq!(plan.floats[0].text(), "+100 pts");
        assert_eq!(plan.floats[1].text(), "+300 bonus!");
    }

    #[test]
    fn test_no_bonus_float_without_bonus() {
        let config = ClientConfig::default();
        let mut absent = completed_with_bonus(0.0);
        absent.bonus_points = None;
        for summary in [completed_with_bonus(0.0), absent] {
            let plan = plan_submission(true, accepted(summary), &config);
            assert_eq!(plan.floats.len(), 1);
            assert_eq!(plan.panel, sealed(None));
        }
    }

    #[test]
    fn test_redirects() {
        let config = ClientConfig::default();

        let mut revealed = completed_with_bonus(0.0);
        revealed.revealed = true;
        let plan = plan_submission(true, accepted(revealed), &config);
        assert_eq!(
            plan.redirect,
            Some(Redirect {
                url: "/chapters?revealed=1".to_string(),
                delay_ms: 1800
            })
        );
        assert_eq!(
            SubmissionState::settled(&plan),
            SubmissionState::RedirectScheduled
        );

        let plan = plan_submission(true, accepted(completed_with_bonus(0.0)), &config);
        assert_eq!(
            plan.redirect,
            Some(Redirect {
                url: "/chapters".to_string(),
                delay_ms: 2200
            })
        );

        let abandoned = SubmitSummary {
            completed: Some(false),
            ..SubmitSummary::default()
        };
        let plan = plan_submission(false, accepted(abandoned), &config);
        assert_eq!(plan.panel, Panel::Abandoned);
        assert_eq!(plan.redirect, None);
        assert_eq!(plan.badge_delta, None);
        assert!(plan.floats.is_empty());
        assert_eq!(SubmissionState::settled(&plan), SubmissionState::Idle);
    }

    #[test]
    fn test_server_completion_flag_wins() {
        let config = ClientConfig::default();

        // Sent "completed" but the server says otherwise.
        let summary = SubmitSummary {
            completed: Some(false),
            chapter_points: Some(0.0),
            ..SubmitSummary::default()
        };
        let plan = plan_submission(true, accepted(summary), &config);
        assert_eq!(plan.panel, Panel::Abandoned);
        assert_eq!(plan.redirect, None);

        // Without an echo, the sent flag is used.
        let summary = SubmitSummary {
            chapter_points: Some(100.0),
            total_points: Some(100.0),
            ..SubmitSummary::default()
        };
        let plan = plan_submission(true, accepted(summary), &config);
        assert_eq!(plan.panel, sealed(None));
        assert_eq!(plan.badge_delta, Some(100.0));
    }

    #[test]
    fn test_badge_delta_uses_total() {
        let config = ClientConfig::default();
        let mut summary = completed_with_bonus(500.0);
        summary.total_points = Some(600.0);
        let plan = plan_submission(true, accepted(summary), &config);
        assert_eq!(plan.badge_delta, Some(600.0));

        // Missing total falls back to base + bonus.
        let plan = plan_submission(true, accepted(completed_with_bonus(50.0)), &config);
        assert_eq!(plan.badge_delta, Some(150.0));
    }

    #[test]
    fn test_failures_render_panel_only() {
        let config = ClientConfig::default();

        let plan = plan_submission(
            true,
            Err(ClientError::Transport("connection reset".to_string())),
            &config,
        );
        assert_eq!(
            plan.panel,
            Panel::Failed {
                message: SUBMIT_NETWORK_ERROR.to_string()
            }
        );
        assert!(plan.floats.is_empty());
        assert_eq!(plan.badge_delta, None);
        assert_eq!(plan.redirect, None);
        assert_eq!(SubmissionState::settled(&plan), SubmissionState::Failed);

        // A body that isn't JSON lands in the same place.
        let plan = plan_submission(
            true,
            SubmitOutcome::from_json("<html>").map_err(ClientError::from),
            &config,
        );
        assert_eq!(
            plan.panel,
            Panel::Failed {
                message: SUBMIT_NETWORK_ERROR.to_string()
            }
        );

        let plan = plan_submission(
            true,
            Ok(SubmitOutcome::Rejected {
                message: Some("Locked".to_string()),
            }),
            &config,
        );
        assert_eq!(
            plan.panel,
            Panel::Failed {
                message: "Locked".to_string()
            }
        );

        let plan = plan_submission(false, Ok(SubmitOutcome::Rejected { message: None }), &config);
        assert_eq!(
            plan.panel,
            Panel::Failed {
                message: SUBMIT_FAILED.to_string()
            }
        );
    }

    #[test]
    fn test_bump_badge_text() {
        assert_eq!(bump_badge_text("\u{2605} 120", 30.0), "\u{2605} 150");
        assert_eq!(bump_badge_text("Score: 1,200 pts", 5.0), "\u{2605} 1205");
        assert_eq!(bump_badge_text("", 40.0), "\u{2605} 40");
        assert_eq!(bump_badge_text("\u{2605} \u{2014}", 10.0), "\u{2605} 10");
        assert_eq!(bump_badge_text("\u{2605} 100", 0.5), "\u{2605} 100.5");
        // Reapplying the formatting is stable.
        let once = bump_badge_text("\u{2605} 0", 100.0);
        assert_eq!(bump_badge_text(&once, 0.0), once);
    }

    #[test]
    fn test_clock_formatting() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(600), "10:00");
        assert_eq!(format_clock(6000), "100:00");

        assert_eq!(parse_time_limit(Some("300")), Some(300));
        assert_eq!(parse_time_limit(Some(" 90 ")), Some(90));
        assert_eq!(parse_time_limit(Some("soon")), None);
        assert_eq!(parse_time_limit(Some("-5")), None);
        assert_eq!(parse_time_limit(None), None);
    }
}
