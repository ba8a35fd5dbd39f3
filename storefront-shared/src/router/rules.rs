//! Redirect rules as an explicit table.
//!
//! Page rules are ordered and the first one that matches decides; the
//! selection rule is evaluated on its own after them.

use strum_macros::{Display, EnumIter};

use super::Page;

/// The facts a rule may look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteFacts {
    pub ready: bool,
    pub signed_in: bool,
    pub page: Page,
    pub has_selection: bool,
}

/// What a matching rule asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Stop evaluating page rules; keep the current page.
    Hold,
    Redirect(Page),
    ClearSelection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Rule {
    HoldUntilReady,
    RequireSignIn,
    LeaveAuthWhenSignedIn,
    RequireSelection,
    ClearStaleSelection,
}

/// Evaluated in order, first match wins.
pub const PAGE_RULES: [Rule; 4] = [
    Rule::HoldUntilReady,
    Rule::RequireSignIn,
    Rule::LeaveAuthWhenSignedIn,
    Rule::RequireSelection,
];

/// Evaluated after the page rules regardless of their result.
pub const SELECTION_RULES: [Rule; 1] = [Rule::ClearStaleSelection];

impl Rule {
    /// `Some` when the rule's guard holds for `facts`.
    pub const fn evaluate(self, facts: &RouteFacts) -> Option<Outcome> {
        match self {
            Self::HoldUntilReady if !facts.ready => Some(Outcome::Hold),
            Self::RequireSignIn if !facts.signed_in && !facts.page.allows_anonymous() => {
                Some(Outcome::Redirect(Page::Auth))
            }
            Self::LeaveAuthWhenSignedIn if facts.signed_in && matches!(facts.page, Page::Auth) => {
                Some(Outcome::Redirect(Page::Products))
            }
            Self::RequireSelection if matches!(facts.page, Page::Details) && !facts.has_selection => {
                Some(Outcome::Redirect(Page::History))
            }
            Self::ClearStaleSelection
                if !matches!(facts.page, Page::Details) && facts.has_selection =>
            {
                Some(Outcome::ClearSelection)
            }
            _ => None,
        }
    }
}

/// Result of one pass over the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Decision {
    pub redirect: Option<Page>,
    pub clear_selection: bool,
}

impl Decision {
    pub const fn is_stable(&self) -> bool {
        self.redirect.is_none() && !self.clear_selection
    }
}

/// One pass over the table for `facts`.
///
/// The selection rule sees the page the redirect leads to, so a redirect
/// away from `details` clears the selection in the same pass.
pub fn decide(facts: &RouteFacts) -> Decision {
    let redirect = PAGE_RULES
        .iter()
        .find_map(|rule| rule.evaluate(facts))
        .and_then(|outcome| match outcome {
            Outcome::Redirect(page) if page != facts.page => Some(page),
            _ => None,
        });

    let after = RouteFacts {
        page: redirect.unwrap_or(facts.page),
        ..*facts
    };
    let clear_selection = SELECTION_RULES
        .iter()
        .any(|rule| rule.evaluate(&after) == Some(Outcome::ClearSelection));

    Decision {
        redirect,
        clear_selection,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    const fn facts(ready: bool, signed_in: bool, page: Page, has_selection: bool) -> RouteFacts {
        RouteFacts {
            ready,
            signed_in,
            page,
            has_selection,
        }
    }

    #[test]
    fn test_hold_until_ready() {
        for page in Page::iter() {
            let f = facts(false, false, page, false);
            assert_eq!(Rule::HoldUntilReady.evaluate(&f), Some(Outcome::Hold));
            assert_eq!(decide(&f).redirect, None);
        }
        assert_eq!(Rule::HoldUntilReady.evaluate(&facts(true, false, Page::Cart, false)), None);
    }

    #[test]
    fn test_require_sign_in() {
        let rule = Rule::RequireSignIn;
        assert_eq!(
            rule.evaluate(&facts(true, false, Page::Cart, false)),
            Some(Outcome::Redirect(Page::Auth))
        );
        assert_eq!(rule.evaluate(&facts(true, false, Page::Auth, false)), None);
        assert_eq!(rule.evaluate(&facts(true, false, Page::OwnerDashboard, false)), None);
        assert_eq!(rule.evaluate(&facts(true, true, Page::Cart, false)), None);
    }

    #[test]
    fn test_leave_auth_when_signed_in() {
        let rule = Rule::LeaveAuthWhenSignedIn;
        assert_eq!(
            rule.evaluate(&facts(true, true, Page::Auth, false)),
            Some(Outcome::Redirect(Page::Products))
        );
        assert_eq!(rule.evaluate(&facts(true, false, Page::Auth, false)), None);
        assert_eq!(rule.evaluate(&facts(true, true, Page::Cart, false)), None);
    }

    #[test]
    fn test_require_selection() {
        let rule = Rule::RequireSelection;
        assert_eq!(
            rule.evaluate(&facts(true, true, Page::Details, false)),
            Some(Outcome::Redirect(Page::History))
        );
        assert_eq!(rule.evaluate(&facts(true, true, Page::Details, true)), None);
        assert_eq!(rule.evaluate(&facts(true, true, Page::History, false)), None);
    }

    #[test]
    fn test_clear_stale_selection() {
        let rule = Rule::ClearStaleSelection;
        assert_eq!(
            rule.evaluate(&facts(true, true, Page::History, true)),
            Some(Outcome::ClearSelection)
        );
        assert_eq!(rule.evaluate(&facts(true, true, Page::Details, true)), None);
        assert_eq!(rule.evaluate(&facts(true, true, Page::History, false)), None);
    }

    /// The selection rule is not gated by readiness.
    #[test]
    fn test_selection_cleared_while_holding() {
        let decision = decide(&facts(false, false, Page::Products, true));
        assert_eq!(decision.redirect, None);
        assert!(decision.clear_selection);
    }

    #[test]
    fn test_redirect_away_from_details_clears_in_same_pass() {
        let decision = decide(&facts(true, false, Page::Details, true));
        assert_eq!(decision.redirect, Some(Page::Auth));
        assert!(decision.clear_selection);
    }

    #[test]
    fn test_first_matching_page_rule_wins() {
        // Signed out on details without a selection: sign-in comes first.
        let decision = decide(&facts(true, false, Page::Details, false));
        assert_eq!(decision.redirect, Some(Page::Auth));
        assert!(!decision.clear_selection);
    }

    #[test]
    fn test_settled_states_are_stable() {
        assert!(decide(&facts(true, true, Page::Products, false)).is_stable());
        assert!(decide(&facts(true, true, Page::Details, true)).is_stable());
        assert!(decide(&facts(true, false, Page::OwnerDashboard, false)).is_stable());
        assert!(decide(&facts(false, false, Page::Cart, false)).is_stable());
    }

    #[test]
    fn test_every_rule_is_in_the_table() {
        let tabled: Vec<Rule> = PAGE_RULES.iter().chain(SELECTION_RULES.iter()).copied().collect();
        for rule in Rule::iter() {
            assert!(tabled.contains(&rule), "{rule} missing from the table");
        }
    }
}
