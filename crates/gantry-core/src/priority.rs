// ── Rule priority allocation ──
//
// Priorities step by 10 so operators can slot manual rules between
// automatically allocated ones without renumbering. Allocation is
// read-then-decide with no lock: the caller re-reads and re-allocates
// when the install loses the race (surfaced as PriorityConflict).

use crate::model::RuleSummary;

/// Spacing between automatically allocated priorities.
pub const PRIORITY_STEP: u32 = 10;

/// Compute the priority for a new rule given the listener's current
/// rule set: the maximum non-default priority plus [`PRIORITY_STEP`],
/// or [`PRIORITY_STEP`] itself when no non-default rules exist.
pub fn next_priority(rules: &[RuleSummary]) -> u32 {
    rules
        .iter()
        .filter(|r| !r.is_default)
        .map(|r| r.priority)
        .max()
        .unwrap_or(0)
        .saturating_add(PRIORITY_STEP)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(priority: u32) -> RuleSummary {
        RuleSummary {
            priority,
            is_default: false,
            host_pattern: None,
            target_id: None,
        }
    }

    fn default_rule() -> RuleSummary {
        RuleSummary {
            priority: 0,
            is_default: true,
            host_pattern: None,
            target_id: None,
        }
    }

    #[test]
    fn steps_past_the_maximum_priority() {
        let rules = vec![default_rule(), rule(100), rule(120)];
        assert_eq!(next_priority(&rules), 130);
    }

    #[test]
    fn empty_rule_set_starts_at_the_step() {
        assert_eq!(next_priority(&[]), 10);
        assert_eq!(next_priority(&[default_rule()]), 10);
    }

    #[test]
    fn unordered_rules_still_find_the_maximum() {
        let rules = vec![rule(120), rule(100), rule(110)];
        assert_eq!(next_priority(&rules), 130);
    }

    #[test]
    fn default_rule_priority_is_ignored_even_when_highest() {
        let mut catch_all = default_rule();
        catch_all.priority = 50_000;
        let rules = vec![catch_all, rule(100)];
        assert_eq!(next_priority(&rules), 110);
    }
}
