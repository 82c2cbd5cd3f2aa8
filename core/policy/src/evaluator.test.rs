use super::*;
use crate::rule::RuleSource;

#[test]
fn session_deny_wins_over_policy_allow() {
    let mut eval = PermissionRuleEvaluator::new();
    eval.add_rule(PermissionRule::new(RuleSource::Policy, "Bash", RuleAction::Allow));
    eval.add_rule(PermissionRule::new(RuleSource::Session, "Bash", RuleAction::Deny));
    let decision = eval.evaluate("Bash", None, None, false);
    assert!(decision.is_blocked());
}

#[test]
fn ask_rule_requires_approval() {
    let mut eval = PermissionRuleEvaluator::new();
    eval.add_rule(PermissionRule::new(RuleSource::Policy, "Edit", RuleAction::Ask));
    let decision = eval.evaluate("Edit", None, None, false);
    assert!(decision.needs_approval());
}

#[test]
fn explicit_allow_rule_wins_over_mutating_classification() {
    let mut eval = PermissionRuleEvaluator::new();
    eval.add_rule(PermissionRule::new(RuleSource::Session, "Write", RuleAction::Allow));
    let decision = eval.evaluate("Write", None, None, true);
    assert!(decision.is_allowed());
}

#[test]
fn mutating_tool_with_no_rule_requires_approval() {
    let eval = PermissionRuleEvaluator::new();
    let decision = eval.evaluate("Write", None, None, true);
    assert!(decision.needs_approval());
}

#[test]
fn read_only_tool_with_no_rule_defaults_to_allow() {
    let eval = PermissionRuleEvaluator::new();
    let decision = eval.evaluate("Read", None, None, false);
    assert!(decision.is_allowed());
}

#[test]
fn non_matching_rules_are_ignored() {
    let mut eval = PermissionRuleEvaluator::new();
    eval.add_rule(PermissionRule::new(RuleSource::Policy, "Bash", RuleAction::Deny));
    let decision = eval.evaluate("Edit", None, None, false);
    assert!(decision.is_allowed());
}

#[test]
fn file_glob_scopes_a_rule_to_matching_paths() {
    let mut eval = PermissionRuleEvaluator::new();
    eval.add_rule(PermissionRule::new(RuleSource::Policy, "Edit", RuleAction::Deny).with_file_pattern("*.env"));
    assert!(eval.evaluate("Edit", Some(".env"), None, false).is_blocked());
    assert!(eval.evaluate("Edit", Some("main.rs"), None, false).is_allowed());
}
