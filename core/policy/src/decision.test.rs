use super::*;

#[test]
fn predicates_match_their_variant() {
    assert!(PolicyDecision::Allow.is_allowed());
    assert!(!PolicyDecision::Allow.is_blocked());

    let blocked = PolicyDecision::Block {
        reason: "x".into(),
        rule_source: Some(RuleSource::Session),
    };
    assert!(blocked.is_blocked());
    assert!(!blocked.is_allowed());

    let approval = PolicyDecision::RequireApproval {
        reason: "x".into(),
        rule_source: None,
    };
    assert!(approval.needs_approval());
}
