use super::*;

#[test]
fn source_priority_orders_session_above_plugin_above_policy() {
    assert!(RuleSource::Session < RuleSource::Plugin);
    assert!(RuleSource::Plugin < RuleSource::Policy);
}

#[test]
fn wildcard_tool_matches_anything() {
    let rule = PermissionRule::new(RuleSource::Policy, "*", RuleAction::Allow);
    assert!(rule.matches_tool("Bash", None));
    assert!(rule.matches_tool("Edit", Some("ignored")));
}

#[test]
fn colon_form_matches_command_prefix() {
    let rule = PermissionRule::new(RuleSource::Session, "Bash:git *", RuleAction::Allow);
    assert!(rule.matches_tool("Bash", Some("git status")));
    assert!(rule.matches_tool("Bash", Some("git")));
    assert!(!rule.matches_tool("Bash", Some("rm -rf /")));
    assert!(!rule.matches_tool("Edit", Some("git status")));
}

#[test]
fn paren_form_matches_like_colon_form() {
    let rule = PermissionRule::new(RuleSource::Session, "Bash(npm run *)", RuleAction::Allow);
    assert!(rule.matches_tool("Bash", Some("npm run test")));
    assert!(!rule.matches_tool("Bash", Some("npm install")));
}

#[test]
fn tool_pattern_without_command_matches_on_name_alone() {
    let rule = PermissionRule::new(RuleSource::Policy, "Edit", RuleAction::Ask);
    assert!(rule.matches_tool("Edit", None));
    assert!(!rule.matches_tool("Bash", None));
}

#[test]
fn extension_glob_matches_file_pattern() {
    let rule = PermissionRule::new(RuleSource::Policy, "Edit", RuleAction::Ask).with_file_pattern("*.rs");
    assert!(rule.matches_file(Some("src/main.rs")));
    assert!(!rule.matches_file(Some("src/main.ts")));
}

#[test]
fn double_star_glob_matches_prefix_and_suffix() {
    let rule = PermissionRule::new(RuleSource::Policy, "Edit", RuleAction::Ask).with_file_pattern("src/**/*.ts");
    assert!(rule.matches_file(Some("src/app/widget.ts")));
    assert!(!rule.matches_file(Some("tests/widget.ts")));
}

#[test]
fn missing_file_pattern_matches_regardless_of_path() {
    let rule = PermissionRule::new(RuleSource::Policy, "Edit", RuleAction::Ask);
    assert!(rule.matches_file(None));
    assert!(rule.matches_file(Some("anything")));
}

#[test]
fn file_pattern_with_no_path_does_not_match() {
    let rule = PermissionRule::new(RuleSource::Policy, "Edit", RuleAction::Ask).with_file_pattern("*.rs");
    assert!(!rule.matches_file(None));
}
