//! Staged permission-rule evaluation.

use crate::decision::PolicyDecision;
use crate::rule::PermissionRule;
use crate::rule::RuleAction;

/// Evaluates a flat set of [`PermissionRule`]s against a tool call.
///
/// Staged per source priority: deny rules first, then ask rules, then
/// explicit allow rules, then the tool's own static read/write
/// classification — consulted only once no rule has decided — then
/// default-allow.
#[derive(Debug, Clone, Default)]
pub struct PermissionRuleEvaluator {
    rules: Vec<PermissionRule>,
}

impl PermissionRuleEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: Vec<PermissionRule>) -> Self {
        Self { rules }
    }

    pub fn add_rule(&mut self, rule: PermissionRule) {
        self.rules.push(rule);
    }

    fn matching(&self, action: RuleAction, tool_name: &str, file_path: Option<&str>, command_input: Option<&str>) -> Option<&PermissionRule> {
        self.rules
            .iter()
            .filter(|r| r.action == action)
            .filter(|r| r.matches_tool(tool_name, command_input))
            .filter(|r| r.matches_file(file_path))
            .min_by_key(|r| r.source)
    }

    /// `tool_is_mutating` is the tool's own static classification, consulted
    /// only when neither a deny nor an ask rule matched.
    pub fn evaluate(
        &self,
        tool_name: &str,
        file_path: Option<&str>,
        command_input: Option<&str>,
        tool_is_mutating: bool,
    ) -> PolicyDecision {
        if let Some(rule) = self.matching(RuleAction::Deny, tool_name, file_path, command_input) {
            return PolicyDecision::Block {
                reason: format!("Denied by {} rule for {tool_name}", rule.source),
                rule_source: Some(rule.source),
            };
        }

        if let Some(rule) = self.matching(RuleAction::Ask, tool_name, file_path, command_input) {
            return PolicyDecision::RequireApproval {
                reason: format!("Ask rule from {} for {tool_name}", rule.source),
                rule_source: Some(rule.source),
            };
        }

        if self.matching(RuleAction::Allow, tool_name, file_path, command_input).is_some() {
            return PolicyDecision::Allow;
        }

        if tool_is_mutating {
            return PolicyDecision::RequireApproval {
                reason: format!("{tool_name} is a mutating tool with no matching rule"),
                rule_source: None,
            };
        }

        PolicyDecision::Allow
    }
}

#[cfg(test)]
#[path = "evaluator.test.rs"]
mod tests;
