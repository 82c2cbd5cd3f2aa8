//! Permission rules and the patterns they match against.

/// Where a rule came from. Ordering is priority: a variant earlier in
/// declaration order outranks a later one (`Session` beats `Plugin` beats
/// `Policy`), so `#[derive(Ord)]`'s declaration-order comparison is exactly
/// the priority this crate needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleSource {
    Session,
    Plugin,
    Policy,
}

impl std::fmt::Display for RuleSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RuleSource::Session => "session",
            RuleSource::Plugin => "plugin",
            RuleSource::Policy => "policy",
        };
        write!(f, "{s}")
    }
}

/// What to do when a rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleAction {
    Deny,
    Ask,
    Allow,
}

/// One permission rule: a tool-name pattern, optional file glob, and the
/// action to take when both match.
#[derive(Debug, Clone)]
pub struct PermissionRule {
    pub source: RuleSource,
    /// `"Bash"`, `"Bash:git *"`, `"Bash(npm run *)"`, or `"*"`.
    pub tool_pattern: String,
    pub file_pattern: Option<String>,
    pub action: RuleAction,
}

impl PermissionRule {
    pub fn new(source: RuleSource, tool_pattern: impl Into<String>, action: RuleAction) -> Self {
        Self {
            source,
            tool_pattern: tool_pattern.into(),
            file_pattern: None,
            action,
        }
    }

    pub fn with_file_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.file_pattern = Some(pattern.into());
        self
    }

    /// Does this rule's tool pattern match `tool_name`, optionally checking
    /// a command pattern (`"Bash:git *"`) against `command_input`?
    pub fn matches_tool(&self, tool_name: &str, command_input: Option<&str>) -> bool {
        matches_tool_with_input(&self.tool_pattern, tool_name, command_input)
    }

    pub fn matches_file(&self, file_path: Option<&str>) -> bool {
        matches_file(&self.file_pattern, file_path)
    }
}

fn matches_tool_with_input(pattern: &str, tool_name: &str, command_input: Option<&str>) -> bool {
    if pattern == "*" {
        return true;
    }

    let (tool_part, cmd_pattern) = if pattern.contains(':') {
        let parts: Vec<&str> = pattern.splitn(2, ':').collect();
        (parts[0], Some(parts[1]))
    } else if pattern.ends_with(')') && pattern.contains('(') {
        let paren_idx = pattern.find('(').expect("contains '(' checked above");
        let tool = &pattern[..paren_idx];
        let cmd = &pattern[paren_idx + 1..pattern.len() - 1];
        (tool, Some(cmd))
    } else {
        (pattern, None)
    };

    if tool_part != tool_name {
        return false;
    }

    match (cmd_pattern, command_input) {
        (None, _) => true,
        (Some(_), None) => true,
        (Some(pat), Some(cmd)) => matches_command_pattern(pat, cmd),
    }
}

fn matches_command_pattern(pattern: &str, command: &str) -> bool {
    if pattern == "*" {
        return true;
    }
    if let Some(prefix) = pattern.strip_suffix(" *") {
        command == prefix || command.starts_with(&format!("{prefix} "))
    } else if let Some(prefix) = pattern.strip_suffix('*') {
        command.starts_with(prefix)
    } else {
        command == pattern
    }
}

fn matches_file(pattern: &Option<String>, file_path: Option<&str>) -> bool {
    match (pattern, file_path) {
        (None, _) => true,
        (Some(_), None) => false,
        (Some(pat), Some(path)) => {
            if pat == "*" {
                return true;
            }
            if let Some(ext) = pat.strip_prefix('*') {
                if ext.starts_with('.') {
                    return path.ends_with(ext);
                }
            }
            if pat.contains("**") {
                let parts: Vec<&str> = pat.split("**").collect();
                if parts.len() == 2 {
                    let prefix = parts[0].trim_end_matches('/');
                    let suffix = parts[1].trim_start_matches('/');
                    let prefix_ok = prefix.is_empty() || path.starts_with(prefix);
                    let suffix_ok = if suffix.is_empty() {
                        true
                    } else if let Some(ext) = suffix.strip_prefix('*') {
                        path.ends_with(ext)
                    } else {
                        path.ends_with(suffix)
                    };
                    return prefix_ok && suffix_ok;
                }
            }
            path.contains(pat.as_str())
        }
    }
}

#[cfg(test)]
#[path = "rule.test.rs"]
mod tests;
