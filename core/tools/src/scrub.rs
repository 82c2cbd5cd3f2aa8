//! Redacts credential-shaped substrings out of tool output.

use regex::Captures;
use regex::Regex;

/// Scans text for credential-shaped substrings and redacts them, keeping
/// any literal prefix (an env-var name, `"Bearer "`, a vendor tag) plus the
/// first four characters of the secret so a reader can still tell values
/// apart without seeing them in full.
#[derive(Clone)]
pub struct CredentialScrubber {
    patterns: Vec<Regex>,
}

impl CredentialScrubber {
    pub fn new() -> Self {
        Self { patterns: built_in_patterns() }
    }

    /// Appends a custom pattern. A `prefix` named group (if present) is kept
    /// verbatim; a `secret` named group (or, absent that, the whole match)
    /// is redacted.
    pub fn with_pattern(mut self, pattern: Regex) -> Self {
        self.patterns.push(pattern);
        self
    }

    pub fn scrub(&self, input: &str) -> String {
        let mut text = input.to_string();
        for pattern in &self.patterns {
            text = pattern
                .replace_all(&text, |caps: &Captures| {
                    let prefix = caps.name("prefix").map(|m| m.as_str()).unwrap_or("");
                    let secret = caps.name("secret").map(|m| m.as_str()).unwrap_or(&caps[0]);
                    format!("{prefix}{}", redact_value(secret))
                })
                .into_owned();
        }
        text
    }
}

impl Default for CredentialScrubber {
    fn default() -> Self {
        Self::new()
    }
}

fn redact_value(value: &str) -> String {
    if value.chars().count() <= 4 {
        "[REDACTED]".to_string()
    } else {
        let head: String = value.chars().take(4).collect();
        format!("{head}...[REDACTED]")
    }
}

fn built_in_patterns() -> Vec<Regex> {
    vec![
        // Environment-style KEY=VALUE where the key name looks credential-shaped.
        Regex::new(r"(?P<prefix>\b[A-Za-z_][A-Za-z0-9_]*(?i:KEY|TOKEN|SECRET|PASSWORD)\w*=)(?P<secret>\S+)")
            .expect("valid regex"),
        Regex::new(r"(?P<prefix>Bearer )(?P<secret>[A-Za-z0-9\-_.=]+)").expect("valid regex"),
        Regex::new(r"(?P<prefix>sk-)(?P<secret>[A-Za-z0-9]{10,})").expect("valid regex"),
        Regex::new(r"(?P<prefix>gh[ps]_)(?P<secret>[A-Za-z0-9]{20,})").expect("valid regex"),
        Regex::new(r"(?P<prefix>hvs\.)(?P<secret>[A-Za-z0-9_-]+)").expect("valid regex"),
        // AWS access key id.
        Regex::new(r"(?P<prefix>AKIA)(?P<secret>[A-Z0-9]{16})").expect("valid regex"),
        // Long bare hex secrets not already caught above.
        Regex::new(r"\b(?P<secret>[0-9a-fA-F]{32,})\b").expect("valid regex"),
    ]
}

#[cfg(test)]
#[path = "scrub.test.rs"]
mod tests;
