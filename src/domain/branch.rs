use crate::domain::Identifier;

/// The current branch, as far as version calculation cares about it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchContext {
    pub name: String,
}

impl BranchContext {
    /// Create a new branch context
    pub fn new(name: impl Into<String>) -> Self {
        BranchContext { name: name.into() }
    }

    /// Whether the branch is listed in `ignored` (exact, case-sensitive match)
    pub fn is_ignored(&self, ignored: &[String]) -> bool {
        ignored.iter().any(|name| name == &self.name)
    }

    /// The branch name as a pre-release identifier
    ///
    /// Every character outside `[0-9A-Za-z-]` becomes `-`, so
    /// `feature/login_v2` becomes `feature-login-v2`. Returns `None` for an
    /// empty name. Numeric identifiers can't carry leading zeros, so a purely
    /// numeric name like `042` becomes `42`.
    pub fn identifier(&self) -> Option<Identifier> {
        if self.name.is_empty() {
            return None;
        }

        let sanitized: String = self
            .name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '-' })
            .collect();

        if sanitized.chars().all(|c| c.is_ascii_digit()) {
            let digits = sanitized.trim_start_matches('0');
            return match digits.parse::<u64>() {
                Ok(n) => Some(Identifier::Numeric(n)),
                Err(_) if digits.is_empty() => Some(Identifier::Numeric(0)),
                // too large for a numeric identifier; a hyphen keeps it alphanumeric
                Err(_) => Some(Identifier::AlphaNumeric(format!("-{}", digits))),
            };
        }

        Some(Identifier::AlphaNumeric(sanitized))
    }
}
