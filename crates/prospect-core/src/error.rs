use std::fmt;

/// Machine-readable error codes for host-application decision making.
///
/// The engine never fails a `fuse`/`decide` call outright; these codes name
/// the degradation classes that show up in logs and `SourceReport` entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    BackendUnavailable,
    BackendTimeout,
    MalformedCandidate,
    InvalidEvidence,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::BackendUnavailable => "E2001",
            Self::BackendTimeout => "E2002",
            Self::MalformedCandidate => "E2003",
            Self::InvalidEvidence => "E3001",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::BackendUnavailable => "Search backend unavailable",
            Self::BackendTimeout => "Search backend timed out",
            Self::MalformedCandidate => "Candidate missing stable id",
            Self::InvalidEvidence => "Conversation evidence out of range",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in .prospect/config.toml and retry."),
            Self::BackendUnavailable => {
                Some("Check backend connectivity; retrieval continues with reduced quality.")
            }
            Self::BackendTimeout => {
                Some("Raise [fusion] backend_timeout_ms or investigate backend latency.")
            }
            Self::MalformedCandidate => {
                Some("Reindex the offending document with a stable id field.")
            }
            Self::InvalidEvidence => {
                Some("Out-of-range scores are clamped; check the conversation analyzer.")
            }
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::ErrorCode;
    use std::collections::HashSet;

    #[test]
    fn all_codes_are_unique() {
        let all = [
            ErrorCode::ConfigParseError,
            ErrorCode::BackendUnavailable,
            ErrorCode::BackendTimeout,
            ErrorCode::MalformedCandidate,
            ErrorCode::InvalidEvidence,
            ErrorCode::InternalUnexpected,
        ];

        let mut seen = HashSet::new();
        for code in all {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        let code = ErrorCode::BackendTimeout.code();
        assert_eq!(code.len(), 5);
        assert!(code.starts_with('E'));
        assert!(code.chars().skip(1).all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn every_code_has_a_message() {
        assert!(!ErrorCode::MalformedCandidate.message().is_empty());
        assert!(!ErrorCode::InvalidEvidence.message().is_empty());
    }
}
