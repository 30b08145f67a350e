//! Error codes for Aspire diagnostics.

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Parser errors (E0100 - E0199)
    ExpectedConstruct,
    TrailingInput,
    NestingLimit,

    // Program warnings (W0001 - W0099)
    EmptyProgram,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            // Parser
            ErrorCode::ExpectedConstruct => "E0100",
            ErrorCode::TrailingInput => "E0101",
            ErrorCode::NestingLimit => "E0102",

            // Program
            ErrorCode::EmptyProgram => "W0001",
        }
    }

    /// Get a human-readable description of the error.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::ExpectedConstruct => "input does not match the expected construct",
            ErrorCode::TrailingInput => "input continues after a complete construct",
            ErrorCode::NestingLimit => "values are nested too deeply",
            ErrorCode::EmptyProgram => "program defines no functions",
        }
    }

    /// Get a suggested fix for the error, if available.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            ErrorCode::TrailingInput => {
                Some("separate statements with a newline or `;`, and check for stray characters")
            }
            ErrorCode::NestingLimit => Some("flatten the value or raise `--max-nesting`"),
            ErrorCode::EmptyProgram => Some("define at least one function, e.g. `main() {}`"),
            ErrorCode::ExpectedConstruct => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct() {
        let codes = [
            ErrorCode::ExpectedConstruct,
            ErrorCode::TrailingInput,
            ErrorCode::NestingLimit,
            ErrorCode::EmptyProgram,
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a.as_str(), b.as_str());
            }
        }
    }
}
