//! Validation of numbered choices typed at the prompts.

use thiserror::Error;

use crate::config::ExhaustedPolicy;

/// A typed entry that does not name a listed item.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("{value} is not between 1 and {upper}")]
    OutOfRange { value: i64, upper: usize },
}

/// Parse `input` as a 1-based index into a list of `upper_bound` items.
pub fn validate_index(input: &str, upper_bound: usize) -> Result<usize, ValidationError> {
    let trimmed = input.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| ValidationError::NotANumber(trimmed.to_string()))?;

    if value < 1 || value as u64 > upper_bound as u64 {
        return Err(ValidationError::OutOfRange {
            value,
            upper: upper_bound,
        });
    }

    Ok(value as usize)
}

/// What to do after an entry at the movie prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseChoice {
    /// The user picked the movie with this 1-based number.
    Selected(usize),
    /// Show the next page.
    NextPage,
    /// Ask for the movie number again.
    Reprompt,
    /// Drop the results and ask for a new query.
    RestartQuery,
}

/// Interpret an entry at the movie prompt.
///
/// While more pages remain, an empty entry moves to the next page. Once
/// everything is shown, an empty entry starts a new search and an invalid
/// number is handled according to `policy`.
pub fn interpret_release_input(
    input: &str,
    shown_count: usize,
    has_more: bool,
    policy: ExhaustedPolicy,
) -> ReleaseChoice {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return if has_more {
            ReleaseChoice::NextPage
        } else {
            ReleaseChoice::RestartQuery
        };
    }

    match validate_index(trimmed, shown_count) {
        Ok(number) => ReleaseChoice::Selected(number),
        Err(_) if has_more => ReleaseChoice::Reprompt,
        Err(_) => match policy {
            ExhaustedPolicy::Reprompt => ReleaseChoice::Reprompt,
            ExhaustedPolicy::RestartQuery => ReleaseChoice::RestartQuery,
        },
    }
}

/// What to do after an entry at the quality prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityChoice {
    /// The user picked the variant with this 1-based number.
    Selected(usize),
    /// Ask for the quality number again.
    Reprompt,
    /// Abandon this movie and search again.
    BackToSearch,
}

/// Interpret an entry at the quality prompt.
pub fn interpret_quality_input(input: &str, variant_count: usize) -> QualityChoice {
    if input.trim().is_empty() {
        return QualityChoice::BackToSearch;
    }

    match validate_index(input, variant_count) {
        Ok(number) => QualityChoice::Selected(number),
        Err(_) => QualityChoice::Reprompt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_index_accepts_range() {
        assert_eq!(validate_index("1", 15), Ok(1));
        assert_eq!(validate_index("15", 15), Ok(15));
        assert_eq!(validate_index("  7\n", 15), Ok(7));
    }

    #[test]
    fn test_validate_index_rejects_out_of_range() {
        for input in ["0", "-1", "16", "99999999999999"] {
            assert!(
                matches!(
                    validate_index(input, 15),
                    Err(ValidationError::OutOfRange { .. })
                ),
                "{} should be out of range",
                input
            );
        }
    }

    #[test]
    fn test_validate_index_rejects_non_numbers() {
        for input in ["", "abc", "1.5", "1e3", "one", "3 4"] {
            assert!(
                matches!(validate_index(input, 15), Err(ValidationError::NotANumber(_))),
                "{:?} should not parse",
                input
            );
        }
    }

    #[test]
    fn test_validate_index_empty_list() {
        assert!(validate_index("1", 0).is_err());
    }

    #[test]
    fn test_validation_error_message() {
        let err = validate_index("20", 15).unwrap_err();
        assert_eq!(err.to_string(), "20 is not between 1 and 15");
    }

    #[test]
    fn test_release_input_mid_pagination() {
        let policy = ExhaustedPolicy::Reprompt;
        assert_eq!(
            interpret_release_input("", 15, true, policy),
            ReleaseChoice::NextPage
        );
        assert_eq!(
            interpret_release_input("3", 15, true, policy),
            ReleaseChoice::Selected(3)
        );
        assert_eq!(
            interpret_release_input("16", 15, true, policy),
            ReleaseChoice::Reprompt
        );
        assert_eq!(
            interpret_release_input("x", 15, true, ExhaustedPolicy::RestartQuery),
            ReleaseChoice::Reprompt
        );
    }

    #[test]
    fn test_release_input_exhausted_reprompt_policy() {
        let policy = ExhaustedPolicy::Reprompt;
        assert_eq!(
            interpret_release_input("0", 4, false, policy),
            ReleaseChoice::Reprompt
        );
        assert_eq!(
            interpret_release_input("", 4, false, policy),
            ReleaseChoice::RestartQuery
        );
        assert_eq!(
            interpret_release_input("4", 4, false, policy),
            ReleaseChoice::Selected(4)
        );
    }

    #[test]
    fn test_release_input_exhausted_restart_policy() {
        let policy = ExhaustedPolicy::RestartQuery;
        assert_eq!(
            interpret_release_input("5", 4, false, policy),
            ReleaseChoice::RestartQuery
        );
        assert_eq!(
            interpret_release_input("2", 4, false, policy),
            ReleaseChoice::Selected(2)
        );
    }

    #[test]
    fn test_quality_input() {
        assert_eq!(interpret_quality_input("2", 3), QualityChoice::Selected(2));
        assert_eq!(interpret_quality_input("4", 3), QualityChoice::Reprompt);
        assert_eq!(interpret_quality_input("hd", 3), QualityChoice::Reprompt);
        assert_eq!(interpret_quality_input(" ", 3), QualityChoice::BackToSearch);
    }
}
