//! Destructuring lists by a compact type format.
//!
//! Host-facing builtins receive their arguments as one list. Instead of
//! walking it by hand, a builtin states its shape as a format string and
//! gets the pieces back, or an error value describing the mismatch.
//!
//! | code | matches              |
//! |------|----------------------|
//! | `d`  | number               |
//! | `s`  | string               |
//! | `q`  | symbol               |
//! | `e`  | any expression       |
//! | `*`  | the rest of the list |
//!
//! `*` ends the format; anything after it is ignored.
//!
//! ```text
//! // (hide-goal "goal-1")
//! let args = match_list("qs", &message)?;
//! let goal_id = args[1].as_str();
//! ```

use smallvec::SmallVec;
use thiserror::Error;

use crate::expr::Expr;

/// Pieces matched by [`match_list`], one per format code.
pub type Matched = SmallVec<[Expr; 4]>;

/// Why a list did not fit its format.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MatchError {
    /// An element had the wrong type.
    #[error("wrong-argument-type: expected {expected}, got {got}")]
    WrongArgumentType { expected: &'static str, got: Expr },
    /// The list was shorter or longer than the format.
    #[error("wrong-number-of-arguments: expected {expected}, got {got}")]
    WrongNumberOfArguments { expected: usize, got: usize },
    /// The format string itself contains an unknown code.
    #[error("unknown format code `{0}`")]
    UnknownFormat(char),
}

fn expected_type(code: char) -> Result<&'static str, MatchError> {
    match code {
        'd' => Ok("number"),
        's' => Ok("string"),
        'q' => Ok("symbol"),
        'e' => Ok("expression"),
        other => Err(MatchError::UnknownFormat(other)),
    }
}

fn fits(code: char, item: &Expr) -> bool {
    match code {
        'd' => item.as_number().is_some(),
        's' => item.as_str().is_some(),
        'q' => item.as_symbol().is_some(),
        _ => true,
    }
}

/// Match `list` element-wise against `format`.
///
/// For `*` the remaining tail is returned as a single piece (possibly
/// `Empty`). Without `*` the list must have exactly as many elements as the
/// format has codes.
pub fn match_list(format: &str, list: &Expr) -> Result<Matched, MatchError> {
    let arity_error = || MatchError::WrongNumberOfArguments {
        expected: format.chars().take_while(|&c| c != '*').count(),
        got: list.len(),
    };

    let mut items = list.iter();
    let mut matched = Matched::new();
    for code in format.chars() {
        if code == '*' {
            matched.push(items.rest().clone());
            return Ok(matched);
        }
        let expected = expected_type(code)?;
        let item = items.next().ok_or_else(arity_error)?;
        if !fits(code, item) {
            return Err(MatchError::WrongArgumentType {
                expected,
                got: item.clone(),
            });
        }
        matched.push(item.clone());
    }

    if items.rest().is_nil() {
        Ok(matched)
    } else {
        Err(arity_error())
    }
}
