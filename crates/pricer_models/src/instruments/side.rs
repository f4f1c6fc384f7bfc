//! Option side (call or put).

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Side of a European option contract.
///
/// Parses from the long names (`call`, `put`) and from the exchange leg
/// codes (`CE`, `PE`), case-insensitively.
///
/// # Examples
/// ```
/// use pricer_models::instruments::OptionSide;
///
/// assert_eq!("CE".parse::<OptionSide>().unwrap(), OptionSide::Call);
/// assert_eq!("put".parse::<OptionSide>().unwrap(), OptionSide::Put);
/// assert!(OptionSide::Call.is_call());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionSide {
    /// Right to buy at the strike.
    Call,
    /// Right to sell at the strike.
    Put,
}

impl OptionSide {
    /// Both sides in chain order (call leg first).
    pub const ALL: [OptionSide; 2] = [OptionSide::Call, OptionSide::Put];

    /// Returns whether this is the call side.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionSide::Call)
    }

    /// Returns whether this is the put side.
    #[inline]
    pub fn is_put(&self) -> bool {
        matches!(self, OptionSide::Put)
    }

    /// Lower-case name, also used as the row key prefix in chain output.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionSide::Call => "call",
            OptionSide::Put => "put",
        }
    }

    /// Exchange leg code (`CE` / `PE`).
    pub fn exchange_code(&self) -> &'static str {
        match self {
            OptionSide::Call => "CE",
            OptionSide::Put => "PE",
        }
    }
}

impl fmt::Display for OptionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names neither side.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown option side: '{0}' (expected call, put, CE or PE)")]
pub struct ParseOptionSideError(pub String);

impl FromStr for OptionSide {
    type Err = ParseOptionSideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "c" | "ce" => Ok(OptionSide::Call),
            "put" | "p" | "pe" => Ok(OptionSide::Put),
            _ => Err(ParseOptionSideError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_names() {
        assert_eq!("call".parse::<OptionSide>().unwrap(), OptionSide::Call);
        assert_eq!("PUT".parse::<OptionSide>().unwrap(), OptionSide::Put);
        assert_eq!(" Call ".parse::<OptionSide>().unwrap(), OptionSide::Call);
    }

    #[test]
    fn test_parse_exchange_codes() {
        assert_eq!("CE".parse::<OptionSide>().unwrap(), OptionSide::Call);
        assert_eq!("pe".parse::<OptionSide>().unwrap(), OptionSide::Put);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "straddle".parse::<OptionSide>().unwrap_err();
        assert_eq!(err, ParseOptionSideError("straddle".to_string()));
        assert!(err.to_string().contains("straddle"));
    }

    #[test]
    fn test_display_and_codes() {
        assert_eq!(OptionSide::Call.to_string(), "call");
        assert_eq!(OptionSide::Put.to_string(), "put");
        assert_eq!(OptionSide::Call.exchange_code(), "CE");
        assert_eq!(OptionSide::Put.exchange_code(), "PE");
    }

    #[test]
    fn test_predicates() {
        assert!(OptionSide::Call.is_call());
        assert!(!OptionSide::Call.is_put());
        assert!(OptionSide::Put.is_put());
        assert_eq!(OptionSide::ALL, [OptionSide::Call, OptionSide::Put]);
    }
}
