use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Only the low byte of an EC2 state code is meaningful; the high byte is
/// reserved for internal use by the service.
pub const STATE_CODE_MASK: i64 = 0xFF;

/// State codes are 16-bit: internal high byte, state low byte.
pub const STATE_CODE_MAX: i64 = 0xFFFF;

/// Lifecycle state of an EC2 instance.
///
/// Each variant carries exactly one canonical literal, the lowercase string
/// returned by the EC2 API (`"shutting-down"` for [`InstanceState::ShuttingDown`]).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::AsRefStr,
    strum_macros::IntoStaticStr,
    strum_macros::EnumIter,
    strum_macros::EnumCount,
)]
#[serde(into = "&'static str", try_from = "String")]
pub enum InstanceState {
    #[strum(serialize = "running")]
    Running,
    #[strum(serialize = "pending")]
    Pending,
    #[strum(serialize = "stopping")]
    Stopping,
    #[strum(serialize = "stopped")]
    Stopped,
    #[strum(serialize = "shutting-down")]
    ShuttingDown,
    #[strum(serialize = "terminated")]
    Terminated,
}

impl InstanceState {
    /// Every state, in lookup order.
    pub const ALL: [Self; 6] = [
        Self::Running,
        Self::Pending,
        Self::Stopping,
        Self::Stopped,
        Self::ShuttingDown,
        Self::Terminated,
    ];

    pub fn literal(self) -> &'static str {
        self.into()
    }

    pub fn code(self) -> u16 {
        match self {
            Self::Pending => 0,
            Self::Running => 16,
            Self::ShuttingDown => 32,
            Self::Terminated => 48,
            Self::Stopping => 64,
            Self::Stopped => 80,
        }
    }

    /// Resolves a possibly-absent literal, e.g. a `State.Name` field that may be
    /// missing from an API response.
    pub fn parse(literal: Option<&str>) -> Result<Self, Error> {
        let Some(literal) = literal else {
            tracing::debug!("instance state literal is absent");
            return Err(Error::invalid_argument("null instance state literal"));
        };
        Self::from_literal(literal)
    }

    /// Case-insensitive lookup of a literal against [`InstanceState::ALL`].
    pub fn from_literal(literal: &str) -> Result<Self, Error> {
        if let Some(state) = Self::ALL
            .into_iter()
            .find(|s| s.literal().eq_ignore_ascii_case(literal))
        {
            return Ok(state);
        }

        tracing::debug!(literal, "unknown instance state literal");
        Err(Error::invalid_argument(format!(
            "no instance state for '{literal}'"
        )))
    }

    pub fn from_code(code: i64) -> Result<Self, Error> {
        if code < 0 {
            return Err(Error::invalid_argument(format!(
                "negative instance state code {code}"
            )));
        }
        if code > STATE_CODE_MAX {
            return Err(Error::invalid_argument(format!(
                "instance state code {code} out of range"
            )));
        }

        let low = code & STATE_CODE_MASK;
        Self::ALL
            .into_iter()
            .find(|s| i64::from(s.code()) == low)
            .ok_or_else(|| {
                tracing::debug!(code, "unknown instance state code");
                Error::invalid_argument(format!("no instance state for code {code}"))
            })
    }
}

/// Converts a state code received as a JS number into an integer code.
///
/// Rejects NaN, infinities, fractional values and anything outside
/// `0..=STATE_CODE_MAX`, so the cast below never saturates.
pub fn code_from_f64(code: f64) -> Result<i64, Error> {
    if !code.is_finite() || code.fract() != 0.0 {
        return Err(Error::invalid_argument(format!(
            "instance state code {code} is not an integer"
        )));
    }
    if !(0.0..=STATE_CODE_MAX as f64).contains(&code) {
        return Err(Error::invalid_argument(format!(
            "instance state code {code} out of range"
        )));
    }
    Ok(code as i64)
}

impl FromStr for InstanceState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_literal(s)
    }
}

impl TryFrom<String> for InstanceState {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_literal(&value)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use std::collections::HashSet;

    use strum::{EnumCount, IntoEnumIterator};

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn literals_match_ec2_strings() {
        let expected = [
            (InstanceState::Running, "running"),
            (InstanceState::Pending, "pending"),
            (InstanceState::Stopping, "stopping"),
            (InstanceState::Stopped, "stopped"),
            (InstanceState::ShuttingDown, "shutting-down"),
            (InstanceState::Terminated, "terminated"),
        ];
        for (state, literal) in expected {
            assert_eq!(state.literal(), literal);
            assert_eq!(state.to_string(), literal);
            assert_eq!(state.as_ref(), literal);
        }
    }

    #[test]
    fn parse_roundtrips_every_literal() {
        for state in InstanceState::iter() {
            assert_eq!(InstanceState::parse(Some(state.literal())).unwrap(), state);
            assert_eq!(state.literal().parse::<InstanceState>().unwrap(), state);
        }
    }

    #[test]
    fn all_matches_declaration_order() {
        let iterated: Vec<InstanceState> = InstanceState::iter().collect();
        assert_eq!(iterated, InstanceState::ALL.to_vec());
        assert_eq!(InstanceState::COUNT, InstanceState::ALL.len());
    }

    #[test]
    fn literals_and_codes_are_injective() {
        let literals: HashSet<&str> = InstanceState::iter().map(InstanceState::literal).collect();
        assert_eq!(literals.len(), InstanceState::COUNT);

        let codes: HashSet<u16> = InstanceState::iter().map(InstanceState::code).collect();
        assert_eq!(codes.len(), InstanceState::COUNT);
    }

    #[test]
    fn parse_ignores_case() {
        for literal in ["RUNNING", "Running", "running", "rUnNiNg"] {
            assert_eq!(
                InstanceState::parse(Some(literal)).unwrap(),
                InstanceState::Running
            );
        }
        assert_eq!(
            InstanceState::parse(Some("shutting-down")).unwrap(),
            InstanceState::ShuttingDown
        );
        assert_eq!(
            InstanceState::parse(Some("SHUTTING-DOWN")).unwrap(),
            InstanceState::ShuttingDown
        );
    }

    #[test]
    fn parse_rejects_absent_literal() {
        let err = InstanceState::parse(None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.to_string().contains("null"));
    }

    #[test]
    fn parse_rejects_unknown_literal_and_names_it() {
        let err = InstanceState::parse(Some("bogus-state")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.to_string().contains("bogus-state"));
    }

    #[test]
    fn parse_rejects_near_misses() {
        for literal in ["", " running", "running ", "shutting_down", "shuttingdown"] {
            let err = InstanceState::parse(Some(literal)).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument, "literal {literal:?}");
            assert!(err.to_string().contains(&format!("'{literal}'")));
        }
    }

    #[test]
    fn codes_match_ec2_values() {
        assert_eq!(InstanceState::Pending.code(), 0);
        assert_eq!(InstanceState::Running.code(), 16);
        assert_eq!(InstanceState::ShuttingDown.code(), 32);
        assert_eq!(InstanceState::Terminated.code(), 48);
        assert_eq!(InstanceState::Stopping.code(), 64);
        assert_eq!(InstanceState::Stopped.code(), 80);
    }

    #[test]
    fn from_code_ignores_high_byte() {
        for state in InstanceState::iter() {
            let code = i64::from(state.code());
            assert_eq!(InstanceState::from_code(code).unwrap(), state);
            assert_eq!(InstanceState::from_code(code | 0x0100).unwrap(), state);
            assert_eq!(InstanceState::from_code(code | 0xFF00).unwrap(), state);
        }
    }

    #[test]
    fn from_code_rejects_unknown_and_negative() {
        for code in [1, 15, 17, 96, 255, -16, 0x1_0010, i64::MAX] {
            let err = InstanceState::from_code(code).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
            assert!(err.to_string().contains(&code.to_string()));
        }
        assert_eq!(
            InstanceState::from_code(0xFF50).unwrap(),
            InstanceState::Stopped
        );
    }

    #[test]
    fn code_from_f64_accepts_whole_numbers_in_range() {
        assert_eq!(code_from_f64(16.0).unwrap(), 16);
        assert_eq!(code_from_f64(272.0).unwrap(), 272);
        assert_eq!(code_from_f64(-0.0).unwrap(), 0);
        assert_eq!(code_from_f64(65_535.0).unwrap(), STATE_CODE_MAX);
        assert_eq!(
            InstanceState::from_code(code_from_f64(48.0).unwrap()).unwrap(),
            InstanceState::Terminated
        );
    }

    #[test]
    fn code_from_f64_rejects_non_integers() {
        for code in [16.5, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = code_from_f64(code).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument, "{code}");
            assert!(err.to_string().contains("not an integer"), "{code}");
        }
    }

    #[test]
    fn code_from_f64_rejects_out_of_range_without_saturating() {
        for code in [-1.0, 65_536.0, 1e20, -1e20] {
            let err = code_from_f64(code).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument, "{code}");
            assert!(err.to_string().contains("out of range"), "{code}");
        }
    }

    #[test]
    fn serde_uses_literals() {
        let json = serde_json::to_string(&InstanceState::ShuttingDown).unwrap();
        assert_eq!(json, "\"shutting-down\"");

        let state: InstanceState = serde_json::from_str("\"STOPPED\"").unwrap();
        assert_eq!(state, InstanceState::Stopped);

        let err = serde_json::from_str::<InstanceState>("\"rebooting\"").unwrap_err();
        assert!(err.to_string().contains("rebooting"));
    }
}
