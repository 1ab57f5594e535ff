use crate::error::Error;
use crate::state::InstanceState;

/// The `State` object attached to an instance in EC2 `DescribeInstances` output.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct RawInstanceState {
    /// Numeric state code; only the low byte is meaningful.
    #[serde(rename = "Code")]
    pub code: Option<i64>,
    /// State literal (e.g. `"shutting-down"`).
    #[serde(rename = "Name")]
    pub name: Option<String>,
}

impl RawInstanceState {
    /// Resolves the payload to a typed state.
    ///
    /// The name is authoritative; when a code is also present it must decode to
    /// the same state.
    pub fn resolve(&self) -> Result<InstanceState, Error> {
        match (self.name.as_deref(), self.code) {
            (Some(name), code) => {
                let state = InstanceState::from_literal(name)?;
                if let Some(code) = code {
                    let by_code = InstanceState::from_code(code)?;
                    if by_code != state {
                        return Err(Error::invalid_argument(format!(
                            "instance state name '{name}' does not match code {code} ({by_code})"
                        )));
                    }
                }
                Ok(state)
            }
            (None, Some(code)) => InstanceState::from_code(code),
            (None, None) => InstanceState::parse(None),
        }
    }
}

/// One instance entry as found in the `Instances` list of a reservation.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RawInstance {
    #[serde(rename = "InstanceId")]
    pub instance_id: String,
    #[serde(rename = "State")]
    pub state: Option<RawInstanceState>,
}

impl RawInstance {
    pub fn state(&self) -> Result<InstanceState, Error> {
        let raw = self.state.as_ref().ok_or_else(|| {
            Error::invalid_argument(format!("instance {} has no state", self.instance_id))
        })?;
        raw.resolve()
    }
}

/// Parses a JSON array of instance entries.
pub fn parse_instances(json: &str) -> Result<Vec<RawInstance>, Error> {
    Ok(serde_json::from_str(json)?)
}
