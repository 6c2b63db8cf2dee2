use std::fmt;
use std::str::FromStr;

/// Stroke used for edges whose handle carries no recognised case.
pub const NEUTRAL_COLOR: &str = "#64748B";

/// Semantic outcome encoded in the suffix of a source handle id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeCase {
    Success,
    Deny,
    Fail,
}

impl EdgeCase {
    /// All cases, in the order a decision node exposes its output handles.
    pub const ALL: [EdgeCase; 3] = [EdgeCase::Success, EdgeCase::Deny, EdgeCase::Fail];

    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeCase::Success => "success",
            EdgeCase::Deny => "deny",
            EdgeCase::Fail => "fail",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            EdgeCase::Success => "#22C55E",
            EdgeCase::Deny => "#EAB308",
            EdgeCase::Fail => "#EF4444",
        }
    }
}

impl fmt::Display for EdgeCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for EdgeCase {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(EdgeCase::Success),
            "deny" => Ok(EdgeCase::Deny),
            "fail" => Ok(EdgeCase::Fail),
            _ => Err(()),
        }
    }
}

/// Resolves the case carried by a handle id such as `a1b2c3d4-out-deny`.
///
/// Only the token after the last `-` is inspected. Anything unrecognised,
/// including a missing handle, yields `None`.
pub fn resolve_case(handle_id: Option<&str>) -> Option<EdgeCase> {
    let handle_id = handle_id?;
    handle_id.rsplit('-').next()?.parse().ok()
}

/// Display colour for an edge of the given case.
pub fn edge_color(case: Option<EdgeCase>) -> &'static str {
    case.map_or(NEUTRAL_COLOR, |c| c.color())
}

/// Output handle id of a decision node for a given case.
pub fn output_handle(node_id: &str, case: EdgeCase) -> String {
    format!("{}-out-{}", node_id, case)
}

/// Input handle id of a decision node.
pub fn input_handle(node_id: &str) -> String {
    format!("{}-in", node_id)
}
