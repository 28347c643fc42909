//! Request priority and its distance weighting.

use std::fmt;
use std::str::FromStr;

/// Urgency of an incoming request.
///
/// The priority scales every candidate's adjusted distance before selection.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Priority {
    Critical,
    High,
    #[default]
    Normal,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Critical, Priority::High, Priority::Normal];

    /// Multiplier applied to a candidate's adjusted distance.
    #[inline]
    pub fn weight(self) -> f64 {
        match self {
            Priority::Critical => 0.5,
            Priority::High     => 0.75,
            Priority::Normal   => 1.0,
        }
    }

    /// Capitalized label, as written to the dispatch log.
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Critical => "Critical",
            Priority::High     => "High",
            Priority::Normal   => "Normal",
        }
    }

    /// Case-normalize free text and map it to a priority.
    ///
    /// The input is trimmed, lower-cased, and its first character upper-cased
    /// (`"cRiTiCaL"` → `"Critical"`).  Anything other than `Critical` or
    /// `High` is treated as `Normal`.
    pub fn parse_lenient(input: &str) -> Priority {
        let label = capitalize(input.trim());
        match label.as_str() {
            "Critical" => Priority::Critical,
            "High"     => Priority::High,
            "Normal"   => Priority::Normal,
            other => {
                tracing::warn!(priority = other, "unrecognized priority, treating as Normal");
                Priority::Normal
            }
        }
    }
}

impl FromStr for Priority {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Priority::parse_lenient(s))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn capitalize(s: &str) -> String {
    let lower = s.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
