use serde::{Deserialize, Serialize};

/// Direction of a relationship lookup relative to the asset being expanded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeDirection {
    /// Edges where the asset is the child; the counterpart is a parent
    Ancestors,
    /// Edges where the asset is the parent; the counterpart is a derivative
    Descendants,
}

impl EdgeDirection {
    /// Both directions in expansion order
    pub const ALL: [EdgeDirection; 2] = [EdgeDirection::Ancestors, EdgeDirection::Descendants];

    /// Generation offset of a counterpart reached in this direction
    pub fn generation_delta(self) -> i32 {
        match self {
            EdgeDirection::Ancestors => -1,
            EdgeDirection::Descendants => 1,
        }
    }

    /// Orients an edge between the expanded asset and its counterpart as
    /// `(source, target)`, source being the parent side.
    pub fn orient<'a, T>(self, this: &'a T, counterpart: &'a T) -> (&'a T, &'a T) {
        match self {
            EdgeDirection::Ancestors => (counterpart, this),
            EdgeDirection::Descendants => (this, counterpart),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EdgeDirection::Ancestors => "ancestors",
            EdgeDirection::Descendants => "descendants",
        }
    }
}

impl std::fmt::Display for EdgeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
