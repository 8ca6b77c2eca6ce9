use serde::{Deserialize, Serialize};

/// Author label attachable to a note. The set is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Sely,
    Heyo,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Sely, Category::Heyo];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sely => "Sely",
            Self::Heyo => "Heyo",
        }
    }

    /// Exact, case-sensitive match against the wire names.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown category: {}", s))
    }
}
