//! Cuisine nationality label.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The national cuisine a recipe belongs to.
///
/// The catalog form offers a fixed set of cuisines, but documents written by
/// earlier revisions carry free-form labels, so unknown values round-trip
/// through [`Nation::Other`] instead of failing to decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Nation {
    Uzbek,
    Uyghur,
    Russian,
    Kazakh,
    Turkish,
    /// A label outside the known set, preserved as written.
    Other(String),
}

impl Nation {
    /// The cuisines offered by the add-listing form.
    pub const KNOWN: [Self; 5] = [
        Self::Uzbek,
        Self::Uyghur,
        Self::Russian,
        Self::Kazakh,
        Self::Turkish,
    ];

    /// The display label for this nation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Uzbek => "Uzbek",
            Self::Uyghur => "Uyghur",
            Self::Russian => "Russian",
            Self::Kazakh => "Kazakh",
            Self::Turkish => "Turkish",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for Nation {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Uzbek" => Self::Uzbek,
            "Uyghur" => Self::Uyghur,
            "Russian" => Self::Russian,
            "Kazakh" => Self::Kazakh,
            "Turkish" => Self::Turkish,
            _ => Self::Other(label),
        }
    }
}

impl From<&str> for Nation {
    fn from(label: &str) -> Self {
        Self::from(label.to_owned())
    }
}

impl From<Nation> for String {
    fn from(nation: Nation) -> Self {
        nation.as_str().to_owned()
    }
}

impl fmt::Display for Nation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
