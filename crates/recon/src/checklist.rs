use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable names of the consistency checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CheckName {
    TaxesMatchTotalIncl,
    TaxesMatchTotalExcl,
    TaxesAndTotalExclMatchTotalIncl,
}

impl CheckName {
    pub const ALL: [CheckName; 3] = [
        Self::TaxesMatchTotalIncl,
        Self::TaxesMatchTotalExcl,
        Self::TaxesAndTotalExclMatchTotalIncl,
    ];
}

impl fmt::Display for CheckName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TaxesMatchTotalIncl => write!(f, "taxesMatchTotalIncl"),
            Self::TaxesMatchTotalExcl => write!(f, "taxesMatchTotalExcl"),
            Self::TaxesAndTotalExclMatchTotalIncl => write!(f, "taxesAndTotalExclMatchTotalIncl"),
        }
    }
}

/// Outcome of each consistency check, built in one piece.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Checklist {
    entries: BTreeMap<CheckName, bool>,
}

impl Checklist {
    pub fn get(&self, name: CheckName) -> Option<bool> {
        self.entries.get(&name).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CheckName, bool)> + '_ {
        self.entries.iter().map(|(name, passed)| (*name, *passed))
    }

    /// True when every recorded check passed.
    pub fn check_all(&self) -> bool {
        self.entries.values().all(|passed| *passed)
    }
}

impl FromIterator<(CheckName, bool)> for Checklist {
    fn from_iter<I: IntoIterator<Item = (CheckName, bool)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
