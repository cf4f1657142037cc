use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// The two token kinds the dashboard lists, each served by its own factory contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenFamily {
    /// Trust Network Tokens, enumerated with `getDeployedTNTs`.
    Tnt,
    /// Contribution Accounting Tokens, enumerated with `getOwnedCATs`.
    Cat,
}

impl TokenFamily {
    pub fn label(self) -> &'static str {
        match self {
            TokenFamily::Tnt => "TNT",
            TokenFamily::Cat => "CAT",
        }
    }
}

impl Display for TokenFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
