use serde::{Deserialize, Serialize};

/// How total worksite employees are sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InputMode {
    /// Number of clients times average WSE per client.
    #[default]
    #[serde(rename = "byClients")]
    ByClients,
    /// Total WSE entered directly.
    #[serde(rename = "byWSE")]
    ByWse,
}

impl InputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ByClients => "byClients",
            Self::ByWse => "byWSE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "byClients" => Some(Self::ByClients),
            "byWSE" => Some(Self::ByWse),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ByClients => "Estimate by clients × avg. WSE",
            Self::ByWse => "Enter total WSE directly",
        }
    }
}
