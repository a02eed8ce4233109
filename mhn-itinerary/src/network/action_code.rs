use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// pending project action recorded against a network link. variants are
/// declared in increasing priority; `Delete` dominates all others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ActionCode {
    /// 4: link is added by the project
    Add,
    /// 1: link attributes are modified
    Modify,
    /// 2: link is replaced
    Replace,
    /// 3: link is removed
    Delete,
}

impl FromStr for ActionCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "modify" => Ok(ActionCode::Modify),
            "2" | "replace" => Ok(ActionCode::Replace),
            "3" | "delete" => Ok(ActionCode::Delete),
            "4" | "add" => Ok(ActionCode::Add),
            other => Err(format!("unknown action code '{other}'")),
        }
    }
}

impl TryFrom<String> for ActionCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ActionCode::from_str(&value)
    }
}

impl From<ActionCode> for String {
    fn from(value: ActionCode) -> Self {
        value.to_string()
    }
}

impl Display for ActionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ActionCode::Add => "add",
            ActionCode::Modify => "modify",
            ActionCode::Replace => "replace",
            ActionCode::Delete => "delete",
        };
        write!(f, "{s}")
    }
}
