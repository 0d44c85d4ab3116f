use serde::Deserialize;
use serde::Serialize;
use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

/// Review state of a comment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    New,
    InProgress,
    Resolved,
}

impl Status {
    pub fn all() -> [Self; 3] {
        [Self::New, Self::InProgress, Self::Resolved]
    }
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
        }
    }
}

impl FromStr for Status {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("unknown comment status {:?}", s))
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_display_form() {
        for status in Status::all() {
            assert_eq!(status.to_string().parse::<Status>().unwrap(), status);
        }
    }
    #[test]
    fn rejects_unknown_status() {
        assert!("closed".parse::<Status>().is_err());
        assert!("Resolved".parse::<Status>().is_err());
    }
    #[test]
    fn serde_matches_database_text() {
        let json = serde_json::to_string(&Status::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        let status: Status = serde_json::from_str("\"resolved\"").unwrap();
        assert_eq!(status, Status::Resolved);
    }
}
