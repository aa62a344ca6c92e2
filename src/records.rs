//! Typed grade records emitted by the ingestion pipeline.

use serde::{Serialize, Serializer};
use std::fmt;

/// Outcome recorded in one score cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Score {
    /// A numeric mark, passed through without range checks.
    Numeric(f64),
    /// Non-numeric credit.
    Pass,
    /// The student was marked absent.
    Absent,
}

impl Score {
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            Score::Numeric(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Numeric(n) => write!(f, "{n}"),
            Score::Pass => f.write_str("pass"),
            Score::Absent => f.write_str("absent"),
        }
    }
}

// Numbers stay numbers in JSON; the markers become plain strings so CSV and
// JSON output share one representation.
impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Score::Numeric(n) => serializer.serialize_f64(*n),
            Score::Pass => serializer.serialize_str("pass"),
            Score::Absent => serializer.serialize_str("absent"),
        }
    }
}

/// One scored cell of the sheet, attributed to a user, subject and date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeRecord {
    pub user_id: String,
    pub user_name: Option<String>,
    pub subject: String,
    pub topic: String,
    /// `YYYY-MM-DD` when recognized, otherwise the raw header text.
    pub date: String,
    pub score: Score,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(score: Score) -> GradeRecord {
        GradeRecord {
            user_id: "u1".to_string(),
            user_name: Some("Alice".to_string()),
            subject: "Math".to_string(),
            topic: "Midterm".to_string(),
            date: "2024-09-05".to_string(),
            score,
        }
    }

    #[test]
    fn test_score_display() {
        assert_eq!(Score::Numeric(5.0).to_string(), "5");
        assert_eq!(Score::Numeric(4.5).to_string(), "4.5");
        assert_eq!(Score::Pass.to_string(), "pass");
        assert_eq!(Score::Absent.to_string(), "absent");
    }

    #[test]
    fn test_as_numeric() {
        assert_eq!(Score::Numeric(3.0).as_numeric(), Some(3.0));
        assert_eq!(Score::Pass.as_numeric(), None);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(record(Score::Numeric(5.0))).unwrap();
        assert_eq!(json["score"], 5.0);
        assert_eq!(json["user_name"], "Alice");

        let json = serde_json::to_value(record(Score::Absent)).unwrap();
        assert_eq!(json["score"], "absent");
    }
}
