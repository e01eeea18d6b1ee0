//! Homework verdicts and notification rendering

use crate::error::{ParseStatusError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// Review verdict of a homework submission
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The reviewer accepted the work
    Approved,
    /// The work is waiting for or under review
    Reviewing,
    /// The reviewer sent the work back with remarks
    Rejected,
}

impl Verdict {
    /// Every verdict the API is known to return
    pub const ALL: [Verdict; 3] = [Verdict::Approved, Verdict::Reviewing, Verdict::Rejected];

    /// Verdict code as it appears in the API's `status` field
    pub fn code(self) -> &'static str {
        match self {
            Verdict::Approved => "approved",
            Verdict::Reviewing => "reviewing",
            Verdict::Rejected => "rejected",
        }
    }

    /// Human-readable verdict text used in notifications
    pub fn text(self) -> &'static str {
        match self {
            Verdict::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Verdict::Reviewing => "Работа взята на проверку ревьюером.",
            Verdict::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl FromStr for Verdict {
    type Err = ParseStatusError;

    fn from_str(code: &str) -> std::result::Result<Self, Self::Err> {
        Verdict::ALL
            .into_iter()
            .find(|verdict| verdict.code() == code)
            .ok_or_else(|| ParseStatusError::UnknownVerdict {
                status: Some(code.to_string()),
            })
    }
}

/// Render the notification text for one homework record
///
/// The verdict is checked before the name, so a record that is wrong in both
/// ways reports [`ParseStatusError::UnknownVerdict`].
///
/// # Errors
///
/// Returns [`Error::ParseStatus`](crate::Error::ParseStatus) if the `status`
/// is not a known verdict or `homework_name` is missing or empty.
pub fn parse_status(homework: &Value) -> Result<String> {
    let name = homework.get("homework_name").and_then(Value::as_str);
    let status = homework.get("status").and_then(Value::as_str);

    let verdict = match status {
        Some(code) => code.parse::<Verdict>()?,
        None => return Err(ParseStatusError::UnknownVerdict { status: None }.into()),
    };

    let name = match name {
        Some(name) if !name.is_empty() => name,
        _ => return Err(ParseStatusError::MissingHomeworkName.into()),
    };

    Ok(render(name, verdict))
}

fn render(name: &str, verdict: Verdict) -> String {
    format!(
        "Изменился статус проверки работы \"{name}\". {}",
        verdict.text()
    )
}
