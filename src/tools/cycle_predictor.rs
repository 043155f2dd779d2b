use chrono::{DateTime, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::Tool;
use crate::error::ToolError;

pub const MIN_CYCLE_LENGTH: i64 = 21;
pub const MAX_CYCLE_LENGTH: i64 = 45;
pub const DEFAULT_CYCLE_LENGTH: i64 = 28;

/// Days between ovulation and the next period (luteal phase length).
const LUTEAL_DAYS: i64 = 14;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleArgs {
    pub last_period_date: String,
    /// Number or numeric string; absent means the 28-day default.
    #[serde(default)]
    pub cycle_length: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FertileWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CyclePrediction {
    pub next_period: NaiveDate,
    pub ovulation_date: NaiveDate,
    pub cycle_length: i64,
    pub fertile_window: FertileWindow,
}

/// Predicts the next period, ovulation and fertile window.
pub fn predict_cycle(last_period_date: &str, cycle_length: i64) -> Result<CyclePrediction, ToolError> {
    let last_period = parse_date(last_period_date)?;

    if !(MIN_CYCLE_LENGTH..=MAX_CYCLE_LENGTH).contains(&cycle_length) {
        return Err(ToolError::CycleLengthOutOfRange(cycle_length));
    }

    // Dates near the end of chrono's calendar have no room for a full cycle.
    let shift = |date: NaiveDate, days: i64| {
        date.checked_add_signed(Duration::days(days))
            .ok_or_else(|| ToolError::InvalidDate(last_period_date.trim().to_string()))
    };

    let next_period = shift(last_period, cycle_length)?;
    let ovulation_date = shift(next_period, -LUTEAL_DAYS)?;

    Ok(CyclePrediction {
        next_period,
        ovulation_date,
        cycle_length,
        fertile_window: FertileWindow {
            start: shift(ovulation_date, -5)?,
            end: shift(ovulation_date, 1)?,
        },
    })
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp.
fn parse_date(raw: &str) -> Result<NaiveDate, ToolError> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map_err(|_| ToolError::InvalidDate(raw.to_string()))
}

fn parse_cycle_length(value: Option<&serde_json::Value>) -> Result<i64, ToolError> {
    let invalid = |reason: String| ToolError::InvalidArguments {
        tool: "cyclePredictor".to_string(),
        reason,
    };

    match value {
        None | Some(serde_json::Value::Null) => Ok(DEFAULT_CYCLE_LENGTH),
        Some(serde_json::Value::Number(n)) => match (n.as_i64(), n.as_f64()) {
            (Some(days), _) => Ok(days),
            (None, Some(days)) if days.fract() == 0.0 => Ok(days as i64),
            _ => Err(invalid(format!("cycle length must be a whole number of days, got {}", n))),
        },
        Some(serde_json::Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| invalid(format!("cycle length '{}' is not a number", s))),
        Some(other) => Err(invalid(format!("unexpected cycle length {}", other))),
    }
}

pub struct CyclePredictor;

impl Tool for CyclePredictor {
    type Args = CycleArgs;
    type Output = CyclePrediction;

    fn name(&self) -> &'static str {
        "cyclePredictor"
    }

    fn result_key(&self) -> &'static str {
        "prediction"
    }

    fn run(&self, args: &CycleArgs) -> Result<CyclePrediction, ToolError> {
        let cycle_length = parse_cycle_length(args.cycle_length.as_ref())?;
        log::debug!(
            "CyclePredictor: last period {} / {} days",
            args.last_period_date,
            cycle_length
        );
        predict_cycle(&args.last_period_date, cycle_length)
    }

    fn format(&self, _args: &CycleArgs, prediction: &CyclePrediction) -> String {
        format!(
            "Based on your cycle information:\n\
            - Next Period Expected: {}\n\
            - Cycle Length: {} days\n\
            - Fertile Window: {} to {}\n\
            - Estimated Ovulation: {}\n\n\
            Note: These predictions are estimates based on average cycle patterns. \
            Individual cycles can vary, and this should not be used as the sole method \
            for contraception or fertility planning.",
            prediction.next_period.format("%Y-%m-%d"),
            prediction.cycle_length,
            prediction.fertile_window.start.format("%Y-%m-%d"),
            prediction.fertile_window.end.format("%Y-%m-%d"),
            prediction.ovulation_date.format("%Y-%m-%d"),
        )
    }
}
