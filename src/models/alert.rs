use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// A numeric payload field that is present but cannot be read as a number.
/// Missing fields are not errors (they default to 0), this is strictly for
/// values of the wrong shape.
#[derive(Debug, Error, PartialEq)]
#[error("field `{field}` is not numeric: {value}")]
pub struct FieldError {
    pub field: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertKind {
    Entry,
    Tp1,
    Tp2,
    Sl,
    Eod,
    Unknown,
}

impl AlertKind {
    pub fn from_type(s: &str) -> AlertKind {
        match s {
            "entry" => AlertKind::Entry,
            "tp1" => AlertKind::Tp1,
            "tp2" => AlertKind::Tp2,
            "sl" => AlertKind::Sl,
            "eod" => AlertKind::Eod,
            _ => AlertKind::Unknown,
        }
    }

    /// Kind of the payload's `type` field, `"unknown"` when absent.
    pub fn of_payload(payload: &Value) -> AlertKind {
        let type_str = payload
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        AlertKind::from_type(type_str)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::Entry => "entry",
            AlertKind::Tp1 => "tp1",
            AlertKind::Tp2 => "tp2",
            AlertKind::Sl => "sl",
            AlertKind::Eod => "eod",
            AlertKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tolerant numeric read: missing or null defaults to 0, numbers pass
/// through, numeric strings are parsed. Anything else is a FieldError.
fn f64_field(payload: &Value, field: &'static str) -> Result<f64, FieldError> {
    match payload.get(field) {
        None | Some(Value::Null) => Ok(0.0),
        Some(Value::Number(n)) => Ok(n.as_f64().unwrap_or(0.0)),
        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| FieldError {
            field,
            value: s.clone(),
        }),
        Some(other) => Err(FieldError {
            field,
            value: other.to_string(),
        }),
    }
}

fn str_field(payload: &Value, field: &str, default: &str) -> String {
    payload
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

/// Position-opened alert.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryAlert {
    pub direction: String,
    pub entry: f64,
    pub stop: f64,
    pub tp1: f64,
    pub tp2: f64,
    pub mode: String,
    pub time: String,
    pub day: String,
    pub timeframe: String,
    pub mo_bias: Option<String>,
}

impl EntryAlert {
    pub fn from_payload(payload: &Value) -> Result<Self, FieldError> {
        Ok(EntryAlert {
            direction: str_field(payload, "direction", "UNKNOWN"),
            entry: f64_field(payload, "entry")?,
            stop: f64_field(payload, "stop")?,
            tp1: f64_field(payload, "tp1")?,
            tp2: f64_field(payload, "tp2")?,
            mode: str_field(payload, "mode", ""),
            time: str_field(payload, "time", ""),
            day: str_field(payload, "day", ""),
            timeframe: str_field(payload, "timeframe", "Unknown"),
            mo_bias: payload.get("mo_bias").map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            }),
        })
    }

    pub fn risk(&self) -> f64 {
        (self.entry - self.stop).abs()
    }

    pub fn tp1_dist(&self) -> f64 {
        (self.tp1 - self.entry).abs()
    }

    pub fn tp2_dist(&self) -> f64 {
        (self.tp2 - self.entry).abs()
    }
}

/// TP1/TP2-hit alert (same shape for both levels).
#[derive(Debug, Clone, PartialEq)]
pub struct TakeProfitAlert {
    pub direction: String,
    pub price: f64,
    pub profit: f64,
}

impl TakeProfitAlert {
    pub fn from_payload(payload: &Value) -> Result<Self, FieldError> {
        Ok(TakeProfitAlert {
            direction: str_field(payload, "direction", "UNKNOWN"),
            price: f64_field(payload, "price")?,
            profit: f64_field(payload, "profit")?,
        })
    }
}

/// Stop-loss-hit alert.
#[derive(Debug, Clone, PartialEq)]
pub struct StopLossAlert {
    pub direction: String,
    pub price: f64,
    pub loss: f64,
}

impl StopLossAlert {
    pub fn from_payload(payload: &Value) -> Result<Self, FieldError> {
        Ok(StopLossAlert {
            direction: str_field(payload, "direction", "UNKNOWN"),
            price: f64_field(payload, "price")?,
            loss: f64_field(payload, "loss")?,
        })
    }
}

/// Forced end-of-day close alert.
#[derive(Debug, Clone, PartialEq)]
pub struct EodAlert {
    pub direction: String,
    pub price: f64,
    pub pnl: f64,
}

impl EodAlert {
    pub fn from_payload(payload: &Value) -> Result<Self, FieldError> {
        Ok(EodAlert {
            direction: str_field(payload, "direction", "UNKNOWN"),
            price: f64_field(payload, "price")?,
            pnl: f64_field(payload, "pnl")?,
        })
    }

    pub fn result(&self) -> &'static str {
        if self.pnl > 0.0 {
            "PROFIT"
        } else if self.pnl < 0.0 {
            "LOSS"
        } else {
            "BREAKEVEN"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_from_type_field() {
        assert_eq!(AlertKind::of_payload(&json!({"type": "entry"})), AlertKind::Entry);
        assert_eq!(AlertKind::of_payload(&json!({"type": "tp1"})), AlertKind::Tp1);
        assert_eq!(AlertKind::of_payload(&json!({"type": "eod"})), AlertKind::Eod);
        assert_eq!(
            AlertKind::of_payload(&json!({"type": "whatever"})),
            AlertKind::Unknown
        );
    }

    #[test]
    fn kind_defaults_to_unknown_when_type_missing() {
        assert_eq!(AlertKind::of_payload(&json!({})), AlertKind::Unknown);
        assert_eq!(AlertKind::of_payload(&json!({"type": 7})), AlertKind::Unknown);
        assert_eq!(AlertKind::of_payload(&json!([1, 2])), AlertKind::Unknown);
    }

    #[test]
    fn entry_parses_full_payload() {
        let payload = json!({
            "type": "entry",
            "direction": "LONG",
            "entry": 4500.25,
            "stop": 4490.0,
            "tp1": 4513.5,
            "tp2": 4520.75,
            "mode": "Silver Bullet",
            "time": "10:15",
            "day": "Tuesday",
            "timeframe": "5m",
            "mo_bias": "Above MO (bullish)"
        });
        let alert = EntryAlert::from_payload(&payload).unwrap();
        assert_eq!(alert.direction, "LONG");
        assert!((alert.risk() - 10.25).abs() < 1e-9);
        assert!((alert.tp1_dist() - 13.25).abs() < 1e-9);
        assert!((alert.tp2_dist() - 20.5).abs() < 1e-9);
        assert_eq!(alert.mo_bias.as_deref(), Some("Above MO (bullish)"));
    }

    #[test]
    fn entry_missing_fields_default() {
        let alert = EntryAlert::from_payload(&json!({"type": "entry"})).unwrap();
        assert_eq!(alert.direction, "UNKNOWN");
        assert_eq!(alert.timeframe, "Unknown");
        assert_eq!(alert.mode, "");
        assert_eq!(alert.entry, 0.0);
        assert_eq!(alert.risk(), 0.0);
        assert!(alert.mo_bias.is_none());
    }

    #[test]
    fn numeric_strings_are_coerced() {
        let alert =
            TakeProfitAlert::from_payload(&json!({"price": "4500.25", "profit": " 12.5 "}))
                .unwrap();
        assert_eq!(alert.price, 4500.25);
        assert_eq!(alert.profit, 12.5);
    }

    #[test]
    fn non_numeric_value_is_a_field_error() {
        let err = StopLossAlert::from_payload(&json!({"loss": "a lot"})).unwrap_err();
        assert_eq!(err.field, "loss");

        let err = EodAlert::from_payload(&json!({"pnl": {"nested": 1}})).unwrap_err();
        assert_eq!(err.field, "pnl");
    }

    #[test]
    fn null_is_treated_as_missing() {
        let alert = EodAlert::from_payload(&json!({"pnl": null})).unwrap();
        assert_eq!(alert.pnl, 0.0);
        assert_eq!(alert.result(), "BREAKEVEN");
    }

    #[test]
    fn eod_result_by_sign() {
        let mk = |pnl: f64| EodAlert {
            direction: "LONG".to_string(),
            price: 4500.0,
            pnl,
        };
        assert_eq!(mk(8.25).result(), "PROFIT");
        assert_eq!(mk(-5.25).result(), "LOSS");
        assert_eq!(mk(0.0).result(), "BREAKEVEN");
    }

    #[test]
    fn non_string_mo_bias_is_rendered() {
        let alert = EntryAlert::from_payload(&json!({"mo_bias": 1.5})).unwrap();
        assert_eq!(alert.mo_bias.as_deref(), Some("1.5"));
    }
}
