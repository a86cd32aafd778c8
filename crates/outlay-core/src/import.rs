//! Transaction input parsers (JSON payload and CSV exports)

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::io::Read;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::Transaction;

/// Supported input payload formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    #[default]
    Json,
    Csv,
}

impl InputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

impl std::str::FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(format!("Unknown input format: {}. Available: json, csv", s)),
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A transaction record as it appears in the JSON payload.
/// Unknown fields (category, description, ...) are ignored.
#[derive(Debug, Deserialize)]
struct RawTransaction {
    date: String,
    amount: RawAmount,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

impl RawAmount {
    fn to_f64(&self) -> Result<f64> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Text(s) => parse_amount(s),
        }
    }
}

/// Parse a payload in the given format
pub fn parse_input<R: Read>(mut reader: R, format: InputFormat) -> Result<Vec<Transaction>> {
    match format {
        InputFormat::Json => {
            let mut payload = String::new();
            reader.read_to_string(&mut payload)?;
            parse_json(&payload)
        }
        InputFormat::Csv => parse_csv(reader),
    }
}

/// Parse a JSON array of `{date, amount}` records.
///
/// Empty values (`null`, `{}`, `""`, `0`, `false`) are treated as an empty
/// list so they surface as "no transaction data" rather than a parse error.
pub fn parse_json(payload: &str) -> Result<Vec<Transaction>> {
    let invalid =
        |e: serde_json::Error| Error::Parse(format!("Invalid transaction payload: {}", e));

    let value: serde_json::Value = serde_json::from_str(payload).map_err(invalid)?;
    if is_empty_payload(&value) {
        debug!("Empty JSON payload");
        return Ok(Vec::new());
    }

    let raw: Vec<RawTransaction> = serde_json::from_value(value).map_err(invalid)?;
    let transactions = raw
        .iter()
        .map(|r| -> Result<Transaction> {
            Ok(Transaction::new(parse_date(&r.date)?, r.amount.to_f64()?))
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(count = transactions.len(), "Parsed JSON transactions");
    Ok(transactions)
}

fn is_empty_payload(value: &serde_json::Value) -> bool {
    use serde_json::Value;

    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

/// Parse CSV with a header row containing `date` and `amount` columns
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::Parse(format!("CSV is missing a '{}' column", name)))
    };
    let date_col = column("date")?;
    let amount_col = column("amount")?;

    let mut transactions = Vec::new();

    for result in rdr.records() {
        let record = result?;

        // Blank trailing lines
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        let date_str = record
            .get(date_col)
            .ok_or_else(|| Error::Parse("Missing date".into()))?;
        let amount_str = record
            .get(amount_col)
            .ok_or_else(|| Error::Parse("Missing amount".into()))?;

        transactions.push(Transaction::new(
            parse_date(date_str)?,
            parse_amount(amount_str)?,
        ));
    }

    debug!(count = transactions.len(), "Parsed CSV transactions");
    Ok(transactions)
}

/// Parse an ISO-8601 date or timestamp.
///
/// Offsets (`Z`, `+02:00`) are accepted but not converted: the calendar
/// date as written is the one that counts.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }

    let datetime_formats = [
        "%Y-%m-%dT%H:%M:%S%.f", // 2024-01-15T10:30:00.000
        "%Y-%m-%d %H:%M:%S%.f", // 2024-01-15 10:30:00
        "%Y-%m-%dT%H:%M",       // 2024-01-15T10:30
    ];

    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| Error::Parse(format!("Unable to parse date: {}", s)))
}

/// Parse an amount string, handling currency symbols and commas
pub fn parse_amount(s: &str) -> Result<f64> {
    let cleaned: String = s
        .trim()
        .replace(['$', ',', ' '], "")
        .replace('(', "-")
        .replace(')', "");

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| Error::Parse(format!("Unable to parse amount: {}", s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-01-15").unwrap(), ymd(2024, 1, 15));
        assert_eq!(parse_date("2024-01-15T10:30:00Z").unwrap(), ymd(2024, 1, 15));
        assert_eq!(
            parse_date("2024-01-31T23:30:00.000Z").unwrap(),
            ymd(2024, 1, 31)
        );
        assert_eq!(parse_date("2024-02-01 08:00:00").unwrap(), ymd(2024, 2, 1));
    }

    #[test]
    fn test_parse_date_keeps_written_offset() {
        // 2024-03-01 01:00 at +02:00 is still Feb 29 in UTC, but the
        // written calendar date is what gets bucketed
        assert_eq!(
            parse_date("2024-03-01T01:00:00+02:00").unwrap(),
            ymd(2024, 3, 1)
        );
    }

    #[test]
    fn test_parse_date_invalid() {
        assert!(matches!(parse_date("not a date"), Err(Error::Parse(_))));
        assert!(parse_date("2024-13-01").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("$1,234.56").unwrap(), 1234.56);
        assert_eq!(parse_amount("-123.45").unwrap(), -123.45);
        assert_eq!(parse_amount("(100.00)").unwrap(), -100.00);
        assert!(parse_amount("twelve").is_err());
        assert!(parse_amount("NaN").is_err());
    }

    #[test]
    fn test_parse_json() {
        let payload = r#"[
            {"date": "2024-01-15T00:00:00.000Z", "amount": 100, "category": "Food"},
            {"date": "2024-02-15", "amount": "200.50"}
        ]"#;

        let transactions = parse_json(payload).unwrap();
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0], Transaction::new(ymd(2024, 1, 15), 100.0));
        assert_eq!(transactions[1].amount, 200.5);
    }

    #[test]
    fn test_parse_json_empty_and_null() {
        assert!(parse_json("[]").unwrap().is_empty());
        assert!(parse_json("null").unwrap().is_empty());
        assert!(parse_json("{}").unwrap().is_empty());
        assert!(parse_json("\"\"").unwrap().is_empty());
        assert!(parse_json("false").unwrap().is_empty());
    }

    #[test]
    fn test_parse_json_rejects_non_list_payloads() {
        assert!(matches!(
            parse_json(r#"{"date": "2024-01-15", "amount": 5}"#),
            Err(Error::Parse(_))
        ));
        assert!(matches!(parse_json("42"), Err(Error::Parse(_))));
    }

    #[test]
    fn test_parse_json_rejects_bad_records() {
        assert!(matches!(
            parse_json(r#"[{"date": "2024-01-15"}]"#),
            Err(Error::Parse(_))
        ));
        assert!(matches!(
            parse_json(r#"[{"date": "yesterday", "amount": 5}]"#),
            Err(Error::Parse(_))
        ));
        assert!(matches!(
            parse_json(r#"[{"date": "2024-01-15", "amount": "abc"}]"#),
            Err(Error::Parse(_))
        ));
        assert!(matches!(parse_json("{not json"), Err(Error::Parse(_))));
    }

    #[test]
    fn test_parse_csv() {
        let csv = "Date,Description,Amount\n\
                   2024-01-15,GROCERY,\"$1,200.00\"\n\
                   2024-02-03,REFUND,(12.50)\n\
                   \n";
        let transactions = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].amount, 1200.0);
        assert_eq!(transactions[1].amount, -12.5);
        assert_eq!(transactions[1].date, ymd(2024, 2, 3));
    }

    #[test]
    fn test_parse_csv_missing_column() {
        let csv = "when,amount\n2024-01-15,10\n";
        let err = parse_csv(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("'date'"));
    }

    #[test]
    fn test_parse_input_dispatch() {
        let json = parse_input(r#"[{"date":"2024-01-01","amount":1}]"#.as_bytes(), InputFormat::Json)
            .unwrap();
        assert_eq!(json.len(), 1);

        let csv = parse_input("date,amount\n2024-01-01,1\n".as_bytes(), InputFormat::Csv).unwrap();
        assert_eq!(csv, json);
    }

    #[test]
    fn test_input_format_from_str() {
        assert_eq!("CSV".parse::<InputFormat>().unwrap(), InputFormat::Csv);
        assert!("xml".parse::<InputFormat>().is_err());
    }
}
