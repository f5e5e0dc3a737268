//! Transaction record and its positional decoder
//!
//! The upstream service returns each transaction as a bare JSON array:
//!
//! ```text
//! [id, payment_currency, received_currency, sender_bank, receiver_bank, payment_type, amount, laundering_label?]
//! ```
//!
//! Records are decoded into [`Transaction`] as soon as they arrive so a
//! reordered or truncated payload fails loudly instead of shifting columns.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::error::DecodeError;

/// Field names by position in the upstream record
const FIELD_NAMES: [&str; 8] = [
    "id",
    "payment_currency",
    "received_currency",
    "sender_bank",
    "receiver_bank",
    "payment_type",
    "amount",
    "laundering_label",
];

/// Minimum number of positional fields a record must carry
pub const MIN_RECORD_FIELDS: usize = 7;

const ID: usize = 0;
const PAYMENT_CURRENCY: usize = 1;
const RECEIVED_CURRENCY: usize = 2;
const SENDER_BANK: usize = 3;
const RECEIVER_BANK: usize = 4;
const PAYMENT_TYPE: usize = 5;
const AMOUNT: usize = 6;
const LAUNDERING_LABEL: usize = 7;

/// Transaction information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Upstream identifier
    pub id: i64,
    /// Currency the sender paid in
    pub payment_currency: String,
    /// Currency the receiver got
    pub received_currency: String,
    /// Sender bank location
    pub sender_bank: String,
    /// Receiver bank location
    pub receiver_bank: String,
    /// Payment method (e.g. "Cash Deposit", "Cross-border")
    pub payment_type: String,
    /// Transferred amount
    pub amount: Decimal,
    /// Classification attached upstream, when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub laundering_label: Option<String>,
}

impl Transaction {
    /// Decode one positional record
    pub fn from_positional(fields: &[Value]) -> Result<Self, DecodeError> {
        if fields.len() < MIN_RECORD_FIELDS {
            return Err(DecodeError::TooFewFields {
                record: 0,
                expected: MIN_RECORD_FIELDS,
                found: fields.len(),
            });
        }

        Ok(Self {
            id: id_field(&fields[ID])?,
            payment_currency: text_field(fields, PAYMENT_CURRENCY)?,
            received_currency: text_field(fields, RECEIVED_CURRENCY)?,
            sender_bank: text_field(fields, SENDER_BANK)?,
            receiver_bank: text_field(fields, RECEIVER_BANK)?,
            payment_type: text_field(fields, PAYMENT_TYPE)?,
            amount: amount_field(&fields[AMOUNT])?,
            laundering_label: label_field(fields.get(LAUNDERING_LABEL))?,
        })
    }

    /// Whether the upstream label marks this transaction as laundering
    pub fn is_flagged(&self) -> bool {
        match self.laundering_label.as_deref().map(str::trim) {
            Some(label) => label.eq_ignore_ascii_case("laundering") || label == "1",
            None => false,
        }
    }
}

/// Decode a full `/transactions` payload, preserving record order
pub fn decode_transactions(payload: Value) -> Result<Vec<Transaction>, DecodeError> {
    let records = match payload {
        Value::Array(records) => records,
        other => {
            return Err(DecodeError::NotAList {
                found: json_kind(&other),
            })
        }
    };

    records
        .iter()
        .enumerate()
        .map(|(index, record)| match record {
            Value::Array(fields) => Transaction::from_positional(fields).map_err(|e| e.at_record(index)),
            other => Err(DecodeError::NotARecord {
                record: index,
                found: json_kind(other),
            }),
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn invalid(position: usize, reason: String) -> DecodeError {
    DecodeError::InvalidField {
        record: 0,
        position,
        field: FIELD_NAMES[position],
        reason,
    }
}

fn id_field(value: &Value) -> Result<i64, DecodeError> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| invalid(ID, format!("expected an integer identifier, found {}", n))),
        other => Err(invalid(ID, format!("expected an integer identifier, found {}", json_kind(other)))),
    }
}

fn text_field(fields: &[Value], position: usize) -> Result<String, DecodeError> {
    match &fields[position] {
        Value::String(s) => Ok(s.clone()),
        other => Err(invalid(position, format!("expected text, found {}", json_kind(other)))),
    }
}

fn amount_field(value: &Value) -> Result<Decimal, DecodeError> {
    let raw = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        other => return Err(invalid(AMOUNT, format!("expected a number, found {}", json_kind(other)))),
    };
    parse_decimal(&raw).ok_or_else(|| invalid(AMOUNT, format!("'{}' is not a valid amount", raw)))
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

fn label_field(value: Option<&Value>) -> Result<Option<String>, DecodeError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(invalid(
            LAUNDERING_LABEL,
            format!("expected text or null, found {}", json_kind(other)),
        )),
    }
}
