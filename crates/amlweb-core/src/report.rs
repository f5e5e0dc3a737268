//! Suspicious activity report (SAR) for a single transaction

use chrono::{DateTime, Utc};

use crate::models::Transaction;

/// Plain-text SAR covering one transaction
#[derive(Debug, Clone)]
pub struct SarReport<'a> {
    transaction: &'a Transaction,
    generated_at: DateTime<Utc>,
}

impl<'a> SarReport<'a> {
    pub fn new(transaction: &'a Transaction) -> Self {
        Self {
            transaction,
            generated_at: Utc::now(),
        }
    }

    pub fn with_generated_at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = generated_at;
        self
    }

    /// Suggested download file name
    pub fn file_name(&self) -> String {
        format!("sar-report-{}.txt", self.transaction.id)
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for SarReport<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tx = self.transaction;
        writeln!(f, "Suspicious Activity Report")?;
        writeln!(f, "Generated: {}", self.generated_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
        writeln!(f)?;
        writeln!(f, "Transaction ID: {}", tx.id)?;
        writeln!(f, "Payment Currency: {}", tx.payment_currency)?;
        writeln!(f, "Received Currency: {}", tx.received_currency)?;
        writeln!(f, "Sender Bank Location: {}", tx.sender_bank)?;
        writeln!(f, "Receiver Bank Location: {}", tx.receiver_bank)?;
        writeln!(f, "Payment Type: {}", tx.payment_type)?;
        writeln!(f, "Amount: {}", tx.amount)?;
        if let Some(label) = &tx.laundering_label {
            writeln!(f, "Assessment: {}", label)?;
            writeln!(f, "Flagged for review: {}", if tx.is_flagged() { "yes" } else { "no" })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn transaction(label: Option<&str>) -> Transaction {
        Transaction {
            id: 42,
            payment_currency: "US dollar".to_string(),
            received_currency: "UK pounds".to_string(),
            sender_bank: "USA".to_string(),
            receiver_bank: "UK".to_string(),
            payment_type: "Cross-border".to_string(),
            amount: Decimal::from_str("9800.00").unwrap(),
            laundering_label: label.map(str::to_string),
        }
    }

    #[test]
    fn test_render_lists_every_field() {
        let tx = transaction(Some("Laundering"));
        let generated_at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let report = SarReport::new(&tx).with_generated_at(generated_at).render();

        let expected = "Suspicious Activity Report\n\
Generated: 2024-03-01 09:30:00 UTC\n\
\n\
Transaction ID: 42\n\
Payment Currency: US dollar\n\
Received Currency: UK pounds\n\
Sender Bank Location: USA\n\
Receiver Bank Location: UK\n\
Payment Type: Cross-border\n\
Amount: 9800.00\n\
Assessment: Laundering\n\
Flagged for review: yes\n";
        assert_eq!(report, expected);
    }

    #[test]
    fn test_render_unflagged_label() {
        let tx = transaction(Some("Not Laundering"));
        let report = SarReport::new(&tx).render();
        assert!(report.contains("Assessment: Not Laundering\n"));
        assert!(report.contains("Flagged for review: no\n"));
    }

    #[test]
    fn test_render_without_label() {
        let tx = transaction(None);
        let report = SarReport::new(&tx).render();
        assert!(report.contains("Amount: 9800.00\n"));
        assert!(!report.contains("Assessment"));
        assert!(!report.contains("Flagged for review"));
    }

    #[test]
    fn test_file_name() {
        let tx = transaction(None);
        assert_eq!(SarReport::new(&tx).file_name(), "sar-report-42.txt");
    }
}
