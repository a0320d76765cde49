//! # Report Aggregation and Rendering
//!
//! Builds the historical rental report: one line per rental record plus a
//! trailing aggregate-total row.
//!
//! ## Recompute, Don't Trust
//! Every row's amount is re-derived from the record's raw snapshot fields
//! (quantity × rate × inclusive days) through the billing calculator, never
//! read from the stored `total_amount_cents`. Historical reports therefore
//! stay consistent even for records whose stored total was never persisted
//! (settlement is the only writer of stored totals).

use chrono::NaiveDate;

use crate::money::Money;
use crate::types::RentalRecord;

/// Sums the recomputed total over a sequence of rental records.
///
/// ## Example
/// ```rust,ignore
/// let records = db.reports().rentals_in_range(start, end).await?;
/// let grand_total = aggregate_total(&records);
/// ```
pub fn aggregate_total<'a, I>(records: I) -> Money
where
    I: IntoIterator<Item = &'a RentalRecord>,
{
    records
        .into_iter()
        .map(RentalRecord::computed_total)
        .fold(Money::zero(), |acc, amount| acc + amount)
}

/// Renders the rental report as an HTML document.
///
/// One row per record (`#, customer, item, quantity, rate, amount, date`)
/// plus a trailing aggregate-total row. Empty input renders a single
/// "no records" row instead of an empty table.
pub fn to_report_document(records: &[RentalRecord], start: NaiveDate, end: NaiveDate) -> String {
    let mut rows = String::new();

    if records.is_empty() {
        rows.push_str(
            r#"      <tr><td colspan="7" style="text-align:center;padding:10px;">No rental records found in this period.</td></tr>
"#,
        );
    } else {
        for (idx, record) in records.iter().enumerate() {
            let amount = record.computed_total();
            rows.push_str(&format!(
                r#"      <tr>
        <td style="text-align:center;">{no}</td>
        <td>{customer}</td>
        <td>{item}</td>
        <td style="text-align:center;">{quantity}</td>
        <td style="text-align:right;">&#8377;{rate}</td>
        <td style="text-align:right;">&#8377;{amount}</td>
        <td style="text-align:center;">{date}</td>
      </tr>
"#,
                no = idx + 1,
                customer = record.customer_name,
                item = record.item_name,
                quantity = record.quantity,
                rate = record.rate(),
                amount = amount,
                date = record.created_at.format("%Y-%m-%d"),
            ));
        }

        let total = aggregate_total(records);
        rows.push_str(&format!(
            r#"      <tr style="font-weight:bold;background-color:#f2f2f2;">
        <td colspan="5" style="text-align:right;">Total Amount</td>
        <td style="text-align:right;">&#8377;{total}</td>
        <td></td>
      </tr>
"#,
        ));
    }

    format!(
        r#"<html>
  <head>
    <style>
      body {{ font-family: Arial, sans-serif; margin: 20px; }}
      h1 {{ text-align: center; }}
      table {{ width: 100%; border-collapse: collapse; margin-top: 20px; }}
      th, td {{ border: 1px solid #000; padding: 6px; }}
      th {{ background-color: #f2f2f2; }}
    </style>
  </head>
  <body>
    <h1>Rental Report</h1>
    <p style="text-align:center;">{start} to {end}</p>
    <table>
      <tr>
        <th>#</th><th>Customer</th><th>Item</th><th>Qty</th><th>Rate</th><th>Amount</th><th>Date</th>
      </tr>
{rows}    </table>
  </body>
</html>"#,
    )
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RentalStatus;
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(quantity: i64, rate_cents: i64, days: i64) -> RentalRecord {
        let start = date(2024, 1, 1);
        let end = start + chrono::Duration::days(days - 1);
        RentalRecord {
            id: "r".to_string(),
            customer_name: "Asha".to_string(),
            phone_number: "9876543210".to_string(),
            item_id: "i".to_string(),
            item_name: "Mixer".to_string(),
            rate_cents,
            quantity,
            start_date: start,
            end_date: end,
            advance_paid_cents: 0,
            discount_cents: 0,
            status: RentalStatus::Pending,
            created_at: Utc::now(),
            paid_at: None,
            total_amount_cents: None,
            final_amount_cents: None,
            aadhaar_photo: None,
            vehicle_photo: None,
        }
    }

    #[test]
    fn test_aggregate_total_recomputes_from_raw_fields() {
        // 3 * 100.00 * 3 = 900.00 and 1 * 150.00 * 3 = 450.00
        let mut a = record(3, 10_000, 3);
        let b = record(1, 15_000, 3);

        // stored total is stale on purpose; aggregation must ignore it
        a.total_amount_cents = Some(1);

        assert_eq!(aggregate_total([&a, &b]).cents(), 135_000);
    }

    #[test]
    fn test_aggregate_total_empty_is_zero() {
        assert_eq!(aggregate_total([]), Money::zero());
    }

    #[test]
    fn test_report_document_rows() {
        let records = vec![record(3, 10_000, 3), record(1, 15_000, 3)];
        let html = to_report_document(&records, date(2024, 1, 1), date(2024, 1, 31));

        // exactly 2 data rows + 1 total row + 1 header row
        assert_eq!(html.matches("<tr").count(), 4);
        assert!(html.contains("&#8377;900.00"));
        assert!(html.contains("&#8377;450.00"));
        assert!(html.contains("Total Amount"));
        assert!(html.contains("&#8377;1350.00"));
    }

    #[test]
    fn test_report_document_empty() {
        let html = to_report_document(&[], date(2024, 1, 1), date(2024, 1, 31));

        assert!(html.contains("No rental records found in this period."));
        // header row + the single "no records" row, no total row
        assert_eq!(html.matches("<tr").count(), 2);
        assert!(!html.contains("Total Amount"));
    }
}
