//! # Bill Rendering
//!
//! Turns a [`BillDraft`] into an HTML document string for the external
//! PDF renderer and share dialog.
//!
//! ## Contract
//! The core's only obligation here is to supply correctly computed values
//! into the template; the PDF conversion itself is an external collaborator.
//! Two layout variants exist, and they affect presentation density only:
//!
//! - [`BillLayout::Full`] - letterhead invoice with a field table and a
//!   totals block
//! - [`BillLayout::Compact`] - plain paragraph list for quick sharing
//!
//! All currency values render with exactly two decimal places.

use chrono::{NaiveDate, Utc};

use crate::money::Money;
use crate::types::BillDraft;

/// Company letterhead shown on full-layout bills.
pub const COMPANY_NAME: &str = "Kiraya Rentals";

/// Which bill template to render. Never changes the computed amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillLayout {
    /// Letterhead invoice: header, field table, totals block.
    Full,
    /// Minimal paragraph list.
    Compact,
}

/// Generates an invoice number in format: KR-YYMMDD-HHMMSS-NNNN
///
/// ## Example
/// `KR-240115-093012-0421`
pub fn invoice_number() -> String {
    let now = Utc::now();
    let seq = now.timestamp_subsec_millis() % 10_000;
    format!("KR-{}-{:04}", now.format("%y%m%d-%H%M%S"), seq)
}

/// Renders a bill draft as an HTML document.
///
/// `invoice_no` and `date` are caller-supplied so rendering stays
/// deterministic (and previews can be re-generated byte-for-byte).
pub fn render_bill(draft: &BillDraft, invoice_no: &str, date: NaiveDate, layout: BillLayout) -> String {
    match layout {
        BillLayout::Full => render_full(draft, invoice_no, date),
        BillLayout::Compact => render_compact(draft),
    }
}

fn render_full(draft: &BillDraft, invoice_no: &str, date: NaiveDate) -> String {
    let total = draft.total();
    let final_amount = draft.final_amount();

    format!(
        r#"<div style="width:100%;font-family:sans-serif;color:#000;">
  <div style="text-align:right;font-size:13px;line-height:1.3;">
    <strong>{company}</strong>
  </div>
  <h3 style="margin:24px 0 12px 0;font-weight:bold;text-align:center;">RENTAL BILL / INVOICE</h3>
  <table style="width:100%;font-size:15px;margin-bottom:18px;border-collapse:collapse;">
    <tbody>
      <tr><td><b>Date:</b></td><td>{date}</td></tr>
      <tr><td><b>Invoice No:</b></td><td>{invoice_no}</td></tr>
      <tr><td><b>Customer Name:</b></td><td>{customer}</td></tr>
      <tr><td><b>Phone No:</b></td><td>{phone}</td></tr>
      <tr><td><b>Item Rented:</b></td><td>{item}</td></tr>
      <tr><td><b>Quantity:</b></td><td>{quantity}</td></tr>
      <tr><td><b>Rate per Day:</b></td><td>&#8377;{rate}</td></tr>
      <tr><td><b>Period:</b></td><td>{start} to {end} ({days} days)</td></tr>
      <tr><td><b>Total Amount:</b></td><td>&#8377;{total}</td></tr>
      <tr><td><b>Advance Paid:</b></td><td>&#8377;{advance}</td></tr>
      <tr><td><b>Discount:</b></td><td>&#8377;{discount}</td></tr>
    </tbody>
  </table>
  <div style="font-size:18px;font-weight:bold;margin-top:16px;text-align:right;">
    FINAL AMOUNT: &#8377;{final_amount}
  </div>
  <div style="font-size:12px;text-align:center;margin-top:30px;color:#555;">
    Thank you for your business!
  </div>
</div>"#,
        company = COMPANY_NAME,
        date = date,
        invoice_no = invoice_no,
        customer = draft.customer_name,
        phone = draft.phone_number,
        item = draft.item_name,
        quantity = draft.quantity,
        rate = Money::from_cents(draft.rate_cents),
        start = draft.start_date,
        end = draft.end_date,
        days = draft.days(),
        total = total,
        advance = Money::from_cents(draft.advance_paid_cents),
        discount = Money::from_cents(draft.discount_cents),
        final_amount = final_amount,
    )
}

fn render_compact(draft: &BillDraft) -> String {
    format!(
        r#"<h1 style="text-align:center;">Rental Bill</h1>
<p><strong>Customer Name:</strong> {customer}</p>
<p><strong>Phone Number:</strong> {phone}</p>
<p><strong>Item Rented:</strong> {item}</p>
<p><strong>Quantity:</strong> {quantity}</p>
<p><strong>Rate per Day:</strong> &#8377;{rate}</p>
<p><strong>Start Date:</strong> {start}</p>
<p><strong>End Date:</strong> {end}</p>
<p><strong>Days:</strong> {days}</p>
<p><strong>Total Amount:</strong> &#8377;{total}</p>
<p><strong>Advance Paid:</strong> &#8377;{advance}</p>
<p><strong>Discount:</strong> &#8377;{discount}</p>
<p><strong>Final Amount:</strong> &#8377;{final_amount}</p>"#,
        customer = draft.customer_name,
        phone = draft.phone_number,
        item = draft.item_name,
        quantity = draft.quantity,
        rate = Money::from_cents(draft.rate_cents),
        start = draft.start_date,
        end = draft.end_date,
        days = draft.days(),
        total = draft.total(),
        advance = Money::from_cents(draft.advance_paid_cents),
        discount = Money::from_cents(draft.discount_cents),
        final_amount = draft.final_amount(),
    )
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_draft() -> BillDraft {
        BillDraft {
            customer_name: "Asha Verma".to_string(),
            phone_number: "9876543210".to_string(),
            item_name: "Concrete Mixer".to_string(),
            quantity: 3,
            rate_cents: 10_000,
            start_date: date(2024, 1, 1),
            end_date: date(2024, 1, 3),
            advance_paid_cents: 20_000,
            discount_cents: 5_000,
        }
    }

    #[test]
    fn test_full_bill_contains_computed_values() {
        let html = render_bill(&sample_draft(), "KR-240115-0001", date(2024, 1, 15), BillLayout::Full);

        assert!(html.contains("RENTAL BILL / INVOICE"));
        assert!(html.contains("KR-240115-0001"));
        assert!(html.contains("Asha Verma"));
        assert!(html.contains("9876543210"));
        assert!(html.contains("Concrete Mixer"));
        // 3 * 100.00 * 3 days = 900.00; 900 - 200 - 50 = 650.00
        assert!(html.contains("&#8377;900.00"));
        assert!(html.contains("&#8377;650.00"));
        assert!(html.contains("(3 days)"));
    }

    #[test]
    fn test_compact_bill_contains_computed_values() {
        let html = render_bill(&sample_draft(), "unused", date(2024, 1, 15), BillLayout::Compact);

        assert!(html.contains("Rental Bill"));
        assert!(html.contains("&#8377;900.00"));
        assert!(html.contains("&#8377;650.00"));
        // compact layout drops the letterhead
        assert!(!html.contains(COMPANY_NAME));
    }

    #[test]
    fn test_layouts_agree_on_amounts() {
        let draft = sample_draft();
        let full = render_bill(&draft, "n", date(2024, 1, 15), BillLayout::Full);
        let compact = render_bill(&draft, "n", date(2024, 1, 15), BillLayout::Compact);

        for amount in ["900.00", "200.00", "50.00", "650.00"] {
            assert!(full.contains(amount), "full layout missing {amount}");
            assert!(compact.contains(amount), "compact layout missing {amount}");
        }
    }

    #[test]
    fn test_two_decimal_rendering() {
        let mut draft = sample_draft();
        draft.rate_cents = 12_345; // 123.45
        draft.quantity = 1;
        draft.advance_paid_cents = 0;
        draft.discount_cents = 0;

        let html = render_bill(&draft, "n", date(2024, 1, 15), BillLayout::Compact);
        assert!(html.contains("&#8377;123.45")); // rate
        assert!(html.contains("&#8377;370.35")); // 123.45 * 3 days
    }

    #[test]
    fn test_invoice_number_format() {
        let invoice = invoice_number();
        assert!(invoice.starts_with("KR-"));
        // KR- + yymmdd + - + hhmmss + - + nnnn
        assert_eq!(invoice.len(), 21);
    }
}
