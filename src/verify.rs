//! Read-only verification report.
//!
//! The decoded record is rendered as plain text for inspection. Every
//! field falls back to the `"Not specified"` literal; a decode failure
//! never reaches this module; the caller shows [`INVALID_CERTIFICATE`]
//! instead, with no partial data.

use std::fmt::Write;

use chrono::NaiveDate;

use crate::record::{format_date, DecodedRecord};

/// The generic invalid-certificate view, shown for every decode failure
pub const INVALID_CERTIFICATE: &str = "Invalid Certificate\n\
    The QR code could not be verified. Please ensure you scanned the correct code.";

/// Render the verification report for a decoded record.
///
/// `verified_on` is the date the report is produced, not anything carried
/// by the payload.
pub fn render_report(decoded: &DecodedRecord, organization: &str, verified_on: NaiveDate) -> String {
    let mut out = String::new();
    let field = DecodedRecord::display;

    let _ = writeln!(out, "Plot Allotment Verification");
    let _ = writeln!(out, "Certificate ID: {}", decoded.reference_id());
    let _ = writeln!(out);
    let _ = writeln!(out, "Allottee Details");
    let _ = writeln!(out, "  Full Name:     {}", field(&decoded.full_name));
    let _ = writeln!(out, "  Father's Name: {}", field(&decoded.father_name));
    let _ = writeln!(out, "  CNIC:          {}", field(&decoded.cnic));
    let _ = writeln!(out, "  Phone:         {}", field(&decoded.phone));
    let _ = writeln!(out, "  Address:       {}", field(&decoded.address));
    let _ = writeln!(out);
    let _ = writeln!(out, "Plot Details");
    let _ = writeln!(out, "  Project Name:  {}", field(&decoded.project_name));
    let _ = writeln!(out, "  Plot No:       {}", field(&decoded.plot_no));
    let _ = writeln!(out, "  Plot Size:     {}", field(&decoded.plot_size));
    let _ = writeln!(out, "  Issue Date:    {}", decoded.formatted_issue_date());
    let _ = writeln!(out);
    let _ = writeln!(out, "Verified on: {}", format_date(verified_on));
    let _ = writeln!(out, "\u{2713} Verified");
    let _ = writeln!(
        out,
        "This is an authentic certificate issued by {organization}"
    );
    out
}
