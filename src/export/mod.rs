//! Export adapters: PDF download and platform print pipeline.
//!
//! Both paths consume the rendered certificate surface as an opaque bitmap.
//! Failures are surfaced as errors and never mutate the record or the
//! rendered surface.

#[cfg(feature = "pdf")]
pub mod pdf;

#[cfg(feature = "print")]
pub mod print;

use crate::record::AllotmentRecord;

/// Download filename for a record:
/// `Plot_Allotment_<fullName>_<plotNo>.pdf`, with each whitespace run in
/// the name collapsed to a single underscore. The plot number is
/// interpolated untouched.
pub fn pdf_file_name(record: &AllotmentRecord) -> String {
    format!(
        "Plot_Allotment_{}_{}.pdf",
        underscore_whitespace(&record.full_name),
        record.plot_no
    )
}

fn underscore_whitespace(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_run = false;
    for ch in input.chars() {
        if ch.is_whitespace() {
            if !in_run {
                out.push('_');
                in_run = true;
            }
        } else {
            out.push(ch);
            in_run = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(full_name: &str, plot_no: &str) -> AllotmentRecord {
        AllotmentRecord {
            full_name: full_name.to_string(),
            plot_no: plot_no.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn file_name_replaces_whitespace_runs() {
        assert_eq!(
            pdf_file_name(&named("A Khan", "A-12")),
            "Plot_Allotment_A_Khan_A-12.pdf"
        );
        assert_eq!(
            pdf_file_name(&named("A  B\tC", "7")),
            "Plot_Allotment_A_B_C_7.pdf"
        );
    }

    #[test]
    fn leading_and_trailing_whitespace_become_underscores() {
        assert_eq!(
            pdf_file_name(&named(" A Khan ", "A-12")),
            "Plot_Allotment__A_Khan__A-12.pdf"
        );
    }
}
