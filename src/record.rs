//! The allotment record: the sole entity flowing through issuance and
//! verification.
//!
//! Two shapes live here. `AllotmentRecord` is the typed issuance-side model
//! with required and optional fields; `DecodedRecord` is the lenient
//! verification-side shape where every field is optional and display falls
//! back to `"Not specified"`. The split keeps the wire contract permissive
//! at the field level while issuance stays strictly typed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Fallback literal shown for any absent or empty decoded field
pub const NOT_SPECIFIED: &str = "Not specified";

/// Shown when a decoded issue date is present but unparseable
pub const INVALID_DATE: &str = "Invalid date";

/// The closed set of plot sizes offered on the issuance form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlotSize {
    #[default]
    #[serde(rename = "5 Marla")]
    Marla5,
    #[serde(rename = "7 Marla")]
    Marla7,
    #[serde(rename = "10 Marla")]
    Marla10,
    #[serde(rename = "1 Kanal")]
    Kanal1,
}

impl PlotSize {
    /// All sizes in form order (the first is the default)
    pub const ALL: [PlotSize; 4] = [
        PlotSize::Marla5,
        PlotSize::Marla7,
        PlotSize::Marla10,
        PlotSize::Kanal1,
    ];

    /// The exact label used on the wire and on the printed certificate
    pub fn label(&self) -> &'static str {
        match self {
            PlotSize::Marla5 => "5 Marla",
            PlotSize::Marla7 => "7 Marla",
            PlotSize::Marla10 => "10 Marla",
            PlotSize::Kanal1 => "1 Kanal",
        }
    }
}

impl fmt::Display for PlotSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PlotSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PlotSize::ALL
            .into_iter()
            .find(|p| p.label() == s)
            .ok_or_else(|| Error::InvalidPlotSize(s.to_string()))
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// A plot allotment record.
///
/// Field declaration order matches the original wire payloads, so the JSON
/// produced by [`crate::link::verification_url`] carries its keys in the
/// same order as certificates already in circulation.
///
/// A record is immutable once encoded into a verification link: the link
/// captures a snapshot, never a live reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllotmentRecord {
    pub full_name: String,
    #[serde(default)]
    pub father_name: Option<String>,
    pub cnic: String,
    #[serde(default)]
    pub address: Option<String>,
    pub phone: String,
    #[serde(default)]
    pub project_name: Option<String>,
    pub plot_no: String,
    #[serde(default)]
    pub plot_size: PlotSize,
    #[serde(default = "today")]
    pub issue_date: NaiveDate,
}

impl Default for AllotmentRecord {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            father_name: None,
            cnic: String::new(),
            address: None,
            phone: String::new(),
            project_name: None,
            plot_no: String::new(),
            plot_size: PlotSize::default(),
            issue_date: today(),
        }
    }
}

impl AllotmentRecord {
    /// Required-field gate run before any verification link is produced.
    ///
    /// Exactly `fullName`, `plotNo`, `cnic` are checked, in that order.
    /// Empty means the empty string; whitespace-only values pass, matching
    /// the issuance form's behavior.
    pub fn validate(&self) -> Result<()> {
        if self.full_name.is_empty() {
            return Err(Error::MissingField("fullName"));
        }
        if self.plot_no.is_empty() {
            return Err(Error::MissingField("plotNo"));
        }
        if self.cnic.is_empty() {
            return Err(Error::MissingField("cnic"));
        }
        Ok(())
    }

    /// Human-readable reference printed on the certificate: `cnic-plotNo`.
    /// Not unique and not checked against any registry; none exists.
    pub fn reference_id(&self) -> String {
        format!("{}-{}", self.cnic, self.plot_no)
    }

    /// Issue date as shown on the certificate and the verification report,
    /// e.g. `1/15/2024`.
    pub fn formatted_issue_date(&self) -> String {
        format_date(self.issue_date)
    }
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// The verification-side record shape.
///
/// Built from an arbitrary decoded JSON value; every field is optional and
/// typed as a string. Field presence is never validated; decode failure is
/// distinguished only at the JSON-parse level, in [`crate::link`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedRecord {
    pub full_name: Option<String>,
    pub father_name: Option<String>,
    pub cnic: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub project_name: Option<String>,
    pub plot_no: Option<String>,
    pub plot_size: Option<String>,
    pub issue_date: Option<String>,
}

fn str_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

impl DecodedRecord {
    /// Extract the known fields from any JSON value. Non-objects, missing
    /// keys, nulls, empty strings, and non-string values all land as `None`.
    pub fn from_value(value: &Value) -> Self {
        Self {
            full_name: str_field(value, "fullName"),
            father_name: str_field(value, "fatherName"),
            cnic: str_field(value, "cnic"),
            address: str_field(value, "address"),
            phone: str_field(value, "phone"),
            project_name: str_field(value, "projectName"),
            plot_no: str_field(value, "plotNo"),
            plot_size: str_field(value, "plotSize"),
            issue_date: str_field(value, "issueDate"),
        }
    }

    /// Display helper: the field's value or the `"Not specified"` fallback.
    pub fn display<'a>(field: &'a Option<String>) -> &'a str {
        field.as_deref().unwrap_or(NOT_SPECIFIED)
    }

    /// Reference line shown on the verification report. Raw field values
    /// with empty defaults; no fallback literal is interpolated here.
    pub fn reference_id(&self) -> String {
        format!(
            "{}-{}",
            self.cnic.as_deref().unwrap_or_default(),
            self.plot_no.as_deref().unwrap_or_default()
        )
    }

    /// Issue date for display: `"Not specified"` when absent,
    /// `"Invalid date"` when unparseable, else `M/D/YYYY`.
    pub fn formatted_issue_date(&self) -> String {
        match &self.issue_date {
            None => NOT_SPECIFIED.to_string(),
            Some(raw) => match parse_wire_date(raw) {
                Some(date) => format_date(date),
                None => INVALID_DATE.to_string(),
            },
        }
    }

    /// Strict typed conversion used by round-trip checks and by consumers
    /// that need a full [`AllotmentRecord`]. Required fields must be
    /// present; the plot size must be one of the closed set; the issue date
    /// must parse.
    pub fn to_record(&self) -> Result<AllotmentRecord> {
        let full_name = self
            .full_name
            .clone()
            .ok_or(Error::MissingField("fullName"))?;
        let plot_no = self.plot_no.clone().ok_or(Error::MissingField("plotNo"))?;
        let cnic = self.cnic.clone().ok_or(Error::MissingField("cnic"))?;

        let plot_size = match &self.plot_size {
            Some(label) => label.parse()?,
            None => PlotSize::default(),
        };
        let issue_date = match &self.issue_date {
            Some(raw) => {
                parse_wire_date(raw).ok_or_else(|| Error::InvalidDate(raw.clone()))?
            }
            None => return Err(Error::InvalidDate("not specified".to_string())),
        };

        Ok(AllotmentRecord {
            full_name,
            father_name: self.father_name.clone(),
            cnic,
            address: self.address.clone(),
            phone: self.phone.clone().unwrap_or_default(),
            project_name: self.project_name.clone(),
            plot_no,
            plot_size,
            issue_date,
        })
    }
}

/// Accept the ISO calendar-date form the issuer writes, plus a full RFC 3339
/// timestamp, which older payload generators emitted for the same field.
fn parse_wire_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    chrono::DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}
