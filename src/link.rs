//! The verification-link wire contract.
//!
//! The entire protocol of the system is one URL query parameter:
//! `?data=<percent-encoded JSON text>`. Encoding runs the required-field
//! gate first, so a partial or garbled link is never produced. Decoding is
//! a single fallible step (percent-decode then JSON-parse), and every
//! failure collapses into the generic [`Error::InvalidCertificate`] state.
//!
//! No schema version travels with the payload; a structural change to the
//! record breaks already-issued QR codes silently.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::Value;
use url::Url;

use crate::error::{Error, Result};
use crate::record::{AllotmentRecord, DecodedRecord};

/// Name of the sole query parameter
pub const DATA_PARAM: &str = "data";

// Escape everything encodeURIComponent escapes, and nothing more, so links
// are byte-identical to ones minted by the original issuance form.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Build the verification URL for a record.
///
/// `base` is the verification endpoint (a `/verify`-style URL); its query,
/// if any, is replaced. Fails with [`Error::MissingField`] before any link
/// is produced when `fullName`, `plotNo`, or `cnic` is empty.
pub fn verification_url(record: &AllotmentRecord, base: &str) -> Result<Url> {
    record.validate()?;

    let json = serde_json::to_string(record).map_err(|e| Error::EncodeError(e.to_string()))?;
    let mut url =
        Url::parse(base).map_err(|e| Error::ConfigError(format!("Bad base URL {base}: {e}")))?;
    let encoded = utf8_percent_encode(&json, COMPONENT).to_string();
    url.set_query(Some(&format!("{DATA_PARAM}={encoded}")));

    log::debug!("encoded verification link for {}", record.reference_id());
    Ok(url)
}

/// Decode the `data` parameter of an incoming verification URL.
///
/// Missing parameter, undecodable bytes, or malformed JSON all yield
/// [`Error::InvalidCertificate`]; no partial data escapes a failure. Any
/// syntactically valid JSON is accepted and handed to the lenient field
/// extraction in [`DecodedRecord::from_value`].
pub fn decode_verification_url(input: &str) -> Result<DecodedRecord> {
    let url = Url::parse(input).map_err(|_| Error::InvalidCertificate)?;
    let query = url.query().ok_or(Error::InvalidCertificate)?;

    let raw = query
        .split('&')
        .find_map(|pair| {
            let mut parts = pair.splitn(2, '=');
            (parts.next() == Some(DATA_PARAM)).then(|| parts.next().unwrap_or(""))
        })
        .ok_or(Error::InvalidCertificate)?;

    decode_data_param(raw)
}

/// Decode a bare, still percent-encoded `data` value.
pub fn decode_data_param(raw: &str) -> Result<DecodedRecord> {
    let text = percent_decode_str(raw)
        .decode_utf8()
        .map_err(|_| Error::InvalidCertificate)?;
    let value: Value = serde_json::from_str(&text).map_err(|_| Error::InvalidCertificate)?;
    Ok(DecodedRecord::from_value(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::PlotSize;
    use chrono::NaiveDate;

    fn sample() -> AllotmentRecord {
        AllotmentRecord {
            full_name: "A Khan".to_string(),
            father_name: Some("B Khan".to_string()),
            cnic: "12345-1234567-1".to_string(),
            address: Some("12 Canal Road".to_string()),
            phone: "0300-0000000".to_string(),
            project_name: Some("Green Valley".to_string()),
            plot_no: "A-12".to_string(),
            plot_size: PlotSize::Marla10,
            issue_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        }
    }

    #[test]
    fn url_carries_a_single_data_parameter() {
        let url = verification_url(&sample(), "https://example.org/verify").unwrap();
        assert_eq!(url.path(), "/verify");
        let query = url.query().unwrap();
        assert!(query.starts_with("data=%7B%22fullName%22"));
        assert_eq!(query.matches('&').count(), 0);
    }

    #[test]
    fn encoding_is_refused_before_any_link_exists() {
        let mut record = sample();
        record.cnic = String::new();
        assert!(matches!(
            verification_url(&record, "https://example.org/verify"),
            Err(Error::MissingField("cnic"))
        ));
    }

    #[test]
    fn encode_decode_round_trip() {
        let record = sample();
        let url = verification_url(&record, "https://example.org/verify").unwrap();
        let decoded = decode_verification_url(url.as_str()).unwrap();
        assert_eq!(decoded.to_record().unwrap(), record);
    }

    #[test]
    fn missing_parameter_is_the_generic_invalid_state() {
        for input in [
            "https://example.org/verify",
            "https://example.org/verify?other=1",
            "not a url at all",
        ] {
            assert!(matches!(
                decode_verification_url(input),
                Err(Error::InvalidCertificate)
            ));
        }
    }

    #[test]
    fn malformed_payload_is_the_generic_invalid_state() {
        assert!(matches!(
            decode_data_param("%7Bnot-json"),
            Err(Error::InvalidCertificate)
        ));
        assert!(matches!(
            decode_data_param(""),
            Err(Error::InvalidCertificate)
        ));
    }

    #[test]
    fn any_json_shape_is_accepted() {
        let decoded = decode_data_param("%5B1%2C2%5D").unwrap();
        assert_eq!(decoded, DecodedRecord::default());
    }
}
