//! Integration tests for the verification-link contract

use chrono::NaiveDate;
use plotcert::record::{DecodedRecord, NOT_SPECIFIED};
use plotcert::{link, AllotmentRecord, Error, PlotSize};

const BASE: &str = "https://estatearena.example/verify";

fn example_record() -> AllotmentRecord {
    AllotmentRecord {
        full_name: "A Khan".to_string(),
        father_name: Some("B Khan".to_string()),
        cnic: "12345-1234567-1".to_string(),
        address: None,
        phone: "0300-0000000".to_string(),
        project_name: None,
        plot_no: "A-12".to_string(),
        plot_size: PlotSize::Marla10,
        issue_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
    }
}

#[test]
fn round_trip_reproduces_every_field() {
    let record = example_record();
    let url = link::verification_url(&record, BASE).unwrap();
    let decoded = link::decode_verification_url(url.as_str()).unwrap();

    assert_eq!(decoded.full_name.as_deref(), Some("A Khan"));
    assert_eq!(decoded.father_name.as_deref(), Some("B Khan"));
    assert_eq!(decoded.cnic.as_deref(), Some("12345-1234567-1"));
    assert_eq!(decoded.phone.as_deref(), Some("0300-0000000"));
    assert_eq!(decoded.plot_no.as_deref(), Some("A-12"));
    assert_eq!(decoded.plot_size.as_deref(), Some("10 Marla"));
    assert_eq!(decoded.issue_date.as_deref(), Some("2024-01-15"));
    assert_eq!(decoded.formatted_issue_date(), "1/15/2024");

    assert_eq!(decoded.to_record().unwrap(), record);
}

#[test]
fn round_trip_with_every_optional_field_populated() {
    let mut record = example_record();
    record.address = Some("12 Canal Road, Lahore".to_string());
    record.project_name = Some("Green Valley Phase II".to_string());

    let url = link::verification_url(&record, BASE).unwrap();
    let decoded = link::decode_verification_url(url.as_str()).unwrap();
    assert_eq!(decoded.to_record().unwrap(), record);
}

#[test]
fn encoding_is_refused_for_each_missing_required_field() {
    for field in ["fullName", "plotNo", "cnic"] {
        let mut record = example_record();
        match field {
            "fullName" => record.full_name = String::new(),
            "plotNo" => record.plot_no = String::new(),
            _ => record.cnic = String::new(),
        }
        match link::verification_url(&record, BASE) {
            Err(Error::MissingField(name)) => assert_eq!(name, field),
            other => panic!("expected a refusal for {field}, got {other:?}"),
        }
    }
}

#[test]
fn encoding_succeeds_with_all_optional_fields_empty() {
    let mut record = example_record();
    record.father_name = None;
    record.address = None;
    record.project_name = None;
    record.phone = String::new();
    assert!(link::verification_url(&record, BASE).is_ok());
}

#[test]
fn missing_optional_fields_display_the_fallback() {
    let record = example_record();
    let url = link::verification_url(&record, BASE).unwrap();
    let decoded = link::decode_verification_url(url.as_str()).unwrap();

    assert_eq!(DecodedRecord::display(&decoded.address), NOT_SPECIFIED);
    assert_eq!(DecodedRecord::display(&decoded.project_name), NOT_SPECIFIED);
    assert_eq!(DecodedRecord::display(&decoded.father_name), "B Khan");
}

#[test]
fn decode_failures_never_yield_partial_data() {
    let no_param = link::decode_verification_url("https://estatearena.example/verify");
    assert!(matches!(no_param, Err(Error::InvalidCertificate)));

    let wrong_param =
        link::decode_verification_url("https://estatearena.example/verify?payload=%7B%7D");
    assert!(matches!(wrong_param, Err(Error::InvalidCertificate)));

    let not_json =
        link::decode_verification_url("https://estatearena.example/verify?data=hello%20there");
    assert!(matches!(not_json, Err(Error::InvalidCertificate)));
}

#[test]
fn any_valid_json_shape_is_accepted_as_a_certificate() {
    let decoded = link::decode_verification_url(
        "https://estatearena.example/verify?data=%7B%22plotNo%22%3A%22A-12%22%7D",
    )
    .unwrap();
    assert_eq!(decoded.plot_no.as_deref(), Some("A-12"));
    assert_eq!(DecodedRecord::display(&decoded.full_name), NOT_SPECIFIED);

    let array = link::decode_verification_url(
        "https://estatearena.example/verify?data=%5B1%2C2%2C3%5D",
    )
    .unwrap();
    assert_eq!(array, DecodedRecord::default());
}

#[test]
fn reference_id_is_verbatim_even_with_delimiters() {
    let mut record = example_record();
    record.cnic = "12-34".to_string();
    record.plot_no = "-7-".to_string();
    assert_eq!(record.reference_id(), "12-34--7-");

    let url = link::verification_url(&record, BASE).unwrap();
    let decoded = link::decode_verification_url(url.as_str()).unwrap();
    assert_eq!(decoded.reference_id(), "12-34--7-");
}

#[test]
fn payload_is_percent_encoded_json_in_one_parameter() {
    let url = link::verification_url(&example_record(), BASE).unwrap();
    let query = url.query().unwrap();
    assert!(query.starts_with("data="));
    assert!(!query.contains('&'));
    // Raw braces and quotes never appear unescaped
    assert!(!query.contains('{'));
    assert!(!query.contains('"'));
}
