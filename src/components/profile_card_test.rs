use super::*;
use crate::net::types::{Department, DoctorRecord, PatientRecord};

#[test]
fn profile_rows_skip_empty_fields() {
    let profile = UserProfile {
        username: Some("zhang".to_owned()),
        name: Some(String::new()),
        phone: Some("13800000000".to_owned()),
        ..UserProfile::default()
    };
    assert_eq!(
        profile_rows(&profile),
        vec![("Username", "zhang".to_owned()), ("Phone", "13800000000".to_owned())]
    );
}

#[test]
fn doctor_rows_include_department_and_status() {
    let doctor = DoctorRecord {
        doctor_no: Some("D7".to_owned()),
        department: Some(Department {
            id: Some(1),
            name: Some("Neurology".to_owned()),
        }),
        status: Some(0),
        ..DoctorRecord::default()
    };
    let rows = detail_rows(&RoleDetail::Doctor(doctor));
    assert_eq!(rows[0], ("Doctor No.", "D7".to_owned()));
    assert_eq!(rows[1], ("Department", "Neurology".to_owned()));
    assert_eq!(rows.last(), Some(&("Status", "Inactive".to_owned())));
}

#[test]
fn patient_rows_list_clinical_fields() {
    let patient = PatientRecord {
        patient_no: Some("P9".to_owned()),
        allergies: Some("penicillin".to_owned()),
        ..PatientRecord::default()
    };
    let rows = detail_rows(&RoleDetail::Patient(patient));
    assert_eq!(
        rows,
        vec![("Patient No.", "P9".to_owned()), ("Allergies", "penicillin".to_owned())]
    );
}

#[test]
fn refresh_error_message_hides_superseded_fetches() {
    assert_eq!(refresh_error_message(&FetchError::Superseded), None);
    let message = refresh_error_message(&FetchError::Status(500)).unwrap();
    assert!(message.starts_with("Could not load role details"));
}
