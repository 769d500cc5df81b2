use super::*;

// =============================================================
// Role
// =============================================================

#[test]
fn role_codes_round_trip_through_from_code() {
    for role in Role::ALL {
        assert_eq!(Role::from_code(role.as_code()), Some(role));
    }
}

#[test]
fn role_from_code_trims_but_is_case_sensitive() {
    assert_eq!(Role::from_code("  NURSE "), Some(Role::Nurse));
    assert_eq!(Role::from_code("nurse"), None);
    assert_eq!(Role::from_code(""), None);
    assert_eq!(Role::from_code("USER"), None);
}

#[test]
fn role_serde_uses_uppercase_codes() {
    assert_eq!(serde_json::to_string(&Role::Doctor).unwrap(), "\"DOCTOR\"");
    let role: Role = serde_json::from_str("\"PATIENT\"").unwrap();
    assert_eq!(role, Role::Patient);
}

#[test]
fn only_patient_is_not_staff() {
    assert!(Role::Admin.is_staff());
    assert!(Role::Doctor.is_staff());
    assert!(Role::Nurse.is_staff());
    assert!(!Role::Patient.is_staff());
}

// =============================================================
// UserProfile
// =============================================================

#[test]
fn user_profile_decodes_camel_case_and_ignores_extra_fields() {
    let json = serde_json::json!({
        "id": 7,
        "username": "zhang",
        "name": "Zhang San",
        "roleCode": "DOCTOR",
        "password": "hash",
        "status": 1
    });
    let profile: UserProfile = serde_json::from_value(json).unwrap();
    assert_eq!(profile.id, Some(7));
    assert_eq!(profile.role_code.as_deref(), Some("DOCTOR"));
    assert_eq!(profile.email, None);
}

#[test]
fn display_name_falls_back_to_username_then_placeholder() {
    let mut profile = UserProfile {
        name: Some("Li Si".to_owned()),
        username: Some("lisi".to_owned()),
        ..UserProfile::default()
    };
    assert_eq!(profile.display_name(), "Li Si");
    profile.name = Some(String::new());
    assert_eq!(profile.display_name(), "lisi");
    profile.username = None;
    assert_eq!(profile.display_name(), "user");
}

// =============================================================
// LoginResult
// =============================================================

#[test]
fn login_result_from_flat_user_record() {
    let payload = serde_json::json!({
        "id": 3,
        "username": "admin",
        "roleCode": "ADMIN",
        "token": "jwt-abc"
    });
    let result = LoginResult::from_payload(payload).unwrap();
    assert_eq!(result.token.as_deref(), Some("jwt-abc"));
    assert_eq!(result.role_code.as_deref(), Some("ADMIN"));
    assert_eq!(result.user_info.unwrap().username.as_deref(), Some("admin"));
}

#[test]
fn login_result_from_wrapped_payload() {
    let payload = serde_json::json!({
        "userInfo": { "roleCode": "PATIENT" },
        "token": "t1"
    });
    let result = LoginResult::from_payload(payload).unwrap();
    assert_eq!(result.token.as_deref(), Some("t1"));
    assert_eq!(result.role_code, None);
    assert_eq!(
        result.user_info.unwrap().role_code.as_deref(),
        Some("PATIENT")
    );
}

#[test]
fn login_result_rejects_non_object_payload() {
    assert!(LoginResult::from_payload(serde_json::json!("nope")).is_err());
}

// =============================================================
// Records
// =============================================================

#[test]
fn doctor_record_accepts_string_status() {
    let json = serde_json::json!({
        "id": 1,
        "doctorNo": "D001",
        "status": "1",
        "department": { "id": 2, "name": "Cardiology" }
    });
    let doctor: DoctorRecord = serde_json::from_value(json).unwrap();
    assert_eq!(doctor.status, Some(1));
    assert_eq!(doctor.doctor_no.as_deref(), Some("D001"));
    assert_eq!(doctor.department.unwrap().name.as_deref(), Some("Cardiology"));
}

#[test]
fn doctor_record_missing_status_is_none() {
    let doctor: DoctorRecord = serde_json::from_value(serde_json::json!({ "id": 1 })).unwrap();
    assert_eq!(doctor.status, None);
}

#[test]
fn patient_record_decodes_snake_fields_from_camel_case() {
    let json = serde_json::json!({
        "patientNo": "P100",
        "idCard": "110101199003070011",
        "medicalHistory": "none",
        "birthday": "1990-03-07"
    });
    let patient: PatientRecord = serde_json::from_value(json).unwrap();
    assert_eq!(patient.patient_no.as_deref(), Some("P100"));
    assert_eq!(patient.id_card.as_deref(), Some("110101199003070011"));
    assert_eq!(patient.birthday.as_deref(), Some("1990-03-07"));
}

// =============================================================
// ApiEnvelope
// =============================================================

#[test]
fn envelope_accepts_string_and_numeric_codes() {
    let a: ApiEnvelope = serde_json::from_str(r#"{"code":"200","msg":"ok","data":1}"#).unwrap();
    let b: ApiEnvelope = serde_json::from_str(r#"{"code":200}"#).unwrap();
    assert!(a.is_success());
    assert!(b.is_success());
    assert_eq!(b.data, None);
}

#[test]
fn envelope_rejects_boolean_code() {
    assert!(serde_json::from_str::<ApiEnvelope>(r#"{"code":true}"#).is_err());
}
