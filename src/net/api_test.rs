use super::*;
use crate::net::types::PatientRecord;

#[test]
fn decode_response_returns_data_payload() {
    let body = r#"{"code":"200","msg":"ok","data":{"patientNo":"P1","name":"Wang"}}"#;
    let patient: PatientRecord = decode_response(200, body).unwrap();
    assert_eq!(patient.patient_no.as_deref(), Some("P1"));
}

#[test]
fn decode_response_maps_patient_not_found_message() {
    let body = format!(r#"{{"code":"-1","msg":"{PATIENT_NOT_FOUND_MSG}","data":null}}"#);
    let err = decode_response::<PatientRecord>(200, &body).unwrap_err();
    assert_eq!(err, FetchError::NotFound);
}

#[test]
fn decode_response_keeps_other_api_errors() {
    let body = r#"{"code":"-1","msg":"用户名或密码错误"}"#;
    let err = decode_response::<serde_json::Value>(200, body).unwrap_err();
    assert_eq!(
        err,
        FetchError::Api {
            code: "-1".to_owned(),
            msg: "用户名或密码错误".to_owned()
        }
    );
}

#[test]
fn decode_response_maps_http_404_to_not_found() {
    let err = decode_response::<PatientRecord>(404, "").unwrap_err();
    assert_eq!(err, FetchError::NotFound);
}

#[test]
fn decode_response_reports_status_for_non_json_error_bodies() {
    let err = decode_response::<PatientRecord>(502, "<html>bad gateway</html>").unwrap_err();
    assert_eq!(err, FetchError::Status(502));
}

#[test]
fn decode_response_reports_decode_errors_on_success_status() {
    let err = decode_response::<PatientRecord>(200, "not json").unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)));
}

#[test]
fn decode_response_treats_missing_data_as_not_found() {
    let err = decode_response::<PatientRecord>(200, r#"{"code":"200"}"#).unwrap_err();
    assert_eq!(err, FetchError::NotFound);
}

#[test]
fn fetch_error_messages_are_readable() {
    assert_eq!(FetchError::Status(401).to_string(), "server responded with status 401");
    assert_eq!(FetchError::NotFound.to_string(), "record not found");
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn network_calls_are_unavailable_off_browser() {
    let api = HttpProfileApi::new("t1");
    let doctor = futures::executor::block_on(api.current_doctor());
    assert_eq!(doctor.unwrap_err(), FetchError::Unavailable);

    let credentials = Credentials {
        username: "admin".to_owned(),
        password: "secret".to_owned(),
    };
    let result = futures::executor::block_on(login(&credentials));
    assert_eq!(result.unwrap_err(), FetchError::Unavailable);
}
