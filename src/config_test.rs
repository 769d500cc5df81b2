use super::*;

#[test]
fn api_url_joins_base_and_path() {
    let url = api_url("/user/login");
    assert!(url.ends_with("/user/login"));
    assert!(!url.contains("//user"));
}

#[test]
fn document_title_appends_app_name() {
    assert_eq!(document_title("Login"), format!("Login - {APP_NAME}"));
}
