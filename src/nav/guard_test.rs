use super::*;
use crate::nav::routes::{RouteDescriptor, RouteGroup, RouteMeta};
use crate::net::types::Role;

// =============================================================
// Helpers
// =============================================================

fn logged_out() -> Session {
    Session::default()
}

fn logged_in(role: Role) -> Session {
    let mut session = Session::default();
    session.token = "tok".to_owned();
    session.role = Some(role);
    session
}

fn go(session: &Session, destination: &str) -> Decision {
    evaluate(&RouteTable::default(), session, destination).decision
}

fn redirect_to(path: &'static str) -> Decision {
    Decision::Redirect(Redirect::to(path))
}

// =============================================================
// Logged out
// =============================================================

#[test]
fn logged_out_protected_route_redirects_to_login_with_return_path() {
    let decision = go(&logged_out(), "/appointment");
    assert_eq!(
        decision,
        Decision::Redirect(Redirect {
            path: LOGIN_PATH,
            return_to: Some("/appointment".to_owned()),
        })
    );
    assert_eq!(decision.href().as_deref(), Some("/login?redirect=/appointment"));
}

#[test]
fn logged_out_return_path_keeps_query() {
    let decision = go(&logged_out(), "/my-appointments?page=2&size=10");
    assert_eq!(
        decision.href().as_deref(),
        Some("/login?redirect=/my-appointments%3Fpage%3D2%26size%3D10")
    );
}

#[test]
fn logged_out_back_office_redirects_to_login_without_return_path() {
    assert_eq!(go(&logged_out(), "/back/dashboard"), redirect_to(LOGIN_PATH));
    assert_eq!(go(&logged_out(), "/back"), redirect_to(LOGIN_PATH));
}

#[test]
fn logged_out_public_routes_proceed() {
    for path in ["/", "/doctor", "/department", "/login", "/register", "/forget", "/404", "/missing"] {
        assert_eq!(go(&logged_out(), path), Decision::Proceed, "{path}");
    }
}

// =============================================================
// Patients
// =============================================================

#[test]
fn patient_back_office_redirects_home() {
    let session = logged_in(Role::Patient);
    assert_eq!(go(&session, "/back/dashboard"), redirect_to(HOME_PATH));
    assert_eq!(go(&session, "/back/user"), redirect_to(HOME_PATH));
}

#[test]
fn patient_front_routes_proceed() {
    let session = logged_in(Role::Patient);
    for path in ["/", "/appointment", "/my-appointments", "/medical-record", "/profile", "/register"] {
        assert_eq!(go(&session, path), Decision::Proceed, "{path}");
    }
}

#[test]
fn patient_on_login_goes_home() {
    assert_eq!(go(&logged_in(Role::Patient), "/login"), redirect_to(HOME_PATH));
}

// =============================================================
// Staff
// =============================================================

#[test]
fn staff_on_login_goes_to_back_office() {
    for role in [Role::Admin, Role::Doctor, Role::Nurse] {
        assert_eq!(go(&logged_in(role), "/login"), redirect_to(BACK_OFFICE_HOME));
    }
}

#[test]
fn staff_back_office_routes_proceed() {
    for role in [Role::Admin, Role::Doctor, Role::Nurse] {
        let session = logged_in(role);
        assert_eq!(go(&session, "/back/dashboard"), Decision::Proceed);
        assert_eq!(go(&session, "/back/prescription"), Decision::Proceed);
        assert_eq!(go(&session, "/back"), Decision::Proceed);
    }
}

#[test]
fn staff_front_routes_redirect_to_back_office() {
    let session = logged_in(Role::Doctor);
    for path in ["/", "/appointment", "/doctor", "/register"] {
        assert_eq!(go(&session, path), redirect_to(BACK_OFFICE_HOME), "{path}");
    }
}

#[test]
fn staff_unknown_route_lands_in_back_office() {
    // Unknown paths resolve to /404, which is outside the back office.
    assert_eq!(go(&logged_in(Role::Admin), "/nowhere"), redirect_to(BACK_OFFICE_HOME));
}

#[test]
fn token_without_role_is_treated_as_staff() {
    let mut session = logged_out();
    session.token = "tok".to_owned();
    assert_eq!(go(&session, "/"), redirect_to(BACK_OFFICE_HOME));
    assert_eq!(landing_path(&session), BACK_OFFICE_HOME);
}

// =============================================================
// Titles and views
// =============================================================

#[test]
fn evaluate_reports_title_and_view() {
    let nav = evaluate(&RouteTable::default(), &logged_out(), "/doctor");
    assert_eq!(nav.title, Some("Our Doctors"));
    assert_eq!(nav.document_title, Some(config::document_title("Our Doctors")));
    assert_eq!(nav.view, Some(ViewId::DoctorIntro));
}

#[test]
fn evaluate_sets_title_even_when_redirecting() {
    let nav = evaluate(&RouteTable::default(), &logged_out(), "/profile");
    assert!(matches!(nav.decision, Decision::Redirect(_)));
    assert_eq!(nav.title, Some("My Profile"));
}

#[test]
fn layout_route_has_no_title() {
    static UNTITLED: &[RouteDescriptor] = &[RouteDescriptor {
        path: "/plain",
        name: None,
        view: None,
        redirect: None,
        meta: RouteMeta::NONE,
        group: RouteGroup::Front,
        children: &[],
    }];
    let nav = evaluate(&RouteTable::new(UNTITLED), &logged_out(), "/plain");
    assert_eq!(nav.document_title, None);
    assert_eq!(nav.decision, Decision::Proceed);
}

// =============================================================
// Helpers
// =============================================================

#[test]
fn back_office_prefix_is_segment_aware() {
    assert!(is_back_office("/back"));
    assert!(is_back_office("/back/dashboard"));
    assert!(!is_back_office("/backup"));
    assert!(!is_back_office("/"));
    assert!(!is_back_office("/appointment"));
}

#[test]
fn query_values_escape_separators_and_round_trip() {
    let raw = "/appointment?doctor=3&day=mon tue#slot";
    let encoded = encode_query_value(raw);
    assert_eq!(encoded, "/appointment%3Fdoctor%3D3%26day%3Dmon%20tue%23slot");
    let decoded = percent_encoding::percent_decode_str(&encoded).decode_utf8().unwrap();
    assert_eq!(decoded, raw);
}

#[test]
fn query_values_encode_non_ascii_as_utf8() {
    assert_eq!(encode_query_value("/doctor?name=李"), "/doctor%3Fname%3D%E6%9D%8E");
}
