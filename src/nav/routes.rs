//! Static route table and path resolution.
//!
//! DESIGN
//! ======
//! Routes are plain data declared once in [`ROUTES`]. Resolution walks the
//! nested descriptors depth-first and returns the matched chain (parent
//! layouts first, leaf last), following route-level redirects, so both the
//! guard and the app shell work from the same answer.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use crate::net::types::{MenuEntry, Role};

/// Route-level redirects followed before giving up, guarding against cycles.
const MAX_ROUTE_REDIRECTS: usize = 8;

/// Path of the catch-all descriptor.
pub const CATCH_ALL: &str = "*";

/// Fixed route partitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteGroup {
    /// Public and patient-facing pages.
    Front,
    /// Staff pages under `/back`.
    BackOffice,
    Error,
}

/// Roles a route is intended for. Drives menu building only; access is
/// decided by the guard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Audience {
    Everyone,
    Staff,
    Roles(&'static [Role]),
}

impl Audience {
    #[must_use]
    pub fn admits(self, role: Role) -> bool {
        match self {
            Audience::Everyone => true,
            Audience::Staff => role.is_staff(),
            Audience::Roles(roles) => roles.contains(&role),
        }
    }
}

/// View rendered for a route, resolved to a component by the app shell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewId {
    FrontLayout,
    Home,
    DepartmentIntro,
    DoctorIntro,
    BookAppointment,
    MyAppointments,
    MyMedicalRecords,
    Profile,
    Login,
    Register,
    ForgetPassword,
    BackOfficeLayout,
    Dashboard,
    UserManagement,
    DepartmentManagement,
    DoctorManagement,
    PatientManagement,
    MedicineManagement,
    MedicineCategoryManagement,
    ScheduleManagement,
    AppointmentManagement,
    MedicalRecordManagement,
    PrescriptionManagement,
    BackOfficeProfile,
    NotFound,
}

/// Declarative per-route metadata.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteMeta {
    pub title: Option<&'static str>,
    pub requires_auth: bool,
    pub icon: Option<&'static str>,
    pub audience: Audience,
}

impl RouteMeta {
    pub const NONE: RouteMeta = RouteMeta {
        title: None,
        requires_auth: false,
        icon: None,
        audience: Audience::Everyone,
    };

    #[must_use]
    pub const fn titled(title: &'static str) -> Self {
        Self {
            title: Some(title),
            ..Self::NONE
        }
    }

    #[must_use]
    pub const fn auth(self) -> Self {
        Self {
            requires_auth: true,
            ..self
        }
    }

    #[must_use]
    pub const fn icon(self, icon: &'static str) -> Self {
        Self {
            icon: Some(icon),
            ..self
        }
    }

    #[must_use]
    pub const fn audience(self, audience: Audience) -> Self {
        Self { audience, ..self }
    }
}

/// One entry in the route table. Child paths are relative to the parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: &'static str,
    pub name: Option<&'static str>,
    pub view: Option<ViewId>,
    pub redirect: Option<&'static str>,
    pub meta: RouteMeta,
    pub group: RouteGroup,
    pub children: &'static [RouteDescriptor],
}

impl RouteDescriptor {
    const fn page(path: &'static str, name: &'static str, view: ViewId, meta: RouteMeta, group: RouteGroup) -> Self {
        Self {
            path,
            name: Some(name),
            view: Some(view),
            redirect: None,
            meta,
            group,
            children: &[],
        }
    }

    const fn front(path: &'static str, name: &'static str, view: ViewId, meta: RouteMeta) -> Self {
        Self::page(path, name, view, meta, RouteGroup::Front)
    }

    const fn back(path: &'static str, name: &'static str, view: ViewId, meta: RouteMeta) -> Self {
        Self::page(path, name, view, meta, RouteGroup::BackOffice)
    }
}

const ALL_STAFF: &[Role] = &[Role::Admin, Role::Doctor, Role::Nurse];
const ADMIN_ONLY: &[Role] = &[Role::Admin];
const ADMIN_AND_DOCTOR: &[Role] = &[Role::Admin, Role::Doctor];
const ADMIN_AND_NURSE: &[Role] = &[Role::Admin, Role::Nurse];

const FRONT_CHILDREN: &[RouteDescriptor] = &[
    RouteDescriptor::front("", "Home", ViewId::Home, RouteMeta::titled("Home")),
    RouteDescriptor::front("department", "Department", ViewId::DepartmentIntro, RouteMeta::titled("Departments")),
    RouteDescriptor::front("doctor", "Doctor", ViewId::DoctorIntro, RouteMeta::titled("Our Doctors")),
    RouteDescriptor::front(
        "appointment",
        "Appointment",
        ViewId::BookAppointment,
        RouteMeta::titled("Book Appointment").auth(),
    ),
    RouteDescriptor::front(
        "my-appointments",
        "MyAppointments",
        ViewId::MyAppointments,
        RouteMeta::titled("My Appointments").auth(),
    ),
    RouteDescriptor::front(
        "medical-record",
        "MedicalRecord",
        ViewId::MyMedicalRecords,
        RouteMeta::titled("My Medical Records").auth(),
    ),
    RouteDescriptor::front("profile", "Profile", ViewId::Profile, RouteMeta::titled("My Profile").auth()),
];

const BACK_CHILDREN: &[RouteDescriptor] = &[
    RouteDescriptor::back(
        "dashboard",
        "Dashboard",
        ViewId::Dashboard,
        RouteMeta::titled("Dashboard").icon("HomeFilled").audience(Audience::Staff),
    ),
    RouteDescriptor::back(
        "user",
        "UserManagement",
        ViewId::UserManagement,
        RouteMeta::titled("Users").icon("User").audience(Audience::Roles(ADMIN_ONLY)),
    ),
    RouteDescriptor::back(
        "department",
        "DepartmentManagement",
        ViewId::DepartmentManagement,
        RouteMeta::titled("Departments").icon("Office").audience(Audience::Roles(ADMIN_ONLY)),
    ),
    RouteDescriptor::back(
        "doctor",
        "DoctorManagement",
        ViewId::DoctorManagement,
        RouteMeta::titled("Doctors").icon("User").audience(Audience::Roles(ADMIN_ONLY)),
    ),
    RouteDescriptor::back(
        "patient",
        "PatientManagement",
        ViewId::PatientManagement,
        RouteMeta::titled("Patients").icon("User").audience(Audience::Roles(ALL_STAFF)),
    ),
    RouteDescriptor::back(
        "medicine",
        "MedicineManagement",
        ViewId::MedicineManagement,
        RouteMeta::titled("Medicines").icon("FirstAidKit").audience(Audience::Roles(ADMIN_AND_NURSE)),
    ),
    RouteDescriptor::back(
        "medicine-category",
        "MedicineCategoryManagement",
        ViewId::MedicineCategoryManagement,
        RouteMeta::titled("Medicine Categories").icon("Menu").audience(Audience::Roles(ADMIN_ONLY)),
    ),
    RouteDescriptor::back(
        "schedule",
        "ScheduleManagement",
        ViewId::ScheduleManagement,
        RouteMeta::titled("Schedules").icon("Calendar").audience(Audience::Roles(ALL_STAFF)),
    ),
    RouteDescriptor::back(
        "appointment",
        "AppointmentManagement",
        ViewId::AppointmentManagement,
        RouteMeta::titled("Appointments").icon("Calendar").audience(Audience::Roles(ALL_STAFF)),
    ),
    RouteDescriptor::back(
        "medical-record",
        "MedicalRecordManagement",
        ViewId::MedicalRecordManagement,
        RouteMeta::titled("Medical Records").icon("Document").audience(Audience::Roles(ADMIN_AND_DOCTOR)),
    ),
    RouteDescriptor::back(
        "prescription",
        "PrescriptionManagement",
        ViewId::PrescriptionManagement,
        RouteMeta::titled("Prescriptions").icon("List").audience(Audience::Roles(ALL_STAFF)),
    ),
    RouteDescriptor::back(
        "profile",
        "BackendProfile",
        ViewId::BackOfficeProfile,
        RouteMeta::titled("Profile").icon("UserFilled").audience(Audience::Staff),
    ),
];

/// The application's route table: front-of-house, back-office, then error routes.
pub static ROUTES: &[RouteDescriptor] = &[
    RouteDescriptor {
        path: "/",
        name: None,
        view: Some(ViewId::FrontLayout),
        redirect: None,
        meta: RouteMeta::NONE,
        group: RouteGroup::Front,
        children: FRONT_CHILDREN,
    },
    RouteDescriptor::front("/login", "Login", ViewId::Login, RouteMeta::titled("Login")),
    RouteDescriptor::front("/register", "Register", ViewId::Register, RouteMeta::titled("Register")),
    RouteDescriptor::front(
        "/forget",
        "ForgetPassword",
        ViewId::ForgetPassword,
        RouteMeta::titled("Forgot Password"),
    ),
    RouteDescriptor {
        path: "/back",
        name: None,
        view: Some(ViewId::BackOfficeLayout),
        redirect: Some("/back/dashboard"),
        meta: RouteMeta::NONE,
        group: RouteGroup::BackOffice,
        children: BACK_CHILDREN,
    },
    RouteDescriptor::page("/404", "404", ViewId::NotFound, RouteMeta::titled("404"), RouteGroup::Error),
    RouteDescriptor {
        path: CATCH_ALL,
        name: None,
        view: None,
        redirect: Some("/404"),
        meta: RouteMeta::NONE,
        group: RouteGroup::Error,
        children: &[],
    },
];

/// A location resolved against the route table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedRoute {
    /// Path plus any query string and fragment, after route-level redirects.
    pub full_path: String,
    /// Normalized path used for matching.
    pub path: String,
    /// Matched descriptors, outermost first. Empty when nothing matched.
    pub matched: Vec<&'static RouteDescriptor>,
}

impl ResolvedRoute {
    /// True if any matched segment requires authentication.
    #[must_use]
    pub fn requires_auth(&self) -> bool {
        self.matched.iter().any(|route| route.meta.requires_auth)
    }

    /// Title of the innermost matched segment that declares one.
    #[must_use]
    pub fn title(&self) -> Option<&'static str> {
        self.matched.iter().rev().find_map(|route| route.meta.title)
    }

    #[must_use]
    pub fn leaf(&self) -> Option<&'static RouteDescriptor> {
        self.matched.last().copied()
    }

    #[must_use]
    pub fn view(&self) -> Option<ViewId> {
        self.leaf().and_then(|route| route.view)
    }

    #[must_use]
    pub fn group(&self) -> Option<RouteGroup> {
        self.leaf().map(|route| route.group)
    }
}

/// Read-only view over a route list.
#[derive(Clone, Copy, Debug)]
pub struct RouteTable {
    routes: &'static [RouteDescriptor],
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(ROUTES)
    }
}

impl RouteTable {
    #[must_use]
    pub const fn new(routes: &'static [RouteDescriptor]) -> Self {
        Self { routes }
    }

    #[must_use]
    pub fn routes(&self) -> &'static [RouteDescriptor] {
        self.routes
    }

    /// Resolve `location` (path with optional `?query` / `#fragment`).
    #[must_use]
    pub fn resolve(&self, location: &str) -> ResolvedRoute {
        let mut full_path = location.to_owned();
        let mut path = normalize_path(location);
        for _ in 0..=MAX_ROUTE_REDIRECTS {
            let matched = self.match_path(&path);
            match matched.last().and_then(|route| route.redirect) {
                Some(target) if target != path => {
                    full_path = target.to_owned();
                    path = normalize_path(target);
                }
                _ => {
                    return ResolvedRoute {
                        full_path,
                        path,
                        matched,
                    };
                }
            }
        }
        log::warn!("route redirect limit reached at {path}");
        ResolvedRoute {
            full_path,
            path,
            matched: Vec::new(),
        }
    }

    /// Back-office menu for `role`, in table order.
    #[must_use]
    pub fn menu_for_role(&self, role: Role) -> Vec<MenuEntry> {
        let mut entries = Vec::new();
        for parent in self.routes.iter().filter(|r| r.group == RouteGroup::BackOffice) {
            let base = parent.path;
            for child in parent.children {
                let Some(title) = child.meta.title else {
                    continue;
                };
                if child.meta.audience.admits(role) {
                    entries.push(MenuEntry {
                        path: join_path(base, child.path),
                        title: title.to_owned(),
                        icon: child.meta.icon.map(str::to_owned),
                    });
                }
            }
        }
        entries
    }

    fn match_path(&self, path: &str) -> Vec<&'static RouteDescriptor> {
        for route in self.routes {
            if let Some(chain) = match_route(route, "", path) {
                return chain;
            }
        }
        Vec::new()
    }
}

fn match_route(route: &'static RouteDescriptor, base: &str, path: &str) -> Option<Vec<&'static RouteDescriptor>> {
    if route.path == CATCH_ALL {
        return Some(vec![route]);
    }
    let full = join_path(base, route.path);
    for child in route.children {
        if let Some(mut chain) = match_route(child, &full, path) {
            chain.insert(0, route);
            return Some(chain);
        }
    }
    let leaf_like = route.children.is_empty() || route.redirect.is_some();
    (leaf_like && full == path).then(|| vec![route])
}

/// Join a parent path and a relative child path.
#[must_use]
pub fn join_path(base: &str, child: &str) -> String {
    if child.starts_with('/') {
        return normalize_path(child);
    }
    let base = base.trim_end_matches('/');
    if child.is_empty() {
        return if base.is_empty() { "/".to_owned() } else { base.to_owned() };
    }
    format!("{base}/{child}")
}

/// Strip query and fragment, ensure a leading slash, and drop any trailing slash.
#[must_use]
pub fn normalize_path(location: &str) -> String {
    let end = location.find(['?', '#']).unwrap_or(location.len());
    let path = location[..end].trim_end_matches('/');
    if path.is_empty() {
        "/".to_owned()
    } else if path.starts_with('/') {
        path.to_owned()
    } else {
        format!("/{path}")
    }
}
