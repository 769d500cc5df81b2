//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The root `App` owns one [`SessionStore`] and provides it through context.
//! The navigation guard reads [`Session`]; the login page and back-office
//! shell mutate it. Every mutation writes through to durable storage under
//! the keys below, and every clear removes all of them.
//!
//! DESIGN
//! ======
//! Doctor and patient detail share one `Option<RoleDetail>`, so a session can
//! never hold both. Identity changes bump a generation counter; a role-detail
//! fetch started under an older generation is discarded on completion, which
//! keeps a late response from repopulating a session that was logged out.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::api::{FetchError, ProfileApi};
use crate::net::types::{DoctorRecord, LoginResult, MenuEntry, PatientRecord, Role, UserProfile};
use crate::util::storage::{BrowserStorage, KeyValueStore, load_json, save_json};

pub const USER_INFO_KEY: &str = "userInfo";
pub const TOKEN_KEY: &str = "token";
pub const ROLE_KEY: &str = "role";
pub const MENUS_KEY: &str = "menus";
pub const DOCTOR_INFO_KEY: &str = "doctorInfo";
pub const PATIENT_INFO_KEY: &str = "patientInfo";

/// Session store backed by `localStorage`, as provided to components.
pub type BrowserSession = SessionStore<BrowserStorage>;

/// Every durable key owned by the session.
pub const SESSION_KEYS: [&str; 6] = [
    USER_INFO_KEY,
    TOKEN_KEY,
    ROLE_KEY,
    MENUS_KEY,
    DOCTOR_INFO_KEY,
    PATIENT_INFO_KEY,
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("no cached session")]
    NoCachedSession,
    #[error("malformed login result: {0}")]
    MalformedLogin(&'static str),
}

/// Role-specific record cached for doctors and patients.
#[derive(Clone, Debug, PartialEq)]
pub enum RoleDetail {
    Doctor(DoctorRecord),
    Patient(PatientRecord),
}

/// Snapshot of the signed-in identity.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub token: String,
    pub role: Option<Role>,
    pub user_info: Option<UserProfile>,
    pub menus: Vec<MenuEntry>,
    pub detail: Option<RoleDetail>,
    generation: u64,
}

impl Session {
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        !self.token.is_empty()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }

    #[must_use]
    pub fn is_doctor(&self) -> bool {
        self.role == Some(Role::Doctor)
    }

    #[must_use]
    pub fn is_nurse(&self) -> bool {
        self.role == Some(Role::Nurse)
    }

    #[must_use]
    pub fn is_patient(&self) -> bool {
        self.role == Some(Role::Patient)
    }

    /// Front-of-house account. Patients are the only such role.
    #[must_use]
    pub fn is_user(&self) -> bool {
        self.is_patient()
    }

    #[must_use]
    pub fn is_medical_staff(&self) -> bool {
        self.is_doctor() || self.is_nurse()
    }

    #[must_use]
    pub fn doctor_detail(&self) -> Option<&DoctorRecord> {
        match &self.detail {
            Some(RoleDetail::Doctor(doctor)) => Some(doctor),
            _ => None,
        }
    }

    #[must_use]
    pub fn patient_detail(&self) -> Option<&PatientRecord> {
        match &self.detail {
            Some(RoleDetail::Patient(patient)) => Some(patient),
            _ => None,
        }
    }

    /// Identity generation; changes on every login and logout.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Roles that carry a detail record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetailRole {
    Doctor,
    Patient,
}

impl DetailRole {
    #[must_use]
    pub fn for_role(role: Role) -> Option<Self> {
        match role {
            Role::Doctor => Some(Self::Doctor),
            Role::Patient => Some(Self::Patient),
            Role::Admin | Role::Nurse => None,
        }
    }
}

impl From<DetailRole> for Role {
    fn from(role: DetailRole) -> Self {
        match role {
            DetailRole::Doctor => Role::Doctor,
            DetailRole::Patient => Role::Patient,
        }
    }
}

/// A role-detail fetch in flight, bound to the identity that started it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoleFetch {
    role: DetailRole,
    generation: u64,
}

impl RoleFetch {
    #[must_use]
    pub fn role(&self) -> Role {
        self.role.into()
    }

    /// Issue the single read-only request for this role.
    ///
    /// # Errors
    ///
    /// Returns the [`FetchError`] reported by `api`.
    pub async fn run<A: ProfileApi>(&self, api: &A) -> Result<RoleDetail, FetchError> {
        match self.role {
            DetailRole::Doctor => api.current_doctor().await.map(RoleDetail::Doctor),
            DetailRole::Patient => api.current_patient().await.map(RoleDetail::Patient),
        }
    }
}

/// Session state plus the durable storage it writes through to.
#[derive(Clone, Debug)]
pub struct SessionStore<S> {
    session: Session,
    storage: S,
    loaded: bool,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// An unauthenticated store that has not read `storage` yet. The app
    /// starts here so the first client render matches the server's.
    pub fn pending(storage: S) -> Self {
        Self {
            session: Session::default(),
            storage,
            loaded: false,
        }
    }

    /// Build the store from whatever `storage` holds. Unreadable or malformed
    /// entries count as absent, so this may yield an unauthenticated session.
    pub fn load(storage: S) -> Self {
        let mut store = Self::pending(storage);
        store.reload();
        store
    }

    /// Replace the in-memory session with what storage holds. Counts as an
    /// identity change, so fetches begun before it are discarded.
    pub fn reload(&mut self) {
        let token = self.storage.get_item(TOKEN_KEY).unwrap_or_default();
        let user_info: Option<UserProfile> = load_json(&self.storage, USER_INFO_KEY);
        let role = self
            .storage
            .get_item(ROLE_KEY)
            .and_then(|code| Role::from_code(&code))
            .or_else(|| profile_role(user_info.as_ref()));
        let menus = load_json(&self.storage, MENUS_KEY).unwrap_or_default();
        let detail = match role {
            Some(Role::Doctor) => load_json(&self.storage, DOCTOR_INFO_KEY).map(RoleDetail::Doctor),
            Some(Role::Patient) => load_json(&self.storage, PATIENT_INFO_KEY).map(RoleDetail::Patient),
            _ => None,
        };
        self.session = Session {
            token,
            role,
            user_info,
            menus,
            detail,
            generation: self.session.generation + 1,
        };
        self.loaded = true;
    }

    /// Startup path: read storage and, when a token is present, re-adopt the
    /// cached profile and menus. A failed restore leaves the session cleared.
    pub fn load_persisted(&mut self) {
        self.reload();
        if self.session.is_logged_in() {
            if let Err(e) = self.restore() {
                log::info!("stored session discarded: {e}");
            }
        }
    }

    /// False until storage has been read at least once.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Re-adopt the cached profile and menu set.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoCachedSession`] and clears the session when
    /// either value is missing from storage.
    pub fn restore(&mut self) -> Result<(UserProfile, Vec<MenuEntry>), SessionError> {
        let user_info: Option<UserProfile> = load_json(&self.storage, USER_INFO_KEY);
        let menus: Option<Vec<MenuEntry>> = load_json(&self.storage, MENUS_KEY);
        match (user_info, menus) {
            (Some(user_info), Some(menus)) => {
                self.session.user_info = Some(user_info.clone());
                self.session.menus = menus.clone();
                Ok((user_info, menus))
            }
            _ => {
                self.clear();
                Err(SessionError::NoCachedSession)
            }
        }
    }

    /// Adopt a login result and persist it.
    ///
    /// The role comes from the top-level `roleCode`, falling back to the
    /// profile's. Any cached role detail belongs to the previous identity and
    /// is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::MalformedLogin`] and clears the session when the
    /// result has no profile, an empty token, or an unknown role.
    pub fn set_session(&mut self, result: LoginResult) -> Result<Role, SessionError> {
        let validated = validate_login(result);
        let (user_info, token, role) = match validated {
            Ok(parts) => parts,
            Err(err) => {
                log::warn!("rejecting login result: {err}");
                self.clear();
                return Err(err);
            }
        };

        save_json(&self.storage, USER_INFO_KEY, &user_info);
        self.storage.set_item(TOKEN_KEY, &token);
        self.storage.set_item(ROLE_KEY, role.as_code());
        self.storage.remove_item(DOCTOR_INFO_KEY);
        self.storage.remove_item(PATIENT_INFO_KEY);

        self.session.user_info = Some(user_info);
        self.session.token = token;
        self.session.role = Some(role);
        self.session.detail = None;
        self.session.generation += 1;
        log::debug!("session established for role {role}");
        Ok(role)
    }

    /// Replace the menu set.
    pub fn set_menus(&mut self, menus: Vec<MenuEntry>) {
        save_json(&self.storage, MENUS_KEY, &menus);
        self.session.menus = menus;
    }

    /// Replace the cached profile, e.g. after the user edits it. The role is
    /// not re-derived; it only changes on login.
    pub fn update_user_info(&mut self, user_info: UserProfile) {
        save_json(&self.storage, USER_INFO_KEY, &user_info);
        self.session.user_info = Some(user_info);
    }

    /// Reset to unauthenticated and delete every durable key. Idempotent.
    pub fn clear(&mut self) {
        for key in SESSION_KEYS {
            self.storage.remove_item(key);
        }
        let generation = self.session.generation + 1;
        self.session = Session {
            generation,
            ..Session::default()
        };
    }

    /// Start a role-detail fetch for the current identity, or `None` when the
    /// role has no detail record.
    #[must_use]
    pub fn begin_role_fetch(&self) -> Option<RoleFetch> {
        if !self.session.is_logged_in() {
            return None;
        }
        let role = DetailRole::for_role(self.session.role?)?;
        Some(RoleFetch {
            role,
            generation: self.session.generation,
        })
    }

    /// Apply the outcome of a fetch started with [`begin_role_fetch`].
    ///
    /// A patient without a record is a normal empty state: the cached patient
    /// detail and its durable key are cleared and `Ok(None)` is returned.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Superseded`] without touching the session when the
    /// identity changed since the fetch began, or the fetch error otherwise.
    /// Failures leave the cached detail unchanged.
    ///
    /// [`begin_role_fetch`]: Self::begin_role_fetch
    pub fn complete_role_fetch(
        &mut self,
        fetch: RoleFetch,
        outcome: Result<RoleDetail, FetchError>,
    ) -> Result<Option<RoleDetail>, FetchError> {
        if fetch.generation != self.session.generation {
            log::debug!("discarding {} detail from a previous session", fetch.role());
            return Err(FetchError::Superseded);
        }
        match outcome {
            Ok(detail) => {
                match &detail {
                    RoleDetail::Doctor(doctor) => save_json(&self.storage, DOCTOR_INFO_KEY, doctor),
                    RoleDetail::Patient(patient) => save_json(&self.storage, PATIENT_INFO_KEY, patient),
                }
                self.session.detail = Some(detail.clone());
                Ok(Some(detail))
            }
            Err(FetchError::NotFound) if fetch.role == DetailRole::Patient => {
                log::debug!("no patient record for current user");
                self.session.detail = None;
                self.storage.remove_item(PATIENT_INFO_KEY);
                Ok(None)
            }
            Err(err) => {
                log::warn!("failed to fetch {} detail: {err}", fetch.role());
                Err(err)
            }
        }
    }

    /// Fetch and cache the doctor or patient record for the current role.
    /// Other roles are a no-op returning `Ok(None)`.
    ///
    /// # Errors
    ///
    /// See [`complete_role_fetch`](Self::complete_role_fetch).
    pub async fn fetch_role_detail<A: ProfileApi>(
        &mut self,
        api: &A,
    ) -> Result<Option<RoleDetail>, FetchError> {
        let Some(fetch) = self.begin_role_fetch() else {
            return Ok(None);
        };
        let outcome = fetch.run(api).await;
        self.complete_role_fetch(fetch, outcome)
    }
}

fn profile_role(user_info: Option<&UserProfile>) -> Option<Role> {
    user_info?.role_code.as_deref().and_then(Role::from_code)
}

fn validate_login(result: LoginResult) -> Result<(UserProfile, String, Role), SessionError> {
    let Some(user_info) = result.user_info else {
        return Err(SessionError::MalformedLogin("missing user profile"));
    };
    let token = result.token.unwrap_or_default();
    if token.is_empty() {
        return Err(SessionError::MalformedLogin("missing token"));
    }
    let role = result
        .role_code
        .as_deref()
        .and_then(Role::from_code)
        .or_else(|| profile_role(Some(&user_info)))
        .ok_or(SessionError::MalformedLogin("unknown role code"))?;
    Ok((user_info, token, role))
}
