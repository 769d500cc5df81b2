//! Wire DTOs for the hospital REST API.
//!
//! DESIGN
//! ======
//! Field names follow the back end's camelCase JSON so the same structs are
//! used for HTTP payloads and for the JSON copies kept in `localStorage`.
//! Every field defaults so partially populated records still decode.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Account category carried in `roleCode`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Doctor,
    Nurse,
    Patient,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Doctor, Role::Nurse, Role::Patient];

    /// Wire code, e.g. `"DOCTOR"`.
    #[must_use]
    pub fn as_code(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Doctor => "DOCTOR",
            Role::Nurse => "NURSE",
            Role::Patient => "PATIENT",
        }
    }

    /// Parse a wire code. Surrounding whitespace is ignored; matching is case-sensitive.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Role::ALL.into_iter().find(|role| role.as_code() == code)
    }

    /// Staff roles work in the back office; patients use the front pages.
    #[must_use]
    pub fn is_staff(self) -> bool {
        !matches!(self, Role::Patient)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

/// Basic identity of the signed-in account (`userInfo`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub id: Option<i64>,
    pub username: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub sex: Option<String>,
    pub avatar: Option<String>,
    pub role_code: Option<String>,
}

impl UserProfile {
    /// Name to show in headers: display name, then username, then a placeholder.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .or(self.username.as_deref())
            .unwrap_or("user")
    }
}

/// Result of `POST /user/login` after normalization.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginResult {
    pub user_info: Option<UserProfile>,
    pub token: Option<String>,
    pub role_code: Option<String>,
}

impl LoginResult {
    /// Normalize a login payload.
    ///
    /// The back end answers with the user record itself, carrying `token` and
    /// `roleCode` alongside the profile fields. Payloads already wrapped as
    /// `{ userInfo, token, roleCode }` are accepted unchanged.
    ///
    /// # Errors
    ///
    /// Returns the serde error if the payload is not a JSON object of either shape.
    pub fn from_payload(payload: serde_json::Value) -> Result<Self, serde_json::Error> {
        if payload.get("userInfo").is_some() {
            return serde_json::from_value(payload);
        }
        let token = payload
            .get("token")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned);
        let profile: UserProfile = serde_json::from_value(payload)?;
        Ok(Self {
            role_code: profile.role_code.clone(),
            user_info: Some(profile),
            token,
        })
    }
}

/// Credentials posted to the login endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Department summary embedded in a doctor record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Department {
    pub id: Option<i64>,
    pub name: Option<String>,
}

/// Doctor record for the signed-in doctor (`GET /doctor/current`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DoctorRecord {
    pub id: Option<i64>,
    pub doctor_no: Option<String>,
    pub name: Option<String>,
    pub department_id: Option<i64>,
    pub title: Option<String>,
    pub expertise: Option<String>,
    pub introduction: Option<String>,
    pub user_id: Option<i64>,
    /// 1 = active, 0 = left.
    #[serde(deserialize_with = "deserialize_opt_i32")]
    pub status: Option<i32>,
    pub department: Option<Department>,
}

/// Patient record for the signed-in patient (`GET /patient/current`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientRecord {
    pub id: Option<i64>,
    pub user_id: Option<i64>,
    pub patient_no: Option<String>,
    pub name: Option<String>,
    pub id_card: Option<String>,
    /// ISO date, e.g. `"1990-04-01"`.
    pub birthday: Option<String>,
    pub sex: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub medical_history: Option<String>,
    pub allergies: Option<String>,
}

/// One navigation entry in the role's menu set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub path: String,
    pub title: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Response envelope wrapping every REST answer.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ApiEnvelope {
    #[serde(deserialize_with = "deserialize_code")]
    pub code: String,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl ApiEnvelope {
    pub const SUCCESS_CODE: &'static str = "200";

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code == Self::SUCCESS_CODE
    }
}

// The back end emits `code` as a string, but some gateways rewrite it as a number.
fn deserialize_code<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(code) => Ok(code),
        serde_json::Value::Number(number) => Ok(number.to_string()),
        other => Err(D::Error::custom(format!("invalid envelope code: {other}"))),
    }
}

fn deserialize_opt_i32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::Number(number) => {
            let value = number
                .as_i64()
                .ok_or_else(|| D::Error::custom(format!("expected integer, got {number}")))?;
            i32::try_from(value)
                .map(Some)
                .map_err(|_| D::Error::custom(format!("value {value} out of range for i32")))
        }
        serde_json::Value::String(text) => text
            .trim()
            .parse::<i32>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("expected integer, got {text:?}"))),
        other => Err(D::Error::custom(format!("expected integer, got {other}"))),
    }
}
