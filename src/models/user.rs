//! Users, roles and authentication payloads.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Marketplace role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[serde(rename = "CLIENT")]
    Customer,
    #[serde(rename = "LIVREUR")]
    Courier,
    #[serde(rename = "COMMERCANT")]
    Merchant,
    #[serde(rename = "PRESTATAIRE")]
    ServiceProvider,
    Admin,
    #[serde(other)]
    Unknown,
}

impl Role {
    /// Roles a visitor can register with.
    pub const SIGN_UP: [Role; 4] = [
        Role::Customer,
        Role::Courier,
        Role::Merchant,
        Role::ServiceProvider,
    ];

    /// Wire value, as used in paths such as `/utilisateurs/role/{role}`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "CLIENT",
            Self::Courier => "LIVREUR",
            Self::Merchant => "COMMERCANT",
            Self::ServiceProvider => "PRESTATAIRE",
            Self::Admin => "ADMIN",
            Self::Unknown => "UNKNOWN",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Customer => "Customer",
            Self::Courier => "Courier",
            Self::Merchant => "Merchant",
            Self::ServiceProvider => "Service provider",
            Self::Admin => "Administrator",
            Self::Unknown => "Unknown",
        }
    }

    /// Parse a wire value or an English name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "CLIENT" | "CUSTOMER" => Some(Self::Customer),
            "LIVREUR" | "COURIER" => Some(Self::Courier),
            "COMMERCANT" | "MERCHANT" => Some(Self::Merchant),
            "PRESTATAIRE" | "SERVICE-PROVIDER" | "PROVIDER" => Some(Self::ServiceProvider),
            "ADMIN" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account review status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserStatus {
    #[serde(rename = "NON_VERIFIE")]
    Unverified,
    #[serde(rename = "EN_ATTENTE")]
    Pending,
    #[serde(rename = "VALIDE")]
    Validated,
    #[serde(rename = "SUSPENDU")]
    Suspended,
    #[serde(rename = "REFUSE")]
    Refused,
    #[serde(other)]
    Unknown,
}

impl UserStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Unverified => "Unverified",
            Self::Pending => "Pending review",
            Self::Validated => "Validated",
            Self::Suspended => "Suspended",
            Self::Refused => "Refused",
            Self::Unknown => "Unknown",
        }
    }
}

/// A marketplace account, as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,

    #[serde(rename = "nom", default)]
    pub last_name: String,

    #[serde(rename = "prenom", default)]
    pub first_name: String,

    #[serde(default)]
    pub email: String,

    #[serde(rename = "telephone", default)]
    pub phone: Option<String>,

    pub role: Role,

    #[serde(rename = "statut", default)]
    pub status: Option<UserStatus>,

    #[serde(rename = "adresse", default)]
    pub address: Option<String>,

    #[serde(rename = "ville", default)]
    pub city: Option<String>,

    #[serde(rename = "codepostal", default)]
    pub postcode: Option<String>,

    #[serde(rename = "dateCreation", default)]
    pub created_on: Option<NaiveDate>,

    // Courier
    #[serde(rename = "vehicule", default, skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<String>,

    #[serde(rename = "permisVerif", default, skip_serializing_if = "Option::is_none")]
    pub license_verified: Option<bool>,

    // Merchant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub siret: Option<String>,

    // Service provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,

    #[serde(rename = "tarifHoraire", default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
}

/// Role-specific attributes of a [`User`].
#[derive(Debug, Clone, PartialEq)]
pub enum RoleDetails {
    Customer,
    Courier {
        vehicle: Option<String>,
        license_verified: bool,
    },
    Merchant {
        siret: Option<String>,
    },
    ServiceProvider {
        service_type: Option<String>,
        hourly_rate: Option<f64>,
    },
    Admin,
    Unknown,
}

impl User {
    /// "First Last", falling back to the email when both are empty.
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            self.email.clone()
        } else {
            name.to_string()
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn role_details(&self) -> RoleDetails {
        match self.role {
            Role::Customer => RoleDetails::Customer,
            Role::Courier => RoleDetails::Courier {
                vehicle: self.vehicle.clone(),
                license_verified: self.license_verified.unwrap_or(false),
            },
            Role::Merchant => RoleDetails::Merchant {
                siret: self.siret.clone(),
            },
            Role::ServiceProvider => RoleDetails::ServiceProvider {
                service_type: self.service_type.clone(),
                hourly_rate: self.hourly_rate,
            },
            Role::Admin => RoleDetails::Admin,
            Role::Unknown => RoleDetails::Unknown,
        }
    }
}

/// Reference to another user embedded in a record (author, courier...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: i64,

    #[serde(rename = "nom", default)]
    pub last_name: String,

    #[serde(rename = "prenom", default)]
    pub first_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserRef {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Credentials for `/auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login or registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Answer of `/auth/verify-token`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenCheck {
    #[serde(default)]
    pub valid: bool,
    #[serde(default)]
    pub user: Option<User>,
}

/// Sign-up form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub role: Role,
    #[serde(rename = "nom")]
    pub last_name: String,
    #[serde(rename = "prenom")]
    pub first_name: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "telephone")]
    pub phone: String,
    #[serde(rename = "vehicule", skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<String>,
    #[serde(rename = "permisVerif", skip_serializing_if = "Option::is_none")]
    pub license_verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub siret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    #[serde(rename = "tarifHoraire", skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
}

/// Partial update sent to `PUT /utilisateurs/{id}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateUserRequest {
    #[serde(rename = "nom", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(rename = "prenom", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "telephone", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "adresse", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "ville", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(rename = "codepostal", skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(rename = "statut", skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
}

impl UpdateUserRequest {
    pub fn status(status: UserStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}
