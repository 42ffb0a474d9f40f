//! Personal-service bookings (`prestations`) and service-provider
//! availability.

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::user::UserRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    #[serde(rename = "RESERVEE")]
    Booked,
    #[serde(rename = "TERMINEE")]
    Completed,
    /// Completed and rated by the customer.
    #[serde(rename = "EVALUEE")]
    Rated,
    #[serde(rename = "ANNULEE")]
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl BookingStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Booked => "Booked",
            Self::Completed => "Completed",
            Self::Rated => "Rated",
            Self::Cancelled => "Cancelled",
            Self::Unknown => "Unknown",
        }
    }

    pub fn is_open(self) -> bool {
        self == Self::Booked
    }
}

/// A booked service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,

    #[serde(rename = "titre", default)]
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Service catalogue code, e.g. `JARDINAGE`.
    #[serde(rename = "typePrestation", default)]
    pub service_type: Option<String>,

    #[serde(rename = "prestataire", default)]
    pub provider: Option<UserRef>,

    #[serde(default)]
    pub client: Option<UserRef>,

    #[serde(rename = "dateDebut", default)]
    pub starts_at: Option<NaiveDateTime>,

    #[serde(rename = "dateFin", default)]
    pub ends_at: Option<NaiveDateTime>,

    #[serde(rename = "adresse", default)]
    pub address: Option<String>,

    #[serde(rename = "ville", default)]
    pub city: Option<String>,

    #[serde(rename = "codePostal", default)]
    pub postcode: Option<String>,

    #[serde(rename = "prix", default)]
    pub price: Option<f64>,

    #[serde(rename = "statut", default)]
    pub status: Option<BookingStatus>,

    #[serde(rename = "dateCreation", default)]
    pub created_at: Option<NaiveDateTime>,
}

/// Payload for `POST /prestations/reserver`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    #[serde(rename = "prestataireId")]
    pub provider_id: i64,
    pub client_id: i64,
    #[serde(rename = "dateDebut")]
    pub starts_at: NaiveDateTime,
    #[serde(rename = "dateFin")]
    pub ends_at: NaiveDateTime,
    #[serde(rename = "typePrestation")]
    pub service_type: String,
    #[serde(rename = "titre")]
    pub title: String,
    pub description: String,
    #[serde(rename = "prix")]
    pub price: f64,
    #[serde(rename = "adresse")]
    pub address: String,
    #[serde(rename = "ville")]
    pub city: String,
    #[serde(rename = "codePostal")]
    pub postcode: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// A weekly opening slot of a service provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(rename = "jourSemaine")]
    pub day: Weekday,

    #[serde(rename = "heureDebut")]
    pub start: NaiveTime,

    #[serde(rename = "heureFin")]
    pub end: NaiveTime,

    #[serde(rename = "actif", default = "active")]
    pub active: bool,
}

fn active() -> bool {
    true
}

/// Time window sent to the availability check.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct TimeWindow {
    #[serde(rename = "dateDebut")]
    pub starts_at: NaiveDateTime,
    #[serde(rename = "dateFin")]
    pub ends_at: NaiveDateTime,
}

/// Answer of the availability check.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AvailabilityCheck {
    #[serde(rename = "disponible", default)]
    pub available: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MonthlyRevenue {
    #[serde(rename = "revenus", default)]
    pub revenue: f64,
}
