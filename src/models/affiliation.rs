//! Courier affiliation: a courier asks to work for merchants' reserved
//! listings and an administrator decides.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AffiliationStatus {
    #[serde(rename = "NON_AFFILIE")]
    NotAffiliated,
    #[serde(rename = "DEMANDE_AFFILIATION")]
    Requested,
    #[serde(rename = "AFFILIE")]
    Affiliated,
    #[serde(rename = "AFFILIATION_REFUSEE")]
    Refused,
    #[serde(other)]
    Unknown,
}

impl AffiliationStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::NotAffiliated => "Not affiliated",
            Self::Requested => "Request pending",
            Self::Affiliated => "Affiliated",
            Self::Refused => "Request refused",
            Self::Unknown => "Unknown",
        }
    }
}

/// Where a courier's affiliation stands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Affiliation {
    #[serde(rename = "statut")]
    pub status: AffiliationStatus,

    #[serde(rename = "dateDemandeAffiliation", default)]
    pub requested_at: Option<NaiveDateTime>,

    #[serde(rename = "dateValidationAffiliation", default)]
    pub decided_at: Option<NaiveDateTime>,

    /// The courier's message, or the reason for a refusal.
    #[serde(rename = "commentaire", default)]
    pub comment: Option<String>,
}
