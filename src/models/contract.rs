//! Merchant contracts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::user::UserRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractStatus {
    #[serde(rename = "ACTIF")]
    Active,
    #[serde(rename = "EXPIRE")]
    Expired,
    #[serde(rename = "SUSPENDU")]
    Suspended,
    #[serde(rename = "RESILIÉ", alias = "RESILIE")]
    Terminated,
    #[serde(other)]
    Unknown,
}

/// Commercial plan of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractPlan {
    Standard,
    Premium,
    #[serde(other)]
    Unknown,
}

/// A merchant's service contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: i64,

    #[serde(rename = "numeroContrat", default)]
    pub number: Option<String>,

    #[serde(rename = "commercant", default)]
    pub merchant: Option<UserRef>,

    #[serde(rename = "dateDebut", default)]
    pub start_date: Option<NaiveDate>,

    #[serde(rename = "dateFin", default)]
    pub end_date: Option<NaiveDate>,

    #[serde(rename = "dateSignature", default)]
    pub signed_on: Option<NaiveDate>,

    #[serde(rename = "statutContrat", default)]
    pub status: Option<ContractStatus>,

    #[serde(rename = "typeContrat", default)]
    pub plan: Option<ContractPlan>,

    #[serde(rename = "abonnementMensuel", default)]
    pub monthly_fee: Option<f64>,

    #[serde(rename = "commissionPourcentage", default)]
    pub commission_percent: Option<f64>,

    #[serde(rename = "fraisInscription", default)]
    pub registration_fee: Option<f64>,

    #[serde(rename = "livraisonRapideIncluse", default)]
    pub express_delivery: bool,

    #[serde(rename = "assuranceIncluse", default)]
    pub insurance: bool,

    #[serde(rename = "supportPrioritaire", default)]
    pub priority_support: bool,

    #[serde(rename = "nombreLivraisonsMensuelles", default)]
    pub monthly_delivery_quota: Option<u32>,

    #[serde(rename = "paiementAJour", default)]
    pub payment_current: Option<bool>,

    #[serde(rename = "urlContratPdf", default)]
    pub pdf_url: Option<String>,
}

impl Contract {
    /// Names of the services bundled with the contract.
    pub fn included_services(&self) -> Vec<&'static str> {
        let mut services = vec!["Local delivery"];
        if self.express_delivery {
            services.push("Express delivery");
        }
        if self.insurance {
            services.push("Insurance");
        }
        if self.priority_support {
            services.push("Priority support");
        }
        services
    }

    /// Active and inside its validity window on `date`. Open-ended bounds
    /// are treated as unbounded.
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        if self.status != Some(ContractStatus::Active) {
            return false;
        }
        let started = self.start_date.is_none_or(|start| start <= date);
        let not_ended = self.end_date.is_none_or(|end| date <= end);
        started && not_ended
    }
}

/// Payload for creating or updating a contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewContract {
    #[serde(rename = "dateDebut", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "dateFin", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "typeContrat", skip_serializing_if = "Option::is_none")]
    pub plan: Option<ContractPlan>,
    #[serde(rename = "abonnementMensuel", skip_serializing_if = "Option::is_none")]
    pub monthly_fee: Option<f64>,
    #[serde(rename = "commissionPourcentage", skip_serializing_if = "Option::is_none")]
    pub commission_percent: Option<f64>,
    #[serde(rename = "livraisonRapideIncluse", default)]
    pub express_delivery: bool,
    #[serde(rename = "assuranceIncluse", default)]
    pub insurance: bool,
    #[serde(rename = "supportPrioritaire", default)]
    pub priority_support: bool,
}
