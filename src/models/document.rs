//! Supporting documents uploaded by users and reviewed in the back office.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::user::UserRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    #[serde(rename = "PERMIS_CONDUIRE")]
    DrivingLicence,
    #[serde(rename = "CARTE_IDENTITE")]
    IdentityCard,
    #[serde(rename = "ASSURANCE")]
    Insurance,
    Kbis,
    #[serde(rename = "CERTIFICAT")]
    Certificate,
    #[serde(rename = "PHOTO_ANNONCE")]
    ListingPhoto,
    #[serde(rename = "JUSTIFICATIF_DOMICILE")]
    ProofOfAddress,
    #[serde(rename = "STATUT_AUTOENTREPRENEUR")]
    SoleTraderStatus,
    #[serde(rename = "ASSURANCE_PROFESSIONNELLE")]
    ProfessionalInsurance,
    #[serde(rename = "CASIER_JUDICIAIRE")]
    CriminalRecord,
    #[serde(rename = "DIPLOMES_CERTIFICATIONS")]
    Diplomas,
    #[serde(rename = "ASSURANCE_VEHICULE")]
    VehicleInsurance,
    #[serde(other)]
    Unknown,
}

impl DocumentType {
    pub fn label(self) -> &'static str {
        match self {
            Self::DrivingLicence => "Driving licence",
            Self::IdentityCard => "Identity card",
            Self::Insurance => "Insurance",
            Self::Kbis => "Kbis extract",
            Self::Certificate => "Certificate",
            Self::ListingPhoto => "Listing photo",
            Self::ProofOfAddress => "Proof of address",
            Self::SoleTraderStatus => "Sole trader status",
            Self::ProfessionalInsurance => "Professional insurance",
            Self::CriminalRecord => "Criminal record",
            Self::Diplomas => "Diplomas and certifications",
            Self::VehicleInsurance => "Vehicle insurance",
            Self::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentStatus {
    #[serde(rename = "EN_ATTENTE")]
    Pending,
    #[serde(rename = "VALIDE")]
    Approved,
    #[serde(rename = "REFUSE")]
    Rejected,
    #[serde(other)]
    Unknown,
}

impl DocumentStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending review",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Unknown => "Unknown",
        }
    }
}

/// An uploaded document. The file itself stays on the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,

    #[serde(rename = "nom", default)]
    pub name: String,

    #[serde(rename = "cheminFichier", default)]
    pub file_path: Option<String>,

    #[serde(rename = "type", default)]
    pub kind: Option<DocumentType>,

    #[serde(rename = "statut", default)]
    pub status: Option<DocumentStatus>,

    #[serde(rename = "dateUpload", default)]
    pub uploaded_at: Option<NaiveDateTime>,

    #[serde(rename = "dateValidation", default)]
    pub reviewed_at: Option<NaiveDateTime>,

    #[serde(rename = "commentaireValidation", default)]
    pub review_comment: Option<String>,

    #[serde(rename = "utilisateurId", default)]
    pub user_id: Option<i64>,

    #[serde(rename = "utilisateur", default)]
    pub user: Option<UserRef>,
}

/// Back-office filters applied to a fetched document list.
#[derive(Debug, Clone, Default)]
pub struct DocumentFilters {
    pub kind: Option<DocumentType>,
    pub status: Option<DocumentStatus>,
    /// Case-insensitive match on the document or owner name.
    pub search: Option<String>,
}

impl DocumentFilters {
    pub fn matches(&self, document: &Document) -> bool {
        if self.kind.is_some_and(|kind| document.kind != Some(kind)) {
            return false;
        }
        if self.status.is_some_and(|status| document.status != Some(status)) {
            return false;
        }
        let Some(needle) = self
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
        else {
            return true;
        };
        let owner = document
            .user
            .as_ref()
            .map(UserRef::display_name)
            .unwrap_or_default();
        document.name.to_lowercase().contains(&needle) || owner.to_lowercase().contains(&needle)
    }
}

/// Outcome of a document review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentDecision {
    Approve,
    Reject,
}

impl DocumentDecision {
    pub(crate) fn action(self) -> &'static str {
        match self {
            Self::Approve => "valider",
            Self::Reject => "refuser",
        }
    }
}

/// Body of a review; absent entirely when there is no comment.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ReviewComment<'a> {
    #[serde(rename = "commentaire")]
    pub comment: &'a str,
}
