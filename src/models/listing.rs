//! Listings (announcements) posted by customers and merchants.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::user::UserRef;

/// Nature of the requested service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListingKind {
    #[serde(rename = "LIVRAISON_COLIS")]
    ParcelDelivery,
    #[serde(rename = "SERVICE_PERSONNE")]
    PersonalService,
    #[serde(rename = "TRANSPORT_PERSONNE")]
    PersonTransport,
    #[serde(rename = "COURSES")]
    Shopping,
    #[serde(rename = "ACHAT_ETRANGER")]
    PurchaseAbroad,
    #[serde(other)]
    Other,
}

impl ListingKind {
    pub const ALL: [ListingKind; 5] = [
        ListingKind::ParcelDelivery,
        ListingKind::PersonalService,
        ListingKind::PersonTransport,
        ListingKind::Shopping,
        ListingKind::PurchaseAbroad,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ParcelDelivery => "LIVRAISON_COLIS",
            Self::PersonalService => "SERVICE_PERSONNE",
            Self::PersonTransport => "TRANSPORT_PERSONNE",
            Self::Shopping => "COURSES",
            Self::PurchaseAbroad => "ACHAT_ETRANGER",
            Self::Other => "AUTRE",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ParcelDelivery => "Parcel delivery",
            Self::PersonalService => "Personal service",
            Self::PersonTransport => "Person transport",
            Self::Shopping => "Shopping",
            Self::PurchaseAbroad => "Purchase abroad",
            Self::Other => "Other",
        }
    }

    /// Parse a wire value (`LIVRAISON_COLIS`) or a kebab-case English name
    /// (`parcel-delivery`).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|kind| {
            kind.as_str().eq_ignore_ascii_case(s)
                || kind.label().replace(' ', "-").eq_ignore_ascii_case(s)
        })
    }
}

/// Lifecycle of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListingStatus {
    #[serde(rename = "ACTIVE")]
    Active,
    #[serde(rename = "ASSIGNEE")]
    Assigned,
    #[serde(rename = "EN_COURS")]
    InProgress,
    #[serde(rename = "TERMINEE")]
    Completed,
    #[serde(rename = "ANNULEE")]
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl ListingStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Assigned => "Assigned",
            Self::InProgress => "In progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::Unknown => "Unknown",
        }
    }

    /// Whether a courier can still pick the listing up.
    pub fn is_open(self) -> bool {
        self == Self::Active
    }
}

/// A customer listing (`annonce`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: i64,

    #[serde(rename = "titre", default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(rename = "type", default)]
    pub kind: Option<ListingKind>,

    #[serde(rename = "statut", default)]
    pub status: Option<ListingStatus>,

    #[serde(rename = "adresseDepart", default)]
    pub origin_address: Option<String>,

    #[serde(rename = "adresseArrivee", default)]
    pub destination_address: Option<String>,

    #[serde(rename = "villeDepart", default)]
    pub origin_city: Option<String>,

    #[serde(rename = "villeArrivee", default)]
    pub destination_city: Option<String>,

    #[serde(rename = "prixPropose", default)]
    pub proposed_price: Option<f64>,

    #[serde(rename = "prixNegociable", default)]
    pub negotiable_price: Option<f64>,

    #[serde(rename = "dateCreation", default)]
    pub created_at: Option<NaiveDateTime>,

    #[serde(rename = "dateLimite", default)]
    pub deadline: Option<NaiveDateTime>,

    #[serde(rename = "datePreferee", default)]
    pub preferred_date: Option<NaiveDateTime>,

    #[serde(rename = "typeColis", default)]
    pub parcel_type: Option<String>,

    #[serde(rename = "poids", default)]
    pub weight_kg: Option<f64>,

    #[serde(default)]
    pub dimensions: Option<String>,

    #[serde(default)]
    pub fragile: Option<bool>,

    #[serde(rename = "auteur", default)]
    pub author: Option<UserRef>,

    #[serde(rename = "livreurAssigne", default)]
    pub assigned_courier: Option<UserRef>,
}

impl Listing {
    /// "Paris → Lyon", using whichever ends are known.
    pub fn route(&self) -> String {
        let from = self
            .origin_city
            .as_deref()
            .or(self.origin_address.as_deref())
            .unwrap_or("?");
        let to = self
            .destination_city
            .as_deref()
            .or(self.destination_address.as_deref())
            .unwrap_or("?");
        format!("{from} → {to}")
    }
}

/// Payload for `POST /annonces`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewListing {
    #[serde(rename = "titre")]
    pub title: String,

    pub description: String,

    #[serde(rename = "type")]
    pub kind: Option<ListingKind>,

    #[serde(rename = "adresseDepart")]
    pub origin_address: String,

    #[serde(rename = "adresseArrivee")]
    pub destination_address: String,

    #[serde(rename = "villeDepart")]
    pub origin_city: String,

    #[serde(rename = "villeArrivee")]
    pub destination_city: String,

    #[serde(rename = "prixPropose")]
    pub proposed_price: f64,

    #[serde(rename = "prixNegociable", default, skip_serializing_if = "Option::is_none")]
    pub negotiable_price: Option<f64>,

    #[serde(rename = "dateLimite", default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDateTime>,

    #[serde(rename = "datePreferee", default, skip_serializing_if = "Option::is_none")]
    pub preferred_date: Option<NaiveDateTime>,

    #[serde(rename = "typeColis", default, skip_serializing_if = "Option::is_none")]
    pub parcel_type: Option<String>,

    #[serde(rename = "poids", default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragile: Option<bool>,
}

/// Search criteria for `GET /annonces/search`.
#[derive(Debug, Clone, Default)]
pub struct ListingFilters {
    pub city: Option<String>,
    pub kind: Option<ListingKind>,
}

impl ListingFilters {
    /// Query pairs, omitting empty criteria.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(city) = self.city.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            query.push(("ville", city.to_string()));
        }
        if let Some(kind) = self.kind {
            query.push(("type", kind.as_str().to_string()));
        }
        query
    }
}

/// A merchant listing (`annonce-commercant`): a shopping run for a shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchantListing {
    pub id: i64,

    #[serde(rename = "titre", default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(rename = "adresseDepart", default)]
    pub origin_address: Option<String>,

    #[serde(rename = "adresseArrivee", default)]
    pub destination_address: Option<String>,

    #[serde(rename = "villeDepart", default)]
    pub origin_city: Option<String>,

    #[serde(rename = "villeArrivee", default)]
    pub destination_city: Option<String>,

    #[serde(rename = "listeCourses", default)]
    pub shopping_list: Option<String>,

    #[serde(rename = "prixPropose", default)]
    pub proposed_price: Option<f64>,

    #[serde(rename = "reserveAuxAffilies", default)]
    pub reserved_for_affiliates: bool,

    #[serde(rename = "dateCreation", default)]
    pub created_at: Option<NaiveDateTime>,

    #[serde(rename = "statut", default)]
    pub status: Option<ListingStatus>,

    #[serde(rename = "commercant", default)]
    pub merchant: Option<UserRef>,

    #[serde(rename = "livreurAssigne", default)]
    pub assigned_courier: Option<UserRef>,
}

/// Payload for creating or updating a merchant listing.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewMerchantListing {
    #[serde(rename = "titre")]
    pub title: String,
    pub description: String,
    #[serde(rename = "adresseDepart")]
    pub origin_address: String,
    #[serde(rename = "adresseArrivee")]
    pub destination_address: String,
    #[serde(rename = "villeDepart")]
    pub origin_city: String,
    #[serde(rename = "villeArrivee")]
    pub destination_city: String,
    #[serde(rename = "listeCourses")]
    pub shopping_list: String,
    #[serde(rename = "prixPropose")]
    pub proposed_price: f64,
    #[serde(rename = "reserveAuxAffilies")]
    pub reserved_for_affiliates: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_listing() {
        let listing: Listing = serde_json::from_value(json!({
            "id": 12,
            "titre": "Carton de livres",
            "description": "Deux cartons",
            "type": "LIVRAISON_COLIS",
            "statut": "EN_COURS",
            "villeDepart": "Paris",
            "villeArrivee": "Lyon",
            "prixPropose": 35.5,
            "dateCreation": "2025-05-01T09:30:00",
            "auteur": { "id": 3, "nom": "Durand", "prenom": "Paul", "email": "p@example.com" }
        }))
        .unwrap();

        assert_eq!(listing.kind, Some(ListingKind::ParcelDelivery));
        assert_eq!(listing.status, Some(ListingStatus::InProgress));
        assert_eq!(listing.route(), "Paris → Lyon");
        assert_eq!(listing.author.unwrap().display_name(), "Paul Durand");
        assert!(listing.assigned_courier.is_none());
    }

    #[test]
    fn test_unknown_kind_is_tolerated() {
        let listing: Listing =
            serde_json::from_value(json!({ "id": 1, "type": "GARDE_ANIMAUX" })).unwrap();
        assert_eq!(listing.kind, Some(ListingKind::Other));
        assert_eq!(listing.route(), "? → ?");
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!(ListingKind::parse("courses"), Some(ListingKind::Shopping));
        assert_eq!(
            ListingKind::parse("parcel-delivery"),
            Some(ListingKind::ParcelDelivery)
        );
        assert_eq!(ListingKind::parse("pets"), None);
    }

    #[test]
    fn test_filters_skip_empty_city() {
        let filters = ListingFilters {
            city: Some("  ".to_string()),
            kind: Some(ListingKind::Shopping),
        };
        assert_eq!(filters.to_query(), vec![("type", "COURSES".to_string())]);
    }

    #[test]
    fn test_new_listing_omits_absent_options() {
        let new = NewListing {
            title: "Colis".to_string(),
            proposed_price: 10.0,
            ..NewListing::default()
        };
        let body = serde_json::to_value(&new).unwrap();
        assert_eq!(body["titre"], "Colis");
        assert!(body.get("poids").is_none());
        assert!(body.get("dateLimite").is_none());
    }
}
