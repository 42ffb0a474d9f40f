//! Deliveries (courier missions) and the warehouses used for relays.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::listing::{Listing, MerchantListing};
use super::user::UserRef;

/// How a listing is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryType {
    /// Straight from origin to destination.
    #[serde(rename = "COMPLETE")]
    Full,
    /// From the origin to a warehouse.
    #[serde(rename = "PARTIELLE_DEPOT")]
    PartialDrop,
    /// From a warehouse to the destination.
    #[serde(rename = "PARTIELLE_RETRAIT")]
    PartialPickup,
    #[serde(other)]
    Unknown,
}

impl DeliveryType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Full => "Full delivery",
            Self::PartialDrop => "Partial (drop at warehouse)",
            Self::PartialPickup => "Partial (pickup from warehouse)",
            Self::Unknown => "Unknown",
        }
    }

    /// Path segment of the creation endpoint.
    pub(crate) fn creation_path(self) -> Option<&'static str> {
        match self {
            Self::Full => Some("complete"),
            Self::PartialDrop => Some("partielle-depot"),
            Self::PartialPickup => Some("partielle-retrait"),
            Self::Unknown => None,
        }
    }

    pub fn needs_warehouse(self) -> bool {
        matches!(self, Self::PartialDrop | Self::PartialPickup)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryStatus {
    #[serde(rename = "ASSIGNEE")]
    Assigned,
    #[serde(rename = "EN_COURS")]
    InProgress,
    #[serde(rename = "LIVREE")]
    Delivered,
    /// Parcel waiting at a warehouse between two partial legs.
    #[serde(rename = "STOCKEE")]
    Stored,
    #[serde(rename = "ANNULEE")]
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl DeliveryStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Assigned => "Assigned",
            Self::InProgress => "In progress",
            Self::Delivered => "Delivered",
            Self::Stored => "Stored at warehouse",
            Self::Cancelled => "Cancelled",
            Self::Unknown => "Unknown",
        }
    }

    pub fn is_finished(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarehouseStatus {
    #[serde(rename = "ACTIF")]
    Active,
    #[serde(rename = "INACTIF")]
    Inactive,
    #[serde(rename = "MAINTENANCE")]
    Maintenance,
    #[serde(other)]
    Unknown,
}

/// Relay warehouse (`entrepot`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: i64,

    #[serde(rename = "nom", default)]
    pub name: String,

    #[serde(rename = "adresse", default)]
    pub address: Option<String>,

    #[serde(rename = "ville", default)]
    pub city: Option<String>,

    #[serde(rename = "codePostal", default)]
    pub postcode: Option<String>,

    #[serde(rename = "capaciteMax", default)]
    pub capacity: Option<u32>,

    #[serde(rename = "statut", default)]
    pub status: Option<WarehouseStatus>,
}

/// A courier mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    pub id: i64,

    #[serde(rename = "typeLivraison", default)]
    pub kind: Option<DeliveryType>,

    #[serde(rename = "statut", default)]
    pub status: Option<DeliveryStatus>,

    #[serde(rename = "adresseDepart", default)]
    pub origin_address: Option<String>,

    #[serde(rename = "adresseArrivee", default)]
    pub destination_address: Option<String>,

    #[serde(rename = "entrepot", default)]
    pub warehouse: Option<Warehouse>,

    /// Code the recipient hands over to close the delivery.
    #[serde(rename = "codeValidation", default)]
    pub validation_code: Option<String>,

    #[serde(rename = "dateCreation", default)]
    pub created_at: Option<NaiveDateTime>,

    #[serde(rename = "dateDebut", default)]
    pub started_at: Option<NaiveDateTime>,

    #[serde(rename = "dateFin", default)]
    pub finished_at: Option<NaiveDateTime>,

    #[serde(rename = "prixConvenu", default)]
    pub agreed_price: Option<f64>,

    #[serde(rename = "livreur", default)]
    pub courier: Option<UserRef>,

    #[serde(rename = "annonce", default)]
    pub listing: Option<Box<Listing>>,

    #[serde(rename = "annonceCommercant", default)]
    pub merchant_listing: Option<Box<MerchantListing>>,
}

impl Delivery {
    /// Title of whichever listing the delivery belongs to.
    pub fn listing_title(&self) -> Option<&str> {
        self.listing
            .as_ref()
            .map(|l| l.title.as_str())
            .or_else(|| self.merchant_listing.as_ref().map(|l| l.title.as_str()))
    }
}

/// Which delivery legs a listing already has, and which may still be created.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentsInfo {
    #[serde(rename = "hasSegmentDepot", default)]
    pub has_drop_segment: bool,
    #[serde(rename = "hasSegmentRetrait", default)]
    pub has_pickup_segment: bool,
    #[serde(rename = "hasLivraisonComplete", default)]
    pub has_full_delivery: bool,
    /// `0` when no warehouse is involved yet.
    #[serde(rename = "entrepotId", default)]
    pub warehouse_id: i64,
    #[serde(rename = "entrepotNom", default)]
    pub warehouse_name: String,
    #[serde(default)]
    pub can_create_complete: bool,
    #[serde(rename = "canCreatePartielleDepot", default)]
    pub can_create_partial_drop: bool,
    #[serde(rename = "canCreatePartielleRetrait", default)]
    pub can_create_partial_pickup: bool,
}

impl SegmentsInfo {
    /// Warehouse holding the parcel between the two legs.
    pub fn warehouse(&self) -> Option<(i64, &str)> {
        (self.warehouse_id > 0).then_some((self.warehouse_id, self.warehouse_name.as_str()))
    }

    /// Whether a delivery of `kind` may still be created for the listing.
    pub fn allows(&self, kind: DeliveryType) -> bool {
        match kind {
            DeliveryType::Full => self.can_create_complete,
            DeliveryType::PartialDrop => self.can_create_partial_drop,
            DeliveryType::PartialPickup => self.can_create_partial_pickup,
            DeliveryType::Unknown => false,
        }
    }
}

/// Parameters for creating a delivery from a listing.
#[derive(Debug, Clone)]
pub struct DeliveryRequest {
    pub kind: DeliveryType,
    pub listing_id: i64,
    pub courier_id: i64,
    pub warehouse_id: Option<i64>,
    pub agreed_price: Option<f64>,
}

impl DeliveryRequest {
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("annonceId", self.listing_id.to_string()),
            ("livreurId", self.courier_id.to_string()),
        ];
        if self.kind.needs_warehouse() {
            if let Some(warehouse) = self.warehouse_id {
                query.push(("entrepotId", warehouse.to_string()));
            }
        }
        if let Some(price) = self.agreed_price.filter(|p| *p > 0.0) {
            query.push(("prixConvenu", price.to_string()));
        }
        query
    }
}
