// src/models/mod.rs

//! Domain models mirrored from the backend's JSON.
//!
//! Records are plain data: they are created when a fetch resolves and
//! replaced wholesale on the next one.

mod affiliation;
mod booking;
mod config;
mod contract;
mod delivery;
mod document;
mod listing;
mod stats;
mod user;

// Re-export all public types
pub use affiliation::{Affiliation, AffiliationStatus};
pub(crate) use booking::{MonthlyRevenue, TimeWindow};
pub use booking::{AvailabilityCheck, AvailabilitySlot, Booking, BookingStatus, NewBooking, Weekday};
pub use config::{ApiConfig, Config, LoggingConfig, SessionConfig};
pub use contract::{Contract, ContractPlan, ContractStatus, NewContract};
pub use delivery::{
    Delivery, DeliveryRequest, DeliveryStatus, DeliveryType, SegmentsInfo, Warehouse,
    WarehouseStatus,
};
pub(crate) use document::ReviewComment;
pub use document::{Document, DocumentDecision, DocumentFilters, DocumentStatus, DocumentType};
pub use listing::{
    Listing, ListingFilters, ListingKind, ListingStatus, MerchantListing, NewListing,
    NewMerchantListing,
};
pub use stats::DashboardStats;
pub use user::{
    AuthResponse, LoginRequest, RegisterRequest, Role, RoleDetails, TokenCheck,
    UpdateUserRequest, User, UserRef, UserStatus,
};
