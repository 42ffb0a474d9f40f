//! Resource services for the EcoDeli backend.
//!
//! Each service borrows an [`ApiClient`](crate::client::ApiClient) and maps
//! one endpoint per method:
//! - Authentication and sign-up (`AuthService`)
//! - User administration and profile (`UserService`)
//! - Customer listings (`ListingService`)
//! - Merchant listings (`MerchantListingService`)
//! - Merchant contracts (`ContractService`)
//! - Deliveries and their lifecycle (`DeliveryService`)
//! - Warehouses (`WarehouseService`)
//! - Document review (`DocumentService`)
//! - Courier affiliation (`AffiliationService`)
//! - Personal-service bookings (`BookingService`)

mod affiliations;
mod auth;
mod bookings;
mod contracts;
mod deliveries;
mod documents;
mod listings;
mod merchant_listings;
mod users;
mod warehouses;

pub use affiliations::AffiliationService;
pub use auth::AuthService;
pub use bookings::BookingService;
pub use contracts::ContractService;
pub use deliveries::DeliveryService;
pub use documents::DocumentService;
pub use listings::ListingService;
pub use merchant_listings::MerchantListingService;
pub use users::UserService;
pub use warehouses::WarehouseService;

/// `{root}/{id}` style resource path.
fn item(root: &str, id: impl std::fmt::Display) -> String {
    format!("{}/{}", root, id)
}
