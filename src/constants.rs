// src/constants.rs

//! Fixed application constants: storage keys, endpoint paths, error
//! messages and form limits. Display labels live on the model enums.

/// Default backend base URL (the Spring Boot API root).
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Environment variable that overrides the configured base URL.
pub const BASE_URL_ENV: &str = "ECODELI_API_URL";

/// Route the client is sent to when the session is no longer valid.
pub const LOGIN_PATH: &str = "/login";

/// Session store keys.
pub mod keys {
    /// Bearer token issued by `/auth/login`.
    pub const AUTH_TOKEN: &str = "authToken";
    /// Serialized current user.
    pub const USER: &str = "user";
}

/// Endpoint paths, relative to the base URL.
pub mod endpoints {
    pub const AUTH: &str = "auth";
    pub const REGISTRATIONS: &str = "inscriptions";
    pub const USERS: &str = "utilisateurs";
    pub const LISTINGS: &str = "annonces";
    pub const MERCHANT_LISTINGS: &str = "annonces-commercants";
    pub const CONTRACTS: &str = "contrats";
    pub const DELIVERIES: &str = "livraisons";
    pub const WAREHOUSES: &str = "entrepots";
    pub const DOCUMENTS: &str = "documents";
    pub const COURIERS: &str = "livreurs";
    pub const BOOKINGS: &str = "prestations";
}

/// User-facing error messages, one per error category.
pub mod messages {
    pub const NETWORK_ERROR: &str = "Unable to reach the server";
    pub const UNAUTHORIZED: &str = "You must be signed in to access this page";
    pub const FORBIDDEN: &str = "You are not allowed to access this resource";
    pub const NOT_FOUND: &str = "The requested resource does not exist";
    pub const VALIDATION_ERROR: &str = "Please check the submitted data";
    pub const SERVER_ERROR: &str = "An error occurred";
    pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";
    pub const ADMIN_ONLY: &str = "Access denied: only administrators can use the back office";
}

/// Form validation limits.
pub mod limits {
    pub const MIN_PASSWORD_LENGTH: usize = 6;
    pub const MAX_TITLE_LENGTH: usize = 100;
    pub const MAX_DESCRIPTION_LENGTH: usize = 500;
}
