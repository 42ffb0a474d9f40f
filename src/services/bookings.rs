// src/services/bookings.rs

//! Personal-service bookings and provider availability.

use chrono::NaiveDateTime;
use serde::de::IgnoredAny;

use crate::client::ApiClient;
use crate::constants::endpoints;
use crate::error::{ApiError, ApiResult};
use crate::models::{
    AvailabilityCheck, AvailabilitySlot, Booking, MonthlyRevenue, NewBooking, TimeWindow,
};

use super::item;

/// Endpoints under `/prestations`.
pub struct BookingService<'a> {
    client: &'a ApiClient,
}

impl<'a> BookingService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Bookings a service provider has received.
    pub async fn by_provider(&self, provider_id: i64) -> ApiResult<Vec<Booking>> {
        self.client.get(&Self::provider_path(provider_id, "")).await
    }

    /// Bookings a customer has made.
    pub async fn by_client(&self, client_id: i64) -> ApiResult<Vec<Booking>> {
        let path = format!("{}/client/{}", endpoints::BOOKINGS, client_id);
        self.client.get(&path).await
    }

    pub async fn availability(&self, provider_id: i64) -> ApiResult<Vec<AvailabilitySlot>> {
        self.client
            .get(&Self::provider_path(provider_id, "/disponibilites"))
            .await
    }

    /// Replace the provider's weekly slots.
    pub async fn set_availability(
        &self,
        provider_id: i64,
        slots: &[AvailabilitySlot],
    ) -> ApiResult<()> {
        if let Some(slot) = slots.iter().find(|s| s.end <= s.start) {
            return Err(ApiError::unexpected(format!(
                "slot on {:?} ends before it starts",
                slot.day
            )));
        }
        let _: IgnoredAny = self
            .client
            .post(&Self::provider_path(provider_id, "/disponibilites"), slots)
            .await?;
        log::info!("Provider {}: {} availability slot(s) saved", provider_id, slots.len());
        Ok(())
    }

    pub async fn check_availability(
        &self,
        provider_id: i64,
        starts_at: NaiveDateTime,
        ends_at: NaiveDateTime,
    ) -> ApiResult<AvailabilityCheck> {
        let window = TimeWindow { starts_at, ends_at };
        self.client
            .post(
                &Self::provider_path(provider_id, "/verifier-disponibilite"),
                &window,
            )
            .await
    }

    pub async fn book(&self, booking: &NewBooking) -> ApiResult<Booking> {
        if booking.ends_at <= booking.starts_at {
            return Err(ApiError::unexpected("a booking must end after it starts"));
        }
        let created: Booking = self
            .client
            .post(&item(endpoints::BOOKINGS, "reserver"), booking)
            .await?;
        log::info!(
            "Booked {} with provider {} ({})",
            booking.service_type,
            booking.provider_id,
            created.id
        );
        Ok(created)
    }

    /// Cancel on behalf of `user_id`, the customer or the provider.
    pub async fn cancel(&self, id: i64, user_id: i64) -> ApiResult<()> {
        let query = [("utilisateurId", user_id.to_string())];
        self.transition(id, "annuler", &query).await
    }

    pub async fn complete(&self, id: i64) -> ApiResult<()> {
        self.transition(id, "terminer", &[]).await
    }

    /// Provider revenue for one calendar month.
    pub async fn monthly_revenue(&self, provider_id: i64, year: i32, month: u32) -> ApiResult<f64> {
        if !(1..=12).contains(&month) {
            return Err(ApiError::unexpected(format!("invalid month: {month}")));
        }
        let query = [("annee", year.to_string()), ("mois", month.to_string())];
        let revenue: MonthlyRevenue = self
            .client
            .get_query(&Self::provider_path(provider_id, "/revenus"), &query)
            .await?;
        Ok(revenue.revenue)
    }

    async fn transition(&self, id: i64, action: &str, query: &[(&str, String)]) -> ApiResult<()> {
        let path = format!("{}/{}/{}", endpoints::BOOKINGS, id, action);
        let _: IgnoredAny = self.client.put_query(&path, query).await?;
        log::info!("Booking {}: {}", id, action);
        Ok(())
    }

    fn provider_path(provider_id: i64, suffix: &str) -> String {
        format!("{}/prestataire/{}{}", endpoints::BOOKINGS, provider_id, suffix)
    }
}
