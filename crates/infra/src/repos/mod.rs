mod account;
mod availability;
mod booking;
mod invoice;
mod proposal;
mod shared;

use account::{IAccountRepo, InMemoryAccountRepo, PostgresAccountRepo};
use availability::{
    IAvailabilityProfileRepo, InMemoryAvailabilityProfileRepo, PostgresAvailabilityProfileRepo,
};
use booking::{IBookingRepo, InMemoryBookingRepo, PostgresBookingRepo};
use invoice::{IInvoiceRepo, InMemoryInvoiceRepo, PostgresInvoiceRepo};
use proposal::{IProposalRepo, InMemoryProposalRepo, PostgresProposalRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct Repos {
    pub accounts: Arc<dyn IAccountRepo>,
    pub availability_profiles: Arc<dyn IAvailabilityProfileRepo>,
    pub bookings: Arc<dyn IBookingRepo>,
    pub proposals: Arc<dyn IProposalRepo>,
    pub invoices: Arc<dyn IInvoiceRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");
        Ok(Self {
            accounts: Arc::new(PostgresAccountRepo::new(pool.clone())),
            availability_profiles: Arc::new(PostgresAvailabilityProfileRepo::new(pool.clone())),
            bookings: Arc::new(PostgresBookingRepo::new(pool.clone())),
            proposals: Arc::new(PostgresProposalRepo::new(pool.clone())),
            invoices: Arc::new(PostgresInvoiceRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            accounts: Arc::new(InMemoryAccountRepo::new()),
            availability_profiles: Arc::new(InMemoryAvailabilityProfileRepo::new()),
            bookings: Arc::new(InMemoryBookingRepo::new()),
            proposals: Arc::new(InMemoryProposalRepo::new()),
            invoices: Arc::new(InMemoryInvoiceRepo::new()),
        }
    }
}
