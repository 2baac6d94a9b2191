mod config;
mod repos;
mod system;

pub use config::Config;
pub use repos::Repos;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;
use tracing::warn;

#[derive(Clone)]
pub struct DealbirdContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

impl DealbirdContext {
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        }
    }
}

/// Will setup the infrastructure context given the environment.
/// Without a `DATABASE_URL` the context runs on in-memory repositories,
/// which is what the test suites use.
pub async fn setup_context() -> DealbirdContext {
    let repos = match get_psql_connection_string() {
        Some(connection_string) => Repos::create_postgres(&connection_string)
            .await
            .expect("Postgres credentials must be valid"),
        None => {
            warn!("DATABASE_URL not set, falling back to in-memory repositories");
            Repos::create_inmemory()
        }
    };
    DealbirdContext {
        repos,
        config: Config::new(),
        sys: Arc::new(RealSys {}),
    }
}

fn get_psql_connection_string() -> Option<String> {
    std::env::var("DATABASE_URL").ok()
}

pub async fn run_migration() -> Result<(), MigrateError> {
    let connection_string = match get_psql_connection_string() {
        Some(connection_string) => connection_string,
        None => return Ok(()),
    };
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&connection_string)
        .await
        .expect("TO CONNECT TO POSTGRES");

    sqlx::migrate!().run(&pool).await
}
