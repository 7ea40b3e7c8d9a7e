use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config, error::AppError, service::bootstrap::BootstrapService,
};

const DEFAULT_LOG_FILTER: &str = "info,sqlx=warn";

/// Installs the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` and falls back to `info` with quiet sqlx logging.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Connects to the MySQL database and runs pending migrations.
///
/// Establishes a connection pool using the connection string from configuration, then runs
/// all pending SeaORM migrations so the schema is up to date before any request is served.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Makes sure a superadmin account exists.
///
/// When no superadmin exists one is created from `SUPERADMIN_EMAIL` and
/// `SUPERADMIN_PASSWORD`. Without a configured password a random one is generated and
/// logged once so the operator can sign in and change it.
pub async fn ensure_superadmin(
    db: &sea_orm::DatabaseConnection,
    config: &Config,
) -> Result<(), AppError> {
    let provisioned = BootstrapService::new(db)
        .ensure_superadmin(
            config.superadmin_email.as_deref(),
            config.superadmin_password.as_deref(),
        )
        .await?;

    if let Some(provisioned) = provisioned {
        match provisioned.generated_password {
            Some(password) => tracing::warn!(
                "Created superadmin {} with generated password {}; change it after signing in",
                provisioned.user.email,
                password
            ),
            None => tracing::info!("Created superadmin {}", provisioned.user.email),
        }
    }

    Ok(())
}
