//! Database Test Utilities
//!
//! Starts a disposable PostgreSQL container, applies the schema from
//! `migrations/` and hands out a pool configured like the server's.

use std::time::Duration;
use testcontainers::{
    core::{IntoContainerPort, WaitFor},
    runners::AsyncRunner,
    ContainerAsync, GenericImage, ImageExt,
};

use infra_db::{create_pool, DatabaseConfig, DatabaseError, DatabasePool, EmployeeRepository, ProductRepository};

/// Schema applied to every test database
const SCHEMA: &str = include_str!("../../../migrations/20240101_000001_initial_schema.sql");

/// PostgreSQL restarts once after initdb, so the first connection may be refused
const CONNECT_ATTEMPTS: u32 = 5;

/// Default PostgreSQL image for testing
const POSTGRES_IMAGE: &str = "postgres";
const POSTGRES_TAG: &str = "16-alpine";
const POSTGRES_USER: &str = "test_user";
const POSTGRES_PASSWORD: &str = "test_password";
const POSTGRES_DB: &str = "catalog_test";

/// Configuration for test database
#[derive(Debug, Clone)]
pub struct TestDatabaseConfig {
    pub user: String,
    pub password: String,
    pub database: String,
    pub host: String,
    pub port: u16,
}

impl Default for TestDatabaseConfig {
    fn default() -> Self {
        Self {
            user: POSTGRES_USER.to_string(),
            password: POSTGRES_PASSWORD.to_string(),
            database: POSTGRES_DB.to_string(),
            host: "localhost".to_string(),
            port: 5432,
        }
    }
}

impl TestDatabaseConfig {
    /// Creates the database connection URL
    pub fn connection_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.database
        )
    }
}

/// A wrapper around a PostgreSQL test container
pub struct TestDatabase {
    _container: ContainerAsync<GenericImage>,
    pub config: TestDatabaseConfig,
    pub pool: DatabasePool,
}

impl TestDatabase {
    /// Starts a container and applies the schema
    ///
    /// # Errors
    ///
    /// Returns an error if Docker is unavailable, the container does not come
    /// up, or the schema cannot be applied
    pub async fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let container = GenericImage::new(POSTGRES_IMAGE, POSTGRES_TAG)
            .with_exposed_port(5432.tcp())
            .with_wait_for(WaitFor::message_on_stderr("database system is ready to accept connections"))
            .with_env_var("POSTGRES_USER", POSTGRES_USER)
            .with_env_var("POSTGRES_PASSWORD", POSTGRES_PASSWORD)
            .with_env_var("POSTGRES_DB", POSTGRES_DB)
            .start()
            .await?;

        let port = container.get_host_port_ipv4(5432).await?;
        let host = container.get_host().await?.to_string();

        let config = TestDatabaseConfig {
            user: POSTGRES_USER.to_string(),
            password: POSTGRES_PASSWORD.to_string(),
            database: POSTGRES_DB.to_string(),
            host,
            port,
        };

        let pool = connect_with_retry(&config).await?;

        let test_db = Self {
            _container: container,
            config,
            pool,
        };

        test_db.init_schema().await?;

        Ok(test_db)
    }

    /// Initializes the database schema from the migrations file
    async fn init_schema(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    /// Returns a reference to the connection pool
    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }

    /// Returns an employee repository on this database
    pub fn employees(&self) -> EmployeeRepository {
        EmployeeRepository::new(self.pool.clone())
    }

    /// Returns a product repository on this database
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    /// Runs raw SQL, for seeding rows the repositories would not write
    pub async fn execute(&self, sql: &str) -> Result<u64, Box<dyn std::error::Error + Send + Sync>> {
        let result = sqlx::raw_sql(sql).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    /// Clears both tables and resets their identifier sequences
    pub async fn clear_data(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query("TRUNCATE TABLE employees, products RESTART IDENTITY")
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

/// Creates a test database owned by a single test
///
/// Every call starts its own container, so tests never see each other's rows.
pub async fn create_isolated_test_database() -> Result<TestDatabase, Box<dyn std::error::Error + Send + Sync>> {
    TestDatabase::new().await
}

async fn connect_with_retry(config: &TestDatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    let mut attempt = 1;
    loop {
        let settings = DatabaseConfig::new(config.connection_url())
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30));

        match create_pool(settings).await {
            Ok(pool) => return Ok(pool),
            Err(e) if attempt < CONNECT_ATTEMPTS && e.is_connection_error() => {
                attempt += 1;
                tokio::time::sleep(Duration::from_millis(500)).await;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_connection_url() {
        let config = TestDatabaseConfig::default();
        let url = config.connection_url();

        assert!(url.starts_with("postgres://"));
        assert!(url.contains(POSTGRES_USER));
        assert!(url.contains(POSTGRES_DB));
    }

    fn column_type(table: &str, column: &str) -> String {
        let body = SCHEMA
            .split(&format!("CREATE TABLE IF NOT EXISTS {table} ("))
            .nth(1)
            .and_then(|rest| rest.split(");").next())
            .unwrap_or_else(|| panic!("table {table} missing from schema"));

        body.lines()
            .map(|line| line.trim().trim_end_matches(','))
            .find_map(|line| line.strip_prefix(column).map(|ty| ty.trim().to_string()))
            .unwrap_or_else(|| panic!("column {table}.{column} missing from schema"))
    }

    #[test]
    fn test_schema_stock_holds_any_i64() {
        assert_eq!(column_type("products", "stock"), "BIGINT");
    }

    #[test]
    fn test_schema_price_keeps_submitted_scale() {
        assert_eq!(column_type("products", "price"), "NUMERIC");
    }
}
