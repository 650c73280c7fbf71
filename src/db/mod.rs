use std::fmt;

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};

use crate::config::DbSettings;
use crate::models::employee::Employee;

#[derive(Debug)]
pub struct StoreError(pub String);

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self(err.to_string())
    }
}

/// Row operations the handlers need; lets a pooled or in-memory store swap
/// in without touching handler logic.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn insert(&self, employee: &Employee) -> Result<(), StoreError>;
    async fn fetch(&self, emp_id: &str) -> Result<Option<Employee>, StoreError>;
}

pub struct MySqlEmployeeStore {
    pool: MySqlPool,
}

impl MySqlEmployeeStore {
    pub async fn connect(db: &DbSettings) -> Result<Self, sqlx::Error> {
        let options = MySqlConnectOptions::new()
            .host(&db.host)
            .port(db.port)
            .username(&db.user)
            .password(&db.password)
            .database(&db.database);

        // One process-wide connection; every request reuses it.
        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl EmployeeStore for MySqlEmployeeStore {
    async fn insert(&self, employee: &Employee) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO employee (emp_id, first_name, last_name, primary_skill, location) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&employee.emp_id)
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(&employee.primary_skill)
        .bind(&employee.location)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn fetch(&self, emp_id: &str) -> Result<Option<Employee>, StoreError> {
        let employee = sqlx::query_as::<_, Employee>(
            "SELECT emp_id, first_name, last_name, primary_skill, location \
             FROM employee WHERE emp_id = ?",
        )
        .bind(emp_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }
}
