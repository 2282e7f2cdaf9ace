use std::str::FromStr;

use sqlx::{
    pool::PoolConnection,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    FromRow, Sqlite, SqliteConnection, SqlitePool,
};

use crate::{config::Config, res::SCHEMA, AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Booking {
    pub id: i64,
    pub visitor_name: String,
    pub email: String,
    pub date: String,
    pub time_slot: String,
    pub participants: i64,
    // unique: date, time_slot
}

#[derive(Debug)]
pub struct NewBooking<'a> {
    pub visitor_name: &'a str,
    pub email: &'a str,
    pub date: &'a str,
    pub time_slot: &'a str,
    pub participants: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug)]
pub struct NewContact<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub subject: &'a str,
    pub message: &'a str,
}

/// Connection source for request handlers. Cloning shares the pool.
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    pub async fn connect(config: &Config) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;
        Self::with_schema(pool).await
    }

    /// Private database that lives as long as the store. One connection, so every
    /// request sees the same tables.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        Self::with_schema(pool).await
    }

    async fn with_schema(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        sqlx::raw_sql(SCHEMA).execute(&pool).await?;
        Ok(Store { pool })
    }

    /// One connection for the lifetime of a request; it goes back to the pool on drop.
    pub async fn open(&self) -> AppResult<PoolConnection<Sqlite>> {
        self.pool.acquire().await.map_err(AppError::Connection)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

pub async fn slot_taken(conn: &mut SqliteConnection, date: &str, time_slot: &str) -> sqlx::Result<bool> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM bookings WHERE date=? AND time_slot=?")
        .bind(date)
        .bind(time_slot)
        .fetch_optional(conn)
        .await?;
    Ok(row.is_some())
}

pub async fn insert_booking(conn: &mut SqliteConnection, booking: &NewBooking<'_>) -> sqlx::Result<i64> {
    let result = sqlx::query("INSERT INTO bookings (visitor_name,email,date,time_slot,participants) VALUES (?,?,?,?,?)")
        .bind(booking.visitor_name)
        .bind(booking.email)
        .bind(booking.date)
        .bind(booking.time_slot)
        .bind(booking.participants)
        .execute(conn)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn insert_contact(conn: &mut SqliteConnection, contact: &NewContact<'_>) -> sqlx::Result<i64> {
    let result = sqlx::query("INSERT INTO contacts (name,email,subject,message) VALUES (?,?,?,?)")
        .bind(contact.name)
        .bind(contact.email)
        .bind(contact.subject)
        .bind(contact.message)
        .execute(conn)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn find_booking(conn: &mut SqliteConnection, id: i64) -> sqlx::Result<Option<Booking>> {
    sqlx::query_as("SELECT id,visitor_name,email,date,time_slot,participants FROM bookings WHERE id=?")
        .bind(id)
        .fetch_optional(conn)
        .await
}

pub async fn find_contact(conn: &mut SqliteConnection, id: i64) -> sqlx::Result<Option<ContactMessage>> {
    sqlx::query_as("SELECT id,name,email,subject,message FROM contacts WHERE id=?")
        .bind(id)
        .fetch_optional(conn)
        .await
}

pub async fn count_slot_bookings(conn: &mut SqliteConnection, date: &str, time_slot: &str) -> sqlx::Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM bookings WHERE date=? AND time_slot=?")
        .bind(date)
        .bind(time_slot)
        .fetch_one(conn)
        .await?;
    Ok(count)
}
