// carta_server/src/services/pg_store.rs

//! Postgres-backed stores.
//!
//! Every record kind lives in one table as a JSONB document keyed by
//! `(kind, tenant, id)`. Id assignment takes a transaction-scoped advisory
//! lock per kind and tenant, so concurrent creates never pick the same id.

use async_trait::async_trait;
use carta::store::Record;
use carta::{CartaError, CartaResult, Menu, Order, Product, Review, Store};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::types::Json;
use sqlx::PgPool;
use std::marker::PhantomData;
use tracing::{event, instrument, Level};

/// A record that can be stored as a JSONB document.
pub trait PgRecord: Record + Serialize + DeserializeOwned + Unpin {
  const KIND: &'static str;
}

impl PgRecord for Order {
  const KIND: &'static str = "order";
}

impl PgRecord for Review {
  const KIND: &'static str = "review";
}

impl PgRecord for Product {
  const KIND: &'static str = "product";
}

impl PgRecord for Menu {
  const KIND: &'static str = "menu";
}

pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
  sqlx::query(
    r#"
    CREATE TABLE IF NOT EXISTS carta_records (
      kind       TEXT        NOT NULL,
      tenant     TEXT        NOT NULL,
      id         BIGINT      NOT NULL,
      body       JSONB       NOT NULL,
      created_at TIMESTAMPTZ NOT NULL,
      PRIMARY KEY (kind, tenant, id)
    )
    "#,
  )
  .execute(pool)
  .await?;
  Ok(())
}

pub struct PgStore<R> {
  pool: PgPool,
  tenant: String,
  _record: PhantomData<fn() -> R>,
}

impl<R: PgRecord> PgStore<R> {
  pub fn new(pool: PgPool, tenant: impl Into<String>) -> Self {
    PgStore {
      pool,
      tenant: tenant.into(),
      _record: PhantomData,
    }
  }

  fn db_err(err: sqlx::Error) -> CartaError {
    CartaError::store(R::ENTITY, err)
  }

  fn not_found(id: u64) -> CartaError {
    CartaError::NotFound { entity: R::ENTITY, id }
  }

  fn db_id(id: u64) -> CartaResult<i64> {
    i64::try_from(id).map_err(|_| Self::not_found(id))
  }

  fn lock_key(&self) -> String {
    format!("carta:{}:{}", R::KIND, self.tenant)
  }

  /// Inserts `records` verbatim when this tenant has none of this kind yet.
  /// Returns how many were inserted.
  #[instrument(name = "PgStore::seed_if_empty", skip_all, fields(kind = R::KIND, tenant = %self.tenant))]
  pub async fn seed_if_empty(&self, records: Vec<R>) -> CartaResult<usize> {
    let mut tx = self.pool.begin().await.map_err(Self::db_err)?;
    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
      .bind(self.lock_key())
      .execute(&mut *tx)
      .await
      .map_err(Self::db_err)?;

    let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM carta_records WHERE kind = $1 AND tenant = $2")
      .bind(R::KIND)
      .bind(&self.tenant)
      .fetch_one(&mut *tx)
      .await
      .map_err(Self::db_err)?;
    if existing > 0 {
      return Ok(0);
    }

    let count = records.len();
    for record in &records {
      sqlx::query("INSERT INTO carta_records (kind, tenant, id, body, created_at) VALUES ($1, $2, $3, $4, $5)")
        .bind(R::KIND)
        .bind(&self.tenant)
        .bind(Self::db_id(record.id())?)
        .bind(Json(record))
        .bind(record.created_at())
        .execute(&mut *tx)
        .await
        .map_err(Self::db_err)?;
    }
    tx.commit().await.map_err(Self::db_err)?;
    event!(Level::INFO, count, "Seeded demo records.");
    Ok(count)
  }
}

#[async_trait]
impl<R: PgRecord> Store<R> for PgStore<R> {
  async fn get_all(&self) -> CartaResult<Vec<R>> {
    let rows: Vec<(Json<R>,)> =
      sqlx::query_as("SELECT body FROM carta_records WHERE kind = $1 AND tenant = $2 ORDER BY id")
        .bind(R::KIND)
        .bind(&self.tenant)
        .fetch_all(&self.pool)
        .await
        .map_err(Self::db_err)?;
    Ok(rows.into_iter().map(|(Json(record),)| record).collect())
  }

  async fn get_by_id(&self, id: u64) -> CartaResult<R> {
    let row: Option<(Json<R>,)> =
      sqlx::query_as("SELECT body FROM carta_records WHERE kind = $1 AND tenant = $2 AND id = $3")
        .bind(R::KIND)
        .bind(&self.tenant)
        .bind(Self::db_id(id)?)
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::db_err)?;
    row.map(|(Json(record),)| record).ok_or_else(|| Self::not_found(id))
  }

  #[instrument(name = "PgStore::create", skip_all, fields(kind = R::KIND, tenant = %self.tenant))]
  async fn create(&self, new: R::New) -> CartaResult<R> {
    let mut tx = self.pool.begin().await.map_err(Self::db_err)?;
    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
      .bind(self.lock_key())
      .execute(&mut *tx)
      .await
      .map_err(Self::db_err)?;

    let (max_id,): (i64,) =
      sqlx::query_as("SELECT COALESCE(MAX(id), 0) FROM carta_records WHERE kind = $1 AND tenant = $2")
        .bind(R::KIND)
        .bind(&self.tenant)
        .fetch_one(&mut *tx)
        .await
        .map_err(Self::db_err)?;
    let id = max_id + 1;

    let record = R::from_new(id as u64, new, Utc::now());
    sqlx::query("INSERT INTO carta_records (kind, tenant, id, body, created_at) VALUES ($1, $2, $3, $4, $5)")
      .bind(R::KIND)
      .bind(&self.tenant)
      .bind(id)
      .bind(Json(&record))
      .bind(record.created_at())
      .execute(&mut *tx)
      .await
      .map_err(Self::db_err)?;
    tx.commit().await.map_err(Self::db_err)?;

    event!(Level::DEBUG, id, "Record created.");
    Ok(record)
  }

  #[instrument(name = "PgStore::update", skip(self, patch), fields(kind = R::KIND, tenant = %self.tenant))]
  async fn update(&self, id: u64, patch: R::Patch) -> CartaResult<R> {
    let db_id = Self::db_id(id)?;
    let mut tx = self.pool.begin().await.map_err(Self::db_err)?;
    let row: Option<(Json<R>,)> =
      sqlx::query_as("SELECT body FROM carta_records WHERE kind = $1 AND tenant = $2 AND id = $3 FOR UPDATE")
        .bind(R::KIND)
        .bind(&self.tenant)
        .bind(db_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(Self::db_err)?;
    let Some((Json(mut record),)) = row else {
      return Err(Self::not_found(id));
    };

    record.apply_patch(patch);
    sqlx::query("UPDATE carta_records SET body = $4 WHERE kind = $1 AND tenant = $2 AND id = $3")
      .bind(R::KIND)
      .bind(&self.tenant)
      .bind(db_id)
      .bind(Json(&record))
      .execute(&mut *tx)
      .await
      .map_err(Self::db_err)?;
    tx.commit().await.map_err(Self::db_err)?;
    Ok(record)
  }

  #[instrument(name = "PgStore::delete", skip(self), fields(kind = R::KIND, tenant = %self.tenant))]
  async fn delete(&self, id: u64) -> CartaResult<R> {
    let row: Option<(Json<R>,)> =
      sqlx::query_as("DELETE FROM carta_records WHERE kind = $1 AND tenant = $2 AND id = $3 RETURNING body")
        .bind(R::KIND)
        .bind(&self.tenant)
        .bind(Self::db_id(id)?)
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::db_err)?;
    row.map(|(Json(record),)| record).ok_or_else(|| Self::not_found(id))
  }
}
