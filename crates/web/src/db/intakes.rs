//! Intake record repository backed by `PostgreSQL`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use deposit_core::IntakeId;

use super::{IntakeRepository, RepositoryError};
use crate::models::{IntakeRecord, NewIntake};

/// Internal row type for `PostgreSQL` intake queries.
#[derive(Debug, sqlx::FromRow)]
struct IntakeRow {
    id: i32,
    customer_name: String,
    customer_email: String,
    customer_phone: Option<String>,
    item_category: String,
    item_description: String,
    volume_m3: f64,
    quoted_price: String,
    recommended_box: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<IntakeRow> for IntakeRecord {
    type Error = RepositoryError;

    fn try_from(row: IntakeRow) -> Result<Self, Self::Error> {
        if !row.volume_m3.is_finite() || row.volume_m3 < 0.0 {
            return Err(RepositoryError::DataCorruption(format!(
                "invalid volume {} on intake {}",
                row.volume_m3, row.id
            )));
        }

        Ok(Self {
            id: IntakeId::new(row.id),
            customer_name: row.customer_name,
            customer_email: row.customer_email,
            customer_phone: row.customer_phone,
            item_category: row.item_category,
            item_description: row.item_description,
            volume_m3: row.volume_m3,
            quoted_price: row.quoted_price,
            recommended_box: row.recommended_box,
            created_at: row.created_at,
        })
    }
}

/// Intake repository for the `intake_record` table.
#[derive(Debug, Clone)]
pub struct PgIntakeRepository {
    pool: PgPool,
}

impl PgIntakeRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IntakeRepository for PgIntakeRepository {
    async fn insert(&self, intake: &NewIntake) -> Result<IntakeRecord, RepositoryError> {
        let row = sqlx::query_as::<_, IntakeRow>(
            r"
            INSERT INTO intake_record (
                customer_name, customer_email, customer_phone,
                item_category, item_description, volume_m3,
                quoted_price, recommended_box
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, customer_name, customer_email, customer_phone,
                      item_category, item_description, volume_m3,
                      quoted_price, recommended_box, created_at
            ",
        )
        .bind(&intake.customer_name)
        .bind(&intake.customer_email)
        .bind(intake.customer_phone.as_deref())
        .bind(&intake.item_category)
        .bind(&intake.item_description)
        .bind(intake.volume_m3)
        .bind(&intake.quoted_price)
        .bind(&intake.recommended_box)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn list_newest_first(&self) -> Result<Vec<IntakeRecord>, RepositoryError> {
        let rows = sqlx::query_as::<_, IntakeRow>(
            r"
            SELECT id, customer_name, customer_email, customer_phone,
                   item_category, item_description, volume_m3,
                   quoted_price, recommended_box, created_at
            FROM intake_record
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}
