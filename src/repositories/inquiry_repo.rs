use sqlx::PgPool;
use uuid::Uuid;

use crate::middleware::error_handling::{AppError, Result};
use crate::models::{Inquiry, SubmitInquiryRequest};

pub struct InquiryRepository {
    pool: PgPool,
}

impl InquiryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new inquiry. `flag` defaults to 'new' and `date_registered`
    /// to the database clock, so both are assigned server-side.
    pub async fn create(&self, request: SubmitInquiryRequest) -> Result<Inquiry> {
        let inquiry = sqlx::query_as::<_, Inquiry>(
            r#"
            INSERT INTO inquiries (name, email, phone, organization, "option", message)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, email, phone, organization, "option", message, flag, date_registered
            "#,
        )
        .bind(request.name)
        .bind(request.email)
        .bind(request.phone)
        .bind(request.organization)
        .bind(request.option)
        .bind(request.message)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("Inquiry created: {}", inquiry.id);

        Ok(inquiry)
    }

    /// Fetch every inquiry, in the store's natural order.
    pub async fn find_all(&self) -> Result<Vec<Inquiry>> {
        let inquiries = sqlx::query_as::<_, Inquiry>(
            r#"
            SELECT id, name, email, phone, organization, "option", message, flag, date_registered
            FROM inquiries
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(inquiries)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM inquiries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Inquiry not found".to_string()));
        }

        tracing::info!("Inquiry deleted: {}", id);

        Ok(())
    }

    /// Overwrite the flag of an existing inquiry. Touching a non-existent id
    /// is a not-found error, not a silent no-op.
    pub async fn update_flag(&self, id: Uuid, flag: &str) -> Result<()> {
        let result = sqlx::query("UPDATE inquiries SET flag = $1 WHERE id = $2")
            .bind(flag)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Inquiry not found".to_string()));
        }

        tracing::info!("Inquiry {} flag set to '{}'", id, flag);

        Ok(())
    }
}
