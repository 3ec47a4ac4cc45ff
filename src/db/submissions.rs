use sqlx::PgPool;
use uuid::Uuid;

use super::StoreError;
use crate::models::{NewSubmission, Submission};

pub async fn create(pool: &PgPool, new: &NewSubmission) -> Result<Submission, StoreError> {
    let mut tx = pool.begin().await?;

    let submission = sqlx::query_as::<_, Submission>(
        "INSERT INTO submissions
            (id, company_name, address, representative_name, email, contact_number, app_software_name, amount)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(&new.company_name)
    .bind(&new.address)
    .bind(&new.representative_name)
    .bind(&new.email)
    .bind(&new.contact_number)
    .bind(new.app_software_name.as_deref().filter(|s| !s.is_empty()))
    .bind(&new.amount)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(submission)
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Submission>, StoreError> {
    let mut tx = pool.begin().await?;

    let submission = sqlx::query_as::<_, Submission>("SELECT * FROM submissions WHERE id = $1")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(submission)
}

/// Attach the payment reference. Returns `false` when no row has this id.
pub async fn set_reference_number(
    pool: &PgPool,
    id: Uuid,
    reference_number: &str,
) -> Result<bool, StoreError> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query("UPDATE submissions SET reference_number = $1 WHERE id = $2")
        .bind(reference_number)
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(result.rows_affected() == 1)
}
