use sea_orm::*;
use sea_orm::sea_query::{Index, OnConflict, PostgresQueryBuilder};
use tracing::info;

use crate::config::AuthConfig;
use crate::entity::{admin_user, registration, registration_member};
use crate::utils::hash;

/// Create the bootstrap admin from configuration when both credentials are set.
///
/// An existing account with the same email is left untouched, so changing the
/// configured password later does not reset it.
pub async fn seed_admin(db: &DatabaseConnection, auth: &AuthConfig) -> Result<(), DbErr> {
    let (Some(email), Some(password)) = (&auth.admin_email, &auth.admin_password) else {
        info!("No bootstrap admin configured");
        return Ok(());
    };
    let email = email.trim().to_lowercase();
    if email.is_empty() || password.is_empty() {
        tracing::warn!("Bootstrap admin email or password is empty, skipping");
        return Ok(());
    }

    let password_hash =
        hash::hash_password(password).map_err(|e| DbErr::Custom(format!("Password hash error: {e}")))?;

    let model = admin_user::ActiveModel {
        email: Set(email.clone()),
        password: Set(password_hash),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = admin_user::Entity::insert(model)
        .on_conflict(
            OnConflict::column(admin_user::Column::Email)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await;

    match result {
        Ok(0) | Err(DbErr::RecordNotInserted) => {}
        Ok(_) => info!(email = %email, "Seeded bootstrap admin"),
        Err(e) => return Err(e),
    }

    Ok(())
}

/// Ensure required database indexes exist.
///
/// SeaORM's schema-sync doesn't create composite indexes, so we create them
/// manually on startup. The unique ones back the duplicate-registration check.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Listing and stats: WHERE event_id = ? ORDER BY created_at DESC
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_registration_event_created")
        .table(registration::Entity)
        .col(registration::Column::EventId)
        .col(registration::Column::CreatedAt)
        .to_string(PostgresQueryBuilder);

    match db.execute_unprepared(&stmt).await {
        Ok(_) => info!("Ensured index idx_registration_event_created exists"),
        Err(e) => {
            tracing::warn!("Failed to create index idx_registration_event_created: {}", e);
        }
    }

    // A person registers at most once per event. Failing here would leave the
    // duplicate check without its backstop, so errors are fatal.
    let stmt = Index::create()
        .if_not_exists()
        .unique()
        .name("uq_registration_member_event_reg_number")
        .table(registration_member::Entity)
        .col(registration_member::Column::EventId)
        .col(registration_member::Column::RegistrationNumber)
        .to_string(PostgresQueryBuilder);
    db.execute_unprepared(&stmt).await?;
    info!("Ensured index uq_registration_member_event_reg_number exists");

    let stmt = Index::create()
        .if_not_exists()
        .unique()
        .name("uq_registration_member_event_email")
        .table(registration_member::Entity)
        .col(registration_member::Column::EventId)
        .col(registration_member::Column::OfficialEmail)
        .to_string(PostgresQueryBuilder);
    db.execute_unprepared(&stmt).await?;
    info!("Ensured index uq_registration_member_event_email exists");

    Ok(())
}
