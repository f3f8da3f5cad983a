use rand::Rng;
use sqlx::PgPool;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::utils::errors::{AppError, is_unique_violation};
use crate::utils::pagination::PaginationMeta;

use super::generator::{DEFAULT_PIN_LENGTH, generate_pin};
use super::model::{
    GenerationExhausted, PaginatedSignupPinsResponse, RedeemPinError, SignupPin,
    SignupPinFilterParams,
};

const SELECT_COLUMNS: &str = "id, pin, user_id, is_used, created_at";

/// Attempts per PIN before issuance gives up.
const MAX_GENERATION_ATTEMPTS: u32 = 100;

pub struct SignupPinService;

impl SignupPinService {
    /// Issue `count` fresh unused PINs.
    ///
    /// Inserts are independent: a failure on PIN `k` leaves PINs `1..k` in the
    /// store. Uniqueness races with concurrent issuers are absorbed here by
    /// redrawing, never surfaced to the caller.
    #[instrument(skip(db, rng), fields(db.operation = "INSERT", db.table = "signup_pins"))]
    pub async fn issue_pins<R: Rng + Send>(
        db: &PgPool,
        rng: &mut R,
        count: u32,
    ) -> Result<Vec<SignupPin>, AppError> {
        debug!(count = %count, "Issuing signup PINs");

        let mut issued = Vec::with_capacity(count as usize);
        for _ in 0..count {
            issued.push(Self::insert_unique_pin(db, rng).await?);
        }

        info!(issued = %issued.len(), "Signup PINs issued");

        Ok(issued)
    }

    /// Generate a candidate and insert it, redrawing on collision.
    ///
    /// The existence check is a fast path only; the unique index on `pin` is
    /// the real guarantee, and an insert that loses the race between check and
    /// insert re-enters the loop with a fresh candidate.
    async fn insert_unique_pin<R: Rng + Send>(
        db: &PgPool,
        rng: &mut R,
    ) -> Result<SignupPin, AppError> {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let candidate = generate_pin(rng, DEFAULT_PIN_LENGTH);

            let taken = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS (SELECT 1 FROM signup_pins WHERE pin = $1)",
            )
            .bind(&candidate)
            .fetch_one(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error checking PIN existence");
                AppError::from(e)
            })?;

            if taken {
                debug!(attempt = %attempt, "PIN collision, redrawing");
                continue;
            }

            let insert = sqlx::query_as::<_, SignupPin>(&format!(
                "INSERT INTO signup_pins (pin) VALUES ($1) RETURNING {SELECT_COLUMNS}"
            ))
            .bind(&candidate)
            .fetch_one(db)
            .await;

            match insert {
                Ok(pin) => return Ok(pin),
                Err(e) if is_unique_violation(&e) => {
                    warn!(attempt = %attempt, "PIN insert lost a uniqueness race, redrawing");
                    continue;
                }
                Err(e) => {
                    error!(error = %e, "Database error inserting signup PIN");
                    return Err(AppError::from(e));
                }
            }
        }

        warn!(
            attempts = %MAX_GENERATION_ATTEMPTS,
            "Signup PIN namespace appears saturated"
        );

        Err(AppError::service_unavailable(GenerationExhausted {
            attempts: MAX_GENERATION_ATTEMPTS,
        }))
    }

    /// Consume a PIN, linking it to `user_id`.
    ///
    /// The conditional update matches only while the PIN is unused and
    /// unlinked, so of two concurrent redemptions of the same PIN exactly one
    /// row-updates and wins; the other falls through to `AlreadyUsed`. A PIN
    /// that already carries a `user_id` is never reassigned.
    #[instrument(skip(db), fields(user.id = %user_id, db.operation = "UPDATE", db.table = "signup_pins"))]
    pub async fn redeem_pin(
        db: &PgPool,
        pin: &str,
        user_id: Uuid,
    ) -> Result<SignupPin, AppError> {
        debug!("Redeeming signup PIN");

        let redeemed = sqlx::query_as::<_, SignupPin>(&format!(
            "UPDATE signup_pins SET is_used = TRUE, user_id = $2
             WHERE pin = $1 AND is_used = FALSE AND user_id IS NULL
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(pin)
        .bind(user_id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                // user_id unique index: this account already holds another PIN
                warn!(user.id = %user_id, "Redemption rejected, account already linked");
                return AppError::new(
                    RedeemPinError::AccountAlreadyLinked.status(),
                    RedeemPinError::AccountAlreadyLinked,
                );
            }
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_foreign_key_violation()
            {
                warn!(user.id = %user_id, "Redemption rejected, account does not exist");
                return AppError::bad_request(anyhow::anyhow!("User does not exist"));
            }
            error!(error = %e, "Database error redeeming signup PIN");
            AppError::from(e)
        })?;

        if let Some(redeemed) = redeemed {
            info!(pin.id = %redeemed.id, "Signup PIN redeemed");
            return Ok(redeemed);
        }

        // The update matched nothing: distinguish a missing PIN from a consumed one.
        let existing = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM signup_pins WHERE pin = $1)",
        )
        .bind(pin)
        .fetch_one(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error looking up signup PIN");
            AppError::from(e)
        })?;

        let err = if existing {
            RedeemPinError::AlreadyUsed
        } else {
            RedeemPinError::NotFound
        };

        debug!(reason = %err, "Signup PIN redemption failed");

        Err(AppError::new(err.status(), err))
    }

    #[instrument(skip(db, filters), fields(db.operation = "SELECT", db.table = "signup_pins"))]
    pub async fn get_pins(
        db: &PgPool,
        filters: SignupPinFilterParams,
    ) -> Result<PaginatedSignupPinsResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        debug!(
            limit = %limit,
            offset = %offset,
            filter.is_used = ?filters.is_used,
            "Fetching signup PINs"
        );

        let mut count_query = String::from("SELECT COUNT(*) FROM signup_pins WHERE 1=1");
        let mut data_query =
            format!("SELECT {SELECT_COLUMNS} FROM signup_pins WHERE 1=1");

        if filters.is_used.is_some() {
            count_query.push_str(" AND is_used = $1");
            data_query.push_str(" AND is_used = $1");
        }

        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(is_used) = filters.is_used {
            count_sql = count_sql.bind(is_used);
        }
        let total = count_sql.fetch_one(db).await.map_err(|e| {
            error!(error = %e, "Database error counting signup PINs");
            AppError::from(e)
        })?;

        data_query.push_str(" ORDER BY created_at DESC");
        data_query.push_str(&format!(" LIMIT {} OFFSET {}", limit, offset));

        let mut data_sql = sqlx::query_as::<_, SignupPin>(&data_query);
        if let Some(is_used) = filters.is_used {
            data_sql = data_sql.bind(is_used);
        }
        let pins = data_sql.fetch_all(db).await.map_err(|e| {
            error!(error = %e, "Database error fetching signup PINs");
            AppError::from(e)
        })?;

        let has_more = offset + limit < total;

        Ok(PaginatedSignupPinsResponse {
            data: pins,
            meta: PaginationMeta {
                total,
                limit,
                offset,
                has_more,
            },
        })
    }
}
