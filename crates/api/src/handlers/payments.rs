//! Handlers for `/enrollments/{id}/payments` (cashier-recorded installments).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use registra_core::error::CoreError;
use registra_core::types::DbId;
use registra_db::models::payment::{Payment, RecordPayment};
use registra_db::repositories::{EnrollmentRepo, PaymentRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireCashier, RequireStaff};
use crate::state::AppState;

/// Payment ledger for one enrollment.
#[derive(Debug, Serialize)]
pub struct PaymentLedger {
    pub payments: Vec<Payment>,
    /// Sum of recorded payments in centavos.
    pub total_paid: i64,
    /// Remaining balance in centavos. Negative means overpaid.
    pub balance: i64,
}

/// POST /api/v1/enrollments/{id}/payments
///
/// Record an installment. Payments are append-only; corrections are new
/// entries, never edits.
pub async fn record(
    RequireCashier(cashier): RequireCashier,
    State(state): State<AppState>,
    Path(enrollment_id): Path<DbId>,
    Json(input): Json<RecordPayment>,
) -> AppResult<(StatusCode, Json<Payment>)> {
    if input.amount <= 0 {
        return Err(AppError::Core(CoreError::Validation(
            "Payment amount must be positive".into(),
        )));
    }

    EnrollmentRepo::find_by_id(&state.pool, enrollment_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Enrollment",
            id: enrollment_id,
        }))?;

    let payment = PaymentRepo::create(&state.pool, enrollment_id, &input, cashier.user_id).await?;

    tracing::info!(
        enrollment_id,
        payment_id = payment.id,
        amount = payment.amount,
        method = %payment.method,
        "Payment recorded"
    );

    Ok((StatusCode::CREATED, Json(payment)))
}

/// GET /api/v1/enrollments/{id}/payments
pub async fn ledger(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
    Path(enrollment_id): Path<DbId>,
) -> AppResult<Json<PaymentLedger>> {
    let enrollment = EnrollmentRepo::find_by_id(&state.pool, enrollment_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Enrollment",
            id: enrollment_id,
        }))?;

    let payments = PaymentRepo::list_for_enrollment(&state.pool, enrollment_id).await?;
    let total_paid = PaymentRepo::total_paid(&state.pool, enrollment_id).await?;

    Ok(Json(PaymentLedger {
        payments,
        total_paid,
        balance: enrollment.total_fee - total_paid,
    }))
}
