use sqlx::SqliteConnection;

use crate::{
    db::{self, NewBooking},
    payload::Payload,
    validate, ApiResponse, AppError, AppResult, Created,
};

const FIELDS: [&str; 5] = ["visitor_name", "email", "date", "time_slot", "participants"];

/// Books a tour slot. A slot (date, time_slot) holds at most one booking.
pub async fn book(conn: &mut SqliteConnection, data: &Payload) -> AppResult<ApiResponse> {
    validate::require_fields(data, &FIELDS)?;

    let field = |name| data.get(name).unwrap_or_default();
    validate::validate_email(field("email"))?;
    let participants = validate::validate_participants(field("participants"))?;

    let booking = NewBooking {
        visitor_name: field("visitor_name").trim(),
        email: field("email").trim(),
        date: field("date"),
        time_slot: field("time_slot"),
        participants,
    };

    if db::slot_taken(conn, booking.date, booking.time_slot)
        .await
        .map_err(AppError::Booking)?
    {
        return Err(AppError::SlotTaken);
    }

    let booking_id = store_booking(conn, &booking).await?;

    tracing::info!(booking_id, date = booking.date, time_slot = booking.time_slot, "tour booked");
    Ok(ApiResponse::created("Tour booked successfully!", Created::BookingId(booking_id)))
}

/// Inserts the booking. A concurrent request can pass the `slot_taken` check too;
/// the unique index on (date, time_slot) rejects the loser, which is a conflict, not a failure.
async fn store_booking(conn: &mut SqliteConnection, booking: &NewBooking<'_>) -> AppResult<i64> {
    match db::insert_booking(conn, booking).await {
        Ok(id) => Ok(id),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(AppError::SlotTaken),
        Err(e) => Err(AppError::Booking(e)),
    }
}
