use axum::response::IntoResponse;
use chrono::{NaiveDate, Utc};
use mockall::predicate;
use salonsync_api::middleware::error_handling::AppError;
use salonsync_core::errors::SalonError;
use salonsync_db::models::DbAppointment;
use salonsync_db::repositories::appointment::BookingOutcome;
use uuid::Uuid;

use crate::test_utils::TestContext;

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

#[tokio::test]
async fn test_booking_conflict_maps_to_409() {
    let mut ctx = TestContext::new();
    let employee_id = Uuid::new_v4();
    let date = d("2025-06-02");

    // The write path reports a conflict when the re-check under the
    // transaction finds the slot taken.
    ctx.appointment_repo
        .expect_book_appointment()
        .with(
            predicate::always(),
            predicate::eq(employee_id),
            predicate::always(),
            predicate::eq("Anna"),
            predicate::eq(date),
            predicate::eq("10:00"),
            predicate::eq(30u16),
        )
        .returning(|_, _, _, _, _, _, _| Ok(BookingOutcome::Conflict));

    let outcome = ctx
        .appointment_repo
        .book_appointment(
            Uuid::new_v4(),
            employee_id,
            Uuid::new_v4(),
            "Anna",
            date,
            "10:00",
            30,
        )
        .await
        .unwrap();

    // The handler translates the outcome the same way.
    let error = match outcome {
        BookingOutcome::Conflict => {
            AppError(SalonError::Conflict("10:00 on 2025-06-02 was just taken".to_string()))
        }
        BookingOutcome::Booked(_) => panic!("expected a conflict"),
    };

    let response = error.into_response();
    assert_eq!(response.status(), axum::http::StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_booked_outcome_keeps_requested_slot() {
    let mut ctx = TestContext::new();
    let salon_id = Uuid::new_v4();
    let employee_id = Uuid::new_v4();
    let service_id = Uuid::new_v4();
    let date = d("2025-06-02");

    ctx.appointment_repo
        .expect_book_appointment()
        .returning(move |salon_id, employee_id, service_id, client_name, date, time, _| {
            Ok(BookingOutcome::Booked(DbAppointment {
                id: Uuid::new_v4(),
                salon_id,
                employee_id,
                service_id,
                client_name: client_name.to_string(),
                date,
                time: time.to_string(),
                status: "pending".to_string(),
                proposed_date: None,
                proposed_time: None,
                created_at: Utc::now(),
            }))
        });

    let outcome = ctx
        .appointment_repo
        .book_appointment(salon_id, employee_id, service_id, "Anna", date, "10:00", 30)
        .await
        .unwrap();

    match outcome {
        BookingOutcome::Booked(row) => {
            assert_eq!(row.employee_id, employee_id);
            assert_eq!(row.date, date);
            assert_eq!(row.time, "10:00");
            // New bookings always start pending.
            assert_eq!(row.status, "pending");
        }
        BookingOutcome::Conflict => panic!("expected a booking"),
    }
}
