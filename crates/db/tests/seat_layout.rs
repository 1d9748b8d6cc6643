//! Integration tests for seat and floor layout management: seat-number
//! uniqueness, the optimistic version counter, guarded deletion, and the
//! transactional bulk write.

use chrono::{Duration, NaiveDate, Utc};
use sqlx::PgPool;

use hotdesk_db::models::booking::CreateBooking;
use hotdesk_db::models::company::CreateCompany;
use hotdesk_db::models::floor::{CreateFloor, Floor, FloorDeletion};
use hotdesk_db::models::seat::{BulkSeatOutcome, CreateSeat, SeatDeletion, UpdateSeat};
use hotdesk_db::models::status::SeatStatus;
use hotdesk_db::models::user::{CreateUser, User};
use hotdesk_db::repositories::{
    BookingRepo, CompanyRepo, FloorLockRepo, FloorRepo, SeatRepo, UserRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_floor(pool: &PgPool) -> (Floor, User) {
    let company = CompanyRepo::create(
        pool,
        &CreateCompany {
            name: "Initech".to_string(),
            address: None,
        },
    )
    .await
    .unwrap();

    let floor = FloorRepo::create(
        pool,
        &CreateFloor {
            company_id: company.id,
            name: "Mezzanine".to_string(),
            floor_number: 1,
        },
    )
    .await
    .unwrap();

    let erin = UserRepo::create(
        pool,
        &CreateUser {
            name: "Erin".to_string(),
            email: "erin@initech.test".to_string(),
            password_hash: "$argon2id$test".to_string(),
            role_id: 2,
            company_id: Some(company.id),
        },
    )
    .await
    .unwrap();

    (floor, erin)
}

fn new_seat(floor_id: i64, number: &str) -> CreateSeat {
    CreateSeat {
        floor_id,
        seat_number: number.to_string(),
        pos_x: 1.0,
        pos_y: 2.0,
        angle: None,
        status_id: None,
    }
}

fn move_to(version: i32, x: f64, y: f64) -> UpdateSeat {
    UpdateSeat {
        seat_number: None,
        pos_x: Some(x),
        pos_y: Some(y),
        angle: None,
        status_id: None,
        version,
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

// ---------------------------------------------------------------------------
// Test: creation defaults and per-floor uniqueness
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_seat_applies_defaults(pool: PgPool) {
    let (floor, _) = seed_floor(&pool).await;

    let seat = SeatRepo::create(&pool, &new_seat(floor.id, "A1")).await.unwrap();
    assert_eq!(seat.angle, 0);
    assert_eq!(seat.status_id, SeatStatus::Available.id());
    assert_eq!(seat.version, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_seat_number_unique_within_floor(pool: PgPool) {
    let (floor, _) = seed_floor(&pool).await;
    SeatRepo::create(&pool, &new_seat(floor.id, "A1")).await.unwrap();

    let result = SeatRepo::create(&pool, &new_seat(floor.id, "A1")).await;
    match result {
        Err(sqlx::Error::Database(db_err)) => {
            assert_eq!(db_err.constraint(), Some("uq_seats_floor_seat_number"));
        }
        other => panic!("expected unique violation, got {other:?}"),
    }

    // The same number is fine on another floor.
    let other_floor = FloorRepo::create(
        &pool,
        &CreateFloor {
            company_id: floor.company_id,
            name: "Attic".to_string(),
            floor_number: 2,
        },
    )
    .await
    .unwrap();
    SeatRepo::create(&pool, &new_seat(other_floor.id, "A1")).await.unwrap();
}

// ---------------------------------------------------------------------------
// Test: version-guarded updates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_with_current_version_advances_counter(pool: PgPool) {
    let (floor, _) = seed_floor(&pool).await;
    let seat = SeatRepo::create(&pool, &new_seat(floor.id, "A1")).await.unwrap();

    let updated = SeatRepo::update(&pool, seat.id, &move_to(seat.version, 5.0, 6.0))
        .await
        .unwrap()
        .expect("matching version must update");
    assert_eq!(updated.pos_x, 5.0);
    assert_eq!(updated.pos_y, 6.0);
    assert_eq!(updated.version, seat.version + 1);
    // Fields not named in the update keep their values.
    assert_eq!(updated.seat_number, "A1");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_with_stale_version_is_rejected(pool: PgPool) {
    let (floor, _) = seed_floor(&pool).await;
    let seat = SeatRepo::create(&pool, &new_seat(floor.id, "A1")).await.unwrap();

    // First writer wins and bumps the version.
    SeatRepo::update(&pool, seat.id, &move_to(seat.version, 5.0, 6.0))
        .await
        .unwrap()
        .unwrap();

    // Second writer still holds the original version and must lose.
    let stale = SeatRepo::update(&pool, seat.id, &move_to(seat.version, 9.0, 9.0))
        .await
        .unwrap();
    assert!(stale.is_none());

    // The first write survives untouched.
    let row = SeatRepo::find_by_id(&pool, seat.id).await.unwrap().unwrap();
    assert_eq!(row.pos_x, 5.0);
    assert_eq!(row.version, seat.version + 1);
}

// ---------------------------------------------------------------------------
// Test: deletion guarded by outstanding reservations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_seat_blocked_by_future_booking(pool: PgPool) {
    let (floor, erin) = seed_floor(&pool).await;
    let seat = SeatRepo::create(&pool, &new_seat(floor.id, "A1")).await.unwrap();

    BookingRepo::create(
        &pool,
        &CreateBooking {
            seat_id: seat.id,
            user_id: erin.id,
            booking_date: today() + Duration::days(3),
        },
    )
    .await
    .unwrap();

    let outcome = SeatRepo::delete(&pool, seat.id, today()).await.unwrap();
    assert_eq!(outcome, SeatDeletion::BlockedByFutureBooking);
    assert!(SeatRepo::find_by_id(&pool, seat.id).await.unwrap().is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_seat_removes_past_history(pool: PgPool) {
    let (floor, erin) = seed_floor(&pool).await;
    let seat = SeatRepo::create(&pool, &new_seat(floor.id, "A1")).await.unwrap();

    // A booking last week is history, not an obstacle.
    let old = BookingRepo::create(
        &pool,
        &CreateBooking {
            seat_id: seat.id,
            user_id: erin.id,
            booking_date: today() - Duration::days(7),
        },
    )
    .await
    .unwrap();

    let outcome = SeatRepo::delete(&pool, seat.id, today()).await.unwrap();
    assert_eq!(outcome, SeatDeletion::Deleted);
    assert!(SeatRepo::find_by_id(&pool, seat.id).await.unwrap().is_none());
    assert!(BookingRepo::find_by_id(&pool, old.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_missing_seat_reports_not_found(pool: PgPool) {
    let outcome = SeatRepo::delete(&pool, 99_999, today()).await.unwrap();
    assert_eq!(outcome, SeatDeletion::NotFound);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cancelled_future_booking_does_not_block_delete(pool: PgPool) {
    let (floor, erin) = seed_floor(&pool).await;
    let seat = SeatRepo::create(&pool, &new_seat(floor.id, "A1")).await.unwrap();

    let booking = BookingRepo::create(
        &pool,
        &CreateBooking {
            seat_id: seat.id,
            user_id: erin.id,
            booking_date: today() + Duration::days(3),
        },
    )
    .await
    .unwrap();
    BookingRepo::cancel(&pool, booking.id).await.unwrap();

    let outcome = SeatRepo::delete(&pool, seat.id, today()).await.unwrap();
    assert_eq!(outcome, SeatDeletion::Deleted);
}

// ---------------------------------------------------------------------------
// Test: bulk layout write is all or nothing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_apply_mixed_batch(pool: PgPool) {
    let (floor, _) = seed_floor(&pool).await;
    let existing = SeatRepo::create(&pool, &new_seat(floor.id, "A1")).await.unwrap();

    let outcome = SeatRepo::bulk_apply(
        &pool,
        &[new_seat(floor.id, "A2"), new_seat(floor.id, "A3")],
        &[(existing.id, move_to(existing.version, 7.0, 8.0))],
    )
    .await
    .unwrap();

    match outcome {
        BulkSeatOutcome::Applied(seats) => {
            assert_eq!(seats.len(), 3);
            // Creates first, in input order, then updates.
            assert_eq!(seats[0].seat_number, "A2");
            assert_eq!(seats[1].seat_number, "A3");
            assert_eq!(seats[2].id, existing.id);
            assert_eq!(seats[2].pos_x, 7.0);
        }
        other => panic!("expected Applied, got {other:?}"),
    }
    assert_eq!(SeatRepo::list_by_floor(&pool, floor.id).await.unwrap().len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_apply_stale_version_rolls_back_creates(pool: PgPool) {
    let (floor, _) = seed_floor(&pool).await;
    let existing = SeatRepo::create(&pool, &new_seat(floor.id, "A1")).await.unwrap();

    let outcome = SeatRepo::bulk_apply(
        &pool,
        &[new_seat(floor.id, "A2")],
        &[(existing.id, move_to(existing.version + 5, 7.0, 8.0))],
    )
    .await
    .unwrap();

    match outcome {
        BulkSeatOutcome::StaleVersion(id) => assert_eq!(id, existing.id),
        other => panic!("expected StaleVersion, got {other:?}"),
    }

    // The create in the same batch must not survive.
    let seats = SeatRepo::list_by_floor(&pool, floor.id).await.unwrap();
    assert_eq!(seats.len(), 1);
    assert_eq!(seats[0].seat_number, "A1");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_apply_missing_seat_aborts_batch(pool: PgPool) {
    let (floor, _) = seed_floor(&pool).await;

    let outcome = SeatRepo::bulk_apply(
        &pool,
        &[new_seat(floor.id, "A2")],
        &[(99_999, move_to(0, 1.0, 1.0))],
    )
    .await
    .unwrap();

    match outcome {
        BulkSeatOutcome::SeatNotFound(id) => assert_eq!(id, 99_999),
        other => panic!("expected SeatNotFound, got {other:?}"),
    }
    assert!(SeatRepo::list_by_floor(&pool, floor.id).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Test: floor deletion takes seats, history, and lock with it
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_floor_removes_seats_history_and_lock(pool: PgPool) {
    let (floor, erin) = seed_floor(&pool).await;
    let seat = SeatRepo::create(&pool, &new_seat(floor.id, "A1")).await.unwrap();
    BookingRepo::create(
        &pool,
        &CreateBooking {
            seat_id: seat.id,
            user_id: erin.id,
            booking_date: today() - Duration::days(1),
        },
    )
    .await
    .unwrap();
    FloorLockRepo::acquire(&pool, floor.id, erin.id).await.unwrap().unwrap();

    let outcome = FloorRepo::delete(&pool, floor.id, today()).await.unwrap();
    assert_eq!(outcome, FloorDeletion::Deleted);

    assert!(FloorRepo::find_by_id(&pool, floor.id).await.unwrap().is_none());
    assert!(SeatRepo::find_by_id(&pool, seat.id).await.unwrap().is_none());
    assert!(FloorLockRepo::find_by_floor(&pool, floor.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_floor_blocked_by_future_booking(pool: PgPool) {
    let (floor, erin) = seed_floor(&pool).await;
    let seat = SeatRepo::create(&pool, &new_seat(floor.id, "A1")).await.unwrap();
    BookingRepo::create(
        &pool,
        &CreateBooking {
            seat_id: seat.id,
            user_id: erin.id,
            booking_date: today(),
        },
    )
    .await
    .unwrap();

    let outcome = FloorRepo::delete(&pool, floor.id, today()).await.unwrap();
    assert_eq!(outcome, FloorDeletion::BlockedByFutureBooking);
    assert!(FloorRepo::find_by_id(&pool, floor.id).await.unwrap().is_some());
}
