pub mod engine;
mod requests;
mod responses;

use crate::{
    config::AppConfig,
    database::{assert, get_db_conn, last_insert_id},
    models::{
        bookings::{BookingData, NewBooking, BOOKING_STATUS_CANCELLED, BOOKING_STATUS_CONFIRMED},
        games::GameData,
    },
    protocol::SimpleResponse,
    DbPool,
};
use actix_web::{post, web, HttpResponse, Responder};
use anyhow::{bail, Context};
use chrono::Utc;
use diesel::prelude::*;

use self::engine::BookedRange;
use self::{requests::*, responses::*};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(check_availability)
        .service(book)
        .service(view_booking)
        .service(cancel_booking);
}

crate::post_policy_funcs! {
    (check_availability, "/check_availability", CheckAvailabilityRequest, CheckAvailabilityResponse),
    (book, "/book", BookRequest, BookResponse),
}

crate::post_funcs! {
    (view_booking, "/view_booking", ViewBookingRequest, ViewBookingResponse),
    (cancel_booking, "/cancel_booking", CancelBookingRequest, SimpleResponse),
}

async fn check_availability_impl(
    pool: web::Data<DbPool>,
    config: web::Data<AppConfig>,
    info: web::Json<CheckAvailabilityRequest>,
) -> anyhow::Result<CheckAvailabilityResponse> {
    use crate::schema::gaming_area_bookings;

    let info = info.into_inner();
    let date = crate::utils::parse_date_str(&info.date)?;

    let conn = get_db_conn(&pool)?;
    let bookings = web::block(move || {
        gaming_area_bookings::table
            .filter(gaming_area_bookings::booking_date.eq(date))
            .filter(gaming_area_bookings::status.eq(BOOKING_STATUS_CONFIRMED))
            .order(gaming_area_bookings::start_time.asc())
            .get_results::<BookingData>(&conn)
    })
    .await
    .context("database error")?;

    let booked: Vec<BookedRange> = bookings
        .iter()
        .map(|booking| BookedRange {
            start: booking.start_time,
            end: booking.end_time,
        })
        .collect();
    let available = engine::available_slots(&config, &booked);

    Ok(CheckAvailabilityResponse {
        success: true,
        date: info.date,
        open_hour: format!("{:02}:00", config.gaming_area_open_hour),
        close_hour: format!("{:02}:00", config.gaming_area_close_hour),
        booked_slots: booked
            .iter()
            .map(|range| SlotItem {
                start: crate::utils::format_clock_str(&range.start),
                end: crate::utils::format_clock_str(&range.end),
            })
            .collect(),
        available_slots: available
            .iter()
            .map(|slot| SlotItem {
                start: crate::utils::format_clock_str(&slot.start),
                end: crate::utils::format_clock_str(&slot.end),
            })
            .collect(),
        ..Default::default()
    })
}

async fn book_impl(
    pool: web::Data<DbPool>,
    config: web::Data<AppConfig>,
    info: web::Json<BookRequest>,
) -> anyhow::Result<BookResponse> {
    use crate::schema::{games, gaming_area_bookings};

    let info = info.into_inner();
    let booking_date = crate::utils::parse_date_str(&info.booking_date)?;
    let start_time = crate::utils::parse_clock_str(&info.start_time)?;
    let end_time = crate::utils::parse_clock_str(&info.end_time)?;
    engine::check_times(start_time, end_time)?;

    let today = Utc::today().naive_utc();
    engine::check_release_window(today, booking_date)?;

    assert::assert_game(&pool, info.game_id).await?;

    // The snapshot reads and the insert share one transaction, and both
    // reads take FOR UPDATE locks; under REPEATABLE READ a plain read
    // would let two concurrent requests pass the capacity or quota
    // checks on the same snapshot and both insert.
    let config = config.into_inner();
    let conn = get_db_conn(&pool)?;
    let booking = web::block(move || {
        conn.transaction(|| {
            let same_day = gaming_area_bookings::table
                .filter(gaming_area_bookings::booking_date.eq(booking_date))
                .filter(gaming_area_bookings::status.eq(BOOKING_STATUS_CONFIRMED))
                .order(gaming_area_bookings::start_time.asc())
                .for_update()
                .get_results::<BookingData>(&conn)
                .context("database error")?;
            let ranges: Vec<BookedRange> = same_day
                .iter()
                .map(|booking| BookedRange {
                    start: booking.start_time,
                    end: booking.end_time,
                })
                .collect();
            engine::check_capacity(&config, &ranges, start_time, end_time)?;

            // the requester's confirmed bookings in the requested date's
            // calendar week; email or student id matches either way
            let week_start = engine::week_start(booking_date);
            let week_end = engine::week_end(booking_date);
            let week_bookings = match &info.student_id {
                Some(student_id) => gaming_area_bookings::table
                    .filter(gaming_area_bookings::status.eq(BOOKING_STATUS_CONFIRMED))
                    .filter(gaming_area_bookings::booking_date.between(week_start, week_end))
                    .filter(
                        gaming_area_bookings::user_email
                            .eq(info.user_email.clone())
                            .or(gaming_area_bookings::student_id.eq(student_id.clone())),
                    )
                    .for_update()
                    .get_results::<BookingData>(&conn),
                None => gaming_area_bookings::table
                    .filter(gaming_area_bookings::status.eq(BOOKING_STATUS_CONFIRMED))
                    .filter(gaming_area_bookings::booking_date.between(week_start, week_end))
                    .filter(gaming_area_bookings::user_email.eq(info.user_email.clone()))
                    .for_update()
                    .get_results::<BookingData>(&conn),
            }
            .context("database error")?;
            let week_ranges: Vec<BookedRange> = week_bookings
                .iter()
                .map(|booking| BookedRange {
                    start: booking.start_time,
                    end: booking.end_time,
                })
                .collect();
            engine::check_weekly_quota(&config, &week_ranges, start_time, end_time)?;

            let now = Utc::now().naive_utc();
            let data = NewBooking {
                user_name: info.user_name,
                user_email: info.user_email,
                student_id: info.student_id,
                booking_date,
                start_time,
                end_time,
                game_id: info.game_id,
                number_of_players: info.number_of_players.unwrap_or(1),
                special_requests: info.special_requests,
                status: BOOKING_STATUS_CONFIRMED.to_string(),
                created_at: now,
                updated_at: now,
            };
            diesel::insert_into(gaming_area_bookings::table)
                .values(data)
                .execute(&conn)
                .context("database error")?;

            let booking_id = diesel::select(last_insert_id)
                .get_result::<u64>(&conn)
                .context("database error")?;
            let (booking, game) = gaming_area_bookings::table
                .filter(gaming_area_bookings::id.eq(booking_id))
                .inner_join(games::table)
                .get_result::<(BookingData, GameData)>(&conn)
                .context("database error")?;

            Ok(BookingItem::from_record(booking, game.title))
        })
    })
    .await
    .map_err(crate::utils::flatten_err)?;

    log::info!(
        "booking {} accepted for {} {}-{}",
        booking.id,
        booking.booking_date,
        booking.start_time,
        booking.end_time
    );

    Ok(BookResponse {
        success: true,
        booking: Some(booking),
        ..Default::default()
    })
}

async fn view_booking_impl(
    pool: web::Data<DbPool>,
    info: web::Json<ViewBookingRequest>,
) -> anyhow::Result<ViewBookingResponse> {
    use crate::schema::{games, gaming_area_bookings};

    let info = info.into_inner();
    let conn = get_db_conn(&pool)?;
    let res = web::block(move || {
        gaming_area_bookings::table
            .filter(gaming_area_bookings::id.eq(info.booking_id))
            .inner_join(games::table)
            .get_result::<(BookingData, GameData)>(&conn)
            .optional()
    })
    .await
    .context("database error")?;

    match res {
        Some((booking, game)) => Ok(ViewBookingResponse {
            success: true,
            booking: Some(BookingItem::from_record(booking, game.title)),
            ..Default::default()
        }),
        None => bail!("No such booking"),
    }
}

async fn cancel_booking_impl(
    pool: web::Data<DbPool>,
    info: web::Json<CancelBookingRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::gaming_area_bookings;

    let info = info.into_inner();
    let booking_id = info.booking_id;

    let conn = get_db_conn(&pool)?;
    web::block(move || {
        conn.transaction(|| {
            let booking = gaming_area_bookings::table
                .filter(gaming_area_bookings::id.eq(booking_id))
                .get_result::<BookingData>(&conn)
                .optional()
                .context("database error")?;
            let booking = match booking {
                Some(booking) => booking,
                None => bail!("No such booking"),
            };
            engine::check_cancellable(&booking.status)?;

            diesel::update(
                gaming_area_bookings::table.filter(gaming_area_bookings::id.eq(booking_id)),
            )
            .set((
                gaming_area_bookings::status.eq(BOOKING_STATUS_CANCELLED),
                gaming_area_bookings::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(&conn)
            .context("database error")?;

            Ok(())
        })
    })
    .await
    .map_err(crate::utils::flatten_err)?;

    log::info!("booking {} cancelled", booking_id);

    Ok(SimpleResponse::ok())
}
