use crate::schema::gaming_area_bookings;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

pub const BOOKING_STATUS_CONFIRMED: &str = "confirmed";
pub const BOOKING_STATUS_CANCELLED: &str = "cancelled";
pub const BOOKING_STATUS_COMPLETED: &str = "completed";

#[derive(Queryable)]
pub struct BookingData {
    pub id: u64,
    pub user_name: String,
    pub user_email: String,
    pub student_id: Option<String>,
    pub booking_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub game_id: u64,
    pub number_of_players: i32,
    pub special_requests: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "gaming_area_bookings"]
pub struct NewBooking {
    pub user_name: String,
    pub user_email: String,
    pub student_id: Option<String>,
    pub booking_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub game_id: u64,
    pub number_of_players: i32,
    pub special_requests: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
