use serde::Serialize;

use crate::models::bookings::BookingData;

#[derive(Default, Serialize)]
pub struct SlotItem {
    pub start: String,
    pub end: String,
}

#[derive(Default, Serialize)]
pub struct CheckAvailabilityResponse {
    pub success: bool,
    pub code: String,
    pub err: String,
    pub date: String,
    pub open_hour: String,
    pub close_hour: String,
    pub booked_slots: Vec<SlotItem>,
    pub available_slots: Vec<SlotItem>,
}

#[derive(Default, Serialize)]
pub struct BookingItem {
    pub id: u64,
    pub user_name: String,
    pub user_email: String,
    pub student_id: Option<String>,
    pub booking_date: String,
    pub start_time: String,
    pub end_time: String,
    pub game_id: u64,
    pub game_title: String,
    pub number_of_players: i32,
    pub special_requests: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl BookingItem {
    pub fn from_record(data: BookingData, game_title: String) -> Self {
        Self {
            id: data.id,
            user_name: data.user_name,
            user_email: data.user_email,
            student_id: data.student_id,
            booking_date: crate::utils::format_date_str(&data.booking_date),
            start_time: crate::utils::format_clock_str(&data.start_time),
            end_time: crate::utils::format_clock_str(&data.end_time),
            game_id: data.game_id,
            game_title,
            number_of_players: data.number_of_players,
            special_requests: data.special_requests,
            status: data.status,
            created_at: crate::utils::format_time_str(&data.created_at),
            updated_at: crate::utils::format_time_str(&data.updated_at),
        }
    }
}

#[derive(Default, Serialize)]
pub struct BookResponse {
    pub success: bool,
    pub code: String,
    pub err: String,
    pub booking: Option<BookingItem>,
}

#[derive(Default, Serialize)]
pub struct ViewBookingResponse {
    pub success: bool,
    pub code: String,
    pub err: String,
    pub booking: Option<BookingItem>,
}

crate::impl_err_response! {
    CheckAvailabilityResponse,
    BookResponse,
    ViewBookingResponse,
}
