use serde::Deserialize;

#[derive(Deserialize)]
pub struct CheckAvailabilityRequest {
    pub date: String,
}

#[derive(Deserialize)]
pub struct BookRequest {
    pub user_name: String,
    pub user_email: String,
    pub student_id: Option<String>,
    pub booking_date: String,
    pub start_time: String,
    pub end_time: String,
    pub game_id: u64,
    pub number_of_players: Option<i32>,
    pub special_requests: Option<String>,
}

#[derive(Deserialize)]
pub struct ViewBookingRequest {
    pub booking_id: u64,
}

#[derive(Deserialize)]
pub struct CancelBookingRequest {
    pub booking_id: u64,
}
