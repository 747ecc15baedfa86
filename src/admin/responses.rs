use serde::Serialize;

use crate::models::{bookings::BookingData, games::GameData, rentals::RentalData};

#[derive(Default, Serialize)]
pub struct PlatformItem {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub game_count: i64,
}

#[derive(Default, Serialize)]
pub struct SearchPlatformResponse {
    pub success: bool,
    pub code: String,
    pub err: String,
    pub platforms: Vec<PlatformItem>,
}

#[derive(Default, Serialize)]
pub struct GameItem {
    pub id: u64,
    pub title: String,
    pub chinese_title: Option<String>,
    pub category: Option<String>,
    pub platform_id: u64,
    pub platform: String,
    pub genre: Option<String>,
    pub release_year: Option<i32>,
    pub developer: Option<String>,
    pub publisher: Option<String>,
    pub rating: Option<String>,
    pub max_players: Option<i32>,
    pub online_multiplayer: bool,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub total_copies: i32,
    pub available_copies: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl GameItem {
    pub fn from_record(data: GameData, platform: String) -> Self {
        Self {
            id: data.id,
            title: data.title,
            chinese_title: data.chinese_title,
            category: data.category,
            platform_id: data.platform_id,
            platform,
            genre: data.genre,
            release_year: data.release_year,
            developer: data.developer,
            publisher: data.publisher,
            rating: data.rating,
            max_players: data.max_players,
            online_multiplayer: data.online_multiplayer,
            description: data.description,
            cover_image: data.cover_image,
            total_copies: data.total_copies,
            available_copies: data.available_copies,
            created_at: crate::utils::format_time_str(&data.created_at),
            updated_at: crate::utils::format_time_str(&data.updated_at),
        }
    }
}

#[derive(Default, Serialize)]
pub struct SearchGameResponse {
    pub success: bool,
    pub code: String,
    pub err: String,
    pub games: Vec<GameItem>,
    pub total: i64,
}

#[derive(Default, Serialize)]
pub struct RentalItem {
    pub id: u64,
    pub game_id: u64,
    pub game_title: String,
    pub user_name: String,
    pub user_email: String,
    pub rental_date: String,
    pub due_date: String,
    pub return_date: Option<String>,
    pub status: String,
    pub notes: Option<String>,
}

impl RentalItem {
    pub fn from_record(data: RentalData, game_title: String) -> Self {
        Self {
            id: data.id,
            game_id: data.game_id,
            game_title,
            user_name: data.user_name,
            user_email: data.user_email,
            rental_date: crate::utils::format_time_str(&data.rental_date),
            due_date: crate::utils::format_time_str(&data.due_date),
            return_date: data
                .return_date
                .as_ref()
                .map(crate::utils::format_time_str),
            status: data.status,
            notes: data.notes,
        }
    }
}

#[derive(Default, Serialize)]
pub struct SearchRentalResponse {
    pub success: bool,
    pub code: String,
    pub err: String,
    pub rentals: Vec<RentalItem>,
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
        }
    }
}

#[derive(Default, Serialize)]
pub struct SearchBookingResponse {
    pub success: bool,
    pub code: String,
    pub err: String,
    pub bookings: Vec<BookingItem>,
}

crate::impl_err_response! {
    SearchPlatformResponse,
    SearchGameResponse,
    SearchRentalResponse,
    SearchBookingResponse,
}
