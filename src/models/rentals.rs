use crate::schema::rentals;
use chrono::NaiveDateTime;

pub const RENTAL_STATUS_ACTIVE: &str = "active";
pub const RENTAL_STATUS_RETURNED: &str = "returned";
pub const RENTAL_STATUS_OVERDUE: &str = "overdue";

#[derive(Queryable)]
pub struct RentalData {
    pub id: u64,
    pub game_id: u64,
    pub user_name: String,
    pub user_email: String,
    pub rental_date: NaiveDateTime,
    pub due_date: NaiveDateTime,
    pub return_date: Option<NaiveDateTime>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "rentals"]
pub struct NewRental {
    pub game_id: u64,
    pub user_name: String,
    pub user_email: String,
    pub rental_date: NaiveDateTime,
    pub due_date: NaiveDateTime,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}
