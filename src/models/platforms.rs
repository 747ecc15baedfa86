use crate::schema::platforms;
use chrono::NaiveDateTime;

#[derive(Queryable)]
pub struct PlatformData {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "platforms"]
pub struct NewPlatform {
    pub name: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset, Default)]
#[table_name = "platforms"]
pub struct UpdatePlatform {
    pub name: Option<String>,
    pub description: Option<String>,
}
