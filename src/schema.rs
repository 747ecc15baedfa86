table! {
    platforms (id) {
        id -> Unsigned<Bigint>,
        name -> Varchar,
        description -> Nullable<Text>,
        created_at -> Datetime,
    }
}

table! {
    games (id) {
        id -> Unsigned<Bigint>,
        title -> Varchar,
        chinese_title -> Nullable<Varchar>,
        category -> Nullable<Varchar>,
        platform_id -> Unsigned<Bigint>,
        genre -> Nullable<Varchar>,
        release_year -> Nullable<Integer>,
        developer -> Nullable<Varchar>,
        publisher -> Nullable<Varchar>,
        rating -> Nullable<Varchar>,
        max_players -> Nullable<Integer>,
        online_multiplayer -> Bool,
        description -> Nullable<Text>,
        cover_image -> Nullable<Varchar>,
        total_copies -> Integer,
        available_copies -> Integer,
        created_at -> Datetime,
        updated_at -> Datetime,
    }
}

table! {
    rentals (id) {
        id -> Unsigned<Bigint>,
        game_id -> Unsigned<Bigint>,
        user_name -> Varchar,
        user_email -> Varchar,
        rental_date -> Datetime,
        due_date -> Datetime,
        return_date -> Nullable<Datetime>,
        status -> Varchar,
        notes -> Nullable<Text>,
        created_at -> Datetime,
    }
}

table! {
    gaming_area_bookings (id) {
        id -> Unsigned<Bigint>,
        user_name -> Varchar,
        user_email -> Varchar,
        student_id -> Nullable<Varchar>,
        booking_date -> Date,
        start_time -> Time,
        end_time -> Time,
        game_id -> Unsigned<Bigint>,
        number_of_players -> Integer,
        special_requests -> Nullable<Text>,
        status -> Varchar,
        created_at -> Datetime,
        updated_at -> Datetime,
    }
}

joinable!(games -> platforms (platform_id));
joinable!(rentals -> games (game_id));
joinable!(gaming_area_bookings -> games (game_id));

allow_tables_to_appear_in_same_query!(platforms, games, rentals, gaming_area_bookings);
