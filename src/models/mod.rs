pub mod bookings;
pub mod games;
pub mod platforms;
pub mod rentals;
