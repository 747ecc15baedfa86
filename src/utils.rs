use crate::protocol::{Rejection, CODE_INVALID_FORMAT};
use actix_web::error::BlockingError;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

#[macro_export]
macro_rules! post_funcs {
    ( $( ( $func_name:ident, $url:expr, $request:ty, $response:ty ) ),+ $(,)? ) => {
        $(
            paste::paste! {
                #[post($url)]
                async fn $func_name(
                    pool: web::Data<DbPool>,
                    info: web::Json<$request>
                ) -> impl Responder {
                    let response = match [<$func_name _impl>](pool, info).await {
                        Ok(response) => response,
                        Err(err) => match err.downcast::<$crate::protocol::Rejection>() {
                            Ok(rejection) => <$response>::reject(&rejection),
                            Err(err) => <$response>::err(err.to_string()),
                        },
                    };
                    HttpResponse::Ok().json(response)
                }
            }
        )+
    };
}

#[macro_export]
macro_rules! post_policy_funcs {
    ( $( ( $func_name:ident, $url:expr, $request:ty, $response:ty ) ),+ $(,)? ) => {
        $(
            paste::paste! {
                #[post($url)]
                async fn $func_name(
                    pool: web::Data<DbPool>,
                    config: web::Data<AppConfig>,
                    info: web::Json<$request>
                ) -> impl Responder {
                    let response = match [<$func_name _impl>](pool, config, info).await {
                        Ok(response) => response,
                        Err(err) => match err.downcast::<$crate::protocol::Rejection>() {
                            Ok(rejection) => <$response>::reject(&rejection),
                            Err(err) => <$response>::err(err.to_string()),
                        },
                    };
                    HttpResponse::Ok().json(response)
                }
            }
        )+
    };
}

/// Unwraps `web::block` so a `Rejection` raised inside a transaction keeps
/// its reason code instead of being flattened into a string.
pub fn flatten_err(err: BlockingError<anyhow::Error>) -> anyhow::Error {
    match err {
        BlockingError::Error(err) => err,
        BlockingError::Canceled => anyhow::anyhow!("blocking thread pool is gone"),
    }
}

pub fn parse_date_str<S: AsRef<str>>(s: S) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(s.as_ref(), "%Y-%m-%d")
        .map_err(|_| Rejection::new(CODE_INVALID_FORMAT, "Invalid date or time format").into())
}

pub fn parse_clock_str<S: AsRef<str>>(s: S) -> anyhow::Result<NaiveTime> {
    NaiveTime::parse_from_str(s.as_ref(), "%H:%M")
        .map_err(|_| Rejection::new(CODE_INVALID_FORMAT, "Invalid date or time format").into())
}

pub fn format_date_str(date: &NaiveDate) -> String {
    format!("{}", date.format("%Y-%m-%d"))
}

pub fn format_clock_str(time: &NaiveTime) -> String {
    format!("{}", time.format("%H:%M"))
}

pub fn format_time_str(time: &NaiveDateTime) -> String {
    const TIME_FMT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    format!("{}+00:00", time.format(TIME_FMT))
}

pub fn get_str_pattern<S: AsRef<str>>(s: S) -> String {
    format!("%{}%", s.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Rejection;

    #[test]
    fn parses_dates_and_clock_times() {
        assert_eq!(
            parse_date_str("2024-06-10").unwrap(),
            NaiveDate::from_ymd(2024, 6, 10)
        );
        assert_eq!(
            parse_clock_str("09:30").unwrap(),
            NaiveTime::from_hms(9, 30, 0)
        );
    }

    #[test]
    fn bad_input_is_rejected_with_invalid_format() {
        for input in &["2024/06/10", "tomorrow", ""] {
            let err = parse_date_str(input).unwrap_err();
            let rejection = err.downcast_ref::<Rejection>().unwrap();
            assert_eq!(rejection.code, CODE_INVALID_FORMAT);
        }
        let err = parse_clock_str("9am").unwrap_err();
        let rejection = err.downcast_ref::<Rejection>().unwrap();
        assert_eq!(rejection.code, CODE_INVALID_FORMAT);
    }

    #[test]
    fn clock_times_format_without_seconds() {
        let time = NaiveTime::from_hms(8, 0, 0);
        assert_eq!(format_clock_str(&time), "08:00");
    }
}
