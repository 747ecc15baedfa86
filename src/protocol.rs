use serde::Serialize;
use std::fmt;

pub const CODE_INVALID_FORMAT: &str = "INVALID_FORMAT";
pub const CODE_WINDOW_NOT_OPEN: &str = "WINDOW_NOT_OPEN";
pub const CODE_PAST_DATE: &str = "PAST_DATE";
pub const CODE_INVALID_GAME: &str = "INVALID_GAME";
pub const CODE_INVALID_PLATFORM: &str = "INVALID_PLATFORM";
pub const CODE_CAPACITY_EXCEEDED: &str = "CAPACITY_EXCEEDED";
pub const CODE_QUOTA_EXCEEDED: &str = "QUOTA_EXCEEDED";
pub const CODE_ALREADY_CANCELLED: &str = "ALREADY_CANCELLED";
pub const CODE_ALREADY_RETURNED: &str = "ALREADY_RETURNED";
pub const CODE_NO_COPIES: &str = "NO_COPIES";

/// Request-level validation failure with a stable reason code.
/// Infrastructure errors stay plain `anyhow` errors and surface with an
/// empty code.
#[derive(Debug)]
pub struct Rejection {
    pub code: &'static str,
    pub message: String,
}

impl Rejection {
    pub fn new<S: Into<String>>(code: &'static str, message: S) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Rejection {}

#[macro_export]
macro_rules! reject {
    ( $code:expr, $( $arg:tt )* ) => {
        return Err($crate::protocol::Rejection::new($code, format!( $( $arg )* )).into())
    };
}

#[derive(Default, Serialize)]
pub struct SimpleResponse {
    pub success: bool,
    pub code: String,
    pub err: String,
}

impl SimpleResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Default::default()
        }
    }
}

#[macro_export]
macro_rules! impl_err_response {
    ( $( $type:ty),+ $(,)? ) => {
        $(
            impl $type {
                pub fn err<S: ToString>(err: S) -> Self {
                    Self {
                        success: false,
                        err: err.to_string(),
                        ..Default::default()
                    }
                }

                pub fn reject(rejection: &$crate::protocol::Rejection) -> Self {
                    Self {
                        success: false,
                        code: rejection.code.to_string(),
                        err: rejection.message.clone(),
                        ..Default::default()
                    }
                }
            }
        )+
    };
}

impl_err_response! {
    SimpleResponse,
}
