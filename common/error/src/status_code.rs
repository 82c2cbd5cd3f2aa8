//! Unified status codes for error classification.
//!
//! Status code format: XX_YYY (5-digit)
//! - XX = Category (00-99)
//! - YYY = Code within category (000-999)
//!
//! Category layout:
//! - General/Core (01-09): Common, Input, IO, Network, Auth
//! - Business (10-19): Config, Concurrency, Policy

use strum::AsRefStr;
use strum::EnumIter;
use strum::FromRepr;

/// Status code metadata.
#[derive(Debug, Clone, Copy)]
pub struct StatusMeta {
    pub retryable: bool,
    pub log_error: bool,
    pub category: StatusCategory,
}

/// Status code category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCategory {
    /// Success (00_xxx)
    Success,
    /// Common/internal errors (01_xxx)
    Common,
    /// Parameter/validation errors (02_xxx)
    Input,
    /// IO/storage errors (03_xxx)
    IO,
    /// Network/transport errors (04_xxx)
    Network,
    /// Auth/permission errors (05_xxx)
    Auth,
    /// Configuration errors (10_xxx)
    Config,
    /// Concurrency/lifecycle errors (11_xxx)
    Concurrency,
    /// Policy/approval errors (12_xxx)
    Policy,
}

macro_rules! define_status_codes {
    ($(
        $(#[$attr:meta])*
        $name:ident = $value:expr => {
            retryable: $retry:expr,
            log_error: $log:expr,
            category: $cat:ident $(,)?
        }
    ),* $(,)?) => {
        /// Status codes for error classification.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumIter, FromRepr)]
        #[repr(i32)]
        pub enum StatusCode {
            $($(#[$attr])* $name = $value,)*
        }

        impl StatusCode {
            /// Returns the metadata for this status code.
            pub const fn meta(&self) -> StatusMeta {
                match self {
                    $(Self::$name => StatusMeta {
                        retryable: $retry,
                        log_error: $log,
                        category: StatusCategory::$cat,
                    },)*
                }
            }

            /// Returns the string name of this status code.
            pub const fn name(&self) -> &'static str {
                match self {
                    $(Self::$name => stringify!($name),)*
                }
            }
        }
    };
}

define_status_codes! {
    // ====== Success (00_xxx) ======
    Success = 00_000 => { retryable: false, log_error: false, category: Success },

    // ====== Common errors (01_xxx) ======
    Unknown = 01_000 => { retryable: false, log_error: true, category: Common },
    Internal = 01_001 => { retryable: false, log_error: true, category: Common },
    Unsupported = 01_002 => { retryable: false, log_error: false, category: Common },
    Cancelled = 01_003 => { retryable: false, log_error: false, category: Common },
    External = 01_004 => { retryable: false, log_error: true, category: Common },

    // ====== Input/Validation errors (02_xxx) ======
    InvalidArguments = 02_000 => { retryable: false, log_error: false, category: Input },
    ParseError = 02_001 => { retryable: false, log_error: false, category: Input },

    // ====== IO/Storage errors (03_xxx) ======
    IoError = 03_000 => { retryable: false, log_error: false, category: IO },

    // ====== Network/Transport errors (04_xxx) ======
    NetworkError = 04_000 => { retryable: true, log_error: false, category: Network },
    StreamError = 04_001 => { retryable: true, log_error: true, category: Network },

    // ====== Auth errors (05_xxx) ======
    PermissionDenied = 05_000 => { retryable: false, log_error: false, category: Auth },

    // ====== Config errors (10_xxx) ======
    InvalidConfig = 10_000 => { retryable: false, log_error: false, category: Config },

    // ====== Concurrency/lifecycle errors (11_xxx) ======
    Timeout = 11_000 => { retryable: true, log_error: false, category: Concurrency },
    MaxIterations = 11_001 => { retryable: false, log_error: false, category: Concurrency },
    QueueFull = 11_002 => { retryable: true, log_error: false, category: Concurrency },

    // ====== Policy/approval errors (12_xxx) ======
    PolicyBlocked = 12_000 => { retryable: false, log_error: false, category: Policy },
    ApprovalRejected = 12_001 => { retryable: false, log_error: false, category: Policy },
    ApprovalTimeout = 12_002 => { retryable: false, log_error: false, category: Policy },
}

impl StatusCode {
    /// Returns true if the error is retryable.
    pub const fn is_retryable(&self) -> bool {
        self.meta().retryable
    }

    /// Returns true if the error should be logged.
    pub const fn should_log_error(&self) -> bool {
        self.meta().log_error
    }

    /// Returns the category of this status code.
    pub const fn category(&self) -> StatusCategory {
        self.meta().category
    }

    /// Convert from i32.
    pub fn from_i32(value: i32) -> Option<Self> {
        Self::from_repr(value)
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_codes_are_marked() {
        assert!(StatusCode::Timeout.is_retryable());
        assert!(!StatusCode::InvalidArguments.is_retryable());
    }

    #[test]
    fn from_i32_roundtrips() {
        assert_eq!(StatusCode::from_i32(11_001), Some(StatusCode::MaxIterations));
        assert_eq!(StatusCode::from_i32(99_999), None);
    }

    #[test]
    fn display_uses_debug_name() {
        assert_eq!(StatusCode::PolicyBlocked.to_string(), "PolicyBlocked");
    }
}
