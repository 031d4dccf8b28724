/// Error code registry
///
/// Error codes are organized by category:
/// - 1000-1999: Configuration errors
/// - 2000-2999: Data integrity errors
/// - 3000-3999: Storage errors
/// - 9000-9999: Other errors
#[allow(dead_code)]
pub struct ErrorCode;

impl ErrorCode {
    // Configuration errors (1000-1999)
    pub const CONFIG_GENERIC: u16 = 1000;
    pub const CONFIG_NOT_FOUND: u16 = 1001;
    pub const CONFIG_PARSE_ERROR: u16 = 1002;
    pub const CONFIG_MISSING_REQUIRED: u16 = 1003;
    pub const CONFIG_INVALID_VALUE: u16 = 1004;

    // Data integrity errors (2000-2999)
    pub const DATA_GENERIC: u16 = 2000;
    pub const DATA_UNKNOWN_WEEKDAY: u16 = 2001;
    pub const DATA_MALFORMED_DATE: u16 = 2002;
    pub const DATA_INVALID_DATE: u16 = 2003;

    // Storage errors (3000-3999)
    pub const STORAGE_GENERIC: u16 = 3000;
    pub const STORAGE_IO_ERROR: u16 = 3001;
    pub const STORAGE_SERIALIZATION_ERROR: u16 = 3002;
    pub const STORAGE_REQUEST_FAILED: u16 = 3003;
    pub const STORAGE_REJECTED: u16 = 3004;
    pub const STORAGE_BATCH_TOO_LARGE: u16 = 3005;
    pub const STORAGE_NOT_FOUND: u16 = 3006;
    pub const STORAGE_CONFIGURATION: u16 = 3007;

    // Other errors (9000-9999)
    pub const OTHER_GENERIC: u16 = 9000;
}

/// Get a human-readable description for an error code
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        ErrorCode::CONFIG_GENERIC => "General configuration error",
        ErrorCode::CONFIG_NOT_FOUND => "Configuration file not found",
        ErrorCode::CONFIG_PARSE_ERROR => "Configuration file could not be parsed",
        ErrorCode::CONFIG_MISSING_REQUIRED => "Required configuration value missing",
        ErrorCode::CONFIG_INVALID_VALUE => "Configuration value out of range",

        ErrorCode::DATA_GENERIC => "General data integrity error",
        ErrorCode::DATA_UNKNOWN_WEEKDAY => "Unrecognized day of week in an order",
        ErrorCode::DATA_MALFORMED_DATE => "Order date is not in yyyy-mm-dd form",
        ErrorCode::DATA_INVALID_DATE => "Order date names a day that does not exist",

        ErrorCode::STORAGE_GENERIC => "General storage error",
        ErrorCode::STORAGE_IO_ERROR => "Storage I/O failure",
        ErrorCode::STORAGE_SERIALIZATION_ERROR => "Record could not be encoded or decoded",
        ErrorCode::STORAGE_REQUEST_FAILED => "Request to the table store failed",
        ErrorCode::STORAGE_REJECTED => "Table store rejected the request",
        ErrorCode::STORAGE_BATCH_TOO_LARGE => "Write batch exceeds the per-call limit",
        ErrorCode::STORAGE_NOT_FOUND => "Table or record not found",
        ErrorCode::STORAGE_CONFIGURATION => "Table store is misconfigured",

        ErrorCode::OTHER_GENERIC => "Unexpected error",
        _ => "Unknown error code",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_code_is_described() {
        for code in [
            ErrorCode::CONFIG_GENERIC,
            ErrorCode::CONFIG_NOT_FOUND,
            ErrorCode::CONFIG_PARSE_ERROR,
            ErrorCode::CONFIG_MISSING_REQUIRED,
            ErrorCode::CONFIG_INVALID_VALUE,
            ErrorCode::DATA_GENERIC,
            ErrorCode::DATA_UNKNOWN_WEEKDAY,
            ErrorCode::DATA_MALFORMED_DATE,
            ErrorCode::DATA_INVALID_DATE,
            ErrorCode::STORAGE_GENERIC,
            ErrorCode::STORAGE_IO_ERROR,
            ErrorCode::STORAGE_SERIALIZATION_ERROR,
            ErrorCode::STORAGE_REQUEST_FAILED,
            ErrorCode::STORAGE_REJECTED,
            ErrorCode::STORAGE_BATCH_TOO_LARGE,
            ErrorCode::STORAGE_NOT_FOUND,
            ErrorCode::STORAGE_CONFIGURATION,
            ErrorCode::OTHER_GENERIC,
        ] {
            assert_ne!(describe_error_code(code), "Unknown error code", "code {code}");
        }
        assert_eq!(describe_error_code(4242), "Unknown error code");
    }
}
