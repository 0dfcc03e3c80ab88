//! Global constants for the gapline engine

pub mod buffer {
    /// Bytes added to the backing store whenever the gap runs out
    pub const GROW_AMOUNT: usize = 1024;

    /// Display name for buffers with no file behind them
    pub const NO_NAME: &str = "[No Name]";
}

pub mod history {
    /// Number of edit records kept before the oldest are evicted
    pub const DEFAULT_LIMIT: usize = 1000;

    pub const INSERT_LABEL: &str = "Insert";
    pub const DELETE_LABEL: &str = "Delete";
    pub const REPLACE_LABEL: &str = "Replace";
}

pub mod errors {
    // Error Codes
    pub const IO_ERROR: &str = "IO_ERROR";
    pub const FILE_NOT_FOUND: &str = "FILE_NOT_FOUND";
    pub const PERMISSION_DENIED: &str = "PERMISSION_DENIED";
    pub const SHORT_READ: &str = "SHORT_READ";
    pub const OUT_OF_RANGE: &str = "OUT_OF_RANGE";
    pub const INVALID_SPAN: &str = "INVALID_SPAN";
    pub const NO_PATH: &str = "NO_PATH";
    pub const SETTING_PARSE_ERROR: &str = "SETTING_PARSE_ERROR";
    pub const SETTING_VALIDATION_ERROR: &str = "SETTING_VALIDATION_ERROR";
    pub const UNKNOWN_OPTION: &str = "UNKNOWN_OPTION";
    pub const GENERIC_ERROR: &str = "GENERIC_ERROR";

    // Error Messages
    pub const MSG_NO_FILE_NAME: &str = "No file name";
}
