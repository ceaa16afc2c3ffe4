//! Standard exit codes (BSD sysexits.h compatible)

/// Command line usage error
pub const USAGE: i32 = 64;

/// Data format error
pub const DATAERR: i32 = 65;

/// Cannot open input (unknown vampire)
pub const NOINPUT: i32 = 66;

/// Configuration error
pub const CONFIG: i32 = 78;
