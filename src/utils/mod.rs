pub mod files;
pub mod time;

pub use files::{MAX_ARCHIVE_SIZE_BYTES, open_archive, validate_file_size};
pub use time::{create_time_to_datetime, format_create_time};
