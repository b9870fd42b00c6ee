pub mod number_format;
pub mod time_utils;

pub use number_format::format_quantity;
