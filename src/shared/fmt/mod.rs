//! Display formatting.

pub mod num;

pub use num::{
    format_change_arrow, format_currency, format_number, format_percentage,
    format_signed_percentage, format_usd,
};
