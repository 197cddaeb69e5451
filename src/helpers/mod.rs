//! Display helpers for the command-line output
//!
//! Badge lookups and date formatting shared by the list and show commands.

mod badge;
mod date;

pub use badge::*;
pub use date::*;
