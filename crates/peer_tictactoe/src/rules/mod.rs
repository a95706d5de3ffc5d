//! Game rules, one file per rule.

mod draw;
mod win;

pub use draw::is_draw;
pub use win::{WinnerResult, calc_winner};
