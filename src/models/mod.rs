mod client;
mod phone;
mod search_row;

pub use client::Client;
pub use phone::Phone;
pub use search_row::SearchRow;
