pub mod memo;
pub mod web_link;
