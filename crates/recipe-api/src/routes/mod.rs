pub mod health;
pub mod kinds;
pub mod recipes;
