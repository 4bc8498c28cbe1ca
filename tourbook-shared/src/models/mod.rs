pub mod availability;
pub mod tour;
