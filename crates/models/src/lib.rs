pub mod errors;
pub mod provider;
pub mod reservation;
pub mod view_model;
