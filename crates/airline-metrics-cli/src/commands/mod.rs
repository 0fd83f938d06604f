pub mod airline;
pub mod company;
pub mod config;
pub mod financial;
