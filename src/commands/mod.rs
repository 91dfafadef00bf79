pub mod check;
pub mod doctor;
pub mod generate;
