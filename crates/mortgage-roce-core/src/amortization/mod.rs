pub mod interest;
pub mod payment;
pub mod schedule;
pub mod statistics;
