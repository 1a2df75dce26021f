//! Entity definitions

pub mod company;
pub mod employee;
pub mod macros;
pub mod seed;

pub use company::Company;
pub use employee::Employee;
