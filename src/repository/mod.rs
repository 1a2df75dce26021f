//! Repositories and the unit of work they share

pub mod base;
pub mod company;
pub mod context;
pub mod employee;
pub mod manager;

pub use base::RepositoryBase;
pub use company::CompanyRepository;
pub use context::{EntitySet, RepositoryContext};
pub use employee::EmployeeRepository;
pub use manager::RepositoryManager;
