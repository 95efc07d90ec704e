pub mod account;
pub mod company;
pub mod employee;

pub use account::{Account, AccountDirectory};
pub use company::{Company, CompanyCreate, CompanyPatch};
pub use employee::{Employee, EmployeeCreate, EmployeePatch};
