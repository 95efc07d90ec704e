// Handlers hold the business logic behind the guard chain. The guards
// themselves live in `middleware`; by the time a handler runs, the request
// is authenticated and, for mutating routes, role-checked.
pub mod auth;
pub mod companies;
pub mod employees;
