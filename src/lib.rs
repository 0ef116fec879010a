pub mod model;
pub mod observability;
pub mod routes;
pub mod services;
pub mod startup;
