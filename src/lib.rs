pub mod config;
pub mod domain;
pub mod forms;
pub mod models;
pub mod permissions;
pub mod pricing;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;

pub const SERVICE_ACCESS_ROLE: &str = "admin";
pub const CUSTOMER_ROLE: &str = "customer";
