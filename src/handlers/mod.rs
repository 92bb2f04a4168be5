pub mod agencies;
pub mod auth;
pub mod contracts;
pub mod landlords;
pub mod maintenance;
pub mod properties;
pub mod root;
pub mod tenants;
pub mod users;
