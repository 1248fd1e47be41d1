pub mod context;
pub mod errors;
pub mod openapi;
pub mod outcome;
pub mod routes;
pub mod startup;
pub mod state;
