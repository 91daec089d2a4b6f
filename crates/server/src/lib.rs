pub mod errors;
pub mod metrics;
pub mod openapi;
pub mod routes;
pub mod rpc;
pub mod startup;

pub use startup::run;
