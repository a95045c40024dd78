pub mod app;
pub(crate) mod deserializers;
pub mod routes;
