pub mod app;
pub mod catalog;
pub mod config;
pub mod invoker;
pub mod orchestration;
pub mod provider;
pub mod schema;
pub mod shared;
