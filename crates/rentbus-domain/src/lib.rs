//! Domain layer: catalog query engine, lead pipelines, and repository traits

pub mod model;
pub mod repository;
pub mod service;
