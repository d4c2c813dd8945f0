// Infrastructure layer - External dependencies and adapters
pub mod api_model;
pub mod config;
pub mod json_stream;
pub mod rest_repository;
