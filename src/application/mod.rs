// Application layer - Use cases over the station repository
pub mod analytics_service;
pub mod station_repository;
pub mod station_service;
pub mod streaming_service;
pub mod survey_service;
