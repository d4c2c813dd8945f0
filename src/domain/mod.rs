// Domain layer - Station models and the spatial estimation kernel
pub mod alert;
pub mod analytics;
pub mod estimation;
pub mod station;
pub mod survey;
