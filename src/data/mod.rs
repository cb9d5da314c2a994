pub mod engine_config;
