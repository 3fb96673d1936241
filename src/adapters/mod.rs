//! HTTP boundary adapters

pub mod api_handler;
