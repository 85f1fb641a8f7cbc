pub mod match_client;
pub mod match_filter;
pub mod render;
pub mod scorecard;
