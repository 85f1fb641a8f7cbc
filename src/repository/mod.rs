pub mod match_repository;
