pub mod common;
pub mod entity;
pub mod league;
pub mod match_system;
pub mod matches;
pub mod team;
