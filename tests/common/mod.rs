#![allow(dead_code)]

pub mod admin_helpers;
pub mod fixtures;
pub mod utils;
