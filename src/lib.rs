// src/lib.rs

//! OpenEdu Course Crawler Library

pub mod error;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
