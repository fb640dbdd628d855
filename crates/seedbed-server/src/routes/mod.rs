//! Route handlers

pub mod welcome_guide;
