pub use self::error::{Error, Result};

mod error;
pub mod case;
pub mod config;
pub mod context;
pub mod plan;
pub mod render;
