pub mod clock;
pub mod config;
pub mod eligibility;
pub mod entity;
pub mod error;
pub mod interest;
pub mod repository;
pub mod seed;
pub mod service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use entity::*;
pub use error::*;
pub use service::DeskService;
