#[cfg(feature = "rocket_impl")]
pub mod rocket;
