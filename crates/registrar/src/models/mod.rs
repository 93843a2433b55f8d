mod account;
mod one_time_code;
mod session;
mod verification;

pub use account::*;
pub use one_time_code::*;
pub use session::*;
pub use verification::*;
