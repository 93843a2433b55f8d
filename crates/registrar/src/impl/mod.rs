mod agent;
mod one_time_code;
mod session;
mod user;
mod verification;
