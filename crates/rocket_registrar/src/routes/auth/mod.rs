use rocket::{routes, Route};

pub mod agent_login;
pub mod login;
pub mod send_code;
pub mod verify_code;

pub fn routes() -> Vec<Route> {
    routes![
        send_code::send_code,
        verify_code::verify_code,
        login::login,
        agent_login::agent_login,
    ]
}
