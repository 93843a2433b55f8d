use rocket::{routes, Route};

pub mod create_agent;
pub mod delete_agent;
pub mod fetch_agents;
pub mod update_agent;

pub fn routes() -> Vec<Route> {
    routes![
        create_agent::create_agent,
        fetch_agents::fetch_agents,
        update_agent::update_agent,
        delete_agent::delete_agent,
    ]
}
