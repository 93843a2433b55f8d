use rocket::{routes, Route};

pub mod create_user;
pub mod delete_user;
pub mod fetch_users;

pub fn routes() -> Vec<Route> {
    routes![
        create_user::create_user,
        fetch_users::fetch_users,
        delete_user::delete_user,
    ]
}
