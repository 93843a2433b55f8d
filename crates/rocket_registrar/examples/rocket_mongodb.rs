//! Run example with `cargo run --example rocket_mongodb --features example`

#[macro_use]
extern crate rocket;

#[cfg(feature = "example")]
#[launch]
async fn rocket() -> _ {
    use mongodb::{options::ClientOptions, Client};
    use registrar::database::MongoDb;
    use registrar::Migration;

    let client_options = ClientOptions::parse("mongodb://localhost:27017")
        .await
        .expect("Valid connection URL");

    let client = Client::with_options(client_options).expect("MongoDB server");
    let database = registrar::Database::MongoDb(MongoDb(client.database("registrar")));

    for migration in [Migration::WipeAll, Migration::M2025_11_14EnsureUpToSpec] {
        database.run_migration(migration).await.unwrap();
    }

    let registrar = registrar::Registrar {
        database,
        ..Default::default()
    };

    registrar.ensure_reserved_admin().await.unwrap();

    rocket::build()
        .manage(registrar)
        .mount("/", rocket_registrar::routes::users::routes())
        .mount("/", rocket_registrar::routes::agents::routes())
        .mount("/", rocket_registrar::routes::auth::routes())
}

#[cfg(not(feature = "example"))]
fn main() {
    panic!("Enable `example` feature to run this example!");
}
