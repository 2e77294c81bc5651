/// In-process app with the full route table and trace ids.
macro_rules! init_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state))
                .wrap(spyroom::middleware::RequestTrace)
                .configure(spyroom::routes::configure),
        )
        .await
    };
}

mod errors;
