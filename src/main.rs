use actix_web::{middleware::Logger as ActixLogger, web, App, HttpServer};
use log::{error, info};
use querykv::{
    configure,
    env::{bind_address, load_env_file},
    logger::setup_logger,
    KVStore,
};
use std::process::id as process_id;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    setup_logger();
    load_env_file();

    let target_server = bind_address();
    let store = web::Data::new(KVStore::new());

    let server = HttpServer::new(move || {
        App::new()
            .wrap(ActixLogger::default())
            .app_data(store.clone())
            .configure(configure)
    })
    .shutdown_timeout(1)
    .bind(&target_server)
    .map_err(|e| {
        error!("Could not bind {}: {}", target_server, e);
        e
    })?
    .run();

    info!(
        "Server starting on http://{} with PID: {}",
        target_server,
        process_id()
    );

    let execution = server.await;
    info!("Shutting down... PID: {}", process_id());

    if let Err(e) = execution {
        error!("Server stopped with error: {:?}", e);
        return Err(e);
    }
    Ok(())
}
