//! # reqlog_server - Entry Point
//! src/main.rs
//!
//! Sin argumentos escucha en el puerto 8000 y sirve el directorio actual.
//! Se detiene con ^C.

use clap::Parser;
use reqlog_server::config::Config;
use reqlog_server::logging;
use reqlog_server::server::Server;
use reqlog_server::{ServerError, ServerResult};

fn main() {
    let config = Config::parse();
    logging::init(&config.log_level);

    if let Err(e) = run(config) {
        eprintln!("💥 Error fatal: {}", e);
        std::process::exit(1);
    }
}

fn run(config: Config) -> ServerResult<()> {
    config.validate().map_err(ServerError::Config)?;
    config.print_summary();

    let server = Server::new(&config)?;

    let handle = server.shutdown_handle();
    ctrlc::set_handler(move || {
        if handle.is_shutdown() {
            // Segundo ^C: no esperar más al servidor
            println!("Caught ^C shutting down");
            std::process::exit(130);
        }
        handle.shutdown();
    })?;

    println!("serving at port {}", server.local_addr().port());

    // Bloquea hasta ^C; la conexión en curso se corta y el listener se
    // cierra al retornar
    server.run()?;

    println!("Caught ^C shutting down");
    Ok(())
}
