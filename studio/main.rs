/// Petal Counter Studio
///
/// A local browser page for uploading a flower photo and reading back the
/// petal estimate.  Served by a synchronous tiny_http server; the page needs
/// no JavaScript framework.
///
/// Run with:
///   cargo run --bin studio [-- path/to/config.json]
/// Then open http://127.0.0.1:7878

mod handlers;
mod render;
mod routes;
mod state;
mod util;

use std::sync::{Arc, Mutex};
use tiny_http::Server;

use petal_counter::PetalConfig;
use state::StudioState;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => match PetalConfig::load_json(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::error!("could not load config '{}': {}", path, e);
                std::process::exit(1);
            }
        },
        None => PetalConfig::default(),
    };

    let server = match Server::http(config.bind_addr.as_str()) {
        Ok(server) => server,
        Err(e) => {
            log::error!("failed to bind {}: {}", config.bind_addr, e);
            std::process::exit(1);
        }
    };

    log::info!("Petal Counter Studio listening on http://{}", config.bind_addr);

    let shared_state = Arc::new(Mutex::new(StudioState::new(config)));

    // One thread per request: the SSE handler blocks until the analysis
    // finishes and must not stall page loads.
    for request in server.incoming_requests() {
        let state_clone = shared_state.clone();
        std::thread::spawn(move || {
            routes::dispatch(request, state_clone);
        });
    }
}
