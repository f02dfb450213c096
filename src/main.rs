use cf_carrier_ips::{logging, run, Config};
use colored::Colorize;

#[tokio::main]
async fn main() {
    // Do as little as possible in main.rs as it can't contain any tests
    if let Err(e) = logging::init() {
        eprintln!("{} {e}", "WARN".yellow());
    }
    log::info!("#Start main()");

    let result = match Config::from_env() {
        Ok(config) => run(&config).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        log::error!("{e}");
        eprintln!("{} {e}", "ERROR".on_red());
        std::process::exit(1);
    }
    log::info!("#End main()");
}
