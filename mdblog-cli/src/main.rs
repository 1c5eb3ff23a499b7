mod cmd;
mod config;

use tracing::Level;

fn main() {
    let matches = cmd::build::make_command().get_matches();

    let level = if matches.get_flag("verbose") {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .init();

    if let Err(err) = cmd::build::execute(&matches) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
