mod app;
mod cli;
mod input;

use std::env;
use std::process;

// Usage: regex-highlight [options] -E <pattern> [path...]
fn main() {
    env_logger::init();

    let cfg = match cli::parse_args(env::args().collect()) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("{}", cli::USAGE);
            process::exit(2);
        }
    };

    match app::run(cfg) {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("error: {err:#}");
            process::exit(2);
        }
    }
}
