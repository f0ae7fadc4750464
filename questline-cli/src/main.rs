//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    env_logger::init();
    if let Err(err) = questline_cli::run() {
        eprintln!("questline: {err}");
        std::process::exit(1);
    }
}
