use bracket_router::{cli, logging};
use std::process::ExitCode;

fn main() -> ExitCode {
    let _guard = match logging::init_logging_with_config(&logging::LogConfig::from_env()) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("warning: logging disabled: {err:#}");
            None
        }
    };

    match cli::run_cli() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}
