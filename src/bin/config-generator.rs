use omlt_ci::cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    omlt_ci::init();

    match cli::run_config_generator() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
