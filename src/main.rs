use std::process::ExitCode;

fn main() -> ExitCode {
    sitellms::cli::run()
}
