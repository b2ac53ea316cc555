use std::process::ExitCode;

fn main() -> ExitCode {
    pipeboard_cli::run()
}
