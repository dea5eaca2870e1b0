use std::process::ExitCode;

fn main() -> ExitCode {
    let Err(error) = windiafaqd::run_daemon();
    eprintln!("windiafaqd: {error}");
    ExitCode::FAILURE
}
