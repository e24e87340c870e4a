use std::process::ExitCode;

fn main() -> ExitCode {
    match lanelet2xodr::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
