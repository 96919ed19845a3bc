use std::process::ExitCode;

fn main() -> ExitCode {
    match modport_lib::main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
