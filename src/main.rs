use std::process::ExitCode;

fn main() -> ExitCode {
    rinhajs::projects::cli::start_cli()
}
