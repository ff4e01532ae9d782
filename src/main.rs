use std::process::ExitCode;

mod app;
mod logging;

fn main() -> ExitCode {
    let args = wallymover::cli::parse();
    app::run(args)
}
