use anyhow::Context;
use lineshell::config::Config;
use lineshell::{ShellError, ShellStatus, input, logging};
use std::process;

fn main() -> anyhow::Result<()> {
    let config = Config::load();
    logging::init(&config.log).context("setting up logging")?;

    loop {
        let status = input::read_line(&config.prompt).and_then(|line| lineshell::run_line(&line));

        match status {
            Ok(ShellStatus::Continue) => continue,
            Ok(ShellStatus::Exit(code)) => {
                log::info!("exit {}", code);
                process::exit(code);
            }
            Err(e) => report(e),
        }
    }
}

fn report(error: ShellError) {
    eprintln!("{}", error);
    if error.is_fatal() {
        log::error!("{}", error);
        process::exit(1);
    }
    log::warn!("{}", error);
}
