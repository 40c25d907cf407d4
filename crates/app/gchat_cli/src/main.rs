// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use clap::Parser;
use cli::{Cli, Commands};
use gchat_core::submit::SubmitOutcome;
use session::Session;

mod cli;
mod logging;
mod render;
mod session;

fn main() -> Result<()> {
    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<()> {
    logging::init()?;

    let args = Cli::parse();

    match args.command {
        Commands::Chat { session } => {
            block_on(async {
                let session = Session::start(&session)?;
                let result = session.chat(std::io::stdout()).await;
                session.shutdown().await;
                result
            })?;
        }
        Commands::Ask { prompt, session } => {
            let outcome = block_on(async {
                let session = Session::start(&session)?;
                let result = session.ask(&prompt, std::io::stdout()).await;
                session.shutdown().await;
                result
            })?;
            if outcome == SubmitOutcome::Failed {
                return Err(Error::Custom("relay request failed".into()));
            }
        }
        Commands::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn block_on<T>(future: impl Future<Output = Result<T>>) -> Result<T> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(future)
}
