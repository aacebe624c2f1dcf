use std::io::{self, BufRead};
use std::process::ExitCode;
use std::thread;

use laundry_pos::{Catalog, Config, Session, TransactionLog};
use tokio_stream::wrappers::ReceiverStream;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = Config::from_env();
    if !config.log_path_is_csv() {
        warn!(path = %config.log_path.display(), "log file seems to not be a csv file");
    }

    let catalog = Catalog::laundry();
    let ledger = TransactionLog::new(&config.log_path);
    let (line_sender, line_receiver) = tokio::sync::mpsc::channel(16);

    // stdin reads block, keep them off the runtime
    thread::spawn(move || {
        let mut stdin = io::stdin().lock();
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match stdin.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    // invalid UTF-8 becomes a rejected choice, not end of input
                    let line = String::from_utf8_lossy(&buf)
                        .trim_end_matches(['\r', '\n'])
                        .to_string();
                    if line_sender.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    warn!("failed to read input: {e}");
                    break;
                }
            }
        }
    });

    let mut session = Session::new(&catalog, &ledger, io::stdout());
    match session.run(ReceiverStream::new(line_receiver)).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
