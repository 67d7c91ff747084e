use clap::Parser;
use tjudge_cli::cmd::{self, GlobalArgs};
use tjudge_cli::util;

#[tokio::main]
async fn main() {
    let app = GlobalArgs::parse();
    util::init_logger(app.verbose);
    let code = app.exec().await.unwrap_or_else(|e| {
        eprintln!("Error: {:?}", e);
        cmd::EXIT_ERROR
    });
    std::process::exit(code);
}
