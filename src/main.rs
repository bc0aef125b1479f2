use clap::Parser;
use vfs_shell::cli::{run, Cli};
use vfs_shell::logging::init_tracing;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();
    let config = Cli::parse().into_config();
    let input = tokio::io::BufReader::new(tokio::io::stdin());
    let code = run(config, input, &mut std::io::stdout(), &mut std::io::stderr()).await;
    std::process::exit(code);
}
