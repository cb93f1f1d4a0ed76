use clap::Parser;
use kaibanjs_docs_mcp::cli::{Cli, Commands};
use kaibanjs_docs_mcp::config::Config;
use kaibanjs_docs_mcp::{client_log, prepare, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env();
    cli.apply(&mut config);

    let result = match cli.command() {
        Commands::Prepare => {
            kaibanjs_docs_mcp::tracing::init(&config, None);
            prepare::prepare(&config.source_dir, &config.docs_dir)
                .await
                .map(|_| ())
        }
        Commands::Serve { .. } => {
            let (client_layer, client_rx) = client_log::channel(config.debug);
            kaibanjs_docs_mcp::tracing::init(&config, Some(client_layer));
            server::run(&config, Some(client_rx)).await
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %format!("{:#}", e), "Fatal error running server");
    }

    result
}
