use anyhow::Result;
use clap::Parser;
use uigen_vfs::config::CliArgs;
use uigen_vfs::server::VfsServer;
use uigen_vfs::transport::NdjsonTransport;

fn main() -> Result<()> {
    let args = CliArgs::parse();

    // Logs go to stderr; stdout carries protocol frames only
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level)),
        )
        .init();

    let mut server = VfsServer::new(NdjsonTransport::stdout(), args.turn_config());

    tracing::info!(
        max_steps = args.max_steps,
        max_history = args.max_history,
        "uigen-vfs ready"
    );

    server.run()?;
    Ok(())
}
