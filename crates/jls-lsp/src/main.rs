//! Binary entry point: starts the analysis core as an LSP server over
//! stdio. All the actual protocol handling lives in `jls_lsp::run`.

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(err) = jls_lsp::run() {
        tracing::error!(%err, "jls-lsp exited with an error");
        eprintln!("{err:#}");
        std::process::exit(1);
    }
    Ok(())
}
