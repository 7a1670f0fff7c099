use clap::Parser;

mod cli;
mod logging;
mod ui;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let app = cli::App::parse();
    logging::init(app.verbose);
    cli::run(app).await
}
