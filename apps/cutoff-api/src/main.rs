use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = cutoff_api::Args::parse();

	cutoff_api::run(args).await
}
