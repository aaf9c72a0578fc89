use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = exgrip_api::Args::parse();
	exgrip_api::run(args).await
}
