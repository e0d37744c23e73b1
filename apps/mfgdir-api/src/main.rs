use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = mfgdir_api::Args::parse();

	mfgdir_api::run(args).await
}
