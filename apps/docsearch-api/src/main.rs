use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = docsearch_api::Args::parse();

	docsearch_api::run(args).await
}
