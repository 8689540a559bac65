use std::sync::Arc;

use config::BOT_CONF;
use config::Cli;
use config::Credentials;
use config::Mode;
use config::Parser;
use herald::Gateway;
use herald::Handler;
use herald::commands;
use herald::console;
use herald::logo;
use herald::schema;
use tokio::io::BufReader;
use tracing::info;
use tracing::warn;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
	let args = Cli::parse();
	config::setup(&args)?;

	let registry = Arc::new(commands::registry());

	match args.mode() {
		Mode::Schema { output } => {
			schema::export(&registry, output.as_deref()).await?;
		}
		Mode::Serve => {
			logo::show_logo(&registry.names());

			match Credentials::from_env() {
				Ok(credentials) => {
					info!(application_id = %credentials.application_id, "Credentials loaded")
				}
				Err(e) => warn!(error = %e, "Serving without platform credentials"),
			}

			let addr = {
				let conf = BOT_CONF.load();
				format!("{}:{}", conf.host, conf.port)
			};
			let gateway = Gateway::bind(&addr, Arc::new(Handler::new(registry.clone()))).await?;
			let stdin = BufReader::new(tokio::io::stdin());

			tokio::select! {
				res = gateway.run() => res?,
				res = console::run(stdin, &registry) => res?,
			}
			info!("Herald stopped");
		}
	}
	Ok(())
}
