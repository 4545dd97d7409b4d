use clap::Parser;
use dotenvy::dotenv;
use entigen::{Cli, Commands, handle_error, run_dump_schema_command, run_generate_entities_command};

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();
    let verbose = cli.verbose;

    match cli.command {
        Commands::GenerateEntities(command) => {
            run_generate_entities_command(command, verbose)
                .await
                .map(|_| ())
                .unwrap_or_else(handle_error);
        }
        Commands::DumpSchema(command) => {
            run_dump_schema_command(command, verbose)
                .await
                .unwrap_or_else(handle_error);
        }
    }
}
