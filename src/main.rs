use clap::Parser;
use larder::cli::{self, output, CheckCommand, Cli, Commands, ProductsCommand};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let args = Cli::parse();
    output::configure(output::OutputConfig::new(args.json, args.quiet));

    let result = match &args.command {
        Commands::Serve(serve_args) => cli::serve::execute(serve_args).await,
        Commands::Console(console_args) => cli::console::execute(console_args).await,
        Commands::Products(command) => match command {
            ProductsCommand::List(list_args) => cli::products::list(list_args).await,
            ProductsCommand::Add(add_args) => cli::products::add(add_args).await,
        },
        Commands::Check(command) => match command {
            CheckCommand::Config(path_arg) => {
                cli::check::config(&path_arg.config);
                Ok(())
            }
            CheckCommand::Connection(path_arg) => cli::check::connection(&path_arg.config).await,
        },
    };

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
