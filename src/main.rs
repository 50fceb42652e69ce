use clap::Parser;
use trade_journal::cli::{Cli, Commands, Context};
use trade_journal::config::Config;
use trade_journal::labels::Labels;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        Config::default()
    });

    // Initialize telemetry
    trade_journal::telemetry::init_telemetry(&config.telemetry)?;

    let ctx = Context::new(config);

    match cli.command {
        Commands::Preview(args) => args.execute(&ctx)?,
        Commands::Log(args) => args.execute(&ctx)?,
        Commands::Update(args) => args.execute(&ctx)?,
        Commands::Close(args) => args.execute(&ctx)?,
        Commands::List(args) => args.execute(&ctx)?,
        Commands::Session(args) => args.execute(&ctx)?,
        Commands::Labels => {
            let labels = Labels::load(&ctx.config.labels.path)?;
            for (category, options) in labels.categories() {
                println!("{}:", category);
                for option in options {
                    println!("  - {}", option);
                }
            }
        }
        Commands::Config => {
            println!("Current configuration ({}):", cli.config);
            print!("{}", toml::to_string_pretty(&ctx.config)?);
        }
    }

    Ok(())
}
