use clap::Parser;
use sheet_cli::{logging, run_simulator, Cli, Command};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level, cli.log_json)?;

    match cli.command {
        Command::Demo(args) => {
            println!("{}", args.execute()?);
            Ok(())
        }
        Command::Simulate(args) => {
            let report = run_simulator(args.to_config());

            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.generate_text());
            }

            std::process::exit(if report.passed() { 0 } else { 1 });
        }
    }
}
