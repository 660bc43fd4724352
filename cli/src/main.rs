mod commands;
mod report;
mod terminal;

use commands::{CommandLine, Commands, scan, services};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose);
    print::banner(commands.quiet);

    let q_level: u8 = commands.quiet;
    match commands.command {
        Commands::Scan(args) => {
            print::header("starting scanner", q_level);
            scan::scan(args, q_level).await?;
        }
        Commands::Services => services::services(q_level)?,
    }

    if q_level == 0 {
        print::end_of_program();
    }
    Ok(())
}
