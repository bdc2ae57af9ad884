use pulltime::cli::{Cli, Runner};
use pulltime::logging::Logger;
use pulltime::runtime::ContainerRuntime;

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();
    let logger = Logger::from_flags(cli.verbose, cli.quiet);
    let runtime = ContainerRuntime::from_config(&cli.runtime_config());

    let mut runner = Runner::new(runtime, logger);
    if let Err(e) = runner.run(cli.command).await {
        println!("Error: {}", e);
        std::process::exit(1);
    }
}
