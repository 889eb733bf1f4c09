use clap::Parser;

fn main() {
    let cli = alarmctl::Cli::parse();
    cli_common::init_logging(&cli.log_args);

    match cli_common::run_cli_main(cli, |cli| cli.run()) {}
}
