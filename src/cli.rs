use crate::report::{run_render, RenderArgs};
use clap::{Parser, Subcommand};
use tceq_monitoring::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "tceq-report",
    about = "Summarize TCEQ mobile monitoring and OGI investigation records",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the datasets, print the summary, and write the charts (default command)
    Render(RenderArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Render(RenderArgs::default()));

    match command {
        Command::Render(args) => run_render(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::OutputFormat;
    use chrono::NaiveDate;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_render_flags() {
        let cli = Cli::try_parse_from([
            "tceq-report",
            "render",
            "--data-dir",
            "records",
            "--as-of",
            "2024-03-15",
            "--format",
            "json",
        ])
        .expect("flags parse");

        let Some(Command::Render(args)) = cli.command else {
            panic!("expected render command");
        };
        assert_eq!(args.data_dir.as_deref(), Some(std::path::Path::new("records")));
        assert_eq!(args.as_of, NaiveDate::from_ymd_opt(2024, 3, 15));
        assert_eq!(args.format, OutputFormat::Json);
        assert!(args.out_dir.is_none());
    }

    #[test]
    fn render_is_the_default_command() {
        let cli = Cli::try_parse_from(["tceq-report"]).expect("no args parse");
        assert!(cli.command.is_none());
    }

    #[test]
    fn rejects_non_iso_as_of() {
        assert!(Cli::try_parse_from(["tceq-report", "render", "--as-of", "3/15/2024"]).is_err());
    }
}
