use clap::Parser;

use receipt_tui::config::{Cli, Config};
use receipt_tui::drivers::OutputDriver;
use receipt_tui::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use receipt_tui::error::Error;
use receipt_tui::{receipts, tracing_sub, viewer};

fn main() -> Result<(), Error> {
    let cli = Cli::parse();
    let config = Config::try_from(&cli)?;
    tracing_sub::init(config.log_level, config.log_file.as_deref())?;

    let receipts = receipts::load_dir(&config.folder)?;

    let mut output = ConsoleOutputDriver::new()?;
    let area = output.area()?;
    let (mut app, _) = viewer::build_receipt_viewer(area, receipts)?;

    output.enter()?;
    let result = app.run(ConsoleInputDriver::new(), &mut output);
    output.exit()?;

    if let Err(err) = &result {
        tracing::error!(%err, "receipt viewer stopped");
    }
    result.map_err(Error::from)
}
