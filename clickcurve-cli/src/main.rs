use clap::Parser;
use clickcurve_cli::commands::PlotArgs;

fn main() -> anyhow::Result<()> {
    PlotArgs::parse().execute()
}
