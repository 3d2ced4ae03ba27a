use crate::reports;
use clap::Args;
use dice_companion::board::GameRules;
use dice_companion::config::Config;
use dice_companion::error::{EngineError, EngineResult};
use dice_companion::simulator::runner::{Estimate, StartingState};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct SweepArgs {
    /// Points you are aiming for
    #[arg(short, long)]
    pub goal: u64,

    #[arg(long, default_value_t = 100)]
    pub from: u64,

    #[arg(long, default_value_t = 1000)]
    pub to: u64,

    #[arg(long, default_value_t = 50)]
    pub step: u64,

    /// Also write the table to this CSV file
    #[arg(long)]
    pub csv: Option<String>,

    #[command(flatten)]
    pub config: Config,
}

pub fn run(args: SweepArgs, rules: Arc<GameRules>) -> EngineResult<()> {
    if args.step == 0 || args.from > args.to {
        return Err(EngineError::InvalidArgument(format!(
            "empty sweep: --from {} --to {} --step {}",
            args.from, args.to, args.step
        )));
    }

    let driver = super::build_driver(&args.config, rules)?;
    let dice = (args.from..=args.to).step_by(args.step as usize);
    let estimates = driver.sweep(args.goal, dice, &StartingState::default())?;

    reports::print_sweep(&estimates);

    if let Some(path) = &args.csv {
        write_csv(path, &estimates)?;
        info!("💾 Wrote {} rows to {}", estimates.len(), path);
    }
    Ok(())
}

fn write_csv<P: AsRef<Path>>(path: P, estimates: &[Estimate]) -> EngineResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for e in estimates {
        writer.serialize(e)?;
    }
    writer.flush()?;
    Ok(())
}
