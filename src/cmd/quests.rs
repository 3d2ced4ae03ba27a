use crate::reports;
use clap::Args;
use dice_companion::error::EngineResult;
use dice_companion::quests::{all_quest_status, parse_progress};

#[derive(Args, Debug, Clone)]
pub struct QuestsArgs {
    /// Progress so far, e.g. "kill_bosses=10,daily_login=3"
    #[arg(short, long, default_value = "")]
    pub progress: String,
}

pub fn run(args: QuestsArgs) -> EngineResult<()> {
    let progress = parse_progress(&args.progress)?;
    let statuses = all_quest_status(&progress);

    reports::print_quests(&statuses);
    let remaining: u64 = statuses.iter().map(|s| s.remaining).sum();
    println!("Dice Remaining: {}", remaining);
    Ok(())
}
