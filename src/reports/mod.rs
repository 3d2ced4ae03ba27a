use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use dice_companion::board::Board;
use dice_companion::quests::QuestStatus;
use dice_companion::simulator::runner::{Estimate, StartingState};
use dice_companion::simulator::solver::SolverOutcome;
use dice_companion::tracker::RunRating;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_right(table: &mut Table, columns: std::ops::RangeInclusive<usize>) {
    for i in columns {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn rate_color(rate: f64) -> Color {
    if rate >= 90.0 {
        Color::Green
    } else if rate >= 50.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

pub fn print_board(board: &Board) {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Tile"),
        Cell::new("Reward"),
        Cell::new("Max x").fg(Color::Cyan),
    ]);

    for (i, tile) in board.tiles.iter().enumerate() {
        let cap = board.multiplier_cap(i);
        let cap_cell = if cap > 1 {
            Cell::new(cap).fg(Color::Cyan)
        } else {
            Cell::new(cap)
        };
        table.add_row(vec![
            Cell::new(i),
            Cell::new(tile.to_string()),
            Cell::new(tile.describe()),
            cap_cell,
        ]);
    }
    align_right(&mut table, 3..=3);
    println!("\n{}", table);
}

pub fn print_estimate(e: &Estimate, start: &StartingState) {
    let mut table = new_table();
    table.add_row(vec![Cell::new("Goal"), Cell::new(e.goal)]);
    table.add_row(vec![Cell::new("Dice"), Cell::new(e.dice)]);
    if start.current_score > 0 || start.rolls_done > 0 || start.current_tile > 0 {
        table.add_row(vec![Cell::new("Current Points"), Cell::new(start.current_score)]);
        table.add_row(vec![Cell::new("Rolls Done"), Cell::new(start.rolls_done)]);
        table.add_row(vec![Cell::new("Tile"), Cell::new(start.current_tile)]);
    }
    table.add_row(vec![
        Cell::new("Successes"),
        Cell::new(format!("{} / {}", e.successes, e.trials)),
    ]);
    table.add_row(vec![
        Cell::new("Chance").add_attribute(Attribute::Bold),
        Cell::new(format!("{:.2}%", e.success_rate)).fg(rate_color(e.success_rate)),
    ]);
    align_right(&mut table, 1..=1);
    println!("\n{}", table);
}

pub fn print_sweep(estimates: &[Estimate]) {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Dice").add_attribute(Attribute::Bold),
        Cell::new("Successes"),
        Cell::new("Chance").fg(Color::Cyan),
    ]);
    for e in estimates {
        table.add_row(vec![
            Cell::new(e.dice),
            Cell::new(e.successes),
            Cell::new(format!("{:.2}%", e.success_rate)).fg(rate_color(e.success_rate)),
        ]);
    }
    align_right(&mut table, 0..=2);
    println!("\n{}", table);
}

pub fn print_solver_outcome(o: &SolverOutcome) {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Probe").add_attribute(Attribute::Bold),
        Cell::new("Chance"),
    ]);
    for p in &o.probes {
        let row = if p.dice == o.dice {
            Cell::new(p.dice).add_attribute(Attribute::Bold)
        } else {
            Cell::new(p.dice)
        };
        table.add_row(vec![
            row,
            Cell::new(format!("{:.2}%", p.success_rate)).fg(rate_color(p.success_rate)),
        ]);
    }
    align_right(&mut table, 0..=1);
    println!("\n{}", table);
    println!(
        "{} points at {:.2}% (seed {}): {} dice -> {:.2}%{}",
        o.goal,
        o.required_rate,
        o.seed,
        o.dice,
        o.rate,
        o.rate_below
            .map(|r| format!(", {} dice -> {:.2}%", o.dice.saturating_sub(1), r))
            .unwrap_or_default()
    );
}

pub fn print_run_rating(r: &RunRating) {
    let mut table = new_table();
    table.add_row(vec![Cell::new("Points Achieved"), Cell::new(r.points)]);
    table.add_row(vec![Cell::new("Net Dice Used"), Cell::new(r.net_dice_used)]);
    table.add_row(vec![
        Cell::new("Points per Initial Dice"),
        Cell::new(format!("{:.2}", r.points_per_die)),
    ]);
    let color = if r.percentile >= 50.0 {
        Color::Green
    } else {
        Color::Red
    };
    table.add_row(vec![
        Cell::new("Percentile").add_attribute(Attribute::Bold),
        Cell::new(format!("{:.2}%", r.percentile)).fg(color),
    ]);
    align_right(&mut table, 1..=1);
    println!("\n{}", table);
}

pub fn print_quests(statuses: &[QuestStatus]) {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Quest").add_attribute(Attribute::Bold),
        Cell::new("Progress"),
        Cell::new("Next"),
        Cell::new("Earned").fg(Color::Green),
        Cell::new("Left").fg(Color::Cyan),
    ]);
    for s in statuses {
        table.add_row(vec![
            Cell::new(s.quest.to_string()),
            Cell::new(format!("{} {}", s.progress, s.quest.unit())),
            Cell::new(
                s.next_threshold
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "done".to_string()),
            ),
            Cell::new(s.earned).fg(Color::Green),
            Cell::new(s.remaining).fg(Color::Cyan),
        ]);
    }
    align_right(&mut table, 1..=4);
    println!("\n{}", table);
}
