// progress.rs — Show a goal's progress history.

use cs_goal::{CourtConfig, GoalStore, ProgressStore};

pub fn execute(
    config: &CourtConfig,
    goal_id: &str,
    limit: usize,
    offset: usize,
) -> anyhow::Result<()> {
    let goal_id = uuid::Uuid::parse_str(goal_id)?;

    let goals = GoalStore::new(&config.goals_dir)?;
    let goal = match goals.get(goal_id)? {
        Some(g) => g,
        None => {
            eprintln!("Goal not found: {}", goal_id);
            std::process::exit(1);
        }
    };

    let progress = ProgressStore::new(&config.progress_dir)?;
    let (records, total) = progress.history(goal_id, limit, offset)?;

    println!("Goal: {} ({})", goal.title, goal.goal_id);
    println!(
        "Target: {} {} ({})",
        goal.direction, goal.target_value, goal.metric_id
    );
    println!();

    if records.is_empty() {
        println!("No progress recorded yet.");
        return Ok(());
    }

    println!(
        "{:<25} {:<10} {:<10} {:<9} {:<38}",
        "CALCULATED", "ACTUAL", "DELTA", "STATUS", "SESSION"
    );
    println!("{}", "-".repeat(94));

    for r in &records {
        println!(
            "{:<25} {:<10} {:<+10.1} {:<9} {:<38}",
            r.calculated_at.to_rfc3339(),
            r.actual_value,
            r.delta,
            r.status.to_string(),
            r.session_id,
        );
    }
    println!(
        "\nShowing {} of {} record(s) (offset {}).",
        records.len(),
        total,
        offset
    );

    Ok(())
}
