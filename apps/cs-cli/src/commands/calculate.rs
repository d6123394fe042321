// calculate.rs — Evaluate goals against a session and record progress.

use cs_goal::{CourtConfig, ProgressEngine, ProgressResult};

pub fn execute(
    config: &CourtConfig,
    session_id: &str,
    goal: Option<&str>,
    requester: &str,
) -> anyhow::Result<()> {
    let session_id = uuid::Uuid::parse_str(session_id)?;
    let engine = ProgressEngine::open(config)?;

    let results = match goal {
        Some(goal_id) => {
            let goal_id = uuid::Uuid::parse_str(goal_id)?;
            vec![engine.calculate_goal(requester, session_id, goal_id)?]
        }
        None => engine.calculate_session(requester, session_id)?,
    };

    if results.is_empty() {
        println!("No active goals to calculate.");
        return Ok(());
    }

    print_results(&results);
    Ok(())
}

fn print_results(results: &[ProgressResult]) {
    println!(
        "{:<38} {:<10} {:<10} {:<10} {:<9}",
        "GOAL", "ACTUAL", "TARGET", "DELTA", "STATUS"
    );
    println!("{}", "-".repeat(79));

    for r in results {
        println!(
            "{:<38} {:<10} {:<10} {:<+10.1} {:<9}",
            r.goal_id,
            r.actual_value,
            r.target_value,
            r.delta,
            r.status.to_string(),
        );
    }
    println!("\nCalculated progress for {} goal(s).", results.len());
}
