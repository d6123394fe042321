// goal.rs — Goal subcommands: add, list, deactivate.

use clap::Subcommand;

use cs_goal::{ComparisonDirection, CourtConfig, CourtEvent, Goal, GoalStore};
use cs_metric::MetricCatalog;

use super::{dispatcher, truncate};

#[derive(Subcommand)]
pub enum GoalCommands {
    /// Create a new goal.
    Add {
        /// Goal title (e.g. "Hold them under 12 turnovers").
        title: String,
        /// Catalog metric slug (see `cs metric list`).
        #[arg(long)]
        metric: String,
        /// Target value in the metric's unit.
        #[arg(long)]
        target: f64,
        /// Comparison direction: at-least, at-most, or exact.
        #[arg(long, default_value = "at-least")]
        direction: String,
        /// Identity creating the goal.
        #[arg(long)]
        created_by: String,
    },
    /// List goals.
    List {
        /// Only show active goals.
        #[arg(long)]
        active_only: bool,
    },
    /// Deactivate a goal (history is kept).
    Deactivate {
        /// Goal ID.
        id: String,
    },
}

pub fn execute(cmd: &GoalCommands, config: &CourtConfig) -> anyhow::Result<()> {
    let store = GoalStore::new(&config.goals_dir)?;

    match cmd {
        GoalCommands::Add {
            title,
            metric,
            target,
            direction,
            created_by,
        } => add_goal(config, &store, title, metric, *target, direction, created_by),
        GoalCommands::List { active_only } => list_goals(&store, *active_only),
        GoalCommands::Deactivate { id } => deactivate_goal(config, &store, id),
    }
}

fn add_goal(
    config: &CourtConfig,
    store: &GoalStore,
    title: &str,
    metric: &str,
    target: f64,
    direction: &str,
    created_by: &str,
) -> anyhow::Result<()> {
    let catalog = MetricCatalog::builtin();
    let definition = catalog.get(metric).ok_or_else(|| {
        anyhow::anyhow!(
            "unknown metric \"{}\" (see `cs metric list` for the catalog)",
            metric
        )
    })?;

    let direction: ComparisonDirection = direction
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let goal = Goal::new(title, metric, target, direction, created_by);
    store.save(&goal)?;

    dispatcher(config).dispatch(&CourtEvent::goal_created(
        goal.goal_id,
        &goal.title,
        &goal.created_by,
    ));

    println!("Goal created: {}", goal.goal_id);
    println!("  Title:  {}", goal.title);
    println!(
        "  Target: {} {} {} ({})",
        goal.direction, goal.target_value, definition.unit, definition.name
    );
    Ok(())
}

fn list_goals(store: &GoalStore, active_only: bool) -> anyhow::Result<()> {
    let goals = if active_only {
        store.list_active()?
    } else {
        store.list()?
    };

    if goals.is_empty() {
        println!("No goals found.");
        return Ok(());
    }

    println!(
        "{:<38} {:<26} {:<22} {:<10} {:<9} {:<7}",
        "ID", "TITLE", "METRIC", "TARGET", "DIRECTION", "ACTIVE"
    );
    println!("{}", "-".repeat(114));

    for g in &goals {
        println!(
            "{:<38} {:<26} {:<22} {:<10} {:<9} {:<7}",
            g.goal_id,
            truncate(&g.title, 24),
            truncate(&g.metric_id, 20),
            g.target_value,
            g.direction.to_string(),
            if g.active { "yes" } else { "no" },
        );
    }
    println!("\n{} goal(s) total.", goals.len());

    Ok(())
}

fn deactivate_goal(config: &CourtConfig, store: &GoalStore, id: &str) -> anyhow::Result<()> {
    let goal_id = uuid::Uuid::parse_str(id)?;
    let goal = store.deactivate(goal_id)?;

    dispatcher(config).dispatch(&CourtEvent::GoalDeactivated {
        goal_id: goal.goal_id,
        timestamp: goal.updated_at,
    });

    println!("Goal deactivated: {} ({})", goal.title, goal.goal_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn add_goal_persists_and_logs_creation() {
        let dir = TempDir::new().unwrap();
        let config = CourtConfig::for_root(dir.path());
        let store = GoalStore::new(&config.goals_dir).unwrap();

        add_goal(
            &config,
            &store,
            "Score 50",
            "points-scored",
            50.0,
            "at-least",
            "coach-dana",
        )
        .unwrap();

        let goals = store.list().unwrap();
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].title, "Score 50");
        assert!(goals[0].active);

        let log = std::fs::read_to_string(&config.notifications_log).unwrap();
        assert!(log.contains("goal_created"));
    }

    #[test]
    fn add_goal_rejects_unknown_metric() {
        let dir = TempDir::new().unwrap();
        let config = CourtConfig::for_root(dir.path());
        let store = GoalStore::new(&config.goals_dir).unwrap();

        let result = add_goal(
            &config,
            &store,
            "Mystery",
            "dunk-highlights",
            5.0,
            "at-least",
            "coach-dana",
        );
        assert!(result.is_err());
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn deactivate_goal_keeps_the_record() {
        let dir = TempDir::new().unwrap();
        let config = CourtConfig::for_root(dir.path());
        let store = GoalStore::new(&config.goals_dir).unwrap();

        add_goal(
            &config,
            &store,
            "Doomed",
            "turnovers",
            12.0,
            "at-most",
            "coach-dana",
        )
        .unwrap();
        let goal_id = store.list().unwrap()[0].goal_id;

        deactivate_goal(&config, &store, &goal_id.to_string()).unwrap();

        let goal = store.get(goal_id).unwrap().unwrap();
        assert!(!goal.active);

        let log = std::fs::read_to_string(&config.notifications_log).unwrap();
        assert!(log.contains("goal_deactivated"));
    }
}
