//! Demo: Run Log
//!
//! Records runs indexed by terrain and duration, edits one, and cycles
//! through the log.
//!
//! Run with: cargo run --example run_log

use entrybook::{Filter, Run, Session};
use eyre::Result;

fn run(distance: &str, terrain: &str, duration: &str) -> Run {
    Run {
        distance: distance.to_string(),
        terrain: terrain.to_string(),
        duration: duration.to_string(),
    }
}

fn main() -> Result<()> {
    println!("Run Log Demo");
    println!("============\n");

    let mut session: Session<Run> = Session::new();

    println!("Logging runs under suggested IDs...");
    println!("   {}", session.add_next(run("5km", "Trail", "Short"))?);
    println!("   {}", session.add_next(run("21km", "Trail", "Long"))?);
    println!("   {}", session.add_next(run("10km", "Road", "Medium"))?);
    println!();

    println!("Trail runs:");
    for line in session.search(&[Filter::eq("terrain", "Trail")]) {
        println!("   {}", line);
    }
    println!();

    println!("Editing run 2 onto the road...");
    println!("   {}", session.edit(2, run("21km", "Road", "Long"))?);
    println!("   Trail IDs: {:?}", session.store().ids_for("terrain", "Trail"));
    println!("   Road IDs:  {:?}\n", session.store().ids_for("terrain", "Road"));

    println!("Deleting run 1...");
    println!("   {}", session.delete(1)?);
    println!("   Terrains in use:  {:?}", session.store().distinct_values("terrain"));
    println!("   Durations in use: {:?}\n", session.store().distinct_values("duration"));

    println!("Cycling through the log:");
    for _ in 0..3 {
        if let Some((id, entry)) = session.cycle() {
            println!("   {} -> {} on {} ({})", id, entry.distance, entry.terrain, entry.duration);
        }
    }
    println!();

    println!("Demo complete!");
    Ok(())
}
