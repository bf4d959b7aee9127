//! Demo: Question Bank
//!
//! Adds, searches and deletes quiz questions, then shows how the indexes
//! and the suggested next ID follow the store.
//!
//! Run with: cargo run --example question_bank

use entrybook::{Filter, Question, Session};
use eyre::Result;

fn question(text: &str, topic: &str, difficulty: &str) -> Question {
    Question {
        text: text.to_string(),
        topic: topic.to_string(),
        difficulty: difficulty.to_string(),
    }
}

fn main() -> Result<()> {
    println!("Question Bank Demo");
    println!("==================\n");

    let mut session: Session<Question> = Session::new();
    println!("Suggested first ID: {}\n", session.next_id());

    // ADD
    println!("1. ADD - Adding questions...");
    println!("   {}", session.add(1, question("What is 2+2?", "Math", "Easy"))?);
    println!("   {}", session.add(2, question("Integrate x^2", "Math", "Hard"))?);
    println!("   {}", session.add(3, question("Capital of Peru?", "Geography", "Easy"))?);
    println!("   Next suggested ID: {}\n", session.next_id());

    // DUPLICATE
    println!("2. ADD - Reusing ID 1...");
    match session.add(1, question("Duplicate", "Math", "Easy")) {
        Ok(msg) => println!("   Unexpected: {}", msg),
        Err(e) => println!("   Rejected: {}", e),
    }
    println!("   Store still holds {} questions\n", session.store().len());

    // SEARCH
    println!("3. SEARCH - topic=Math");
    for line in session.search(&[Filter::eq("topic", "Math")]) {
        println!("   {}", line);
    }
    println!("\n   SEARCH - difficulty=Easy");
    for line in session.search(&[Filter::eq("difficulty", "Easy")]) {
        println!("   {}", line);
    }
    println!();

    // DISTINCT VALUES
    println!("4. VALUES - topics in use: {:?}\n", session.store().distinct_values("topic"));

    // DELETE
    println!("5. DELETE - Removing question 3...");
    println!("   {}", session.delete(3)?);
    println!("   Topics in use: {:?}", session.store().distinct_values("topic"));
    println!("   Next suggested ID: {}\n", session.next_id());

    println!("6. DELETE - Removing question 99...");
    if let Err(e) = session.delete(99) {
        println!("   Rejected: {}\n", e);
    }

    println!("Demo complete!");
    Ok(())
}
