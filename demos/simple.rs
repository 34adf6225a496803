//! Simple standalone example of LSEQ identifier allocation.
//!
//! Two replicas type into the same document, each allocating identifiers
//! between the begin and end sentinels, then exchange their characters.
//!
//! Run with: cargo run --example simple

use std::collections::BTreeMap;
use std::error::Error;

use crdt_lseq::{Allocator, Identifier};

/// Characters keyed by identifier, with the replica id breaking ties.
type Document = BTreeMap<(Identifier, u64), char>;

fn type_text(
    allocator: &mut Allocator,
    replica: u64,
    document: &mut Document,
    text: &str,
    end: &Identifier,
) -> Result<(), Box<dyn Error>> {
    let mut last = Identifier::begin();
    for ch in text.chars() {
        last = allocator.alloc(&last, end)?;
        println!("  '{ch}' -> {last}");
        document.insert((last.clone(), replica), ch);
    }
    Ok(())
}

fn render(document: &Document) -> String {
    document.values().collect()
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("=== Simple LSEQ Example ===\n");

    let mut alice = Allocator::new(1);
    let mut bob = Allocator::new(2);
    let end = Identifier::end(alice.base()).ok_or("base too large for the end sentinel")?;

    println!("Sentinels: begin = {}, end = {}\n", Identifier::begin(), end);

    let mut alice_doc = Document::new();
    let mut bob_doc = Document::new();

    println!("Alice types 'Hello':");
    type_text(&mut alice, 1, &mut alice_doc, "Hello", &end)?;
    println!("  Alice's document: '{}'", render(&alice_doc));

    println!("\nBob concurrently types 'World!' (also from the start):");
    type_text(&mut bob, 2, &mut bob_doc, "World!", &end)?;
    println!("  Bob's document: '{}'", render(&bob_doc));

    println!("\n--- Synchronizing Changes ---");
    let alice_entries = alice_doc.clone();
    alice_doc.extend(bob_doc.iter().map(|(key, ch)| (key.clone(), *ch)));
    bob_doc.extend(alice_entries);

    println!("  Alice sees: '{}'", render(&alice_doc));
    println!("  Bob sees:   '{}'", render(&bob_doc));

    if alice_doc == bob_doc {
        println!("\n✓ SUCCESS: Both replicas converged to the same document!");
    } else {
        println!("\n✗ ERROR: Documents did not converge!");
    }

    println!("\n--- Technical Details ---");
    println!("Strategies Alice chose per depth:");
    for (depth, strategy) in alice.strategies() {
        println!("  depth {depth}: {strategy}");
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
