//! Integration tests for the LSEQ allocator.
//!
//! These tests pin the documented allocation scenarios with a stubbed random
//! source and check that replicas allocating independently converge on one
//! order once they exchange their items.

use crossbeam_skiplist::SkipMap;
use crdt_lseq::{
    Allocator, AllocatorConfig, Identifier, RandomSource, Segment, get_position,
};

/// Random source returning the same coin and draw every time.
struct Fixed {
    coin: bool,
    draw: f64,
}

impl RandomSource for Fixed {
    fn boolean(&mut self) -> bool {
        self.coin
    }

    fn range(&mut self, _min: f64, _max: f64) -> f64 {
        self.draw
    }
}

fn stubbed(coin: bool, draw: f64) -> Allocator<Fixed> {
    Allocator::with_rng(Fixed { coin, draw }, AllocatorConfig::default()).unwrap()
}

fn id(segments: &[Segment]) -> Identifier {
    Identifier::from(segments)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_boundary_plus_room_at_same_depth() {
    let mut allocator = stubbed(true, 0.0);
    let new_id = allocator.alloc(&id(&[1, 2]), &id(&[1, 4])).unwrap();
    assert_eq!(new_id.segments(), &[1, 3]);
}

#[test]
fn test_boundary_plus_descends_when_no_room() {
    let mut allocator = stubbed(true, 0.0);
    let new_id = allocator.alloc(&id(&[1, 2]), &id(&[1, 3])).unwrap();
    assert_eq!(new_id.segments(), &[1, 2, 1]);
}

#[test]
fn test_boundary_minus_borrows_from_first_level() {
    let mut allocator = stubbed(false, 1.0);
    let new_id = allocator
        .alloc(&id(&[0, 0, 0, 0]), &id(&[1, 0, 0, 1]))
        .unwrap();
    assert_eq!(new_id.segments(), &[0, 31]);
}

#[test]
fn test_boundary_minus_borrows_into_deeper_level() {
    let mut allocator = stubbed(false, 1.0);
    let new_id = allocator
        .alloc(&id(&[1, 0, 0, 0]), &id(&[1, 0, 0, 1]))
        .unwrap();
    assert_eq!(new_id.segments(), &[1, 0, 0, 0, 255]);
}

#[test]
fn test_boundary_plus_with_shorter_left() {
    let mut allocator = stubbed(true, 9.0);
    let new_id = allocator.alloc(&id(&[1]), &id(&[1, 1])).unwrap();
    assert_eq!(new_id.segments(), &[1, 0, 10]);
}

#[test]
fn test_position_projection() {
    assert_eq!(get_position(&id(&[2, 2]), 2, 4), 2 * 16 + 2);
}

#[test]
fn test_typing_forward_stays_ordered() {
    init_tracing();
    let mut allocator = Allocator::new(11);
    let end = Identifier::end(allocator.base()).unwrap();
    let mut ids = vec![Identifier::begin()];

    for _ in 0..500 {
        let prev = ids.last().unwrap().clone();
        let next = allocator.alloc(&prev, &end).unwrap();
        assert!(prev < next && next < end);
        ids.push(next);
    }

    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(ids.iter().all(|id| id.is_well_formed(allocator.base())));
}

#[test]
fn test_typing_backward_stays_ordered() {
    let mut allocator = Allocator::new(12);
    let begin = Identifier::begin();
    let mut first = Identifier::end(allocator.base()).unwrap();

    for _ in 0..500 {
        let next = allocator.alloc(&begin, &first).unwrap();
        assert!(begin < next && next < first);
        first = next;
    }
}

/// A replica's document: identifiers paired with the replica that allocated
/// them, since independent allocators may pick the same identifier.
struct Replica {
    replica_id: u64,
    allocator: Allocator,
    document: SkipMap<(Identifier, u64), char>,
}

impl Replica {
    fn new(replica_id: u64) -> Self {
        let allocator = Allocator::new(replica_id);
        let document = SkipMap::new();
        document.insert((Identifier::begin(), 0), '^');
        document.insert((Identifier::end(allocator.base()).unwrap(), u64::MAX), '$');
        Replica {
            replica_id,
            allocator,
            document,
        }
    }

    /// Inserts `text` after the visible character at `index`.
    fn insert_at(&mut self, index: usize, text: &str) {
        let mut left = self
            .document
            .iter()
            .nth(index)
            .map(|entry| entry.key().0.clone())
            .unwrap();
        for ch in text.chars() {
            let right = self
                .document
                .range((left.clone(), u64::MAX)..)
                .find(|entry| entry.key().0 > left)
                .map(|entry| entry.key().0.clone())
                .unwrap();
            let new_id = self.allocator.alloc(&left, &right).unwrap();
            self.document.insert((new_id.clone(), self.replica_id), ch);
            left = new_id;
        }
    }

    fn merge_from(&self, other: &Replica) {
        for entry in other.document.iter() {
            self.document.insert(entry.key().clone(), *entry.value());
        }
    }

    fn typed_by(&self, replica_id: u64) -> String {
        self.document
            .iter()
            .filter(|entry| entry.key().1 == replica_id)
            .map(|entry| *entry.value())
            .collect()
    }

    fn text(&self) -> String {
        self.document
            .iter()
            .map(|entry| *entry.value())
            .filter(|ch| *ch != '^' && *ch != '$')
            .collect()
    }
}

#[test]
fn test_local_edits_read_in_order() {
    let mut alice = Replica::new(1);
    alice.insert_at(0, "world");
    alice.insert_at(0, "hello ");
    assert_eq!(alice.text(), "hello world");

    alice.insert_at(5, ",");
    assert_eq!(alice.text(), "hello, world");
}

#[test]
fn test_concurrent_replicas_converge() {
    init_tracing();
    let mut alice = Replica::new(1);
    let mut bob = Replica::new(2);

    alice.insert_at(0, "Hello");
    bob.insert_at(0, "World!");

    alice.merge_from(&bob);
    bob.merge_from(&alice);

    assert_eq!(alice.text(), bob.text());
    assert_eq!(alice.text().len(), "Hello".len() + "World!".len());

    // Each replica's characters keep the order they were typed in
    assert_eq!(alice.typed_by(1), "Hello");
    assert_eq!(alice.typed_by(2), "World!");
    assert_eq!(bob.typed_by(1), "Hello");
}

#[test]
fn test_identifiers_round_trip_as_integer_arrays() {
    let mut allocator = Allocator::new(5);
    let left = id(&[3, 7]);
    let right = id(&[3, 8]);
    let new_id = allocator.alloc(&left, &right).unwrap();

    let json = serde_json::to_string(&new_id).unwrap();
    let restored: Identifier = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.segments(), new_id.segments());
    assert!(json.starts_with("[3,7,"));
}
