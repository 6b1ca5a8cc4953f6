//! Arena Tests
//!
//! Tests for arena creation, exhaustion and release tracking.

use listnetworks::{ArenaAllocator, ScanError};

#[test]
fn test_create_and_release() {
    let allocator = ArenaAllocator::new(4096);

    let arena = allocator.create(1024).unwrap();
    assert_eq!(allocator.live(), 1);
    assert_eq!(allocator.created(), 1);
    assert_eq!(arena.capacity(), 1024);
    assert!(arena.is_empty());

    arena.release();
    assert_eq!(allocator.live(), 0);
    assert_eq!(allocator.created(), 1);
}

#[test]
fn test_drop_releases() {
    let allocator = ArenaAllocator::new(4096);

    {
        let _a = allocator.create(16).unwrap();
        let _b = allocator.create(16).unwrap();
        assert_eq!(allocator.live(), 2);
    }

    assert_eq!(allocator.live(), 0);
    assert_eq!(allocator.created(), 2);
}

#[test]
fn test_create_over_limit_fails() {
    let allocator = ArenaAllocator::new(1024);

    assert!(matches!(allocator.create(1025), Err(ScanError::Resource(_))));
    assert!(matches!(allocator.create(0), Err(ScanError::Resource(_))));
    assert_eq!(allocator.created(), 0);
    assert_eq!(allocator.limit(), 1024);
}

#[test]
fn test_push_returns_offsets() {
    let allocator = ArenaAllocator::new(1024);
    let mut arena = allocator.create(64).unwrap();

    assert_eq!(arena.push(b"abc").unwrap(), 0);
    assert_eq!(arena.push(b"defg").unwrap(), 3);
    assert_eq!(arena.len(), 7);
    assert_eq!(arena.remaining(), 57);
    assert_eq!(arena.slice(3, 4).unwrap(), b"defg");
    assert_eq!(arena.bytes(), b"abcdefg");
}

#[test]
fn test_push_exhaustion() {
    let allocator = ArenaAllocator::new(1024);
    let mut arena = allocator.create(8).unwrap();

    arena.push(&[0; 6]).unwrap();
    assert!(matches!(arena.push(&[0; 3]), Err(ScanError::Resource(_))));
    // A failed push leaves the arena untouched
    assert_eq!(arena.len(), 6);
    arena.push(&[0; 2]).unwrap();
    assert_eq!(arena.remaining(), 0);
}

#[test]
fn test_slice_out_of_range() {
    let allocator = ArenaAllocator::new(1024);
    let mut arena = allocator.create(16).unwrap();
    arena.push(b"abcd").unwrap();

    assert!(matches!(arena.slice(2, 8), Err(ScanError::Protocol(_))));
    assert!(matches!(arena.slice(u32::MAX, 1), Err(ScanError::Protocol(_))));
}

#[test]
fn test_cloned_allocator_shares_counts() {
    let allocator = ArenaAllocator::new(1024);
    let clone = allocator.clone();

    let arena = clone.create(32).unwrap();
    assert_eq!(allocator.live(), 1);
    drop(arena);
    assert_eq!(allocator.live(), 0);
}
