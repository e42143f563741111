use std::cell::Cell;
use std::rc::Rc;

use any_of::{
    Alternative,
    AnyOf,
};
use static_assertions::assert_type_eq_all;
use test_case::test_case;

/// Not `Clone`, not `Copy`, only ever moved.
#[derive(Debug, PartialEq, Eq)]
struct MoveOnly(u32);

/// Counts its drops in a shared cell.
#[derive(Debug)]
struct Tracked<'a> {
    drops: &'a Cell<usize>,
    id: u32,
}

impl<'a> Tracked<'a> {
    fn new(drops: &'a Cell<usize>, id: u32) -> Self {
        Tracked { drops, id }
    }
}

impl Drop for Tracked<'_> {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

#[test]
fn test_construct_then_insert() {
    let mut value: AnyOf<(i32, String)> = AnyOf::new(10);
    assert_eq!(value.index(), 0);
    assert_eq!(value.get::<i32, _>(), Some(&10));

    value.insert(String::from("hello"));
    assert_eq!(value.index(), 1);
    assert_eq!(value.get::<String, _>().map(String::as_str), Some("hello"));
    assert_eq!(value.get::<i32, _>(), None);
}

#[test]
fn test_take_moves_value() {
    let mut a: AnyOf<(i32, String)> = AnyOf::new(42);
    let b = a.take();

    assert!(!a.is_valid());
    assert!(b.is_valid());
    assert_eq!(b.get::<i32, _>(), Some(&42));

    // an invalid instance can be dropped
    drop(a);
}

#[test]
fn test_alternative_alias() {
    type Set = (u8, MoveOnly, &'static str);
    assert_type_eq_all!(Alternative<Set, 0>, u8);
    assert_type_eq_all!(Alternative<Set, 1>, MoveOnly);
    assert_type_eq_all!(Alternative<Set, 2>, &'static str);

    assert_eq!(AnyOf::<Set>::COUNT, 3);
    assert_eq!(AnyOf::<Set>::index_of::<MoveOnly, _>(), 1);
}

#[test_case(AnyOf::new(1_u8), 0 ; "first")]
#[test_case(AnyOf::new(MoveOnly(2)), 1 ; "middle")]
#[test_case(AnyOf::new("three"), 2 ; "last")]
#[test_case(AnyOf::from_index::<1, _>(MoveOnly(4)), 1 ; "by index")]
#[test_case(AnyOf::from_type::<&str, _>("five"), 2 ; "by type")]
fn test_index(value: AnyOf<(u8, MoveOnly, &'static str)>, expected: usize) {
    assert!(value.is_valid());
    assert_eq!(value.index(), expected);
}

#[test]
fn test_move_only_alternative() {
    let mut value: AnyOf<(u8, MoveOnly)> = AnyOf::new(MoveOnly(7));

    value.get_mut::<MoveOnly, _>().unwrap().0 += 1;
    assert_eq!(value.get::<MoveOnly, _>(), Some(&MoveOnly(8)));

    let inner = value.take_as::<MoveOnly, _>();
    assert_eq!(inner, Some(MoveOnly(8)));
    assert!(!value.is_valid());
}

#[test]
fn test_take_as_other_destroys() {
    let drops = Cell::new(0);
    let mut value: AnyOf<(u8, Tracked<'_>)> = AnyOf::new(Tracked::new(&drops, 1));

    assert_eq!(value.take_as::<u8, _>(), None);
    assert_eq!(drops.get(), 1);
    assert!(!value.is_valid());

    drop(value);
    assert_eq!(drops.get(), 1);
}

#[test]
fn test_into_as() {
    let value: AnyOf<(u8, String)> = AnyOf::new(String::from("nyc"));
    assert_eq!(value.into_as::<String, _>().as_deref(), Some("nyc"));

    let value: AnyOf<(u8, String)> = AnyOf::new(String::from("sf"));
    assert_eq!(value.into_as::<u8, _>(), None);
}

#[test]
fn test_insert_after_invalid_equals_fresh() {
    let mut reused: AnyOf<(u32, String)> = AnyOf::new(String::from("before"));
    let _ = reused.take();
    reused.insert(String::from("after"));

    let fresh: AnyOf<(u32, String)> = AnyOf::new(String::from("after"));
    assert_eq!(reused, fresh);
}

#[test]
fn test_emplace() {
    let mut value: AnyOf<(u32, Vec<u32>)> = AnyOf::new(5_u32);
    let vec = value.emplace(|| Vec::with_capacity(4));
    vec.extend([1, 2, 3]);

    assert_eq!(value.get::<Vec<u32>, _>(), Some(&vec![1, 2, 3]));
}

#[test]
fn test_replace() {
    let mut value: AnyOf<(u32, String)> = AnyOf::new(1_u32);
    let previous = value.replace(String::from("two"));

    assert_eq!(previous.get::<u32, _>(), Some(&1));
    assert_eq!(value.get::<String, _>().map(String::as_str), Some("two"));

    let _ = value.take();
    let previous = value.replace(3_u32);
    assert!(!previous.is_valid());
    assert_eq!(value.get::<u32, _>(), Some(&3));
}

#[test]
fn test_unchecked_access() {
    let mut value: AnyOf<(u32, String)> = AnyOf::new(String::from("unchecked"));

    // SAFETY: the live alternative is a `String`
    unsafe {
        value.get_unchecked_mut::<String, _>().push('!');
        assert_eq!(value.get_unchecked::<String, _>(), "unchecked!");
    }
}

#[test]
fn test_drop_accounting() {
    let drops = Cell::new(0);

    {
        let mut value: AnyOf<(u8, Tracked<'_>)> = AnyOf::new(Tracked::new(&drops, 0));

        // same alternative, the previous value is dropped by the assignment
        value.insert(Tracked::new(&drops, 1));
        assert_eq!(drops.get(), 1);

        // a different alternative destroys the previous value
        value.insert(2_u8);
        assert_eq!(drops.get(), 2);

        value.emplace(|| Tracked::new(&drops, 3));
        assert_eq!(drops.get(), 2);

        // moving doesn't drop anything, the taken value is dropped once at the end of scope
        let taken = value.take();
        assert_eq!(drops.get(), 2);
        assert_eq!(taken.get::<Tracked<'_>, _>().map(|t| t.id), Some(3));

        let previous = value.replace(Tracked::new(&drops, 4));
        assert!(!previous.is_valid());

        let id = value.match_into((|_: u8| 0, |tracked: Tracked<'_>| tracked.id));
        assert_eq!(id, 4);
        assert_eq!(drops.get(), 3);

        drop(previous);
        assert_eq!(drops.get(), 3);
    }

    // `taken` was dropped exactly once
    assert_eq!(drops.get(), 4);
}

#[test]
fn test_clone_is_independent() {
    let counter = Rc::new(());
    let value: AnyOf<(u8, Rc<()>)> = AnyOf::new(Rc::clone(&counter));
    let copy = value.clone();

    assert_eq!(Rc::strong_count(&counter), 3);
    drop(value);
    assert_eq!(Rc::strong_count(&counter), 2);
    assert!(copy.is::<Rc<()>, _>());
    drop(copy);
    assert_eq!(Rc::strong_count(&counter), 1);
}

#[test]
fn test_reference_alternatives() {
    let mut number = 1_u32;
    let text = String::from("borrowed");

    let mut value: AnyOf<(&mut u32, &String)> = AnyOf::new(&mut number);
    **value.get_mut::<&mut u32, _>().unwrap() += 1;

    value.insert(&text);
    assert_eq!(value.get::<&String, _>().map(|s| s.as_str()), Some("borrowed"));

    drop(value);
    assert_eq!(number, 2);
    assert_eq!(text, "borrowed");
}

#[test]
fn test_size() {
    use core::mem::size_of;

    assert_eq!(size_of::<AnyOf<(u8,)>>(), 2);
    assert_eq!(size_of::<AnyOf<(u32, u8)>>(), 8);
    assert_eq!(size_of::<AnyOf<(String, Vec<u8>)>>(), size_of::<String>() + size_of::<usize>());
    assert_eq!(size_of::<AnyOf<(&u8, &u64)>>(), 2 * size_of::<usize>());
}
