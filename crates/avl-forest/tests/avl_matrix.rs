use avl_forest::{AvlMap, AvlSet, KeyError};

#[test]
fn avl_map_smoke_matrix() {
    let mut map = AvlMap::<f64, i32>::new();
    map.set(1.0, 1);
    map.set(3.0, 5);
    map.set(4.0, 5);
    map.set(3.0, 15);
    map.set(4.1, 0);
    map.set(44.0, 123);

    assert_eq!(map.get(&44.0), Some(&123));
    assert_eq!(map.get(&3.0), Some(&15));

    let mut keys = Vec::new();
    map.for_each(|_i, k, _v| keys.push(*k));
    assert_eq!(keys, vec![1.0, 3.0, 4.0, 4.1, 44.0]);
    map.assert_valid().unwrap();
}

#[test]
fn avl_map_iteration_matrix() {
    let mut map = AvlMap::<String, i32>::new();
    assert_eq!(map.first(), None);

    map.set("a".to_string(), 1);
    map.set("b".to_string(), 2);
    map.set("c".to_string(), 3);

    let mut list = Vec::new();
    let mut entry = map.first();
    while let Some(i) = entry {
        list.push((map.key(i).clone(), *map.value(i)));
        entry = map.next(i);
    }
    assert_eq!(
        list,
        vec![
            ("a".to_string(), 1),
            ("b".to_string(), 2),
            ("c".to_string(), 3)
        ]
    );

    let from_iterator: Vec<(String, i32)> = map
        .iterator()
        .map(|i| (map.key(i).clone(), *map.value(i)))
        .collect();
    assert_eq!(
        from_iterator,
        vec![
            ("a".to_string(), 1),
            ("b".to_string(), 2),
            ("c".to_string(), 3)
        ]
    );

    let mut it0 = map.iterator0();
    assert_eq!(it0().map(|i| map.key(i).clone()), Some("a".to_string()));
    assert_eq!(it0().map(|i| map.key(i).clone()), Some("b".to_string()));
    assert_eq!(it0().map(|i| map.key(i).clone()), Some("c".to_string()));
    assert_eq!(it0(), None);

    let mut backwards = Vec::new();
    let mut entry = map.last();
    while let Some(i) = entry {
        backwards.push(map.key(i).clone());
        entry = avl_forest::util::prev(map.arena(), i);
    }
    assert_eq!(
        backwards,
        vec!["c".to_string(), "b".to_string(), "a".to_string()]
    );
}

#[test]
fn avl_map_ladder_insert_delete_matrix() {
    let mut map = AvlMap::<i32, i32>::new();

    for i in 0..300 {
        map.set(i, i);
        map.assert_valid().unwrap();
    }
    assert_eq!(map.size(), 300);

    for i in (0..300).step_by(3) {
        assert!(map.del(&i));
        map.assert_valid().unwrap();
    }

    for i in 0..300 {
        if i % 3 == 0 {
            assert_eq!(map.get(&i), None);
        } else {
            assert_eq!(map.get(&i), Some(&i));
        }
    }
}

#[test]
fn avl_map_descending_ladder_matrix() {
    let mut map = AvlMap::<i32, ()>::new();

    for i in (0..200).rev() {
        map.set(i, ());
        map.assert_valid().unwrap();
    }

    for i in 0..200 {
        assert!(map.del(&i));
        map.assert_valid().unwrap();
    }
    assert!(map.is_empty());
    assert_eq!(map.root, None);
}

#[test]
fn avl_map_misc_api_matrix() {
    let mut map = AvlMap::<i32, i32>::new();
    assert!(map.is_empty());
    assert_eq!(map.size(), 0);
    assert_eq!(map.get_or_next_lower(&10), None);

    let i10 = map.set(10, 100);
    let i5 = map.set(5, 50);
    let i20 = map.set(20, 200);

    assert!(!map.is_empty());
    assert_eq!(map.find(&5), Some(i5));
    assert_eq!(map.get(&10), Some(&100));
    assert_eq!(map.first().map(|i| *map.key(i)), Some(5));
    assert_eq!(map.last().map(|i| *map.key(i)), Some(20));
    assert_eq!(map.get_or_next_lower(&4), None);
    assert_eq!(map.get_or_next_lower(&19).map(|i| *map.key(i)), Some(10));
    assert_eq!(map.get_or_next_lower(&21).map(|i| *map.key(i)), Some(20));

    *map.get_mut(&10).unwrap() = 101;
    *map.value_mut_by_index(i20) = 201;
    assert_eq!(map.get(&10), Some(&101));
    assert_eq!(map.get(&20), Some(&201));

    assert!(map.has(&10));
    assert!(map.del(&10));
    assert!(!map.del(&10));

    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.size(), 0);
    assert_eq!(map.first(), None);

    let _ = i10;
}

#[test]
fn avl_map_try_get_matrix() {
    let mut map = AvlMap::<i32, i32>::new();
    assert_eq!(map.try_get(&7), Err(KeyError));

    map.set(7, 70);
    assert_eq!(map.try_get(&7), Ok(&70));
    assert_eq!(map.try_get(&8), Err(KeyError));

    *map.try_get_mut(&7).unwrap() = 71;
    assert_eq!(map.try_get(&7), Ok(&71));
    assert_eq!(map.try_get_mut(&8), Err(KeyError));

    // absent keys stay non-errors on the plain surface
    assert_eq!(map.get(&8), None);
    assert!(!map.del(&8));
}

#[test]
fn ascending_run_triggers_single_rotation() {
    let mut map = AvlMap::<i32, i32>::new();
    map.set(1, 10);
    map.set(2, 20);
    map.set(3, 30);

    let root = map.root.unwrap();
    let arena = map.arena();
    assert_eq!(arena[root as usize].k, 2);
    let l = arena[root as usize].l.unwrap();
    let r = arena[root as usize].r.unwrap();
    assert_eq!(arena[l as usize].k, 1);
    assert_eq!(arena[r as usize].k, 3);
    assert_eq!(arena[root as usize].bf, 0);
    assert_eq!(arena[l as usize].bf, 0);
    assert_eq!(arena[r as usize].bf, 0);
    map.assert_valid().unwrap();
}

#[test]
fn zig_zag_run_triggers_double_rotation() {
    let mut map = AvlMap::<i32, i32>::new();
    map.set(3, 30);
    map.set(1, 10);
    map.set(2, 20);

    let root = map.root.unwrap();
    let arena = map.arena();
    assert_eq!(arena[root as usize].k, 2);
    let l = arena[root as usize].l.unwrap();
    let r = arena[root as usize].r.unwrap();
    assert_eq!(arena[l as usize].k, 1);
    assert_eq!(arena[r as usize].k, 3);
    assert_eq!(arena[root as usize].bf, 0);
    assert_eq!(arena[l as usize].bf, 0);
    assert_eq!(arena[r as usize].bf, 0);
    map.assert_valid().unwrap();
}

#[test]
fn removing_the_root_of_a_complete_tree_keeps_balance() {
    let mut map = AvlMap::<i32, i32>::new();
    // complete shape: 4 on top, 2 and 6 below, leaves 1 3 5 7
    for k in [4, 2, 6, 1, 3, 5, 7] {
        map.set(k, k * 10);
    }
    assert_eq!(map.height(), 3);
    let root_key = *map.key(map.root.unwrap());
    assert_eq!(root_key, 4);

    assert!(map.del(&4));
    map.assert_valid().unwrap();
    assert_eq!(map.size(), 6);

    let keys: Vec<i32> = map.iterator().map(|i| *map.key(i)).collect();
    assert_eq!(keys, vec![1, 2, 3, 5, 6, 7]);
    assert_eq!(map.height(), 3);
}

#[test]
fn upsert_keeps_shape_and_balance() {
    let mut map = AvlMap::<i32, i32>::new();
    for k in [8, 3, 12, 1, 5, 10, 14, 4] {
        map.set(k, 0);
    }
    map.assert_valid().unwrap();

    let root_before = map.root;
    let shape_before: Vec<_> = map
        .arena()
        .iter()
        .map(|n| (n.p, n.l, n.r, n.bf, n.k))
        .collect();

    let idx = map.set(5, 555);
    assert_eq!(map.find(&5), Some(idx));

    let shape_after: Vec<_> = map
        .arena()
        .iter()
        .map(|n| (n.p, n.l, n.r, n.bf, n.k))
        .collect();
    assert_eq!(map.root, root_before);
    assert_eq!(shape_after, shape_before);
    assert_eq!(map.get(&5), Some(&555));
    assert_eq!(map.size(), 8);
}

#[test]
fn round_trip_returns_to_empty() {
    let keys = [17, 3, 25, 1, 9, 40, 2, 33, 7, 20, 11, 5, 29, 13, 37];
    let mut map = AvlMap::<i32, i32>::new();
    for &k in &keys {
        map.set(k, k);
        map.assert_valid().unwrap();
    }
    assert_eq!(map.size(), keys.len());

    // removal order differs from insertion order
    let mut removal = keys;
    removal.reverse();
    for &k in &removal {
        assert!(map.del(&k));
        map.assert_valid().unwrap();
    }

    assert!(map.is_empty());
    assert_eq!(map.root, None);
    assert_eq!(map.height(), 0);
    assert_eq!(map.first(), None);
}

#[test]
fn height_stays_within_avl_bound() {
    let mut map = AvlMap::<i32, ()>::new();
    for n in [1usize, 7, 50, 300] {
        map.clear();
        for i in 0..n as i32 {
            map.set(i, ());
        }
        let bound = 1.44 * ((n as f64) + 2.0).log2();
        assert!(
            (map.height() as f64) <= bound,
            "height {} exceeds AVL bound {bound} for n={n}",
            map.height()
        );
    }
}

#[test]
fn deleted_slots_are_reused() {
    let mut map = AvlMap::<i32, i32>::new();
    map.set(1, 1);
    let i2 = map.set(2, 2);
    map.set(3, 3);
    let slots = map.arena().len();

    assert!(map.del(&2));
    let i4 = map.set(4, 4);
    assert_eq!(i4, i2);
    assert_eq!(map.arena().len(), slots);
    map.assert_valid().unwrap();

    let keys: Vec<i32> = map.iterator().map(|i| *map.key(i)).collect();
    assert_eq!(keys, vec![1, 3, 4]);
}

#[test]
fn avl_set_matrix() {
    let mut set = AvlSet::<i32>::new();
    assert_eq!(set.size(), 0);
    assert!(!set.has(&1));

    set.add(1);
    set.add(24);
    set.add(42);
    set.add(42);
    assert_eq!(set.size(), 3);
    assert!(set.has(&1));
    assert!(set.has(&24));
    assert!(set.has(&42));
    assert!(!set.has(&25));

    let entries: Vec<i32> = set.entries().map(|i| *set.key(i)).collect();
    assert_eq!(entries, vec![1, 24, 42]);

    set.del(&24);
    set.del(&1);
    assert!(!set.has(&24));
    assert!(!set.has(&1));
    assert!(set.has(&42));
    assert_eq!(set.size(), 1);
    set.del(&42);
    assert!(set.is_empty());

    set.assert_valid().unwrap();
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Pair(i32, i32);

#[test]
fn avl_set_custom_comparator_matrix() {
    let cmp = |a: &Pair, b: &Pair| {
        let dx = a.0 - b.0;
        if dx == 0 {
            a.1 - b.1
        } else {
            dx
        }
    };
    let mut set = AvlSet::<Pair, _>::with_comparator(cmp);
    set.add(Pair(0, 0));
    set.add(Pair(0, 1));
    set.add(Pair(2, 3));
    set.add(Pair(3, 3));
    assert_eq!(set.size(), 4);
    set.assert_valid().unwrap();
    set.del(&Pair(0, 0));
    assert!(!set.has(&Pair(0, 0)));
    assert!(set.has(&Pair(0, 1)));
}

#[test]
fn avl_map_reverse_comparator_matrix() {
    let mut map = AvlMap::<i32, i32, _>::with_comparator(|a: &i32, b: &i32| b - a);
    for k in 0..50 {
        map.set(k, k);
        map.assert_valid().unwrap();
    }
    let keys: Vec<i32> = map.iterator().map(|i| *map.key(i)).collect();
    let expected: Vec<i32> = (0..50).rev().collect();
    assert_eq!(keys, expected);
}
