use avl_policy::{AvlTreeMap, AvlTreeSet};

fn main() {
    let mut map = AvlTreeMap::ordered();
    map.insert(0, "zero");
    map.insert(1, "one");
    map.insert(2, "two");
    map.insert(2, "two");
    map.insert(3, "three");
    map.insert(4, "four");
    map.insert(5, "five");
    assert_eq!(map.get(&1), Some("one"));
    map.remove(&1);
    assert!(map.get(&1).is_none());

    println!("{map:?}");
    for value in map.sorted() {
        println!("{value}");
    }

    let mut set = AvlTreeSet::ordered();
    for x in 0..5 {
        set.insert(x);
    }
    assert!(set.contains(&1));
    set.remove(&1);
    assert!(!set.contains(&1));

    print!("{{ ");
    for x in set.sorted() {
        print!("{x}, ");
    }
    println!("}}");

    // Order strings by length, the last insert of an equal length wins
    let mut words = AvlTreeSet::new(|a: &String, b: &String| a.len().cmp(&b.len()));
    words.extend(["pear", "fig", "plum", "banana"].map(String::from));
    println!("{:?} .. {:?}", words.min(), words.max());
}
