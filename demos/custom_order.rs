use rb_order_tree::OrderTree;

fn main() {
    // order strings by length, ties lexicographically
    let mut tree = OrderTree::new(|a: &&str, b: &&str| a.len().cmp(&b.len()).then(a.cmp(b)));

    for name in ["persimmon", "fig", "apple", "kiwi", "plum"] {
        tree.insert(name);
    }

    assert_eq!(tree.min(), Some(&"fig"));
    assert_eq!(tree.max(), Some(&"persimmon"));
    assert!(tree.contains(&"kiwi"));
    assert!(!tree.contains(&"quince"));

    println!("shortest = {:?}, longest = {:?}", tree.min(), tree.max());
}
