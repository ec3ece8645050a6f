use std::cell::Cell;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::rc::Rc;

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::node::{Color, Node};

use super::*;

struct ValueGenerator {
    rng: StdRng,
    unique: HashSet<i32>,
    limit: i32,
}

impl ValueGenerator {
    fn new(seed: [u8; 32]) -> Self {
        const LIMIT: i32 = 100_000;
        Self {
            rng: SeedableRng::from_seed(seed),
            unique: HashSet::new(),
            limit: LIMIT,
        }
    }

    fn next(&mut self) -> i32 {
        self.rng.gen_range(0..self.limit)
    }

    fn next_unique(&mut self) -> i32 {
        let mut value = self.next();
        while self.unique.contains(&value) {
            value = self.next();
        }
        self.unique.insert(value);
        value
    }
}

impl<T, C, Ix> OrderTree<T, C, Ix>
where
    Ix: IndexType,
{
    /// 1. Every node is either red or black.
    /// 2. The root is black.
    /// 3. Every missing child is black.
    /// 4. If a node is red, then both its children are black.
    /// 5. For each node, all simple paths down to missing children contain
    ///    the same number of black nodes.
    fn check_rb_properties(&self) {
        assert!(matches!(
            self.node_ref(self.root, Node::color),
            Color::Black
        ));
        assert!(!self.has_red_violation());
        assert!(self.black_height().is_some());
    }

    fn check_height_bound(&self) {
        let bound = 2.0 * ((self.len() + 1) as f64).log2();
        assert!(self.height() as f64 <= bound);
    }
}

fn with_tree_and_generator(test_fn: impl Fn(OrderTree<i32, fn(&i32, &i32) -> Ordering>, ValueGenerator)) {
    let seeds = vec![[0; 32], [1; 32], [2; 32]];
    for seed in seeds {
        let gen = ValueGenerator::new(seed);
        let tree = OrderTree::natural();
        test_fn(tree, gen);
    }
}

#[test]
fn red_black_tree_properties_are_satisfied() {
    with_tree_and_generator(|mut tree, mut gen| {
        let values: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .take(1000)
            .collect();
        for v in values {
            let _ignore = tree.insert(v);
        }
        tree.check_rb_properties();
    });
}

#[test]
fn properties_hold_after_every_insert() {
    with_tree_and_generator(|mut tree, mut gen| {
        for _ in 0..200 {
            let _ignore = tree.insert(gen.next());
            tree.check_rb_properties();
            tree.check_height_bound();
        }
    });
}

#[test]
fn known_sequence_reaches_expected_extremes() {
    let mut tree = OrderTree::natural();
    for v in [4, 2, 6, 0, 3, 5, 8, 1, 7] {
        let _ignore = tree.insert(v);
    }
    assert_eq!(tree.min(), Some(&0));
    assert_eq!(tree.max(), Some(&8));
    assert_eq!(tree.len(), 9);

    let root = tree.root().unwrap();
    assert!(tree.is_black(root));
    assert!(tree.black_height().is_some());
    let left = tree.node_ref(root, Node::left);
    let right = tree.node_ref(root, Node::right);
    assert_eq!(tree.black_height_at(left), tree.black_height_at(right));
}

#[test]
fn single_value_is_both_extremes() {
    let mut tree = OrderTree::natural();
    let _ignore = tree.insert(77);
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.min(), Some(&77));
    assert_eq!(tree.max(), Some(&77));
    assert!(tree.is_black(tree.root().unwrap()));
}

#[test]
fn inserted_values_are_found_and_missing_probe_is_absent() {
    let mut tree = OrderTree::natural();
    let _ignore = tree.insert(16);
    let _ignore = tree.insert(23);
    assert_eq!(tree.len(), 2);
    assert_eq!(tree.get(&16), Some(&16));
    assert_eq!(tree.get(&23), Some(&23));
    assert!(tree.contains(&23));
    assert_eq!(tree.get(&99), None);
    assert!(!tree.contains(&99));
}

#[test]
fn ascending_run_stays_within_height_bound() {
    let mut tree = OrderTree::natural();
    for v in 1..=20 {
        let _ignore = tree.insert(v);
    }
    // 2 * log2(21), the bound an unbalanced tree would blow through at
    // height 20
    assert!(tree.height() <= 8);
    tree.check_rb_properties();

    let mut tree = OrderTree::natural();
    for v in 1..=1000 {
        let _ignore = tree.insert(v);
        tree.check_height_bound();
    }
    tree.check_rb_properties();
}

#[test]
fn empty_tree_queries_return_absent() {
    let tree: OrderTree<i32, _> = OrderTree::natural();
    assert_eq!(tree.min(), None);
    assert_eq!(tree.max(), None);
    assert_eq!(tree.get(&7), None);
    assert!(!tree.contains(&7));
    assert_eq!(tree.len(), 0);
    assert!(tree.is_empty());
    assert_eq!(tree.height(), 0);
    assert_eq!(tree.black_height(), Some(0));
    assert_eq!(tree.root(), None);
}

#[test]
fn equal_values_each_occupy_a_node() {
    let mut tree = OrderTree::natural();
    for _ in 0..10 {
        let _ignore = tree.insert(5);
    }
    assert_eq!(tree.len(), 10);
    assert_eq!(tree.get(&5), Some(&5));
    assert_eq!(tree.min(), Some(&5));
    assert_eq!(tree.max(), Some(&5));
    tree.check_rb_properties();
}

#[test]
fn search_finds_every_inserted_value() {
    with_tree_and_generator(|mut tree, mut gen| {
        let values: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .take(1000)
            .collect();
        for v in values.clone() {
            let _ignore = tree.insert(v);
        }
        for v in &values {
            assert_eq!(tree.get(v), Some(v));
        }
        let absent: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .take(1000)
            .collect();
        for v in &absent {
            assert_eq!(tree.get(v), None);
        }
    });
}

#[test]
fn extremes_match_sorted_input() {
    with_tree_and_generator(|mut tree, mut gen| {
        let mut values: Vec<_> = std::iter::repeat_with(|| gen.next()).take(1000).collect();
        for v in values.clone() {
            let _ignore = tree.insert(v);
        }
        values.sort_unstable();
        assert_eq!(tree.min(), values.first());
        assert_eq!(tree.max(), values.last());
    });
}

#[test]
fn reversed_comparator_flips_extremes() {
    let mut gen = ValueGenerator::new([7; 32]);
    let mut tree = OrderTree::new(|a: &i32, b: &i32| b.cmp(a));
    let mut values: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
        .take(500)
        .collect();
    for v in values.clone() {
        let _ignore = tree.insert(v);
    }
    tree.check_rb_properties();
    values.sort_unstable();
    assert_eq!(tree.min(), values.last());
    assert_eq!(tree.max(), values.first());
    for v in &values {
        assert_eq!(tree.get(v), Some(v));
    }
}

#[test]
fn insert_returns_index_of_stored_node() {
    let mut tree = OrderTree::natural();
    let idx = tree.insert(42).unwrap();
    assert_eq!(tree.value_at(idx), Some(&42));
    assert!(tree.is_black(idx));

    let idx = tree.insert(7).unwrap();
    assert_eq!(tree.value_at(idx), Some(&7));
    assert!(tree.is_red(idx));
    assert_eq!(tree.value_at(NodeIndex::end()), None);
}

#[test]
fn index_exhaustion_leaves_tree_untouched() {
    let mut tree: OrderTree<i32, fn(&i32, &i32) -> Ordering, u16> =
        OrderTree::with_capacity(i32::cmp, 0);
    // slot 0 is the sentinel, u16::MAX is the exhaustion sentinel
    let capacity = usize::from(u16::MAX) - 1;
    for v in 0..capacity {
        assert!(tree.insert(v as i32).is_some());
    }
    assert_eq!(tree.len(), capacity);

    assert_eq!(tree.insert(-1), None);
    assert_eq!(tree.len(), capacity);
    assert_eq!(tree.nodes.len(), capacity + 1);
    assert_eq!(tree.min(), Some(&0));
    tree.check_rb_properties();
}

#[test]
fn usize_indexed_tree_skips_exhaustion_check() {
    let mut tree: OrderTree<i32, fn(&i32, &i32) -> Ordering, usize> =
        OrderTree::with_capacity(i32::cmp, 64);
    for v in [4, 2, 6, 0, 3, 5, 8, 1, 7] {
        assert!(tree.insert(v).is_some());
    }
    assert_eq!(tree.len(), 9);
    assert_eq!(tree.min(), Some(&0));
    assert_eq!(tree.max(), Some(&8));
    tree.check_rb_properties();
}

#[test]
fn order_tree_clear_is_ok() {
    let mut tree = OrderTree::natural();
    let _ignore = tree.insert(1);
    let _ignore = tree.insert(2);
    let _ignore = tree.insert(3);
    assert_eq!(tree.len(), 3);
    tree.clear();
    assert_eq!(tree.len(), 0);
    assert!(tree.is_empty());
    assert_eq!(tree.nodes.len(), 1);
    assert!(tree.nodes[0].is_sentinel());

    let _ignore = tree.insert(9);
    assert_eq!(tree.min(), Some(&9));
}

struct DropCounter {
    key: i32,
    drops: Rc<Cell<usize>>,
}

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

#[test]
fn stored_values_are_dropped_exactly_once_on_teardown() {
    let drops = Rc::new(Cell::new(0));
    {
        let mut tree = OrderTree::new(|a: &DropCounter, b: &DropCounter| a.key.cmp(&b.key));
        for key in [3, 1, 4, 1, 5] {
            let _ignore = tree.insert(DropCounter {
                key,
                drops: Rc::clone(&drops),
            });
        }
        assert_eq!(drops.get(), 0);
    }
    assert_eq!(drops.get(), 5);
}

#[test]
fn clear_drops_stored_values() {
    let drops = Rc::new(Cell::new(0));
    let mut tree = OrderTree::new(|a: &DropCounter, b: &DropCounter| a.key.cmp(&b.key));
    for key in [2, 1, 3] {
        let _ignore = tree.insert(DropCounter {
            key,
            drops: Rc::clone(&drops),
        });
    }
    tree.clear();
    assert_eq!(drops.get(), 3);
}

#[test]
fn tagged_values_order_under_total_cmp() {
    let mut tree = OrderTree::new(Value::total_cmp);
    let _ignore = tree.insert(Value::from("beta"));
    let _ignore = tree.insert(Value::from(10i64));
    let _ignore = tree.insert(Value::from(2.5f64));
    let _ignore = tree.insert(Value::from(vec![0u8, 1]));
    let _ignore = tree.insert(Value::from("alpha"));

    assert_eq!(tree.len(), 5);
    assert_eq!(tree.min(), Some(&Value::Int(10)));
    assert_eq!(tree.max(), Some(&Value::Blob(vec![0, 1])));
    assert_eq!(
        tree.get(&Value::from("alpha")).and_then(Value::as_text),
        Some("alpha")
    );
    tree.check_rb_properties();
}

#[test]
fn default_tree_uses_natural_order() {
    let mut tree: OrderTree<u32, _> = OrderTree::default();
    let _ignore = tree.insert(3);
    let _ignore = tree.insert(1);
    assert_eq!(tree.min(), Some(&1));
}

#[cfg(feature = "graphviz")]
#[test]
fn order_tree_draw_is_ok() {
    let mut tree = OrderTree::natural();
    for v in [4, 2, 6, 0, 3, 5, 8, 1, 7] {
        let _ignore = tree.insert(v);
    }

    let path = std::env::temp_dir().join("order_tree_test.dot");
    tree.draw(&path).unwrap();
    let dot = std::fs::read_to_string(&path).unwrap();
    assert!(dot.starts_with("digraph"));
    assert!(dot.contains("fillcolor=black"));

    tree.draw_without_value(&path).unwrap();
}
