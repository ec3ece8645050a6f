use rb_order_tree::{OrderTree, Value};

fn main() {
    let mut tree = OrderTree::new(Value::total_cmp);

    tree.insert(Value::from("carol"));
    tree.insert(Value::from(13i64));
    tree.insert(Value::from(2.5f64));
    tree.insert(Value::from("alice"));
    tree.insert(Value::from(vec![0xde, 0xad]));

    // kinds rank None < Int < Float < Text < Blob
    assert_eq!(tree.min(), Some(&Value::Int(13)));
    assert_eq!(tree.max(), Some(&Value::Blob(vec![0xde, 0xad])));

    let probe = Value::from("alice");
    let found = tree.get(&probe).and_then(Value::as_text);
    assert_eq!(found, Some("alice"));

    println!("{} tagged values, min = {:?}", tree.len(), tree.min());
}
