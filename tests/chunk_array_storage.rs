use cmap_core::prelude::*;
use proptest::prelude::*;

type Small = ChunkArray<i64, 128>;

#[test]
fn get_after_set_at_chunk_boundary() {
    let mut a = Small::new();
    a.ensure_capacity(128);
    a.set(127, -127);
    a.set(128, 128);
    assert_eq!(a.nb_chunks(), 2);
    assert_eq!(*a.get(127), -127);
    assert_eq!(*a.get(128), 128);
    assert!(a.validate_invariants().is_ok());
}

#[test]
fn bool_array_boundary() {
    let mut b = ChunkArrayBool::<128>::new();
    b.set_true(127);
    b.set_true(128);
    assert!(b[127] && b[128]);
    b.set_false(127);
    assert!(!b[127] && b[128]);
    b.all_false();
    assert_eq!(b.count_true(), 0);
}

#[test]
fn attribute_values_follow_cells() {
    let mut map = MapBaseData::new();
    map.container_mut::<Vertex2>()
        .add_attribute::<[f64; 3]>("position")
        .unwrap();
    let cells: Vec<Cell<Vertex2>> = (0..5000).map(|_| map.add_cell()).collect();
    for (i, &c) in cells.iter().enumerate() {
        let line = map.embedding(c) as usize;
        map.container_mut::<Vertex2>()
            .attribute_mut::<[f64; 3]>("position")
            .unwrap()
            .set(line, [i as f64, 0.0, 1.0]);
    }
    let positions = map
        .container::<Vertex2>()
        .attribute::<[f64; 3]>("position")
        .unwrap();
    assert_eq!(positions.nb_chunks(), 2);
    assert_eq!(positions[map.embedding(cells[4500]) as usize][0], 4500.0);

    map.remove_cell(cells[10]);
    let reused: Cell<Vertex2> = map.add_cell();
    let line = map.embedding(reused) as usize;
    let positions = map
        .container::<Vertex2>()
        .attribute::<[f64; 3]>("position")
        .unwrap();
    assert_eq!(positions[line], [0.0; 3]);
    assert!(map.container::<Vertex2>().validate_invariants().is_ok());
}

#[test]
fn wrong_attribute_type_is_an_error() {
    let mut c = AttributeContainer::new(OrbitKind::Face2);
    c.add_attribute::<u32>("label").unwrap();
    let err = c.attribute::<i32>("label").unwrap_err();
    assert_eq!(
        err,
        CmapError::AttributeTypeMismatch {
            name: "label".into(),
            expected: "i32",
            found: "u32",
        }
    );
}

#[test]
fn json_roundtrip_checks_chunk_size() {
    let mut a = ChunkArray::<u16, 64>::with_capacity(64);
    a.set(63, 7);
    let s = serde_json::to_string(&a).unwrap();
    let back: ChunkArray<u16, 64> = serde_json::from_str(&s).unwrap();
    assert_eq!(back[63], 7);
    let tampered = s.replacen("\"chunk_size\":64", "\"chunk_size\":32", 1);
    assert!(serde_json::from_str::<ChunkArray<u16, 64>>(&tampered).is_err());
}

proptest! {
    #[test]
    fn get_returns_last_set(writes in prop::collection::vec((0usize..1000, any::<i64>()), 1..200)) {
        let mut a = Small::new();
        let mut model = std::collections::HashMap::new();
        for &(i, v) in &writes {
            a.ensure_capacity(i);
            a.set(i, v);
            model.insert(i, v);
        }
        for (&i, &v) in &model {
            prop_assert_eq!(*a.get(i), v);
        }
        let max = writes.iter().map(|&(i, _)| i).max().unwrap();
        prop_assert_eq!(a.nb_chunks(), max / 128 + 1);
    }

    #[test]
    fn addresses_are_stable_under_growth(index in 0usize..256, grow_to in 3usize..40) {
        let mut a = Small::with_capacity(256);
        a.set(index, 1);
        let before: *const i64 = a.get(index);
        a.set_nb_chunks(grow_to);
        prop_assert_eq!(before, a.get(index) as *const i64);
    }
}
