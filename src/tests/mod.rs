use crate::mapping::{Mapping, Ordinal};
use crate::properties::*;
use crate::testing::{collation, init_logger, run_satisfies_tests};

// emp(empno, deptno, empid, name)
const EMPNO: Ordinal = 0;
const DEPTNO: Ordinal = 1;
const EMPID: Ordinal = 2;
const NAME: Ordinal = 3;

fn asc(ordinal: Ordinal) -> FieldCollation {
    FieldCollation::new(ordinal)
}

#[test]
fn test_collations() {
    let text = include_str!("collation_tests.yaml");
    run_satisfies_tests(text);
}

#[test]
fn test_reduced_sort_satisfies_original_requirement() {
    init_logger();

    // ORDER BY deptno, empid where empid is determined by deptno.
    let original = Collation::new(vec![asc(DEPTNO), asc(EMPID)]);
    let sort = original.reduce(|retained, key| key.ordinal() == EMPID && retained.contains(&asc(DEPTNO)));

    assert_eq!(sort, Collation::reduced(vec![asc(DEPTNO)], vec![asc(DEPTNO), asc(EMPID)]));
    assert_eq!(sort.keys(), &[asc(DEPTNO)]);
    assert_eq!(sort.original_keys(), original.keys());

    assert!(sort.satisfies(&Collation::of(&[DEPTNO])), "deptno");
    assert!(sort.satisfies(&original), "deptno, empid");
    assert!(!sort.satisfies(&Collation::of(&[EMPID])), "empid");
    assert!(!sort.satisfies(&Collation::of(&[DEPTNO, NAME])), "deptno, name");

    assert_ne!(sort, Collation::of(&[DEPTNO]), "reduced is not equal to plain");
}

#[test]
fn test_reduced_collation_through_projections() {
    init_logger();

    let sort = Collation::reduced(vec![asc(DEPTNO)], vec![asc(DEPTNO), asc(EMPID)]);
    let provided = TraitSet::new_with_collation(sort.clone());

    // SELECT empno, deptno, empid, name FROM emp
    let identity = Mapping::identity(4);
    let result = provided.remap(&identity);
    assert!(Collation::ptr_eq(&result.collations()[0], &sort), "same collation");

    // SELECT empid, deptno FROM emp
    let swap = Mapping::projection(4, &[EMPID, DEPTNO]).unwrap();
    let result = provided.remap(&swap);
    assert_eq!(format!("{}", result), "{ collations: [1] original=[1, 0] }");
    assert!(result.satisfies(&TraitSet::new_with_collation(collation("[1, 0]"))));

    // SELECT deptno, name FROM emp
    let drop_empid = Mapping::projection(4, &[DEPTNO, NAME]).unwrap();
    let result = provided.remap(&drop_empid);
    assert_eq!(format!("{}", result), "{ collations: [0] }");
    assert!(!result.collations()[0].is_reduced(), "plain");

    // SELECT name, empno FROM emp
    let drop_deptno = Mapping::projection(4, &[NAME, EMPNO]).unwrap();
    let result = provided.remap(&drop_deptno);
    assert!(result.is_empty(), "no collations: {}", result);
}

#[test]
fn test_merge_join_inputs() {
    init_logger();

    // emp JOIN dept ON emp.deptno = dept.deptno
    // Output columns: emp(0..4) dept(4..6)
    let emp = Collation::reduced(vec![asc(DEPTNO)], vec![asc(DEPTNO), asc(EMPID)]);
    let dept = Collation::of(&[0]);

    let output = TraitSet::new_with_collation(emp.clone()).with_collation(dept.shift(4));

    assert!(Collation::ptr_eq(&output.collations()[0], &emp), "left side is not shifted");
    assert_eq!(output.collations()[1], Collation::of(&[4]));

    let required = TraitSet::new_with_collation(Collation::of(&[DEPTNO, EMPID])).with_collation(Collation::of(&[4]));
    assert!(output.satisfies(&required));

    let required = TraitSet::new_with_collation(Collation::of(&[4, DEPTNO]));
    assert!(!output.satisfies(&required));
}

#[test]
fn test_trait_kinds_do_not_satisfy_each_other() {
    let traits: Vec<PhysicalTrait> = vec![
        collation("[0]").into(),
        collation("[0] original=[0, 1]").into(),
        Partitioning::Hash(vec![0]).into(),
        Partitioning::Random.into(),
    ];

    for provided in traits.iter() {
        for required in traits.iter() {
            if provided.kind() != required.kind() {
                assert!(!provided.satisfies(required), "{} must not satisfy {}", provided, required);
            }
        }
        assert!(provided.satisfies(provided), "{} must satisfy itself", provided);
    }
}

#[test]
fn test_trait_contract() {
    fn expect_contract<T: RelTrait>(value: T, kind: TraitKind) {
        assert_eq!(value.kind(), kind, "{}", value);
        assert!(RelTrait::satisfies(&value, &value), "{} must satisfy itself", value);
        assert_eq!(RelTrait::remap(&value, &Mapping::identity(4)), value, "identity mapping: {}", value);
    }

    expect_contract(collation("[1, 2]"), TraitKind::Collation);
    expect_contract(collation("[1] original=[1, 2]"), TraitKind::Collation);
    expect_contract(Partitioning::Range(vec![3]), TraitKind::Partitioning);
}
