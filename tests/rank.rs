mod common;

use common::raw_table;
use mbti_atlas::{
    category::Category,
    rank::{TOP_N, rank, reshape},
    validate::validate,
};
use proptest::prelude::*;

fn ranked_keys(csv: &str, category: Category) -> Vec<(String, usize, f64)> {
    let validation = validate(&raw_table(csv)).unwrap();
    rank(&validation.table, &validation.categories)
        .into_iter()
        .filter(|record| record.category == category)
        .map(|record| (record.key, record.rank, record.value))
        .collect()
}

#[test]
fn three_row_example_ranks_descending() {
    let ranked = ranked_keys("Country,INFJ\nA,0.3\nB,0.5\nC,0.1\n", Category::Infj);
    assert_eq!(
        ranked,
        vec![
            ("B".to_string(), 1, 0.5),
            ("A".to_string(), 2, 0.3),
            ("C".to_string(), 3, 0.1),
        ]
    );
}

#[test]
fn reshape_keeps_missing_values() {
    let validation = validate(&raw_table("Country,INFJ,ISFJ\nA,0.3,\nB,,0.2\n")).unwrap();
    let long = reshape(&validation.table, &validation.categories);
    assert_eq!(long.len(), 4);
    assert_eq!(long.iter().filter(|r| r.value.is_none()).count(), 2);
    assert_eq!(long[0].category, Category::Infj);
    assert_eq!(long[2].category, Category::Isfj);
}

#[test]
fn sample_fixture_rankings() {
    let csv = std::fs::read_to_string(common::fixture_path(common::SAMPLE_FILE)).unwrap();

    let infj = ranked_keys(&csv, Category::Infj);
    assert_eq!(infj.len(), TOP_N);
    assert_eq!(infj[0].0, "Denmark");
    assert_eq!(infj[1].0, "Finland");
    assert_eq!(infj[9].0, "Argentina");

    let enfp = ranked_keys(&csv, Category::Enfp);
    assert_eq!(enfp.len(), TOP_N);
    assert!(enfp.iter().all(|(key, _, _)| key != "Egypt"));
    assert_eq!(enfp[0].0, "Brazil");

    let istj = ranked_keys(&csv, Category::Istj);
    let keys = istj.iter().map(|(key, _, _)| key.as_str()).collect::<Vec<_>>();
    assert_eq!(
        keys,
        [
            "Finland", "Germany", "Australia", "Denmark", "Albania", "Japan", "Canada", "Chile",
            "Argentina", "Brazil"
        ]
    );
    assert!((istj[0].2 - 0.16).abs() < 1e-12);
}

#[test]
fn ranking_is_repeatable() {
    let csv = std::fs::read_to_string(common::fixture_path(common::SAMPLE_FILE)).unwrap();
    let validation = validate(&raw_table(&csv)).unwrap();
    let first = rank(&validation.table, &validation.categories);
    let second = rank(&validation.table, &validation.categories);
    assert_eq!(first, second);
}

fn table_strategy() -> impl Strategy<Value = Vec<Option<u8>>> {
    proptest::collection::vec(proptest::option::weighted(0.8, 0u8..20), 1..30)
}

proptest! {
    #[test]
    fn rank_invariants_hold(cells in table_strategy()) {
        prop_assume!(cells.iter().any(Option::is_some));
        let mut csv = String::from("Country,INTJ\n");
        for (idx, cell) in cells.iter().enumerate() {
            let value = cell.map(|v| format!("{}", f64::from(v) / 100.0)).unwrap_or_default();
            csv.push_str(&format!("k{idx},{value}\n"));
        }
        let ranked = ranked_keys(&csv, Category::Intj);
        let present = cells.iter().flatten().count();

        prop_assert_eq!(ranked.len(), present.min(TOP_N));
        let ranks = ranked.iter().map(|(_, rank, _)| *rank).collect::<Vec<_>>();
        prop_assert_eq!(ranks, (1..=ranked.len()).collect::<Vec<_>>());

        let max = cells.iter().flatten().max().copied().unwrap();
        let first_max = cells.iter().position(|c| *c == Some(max)).unwrap();
        prop_assert_eq!(&ranked[0].0, &format!("k{first_max}"));

        for pair in ranked.windows(2) {
            prop_assert!(pair[0].2 >= pair[1].2);
            if pair[0].2 == pair[1].2 {
                let a: usize = pair[0].0[1..].parse().unwrap();
                let b: usize = pair[1].0[1..].parse().unwrap();
                prop_assert!(a < b);
            }
        }
    }
}
