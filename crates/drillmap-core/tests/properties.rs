//! Property tests for inference and aggregation.

use proptest::prelude::*;

use drillmap_core::{NoNames, aggregate, infer_common_prefix, total};
use drillmap_model::{
    ADCODE_LENGTH, DataRecord, Dataset, MAX_AGGREGATION_DEPTH, RegionCode, RegionPrefix,
};

// -- Strategy helpers --

/// Codes drawn from a small space so that prefixes collide often.
fn arb_code() -> impl Strategy<Value = RegionCode> {
    (1u8..4, 1u8..4, 1u8..4)
        .prop_map(|(p, c, d)| RegionCode::new(format!("{p:02}{c:02}{d:02}")).unwrap())
}

/// Integer-valued amounts keep sums exact regardless of addition order.
fn arb_record() -> impl Strategy<Value = DataRecord> {
    (arb_code(), -1_000i32..1_000)
        .prop_map(|(code, value)| DataRecord::new(code, f64::from(value)).unwrap())
}

fn arb_dataset() -> impl Strategy<Value = Dataset> {
    prop::collection::vec(arb_record(), 0..40).prop_map(Dataset::new)
}

fn arb_prefix() -> impl Strategy<Value = RegionPrefix> {
    (arb_code(), prop_oneof![Just(0usize), Just(2), Just(4), Just(6)])
        .prop_map(|(code, len)| code.truncated(len))
}

proptest! {
    #[test]
    fn aggregation_conserves_total(data in arb_dataset(), prefix in arb_prefix()) {
        let expected: f64 = data.within(&prefix).map(|r| r.value).sum();
        let out = aggregate(&prefix, &data, &NoNames);
        prop_assert_eq!(total(&out), expected);
    }

    #[test]
    fn county_level_is_one_to_one(data in arb_dataset(), prefix in arb_prefix()) {
        prop_assume!(prefix.child_len() > MAX_AGGREGATION_DEPTH);
        let out = aggregate(&prefix, &data, &NoNames);
        prop_assert_eq!(out.len(), data.within(&prefix).count());
    }

    #[test]
    fn grouped_levels_have_one_entry_per_child(data in arb_dataset(), prefix in arb_prefix()) {
        prop_assume!(prefix.child_len() <= MAX_AGGREGATION_DEPTH);
        let out = aggregate(&prefix, &data, &NoNames);
        let mut children: Vec<RegionPrefix> = data
            .within(&prefix)
            .map(|r| r.code.truncated(prefix.child_len()))
            .collect();
        children.sort();
        children.dedup();
        prop_assert_eq!(out.len(), children.len());
        for entry in &out {
            prop_assert_eq!(entry.prefix.len(), prefix.child_len());
            prop_assert!(prefix.matches(&entry.code));
        }
    }

    #[test]
    fn inferred_prefix_is_longest_shared(data in arb_dataset()) {
        let inferred = infer_common_prefix(&data);
        prop_assert!(data.iter().all(|r| inferred.matches(&r.code)));
        if !data.is_empty() && inferred.len() < ADCODE_LENGTH {
            let first = &data.records()[0].code;
            let longer = first.truncated(inferred.len() + 2);
            prop_assert!(!data.iter().all(|r| longer.matches(&r.code)));
        }
    }

    #[test]
    fn shared_prefix_of_length_k_is_found(
        prefix_len in prop_oneof![Just(2usize), Just(4)],
        tails in prop::collection::vec(1u8..9, 2..10),
    ) {
        // Every code shares the first `prefix_len` digits and the next segment
        // differs between the first two codes.
        let base = "110101";
        let mut codes: Vec<String> = Vec::new();
        for (i, tail) in tails.iter().enumerate() {
            let segment = if i == 0 { 1 } else if i == 1 { 2 } else { *tail };
            let mut code = base[..prefix_len].to_string();
            code.push_str(&format!("{segment:02}"));
            while code.len() < ADCODE_LENGTH {
                code.push('0');
            }
            codes.push(code);
        }
        let data: Dataset = codes
            .into_iter()
            .map(|c| DataRecord::new(RegionCode::new(c).unwrap(), 1.0).unwrap())
            .collect();
        let inferred = infer_common_prefix(&data);
        prop_assert_eq!(inferred.as_str(), &base[..prefix_len]);
    }
}

#[test]
fn disjoint_full_codes_share_nothing() {
    let data: Dataset = ["110101", "310101"]
        .into_iter()
        .map(|c| DataRecord::new(RegionCode::new(c).unwrap(), 1.0).unwrap())
        .collect();
    assert_eq!(infer_common_prefix(&data), RegionPrefix::country());
}
