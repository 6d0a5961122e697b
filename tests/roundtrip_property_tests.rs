use std::collections::BTreeMap;
use std::path::Path;

use locrescodec::traits::Parser;
use locrescodec::{
    Entry, MetadataDescriptor, MetadataVersion, ResourceDictionary, ResourceVersion,
};
use proptest::prelude::*;

fn key_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_]{0,15}").expect("valid key regex")
}

fn value_strategy() -> impl Strategy<Value = String> {
    // A mix of ASCII and non-ASCII so both string encodings get exercised.
    proptest::string::string_regex("[A-Za-z0-9äöéß€ _\\-\\.,!\\?]{0,30}")
        .expect("valid value regex")
}

fn culture_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z]{2}(-[A-Z]{2})?").expect("valid culture regex")
}

fn namespace_dataset_strategy()
-> impl Strategy<Value = BTreeMap<String, BTreeMap<String, (String, u32)>>> {
    prop::collection::btree_map(
        key_strategy(),
        prop::collection::btree_map(key_strategy(), (value_strategy(), any::<u32>()), 1..6),
        1..4,
    )
}

fn version_strategy() -> impl Strategy<Value = ResourceVersion> {
    prop_oneof![
        Just(ResourceVersion::Legacy),
        Just(ResourceVersion::Compact),
        Just(ResourceVersion::Optimized),
        Just(ResourceVersion::CityHash),
    ]
}

fn build_dictionary(
    version: ResourceVersion,
    dataset: &BTreeMap<String, BTreeMap<String, (String, u32)>>,
) -> ResourceDictionary {
    let mut dictionary = ResourceDictionary::new(version);
    for (namespace, entries) in dataset {
        for (key, (translation, source_hash)) in entries {
            dictionary.insert_entry(
                namespace,
                Entry::new(key.clone(), translation.clone(), *source_hash),
            );
        }
    }
    dictionary
}

fn write_and_read_back(
    dictionary: &ResourceDictionary,
    path: &Path,
) -> Result<ResourceDictionary, TestCaseError> {
    dictionary
        .write_to(path)
        .map_err(|e| TestCaseError::fail(e.to_string()))?;
    ResourceDictionary::read_from(path).map_err(|e| TestCaseError::fail(e.to_string()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn resource_roundtrip_preserves_the_dictionary(
        version in version_strategy(),
        dataset in namespace_dataset_strategy(),
    ) {
        let tmp = tempfile::tempdir().map_err(|e| TestCaseError::fail(e.to_string()))?;
        let path = tmp.path().join("roundtrip.locres");

        let original = build_dictionary(version, &dataset);
        let decoded = write_and_read_back(&original, &path)?;

        prop_assert_eq!(decoded, original);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn resource_roundtrip_survives_a_version_upgrade(
        dataset in namespace_dataset_strategy(),
    ) {
        let tmp = tempfile::tempdir().map_err(|e| TestCaseError::fail(e.to_string()))?;
        let legacy_path = tmp.path().join("legacy.locres");
        let upgraded_path = tmp.path().join("upgraded.locres");

        let original = build_dictionary(ResourceVersion::Legacy, &dataset);
        original.write_to(&legacy_path).map_err(|e| TestCaseError::fail(e.to_string()))?;

        locrescodec::convert(&legacy_path, &upgraded_path, ResourceVersion::LATEST)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        let mut upgraded = ResourceDictionary::read_from(&upgraded_path)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(upgraded.version, ResourceVersion::CityHash);

        // Only the wire version may differ.
        upgraded.version = ResourceVersion::Legacy;
        prop_assert_eq!(upgraded, original);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn metadata_roundtrip_preserves_the_descriptor(
        native in culture_strategy(),
        compiled in prop::collection::vec(culture_strategy(), 0..5),
        v1 in any::<bool>(),
    ) {
        let tmp = tempfile::tempdir().map_err(|e| TestCaseError::fail(e.to_string()))?;
        let path = tmp.path().join("Game.locmeta");

        let original = MetadataDescriptor {
            version: if v1 { MetadataVersion::V1 } else { MetadataVersion::V0 },
            native_culture: native.clone(),
            native_resource_path: format!("Game/{native}/Game.locres"),
            compiled_cultures: if v1 { Some(compiled) } else { None },
        };

        original.write_to(&path).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let decoded = MetadataDescriptor::read_from(&path)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        prop_assert_eq!(decoded, original);
    }
}
