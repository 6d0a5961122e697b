//! Container-level behavior: extension handling, culture inference,
//! write-back, and the JSON cache.

use locrescodec::traits::Parser;
use locrescodec::{
    Codec, Entry, Error, MetadataDescriptor, MetadataVersion, ResourceDictionary,
    ResourceVersion,
};

fn sample_dictionary() -> ResourceDictionary {
    let mut dictionary = ResourceDictionary::new(ResourceVersion::LATEST);
    dictionary.insert_entry("menu", Entry::new("title", "Päävalikko", 0x11111111));
    dictionary.insert_entry("menu", Entry::new("exit", "Poistu", 0x22222222));
    dictionary
}

fn sample_descriptor() -> MetadataDescriptor {
    MetadataDescriptor {
        version: MetadataVersion::V1,
        native_culture: "en".to_string(),
        native_resource_path: "Game/Game.locres".to_string(),
        compiled_cultures: Some(vec!["en".to_string(), "fi".to_string()]),
    }
}

#[test]
fn reads_a_target_and_infers_the_culture_from_the_path() {
    let tmp = tempfile::tempdir().unwrap();
    let culture_dir = tmp.path().join("fi");
    std::fs::create_dir_all(&culture_dir).unwrap();
    let resource_path = culture_dir.join("Game.locres");
    let metadata_path = tmp.path().join("Game.locmeta");

    sample_dictionary().write_to(&resource_path).unwrap();
    sample_descriptor().write_to(&metadata_path).unwrap();

    let mut codec = Codec::new();
    codec.read_file_by_extension(&metadata_path, None).unwrap();
    codec.read_file_by_extension(&resource_path, None).unwrap();

    assert_eq!(codec.resources.len(), 1);
    let resource = codec.get_by_culture("fi").expect("culture inferred from directory");
    assert_eq!(
        resource.dictionary.find_translation("menu", "title"),
        Some("Päävalikko")
    );
    assert_eq!(
        codec.metadata.as_ref().unwrap().descriptor.native_culture,
        "en"
    );
}

#[test]
fn explicit_culture_wins_over_inference() {
    let tmp = tempfile::tempdir().unwrap();
    let culture_dir = tmp.path().join("fi");
    std::fs::create_dir_all(&culture_dir).unwrap();
    let resource_path = culture_dir.join("Game.locres");
    sample_dictionary().write_to(&resource_path).unwrap();

    let mut codec = Codec::new();
    codec
        .read_file_by_extension(&resource_path, Some("fi-FI".to_string()))
        .unwrap();

    assert!(codec.get_by_culture("fi-FI").is_some());
    assert!(codec.get_by_culture("fi").is_none());
}

#[test]
fn unknown_extension_is_rejected() {
    let mut codec = Codec::new();
    let result = codec.read_file_by_extension("Localizable.strings", None);
    assert!(matches!(result, Err(Error::InvalidExtension(_))));
}

#[test]
fn extension_is_validated_before_content() {
    let tmp = tempfile::tempdir().unwrap();
    // Valid resource content behind the wrong extension.
    let path = tmp.path().join("Game.locmeta");
    std::fs::write(&path, [0u8; 4]).unwrap();

    let result = ResourceDictionary::read_from(&path);
    assert!(matches!(result, Err(Error::InvalidExtension(_))));

    // And the write side guards the same way, before touching the file.
    let result = sample_dictionary().write_to(tmp.path().join("Game.txt"));
    assert!(matches!(result, Err(Error::InvalidExtension(_))));
}

#[test]
fn write_to_file_writes_everything_back() {
    let tmp = tempfile::tempdir().unwrap();
    let culture_dir = tmp.path().join("fi");
    std::fs::create_dir_all(&culture_dir).unwrap();
    let resource_path = culture_dir.join("Game.locres");
    let metadata_path = tmp.path().join("Game.locmeta");

    sample_dictionary().write_to(&resource_path).unwrap();
    sample_descriptor().write_to(&metadata_path).unwrap();

    let mut codec = Codec::new();
    codec.read_file_by_extension(&metadata_path, None).unwrap();
    codec.read_file_by_extension(&resource_path, None).unwrap();

    // Mutate, write back, and reload through a fresh codec.
    codec
        .get_mut_by_culture("fi")
        .unwrap()
        .dictionary
        .insert_entry("menu", Entry::new("title", "Valikko", 0x11111111));
    codec.write_to_file().unwrap();

    let reloaded = ResourceDictionary::read_from(&resource_path).unwrap();
    assert_eq!(reloaded.find_translation("menu", "title"), Some("Valikko"));
}

#[test]
fn cache_roundtrip_preserves_the_collection() {
    let tmp = tempfile::tempdir().unwrap();
    let culture_dir = tmp.path().join("fi");
    std::fs::create_dir_all(&culture_dir).unwrap();
    let resource_path = culture_dir.join("Game.locres");
    let metadata_path = tmp.path().join("Game.locmeta");

    sample_dictionary().write_to(&resource_path).unwrap();
    sample_descriptor().write_to(&metadata_path).unwrap();

    let mut codec = Codec::new();
    codec.read_file_by_extension(&metadata_path, None).unwrap();
    codec.read_file_by_extension(&resource_path, None).unwrap();

    let cache_path = tmp.path().join("cache").join("codec.json");
    codec.cache_to_file(&cache_path).unwrap();
    let loaded = Codec::load_from_file(&cache_path).unwrap();

    assert_eq!(loaded, codec);
}

#[test]
fn missing_file_propagates_io_error() {
    let result = ResourceDictionary::read_from("does/not/exist.locres");
    assert!(matches!(result, Err(Error::Io(_))));
}
