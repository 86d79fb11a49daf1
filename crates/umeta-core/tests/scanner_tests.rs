use std::fs;
use std::path::Path;

use serde_json::Value;
use tempfile::TempDir;
use umeta_core::{
    JsonStore, ParserOptions, RecordStore, ScanConfig, ScanError, Scanner,
};

const CHARACTER_HEADER: &str = r#"#pragma once

// Playable character
UCLASS()
class GAME_API AHero : public ACharacter
{
    GENERATED_BODY()

    UPROPERTY(EditAnywhere, Category = "Stats")
    float Speed;

    UFUNCTION(BlueprintCallable)
    void Jump(float Height);

    UPROPERTY()
    int32 Broken = 3;
};
"#;

const ITEM_HEADER: &str = r#"USTRUCT(BlueprintType)
struct FItem
{
    UPROPERTY()
    FName Id;
};
"#;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn create_source_tree() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "Source/Game/Hero.h", CHARACTER_HEADER);
    write(root, "Source/Game/Items/Item.h", ITEM_HEADER);
    write(root, "Source/Game/Hero.cpp", "#include \"Hero.h\"\n");
    write(root, "Source/Intermediate/Hero.generated.h", ITEM_HEADER);
    temp_dir
}

fn read_array(path: &Path) -> Vec<Value> {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_collect_files_filters_extension_and_excludes() {
    let tree = create_source_tree();
    let scanner = Scanner::new();

    let files = scanner.collect_files(tree.path()).unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["Hero.h".to_string(), "Item.h".to_string()]);
}

#[test]
fn test_scan_persists_results() {
    let tree = create_source_tree();
    let out = TempDir::new().unwrap();
    let store = JsonStore::new(out.path());

    let stats = Scanner::new().scan(tree.path(), &store).unwrap();

    assert_eq!(stats.files, 2);
    assert_eq!(stats.containers, 2);
    assert_eq!(stats.properties, 2);
    assert_eq!(stats.functions, 1);
    assert_eq!(stats.failures, 1);
    assert_eq!(stats.errors, 0);
    assert!(stats.finished_at.is_some());

    let containers = read_array(&out.path().join("UClasses.json"));
    assert_eq!(containers.len(), 2);
    assert_eq!(containers[0]["declaredName"], "AHero");
    assert_eq!(containers[0]["functions"][0]["name"], "Jump");

    let failed = read_array(&out.path().join("fail").join("UProperty.json"));
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0]["reason"], "malformed_declaration");
}

#[test]
fn test_progress_called_per_file() {
    let tree = create_source_tree();
    let out = TempDir::new().unwrap();
    let store = JsonStore::new(out.path());

    let mut seen = Vec::new();
    Scanner::new()
        .scan_with_progress(tree.path(), &store, |path, stats| {
            seen.push((path.to_path_buf(), stats.files));
        })
        .unwrap();

    assert_eq!(seen.len(), 2);
    assert_eq!(seen[1].1, 2);
}

#[test]
fn test_custom_extensions() {
    let tree = create_source_tree();
    write(tree.path(), "Source/Game/Extra.hpp", ITEM_HEADER);

    let config = ScanConfig {
        extensions: vec!["hpp".to_string()],
        ..ScanConfig::default()
    };
    let scanner = Scanner::with_config(config, ParserOptions::default());

    let files = scanner.collect_files(tree.path()).unwrap();
    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with("Source/Game/Extra.hpp"));
}

#[test]
fn test_missing_source_dir() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope");
    let store = JsonStore::new(temp_dir.path());

    let result = Scanner::new().scan(&missing, &store);
    assert!(matches!(result, Err(ScanError::MissingSourceDir(_))));
}

#[test]
fn test_parse_file_does_not_persist() {
    let tree = create_source_tree();
    let scanner = Scanner::new();

    let outcome = scanner
        .parse_file(&tree.path().join("Source/Game/Items/Item.h"))
        .unwrap();
    assert_eq!(outcome.containers.len(), 1);
    assert_eq!(outcome.containers[0].properties[0].type_name.as_deref(), Some("FName"));
}

struct CountingStore {
    calls: std::cell::Cell<usize>,
}

impl RecordStore for CountingStore {
    fn append_containers(
        &self,
        _containers: &[umeta_core::ContainerRecord],
    ) -> Result<(), umeta_core::StorageError> {
        self.calls.set(self.calls.get() + 1);
        Ok(())
    }

    fn append_failures(
        &self,
        _failures: &[umeta_core::FailureRecord],
    ) -> Result<(), umeta_core::StorageError> {
        Ok(())
    }
}

#[test]
fn test_store_called_once_per_file() {
    let tree = create_source_tree();
    let store = CountingStore {
        calls: std::cell::Cell::new(0),
    };

    Scanner::new().scan(tree.path(), &store).unwrap();
    assert_eq!(store.calls.get(), 2);
}

#[test]
fn test_scan_files_uses_given_list() {
    let tree = create_source_tree();
    let out = TempDir::new().unwrap();
    let store = JsonStore::new(out.path());
    let scanner = Scanner::new();

    let files = scanner.collect_files(tree.path()).unwrap();
    let mut ticks = 0;
    let stats = scanner
        .scan_files(&files[..1], &store, |_, _| ticks += 1)
        .unwrap();

    assert_eq!(ticks, 1);
    assert_eq!(stats.files, 1);
    assert_eq!(stats.containers, 1);
    assert_eq!(read_array(&out.path().join("UClasses.json")).len(), 1);
}
