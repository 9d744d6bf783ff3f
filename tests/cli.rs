//! Command Dispatcher Integration Tests
//!
//! Invocations go through clap and `Cli::execute` against a temporary
//! library given on the command line.

use std::path::Path;

use clap::Parser;
use soundman::catalog::Catalog;
use soundman::cli::Cli;
use tempfile::TempDir;

fn cli(library: &Path, database: &Path, args: &[&str]) -> Cli {
    let mut argv = vec![
        "soundman".to_string(),
        "--library".to_string(),
        library.display().to_string(),
        "--database".to_string(),
        database.display().to_string(),
    ];
    argv.extend(args.iter().map(|a| a.to_string()));
    Cli::try_parse_from(argv).unwrap()
}

fn write_wav(path: &Path, level: i16) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 8000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for _ in 0..800 {
        writer.write_sample(level).unwrap();
    }
    writer.finalize().unwrap();
}

#[tokio::test]
async fn test_wrong_arity_does_not_open_catalog() {
    let temp = TempDir::new().unwrap();
    let library = temp.path().join("library");
    let database = temp.path().join("db").join("sounds.sqlite");

    for args in [
        vec!["add", "only-one.wav"],
        vec!["link", "a.wav", "abc"],
        vec!["rename", "abc"],
        vec!["tag", "abc"],
        vec!["info"],
        vec!["ls", "a", "b"],
        vec!["frobnicate"],
        vec![],
    ] {
        cli(&library, &database, &args).execute().await.unwrap();
    }

    assert!(!database.exists());
    assert!(!library.exists());
}

#[tokio::test]
async fn test_add_twice_is_not_an_error() {
    let temp = TempDir::new().unwrap();
    let database = temp.path().join("sounds.sqlite");
    let file = temp.path().join("180101-123456.wav");
    write_wav(&file, 1);
    let file_arg = file.display().to_string();

    cli(temp.path(), &database, &["add", &file_arg, "My sound", "Zurich"])
        .execute()
        .await
        .unwrap();
    cli(temp.path(), &database, &["add", &file_arg, "My sound", "Zurich"])
        .execute()
        .await
        .unwrap();

    let catalog = Catalog::open(&database).unwrap();
    assert_eq!(catalog.count().unwrap(), 1);
}

#[tokio::test]
async fn test_tag_and_rename_through_cli() {
    let temp = TempDir::new().unwrap();
    let database = temp.path().join("sounds.sqlite");
    let file = temp.path().join("180101-123456.wav");
    write_wav(&file, 2);
    let file_arg = file.display().to_string();

    cli(temp.path(), &database, &["add", &file_arg, "Tram", "Zurich"])
        .execute()
        .await
        .unwrap();
    cli(temp.path(), &database, &["tag", &file_arg, "street", "night"])
        .execute()
        .await
        .unwrap();
    cli(temp.path(), &database, &["rename", &file_arg, "Night tram"])
        .execute()
        .await
        .unwrap();

    let catalog = Catalog::open(&database).unwrap();
    let sound = catalog.find_by_prefix_or_path(&file_arg).unwrap();
    assert_eq!(sound.name, "Night tram");
    assert_eq!(sound.tags, vec!["night", "street"]);
}

#[tokio::test]
async fn test_unknown_reference_is_an_error() {
    let temp = TempDir::new().unwrap();
    let database = temp.path().join("sounds.sqlite");

    let result = cli(temp.path(), &database, &["info", "abcdef"]).execute().await;
    assert!(result.is_err());
}
