//! Generation of new migration version artifacts.
//!
//! `migrator create <description>` writes an empty migration source file
//! into this module's directory and registers it in `mod.rs`. Version
//! names are `m{YYYYMMDD}_{SEQ}_{slug}` where the date is the creation
//! date and the sequence number is global, so a newly generated version
//! always sorts after every existing one. The live database is never
//! touched; the new version takes effect on the next build of the tool.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors from version artifact generation.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The description contained no usable characters.
    #[error("description {0:?} produces an empty version name")]
    EmptyDescription(String),

    /// A version with this name already exists.
    #[error("migration {0} already exists")]
    Duplicate(String),

    /// The generated name would not sort after the current latest version.
    #[error("generated version {candidate} would not sort after latest {latest}; check the system clock")]
    OutOfOrder {
        /// Name that was about to be generated.
        candidate: String,
        /// Latest registered version.
        latest: String,
    },

    /// `mod.rs` does not contain the expected registration point.
    #[error("mod.rs is missing the `{0}` registration marker")]
    MissingMarker(&'static str),

    /// Filesystem failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Generates a new migration artifact in `dir` and registers it.
///
/// Returns the path of the written file.
pub fn write_migration(
    dir: &Path,
    description: &str,
    now: DateTime<Utc>,
) -> Result<PathBuf, GenerateError> {
    let slug = slugify(description);
    if slug.is_empty() {
        return Err(GenerateError::EmptyDescription(description.to_string()));
    }

    let existing = existing_versions(dir)?;
    let version = next_version(&existing, now, &slug)?;

    let path = dir.join(format!("{version}.rs"));
    if path.exists() {
        return Err(GenerateError::Duplicate(version));
    }

    fs::write(&path, TEMPLATE)?;
    if let Err(err) = register_in_module(&dir.join("mod.rs"), &version) {
        // failed registration: remove the file again
        let _ = fs::remove_file(&path);
        return Err(err);
    }

    Ok(path)
}

/// Reduces a free-form description to a version slug: lowercase ASCII
/// alphanumerics with single underscores between words.
#[must_use]
pub fn slugify(description: &str) -> String {
    let mut slug = String::with_capacity(description.len());
    let mut last_was_separator = true;

    for c in description.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_separator = false;
        } else if !last_was_separator {
            slug.push('_');
            last_was_separator = true;
        }
    }

    slug.trim_end_matches('_').to_string()
}

/// Computes the next version name and enforces the ordering invariant:
/// the new name must sort after every existing version.
pub fn next_version(
    existing: &[String],
    now: DateTime<Utc>,
    slug: &str,
) -> Result<String, GenerateError> {
    let sequence = existing.len() + 1;
    let candidate = format!("m{}_{sequence:06}_{slug}", now.format("%Y%m%d"));

    if let Some(latest) = existing.iter().max() {
        if candidate <= *latest {
            return Err(GenerateError::OutOfOrder {
                candidate,
                latest: latest.clone(),
            });
        }
    }

    Ok(candidate)
}

/// Lists the version names already present in `dir`.
fn existing_versions(dir: &Path) -> Result<Vec<String>, GenerateError> {
    let mut versions = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if let Some(stem) = name.strip_suffix(".rs") {
            if is_version_name(stem) {
                versions.push(stem.to_string());
            }
        }
    }
    Ok(versions)
}

/// Matches `m{8 digits}_{6 digits}_{slug}`.
fn is_version_name(stem: &str) -> bool {
    let bytes = stem.as_bytes();
    bytes.len() > 17
        && bytes[0] == b'm'
        && bytes[1..9].iter().all(u8::is_ascii_digit)
        && bytes[9] == b'_'
        && bytes[10..16].iter().all(u8::is_ascii_digit)
        && bytes[16] == b'_'
}

/// Inserts the `mod` declaration and `Box::new` registration for
/// `version` into `mod.rs`, after the respective last existing entries.
fn register_in_module(mod_path: &Path, version: &str) -> Result<(), GenerateError> {
    let content = fs::read_to_string(mod_path)?;
    if content.contains(version) {
        return Err(GenerateError::Duplicate(version.to_string()));
    }

    let with_mod = insert_after_last(&content, "mod m", &format!("mod {version};"))
        .ok_or(GenerateError::MissingMarker("mod m"))?;
    let with_box = insert_after_last(
        &with_mod,
        "Box::new(m",
        &format!("Box::new({version}::Migration),"),
    )
    .ok_or(GenerateError::MissingMarker("Box::new(m"))?;

    fs::write(mod_path, with_box)?;
    Ok(())
}

/// Inserts `line` (indented like the match) after the last line whose
/// trimmed form starts with `marker`. Returns `None` if no line matches.
fn insert_after_last(content: &str, marker: &str, line: &str) -> Option<String> {
    let lines: Vec<&str> = content.lines().collect();
    let index = lines
        .iter()
        .rposition(|l| l.trim_start().starts_with(marker))?;

    let indent: String = lines[index]
        .chars()
        .take_while(|c| c.is_whitespace())
        .collect();

    let mut out = Vec::with_capacity(lines.len() + 1);
    out.extend_from_slice(&lines[..=index]);
    let inserted = format!("{indent}{line}");
    out.push(&inserted);
    out.extend_from_slice(&lines[index + 1..]);

    let mut result = out.join("\n");
    if content.ends_with('\n') {
        result.push('\n');
    }
    Some(result)
}

const TEMPLATE: &str = r#"use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // Write the schema changes for this version here.
        let _ = db;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // Revert the schema changes applied by `up`.
        let _ = db;

        Ok(())
    }
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    const MOD_RS: &str = "\
//! Database migrations.

mod m20240101_000001_initial;
mod m20240115_000002_product_variants;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_initial::Migration),
            Box::new(m20240115_000002_product_variants::Migration),
        ]
    }
}
";

    fn seeded_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("mod.rs"), MOD_RS).unwrap();
        std::fs::write(dir.path().join("m20240101_000001_initial.rs"), TEMPLATE).unwrap();
        std::fs::write(
            dir.path().join("m20240115_000002_product_variants.rs"),
            TEMPLATE,
        )
        .unwrap();
        dir
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Add new table"), "add_new_table");
        assert_eq!(slugify("  weird -- punctuation!! "), "weird_punctuation");
        assert_eq!(slugify("CamelCase123"), "camelcase123");
        assert_eq!(slugify("___"), "");
    }

    #[test]
    fn test_next_version_appends_after_latest() {
        let existing = vec![
            "m20240101_000001_initial".to_string(),
            "m20240115_000002_product_variants".to_string(),
        ];
        let version = next_version(&existing, date(2024, 2, 1), "orders").unwrap();
        assert_eq!(version, "m20240201_000003_orders");
        assert!(existing.iter().all(|v| *v < version));
    }

    #[test]
    fn test_next_version_rejects_clock_regression() {
        let existing = vec!["m20250910_000001_future".to_string()];
        let result = next_version(&existing, date(2024, 1, 1), "late");
        assert!(matches!(result, Err(GenerateError::OutOfOrder { .. })));
    }

    #[test]
    fn test_write_migration_creates_and_registers() {
        let dir = seeded_dir();
        let path = write_migration(dir.path(), "Add orders", date(2024, 2, 1)).unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "m20240201_000003_add_orders.rs"
        );
        assert!(path.exists());

        let mod_rs = std::fs::read_to_string(dir.path().join("mod.rs")).unwrap();
        assert!(mod_rs.contains("mod m20240201_000003_add_orders;"));
        assert!(mod_rs.contains("Box::new(m20240201_000003_add_orders::Migration),"));

        // Registration preserves declaration order.
        let mod_pos = mod_rs.find("mod m20240201_000003_add_orders;").unwrap();
        let prev_pos = mod_rs.find("mod m20240115_000002_product_variants;").unwrap();
        assert!(prev_pos < mod_pos);
    }

    #[test]
    fn test_write_migration_rejects_empty_description() {
        let dir = seeded_dir();
        let result = write_migration(dir.path(), "!!!", date(2024, 2, 1));
        assert!(matches!(result, Err(GenerateError::EmptyDescription(_))));
    }

    #[test]
    fn test_write_migration_twice_same_day_stays_ordered() {
        let dir = seeded_dir();
        let first = write_migration(dir.path(), "one", date(2024, 2, 1)).unwrap();
        let second = write_migration(dir.path(), "two", date(2024, 2, 1)).unwrap();
        assert!(first.file_name().unwrap() < second.file_name().unwrap());
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Any generated version sorts after every existing one,
            /// regardless of description and chain length.
            #[test]
            fn generated_version_sorts_last(
                descriptions in proptest::collection::vec("[a-z]{1,12}( [a-z]{1,12}){0,2}", 1..8)
            ) {
                let mut existing: Vec<String> = Vec::new();
                for (i, description) in descriptions.iter().enumerate() {
                    let day = u32::try_from(i).unwrap() + 1;
                    let version =
                        next_version(&existing, date(2024, 3, day), &slugify(description))
                            .unwrap();
                    prop_assert!(existing.iter().all(|v| *v < version));
                    existing.push(version);
                }
            }
        }
    }
}
