//! Integration tests for TOML configuration loading.
//!
//! Uses `figment::Jail` so files and env vars stay sandboxed per test.

use std::path::{Path, PathBuf};

use cxtree_config::{ConfigError, CxtreeConfig};
use figment::Jail;
use pretty_assertions::assert_eq;

#[test]
fn project_file_sets_every_section() {
    Jail::expect_with(|jail| {
        jail.create_dir(".cxtree")?;
        jail.create_file(
            ".cxtree/config.toml",
            r#"
[parse]
max_depth = 64
skip_function_bodies = true
extra_args = ["-DNDEBUG", "-I/opt/include"]

[output]
pretty = false
directory = "build/ast"

[diagnostics]
record_omissions = true
"#,
        )?;

        let config = CxtreeConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.parse.max_depth, 64);
        assert!(config.parse.skip_function_bodies);
        assert!(config.parse.detailed_preprocessing_record);
        assert_eq!(config.parse.extra_args, vec!["-DNDEBUG", "-I/opt/include"]);
        assert!(!config.output.pretty);
        assert_eq!(config.output.directory, Some(PathBuf::from("build/ast")));
        assert!(config.diagnostics.record_omissions);
        Ok(())
    });
}

#[test]
fn partial_sections_keep_defaults() {
    Jail::expect_with(|jail| {
        jail.create_dir(".cxtree")?;
        jail.create_file(".cxtree/config.toml", "[output]\npretty = false\n")?;

        let config = CxtreeConfig::load().map_err(|e| e.to_string())?;
        assert!(!config.output.pretty);
        assert_eq!(config.parse, cxtree_config::ParseConfig::default());
        Ok(())
    });
}

#[test]
fn explicit_file_overrides_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".cxtree")?;
        jail.create_file(".cxtree/config.toml", "[parse]\nmax_depth = 64\n")?;
        jail.create_file("ci.toml", "[parse]\nmax_depth = 16\n")?;

        let config = CxtreeConfig::load_from(Some(Path::new("ci.toml"))).map_err(|e| e.to_string())?;
        assert_eq!(config.parse.max_depth, 16);
        Ok(())
    });
}

#[test]
fn missing_explicit_file_is_an_error() {
    Jail::expect_with(|_jail| {
        let err = CxtreeConfig::load_from(Some(Path::new("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        Ok(())
    });
}

#[test]
fn wrong_types_surface_as_figment_errors() {
    Jail::expect_with(|jail| {
        jail.create_dir(".cxtree")?;
        jail.create_file(".cxtree/config.toml", "[parse]\nmax_depth = \"deep\"\n")?;

        let err = CxtreeConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)));
        Ok(())
    });
}

#[test]
fn zero_max_depth_is_rejected() {
    Jail::expect_with(|jail| {
        jail.create_dir(".cxtree")?;
        jail.create_file(".cxtree/config.toml", "[parse]\nmax_depth = 0\n")?;

        let err = CxtreeConfig::load().unwrap_err();
        assert!(err.to_string().contains("parse.max_depth"));
        Ok(())
    });
}
