use cxtree_config::CxtreeConfig;
use figment::Jail;
use std::path::Path;

#[test]
fn env_overrides_nested_fields() {
    Jail::expect_with(|jail| {
        jail.set_env("CXTREE_PARSE__MAX_DEPTH", "32");
        jail.set_env("CXTREE_DIAGNOSTICS__RECORD_OMISSIONS", "true");

        let config = CxtreeConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.parse.max_depth, 32);
        assert!(config.diagnostics.record_omissions);
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".cxtree")?;
        jail.create_file(".cxtree/config.toml", "[output]\npretty = true\n")?;
        jail.set_env("CXTREE_OUTPUT__PRETTY", "false");

        let config = CxtreeConfig::load().map_err(|e| e.to_string())?;
        assert!(!config.output.pretty);
        Ok(())
    });
}

#[test]
fn env_beats_explicit_file() {
    Jail::expect_with(|jail| {
        jail.create_file("ci.toml", "[parse]\nmax_depth = 16\n")?;
        jail.set_env("CXTREE_PARSE__MAX_DEPTH", "8");

        let config = CxtreeConfig::load_from(Some(Path::new("ci.toml"))).map_err(|e| e.to_string())?;
        assert_eq!(config.parse.max_depth, 8);
        Ok(())
    });
}

#[test]
fn unrelated_env_is_ignored() {
    Jail::expect_with(|jail| {
        jail.set_env("OTHER_PARSE__MAX_DEPTH", "3");

        let config = CxtreeConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.parse.max_depth, 1024);
        Ok(())
    });
}
