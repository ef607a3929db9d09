#![deny(missing_docs)]

//! # Generate Command
//!
//! Loads a spec file, normalizes it, runs the requested vulnerability-class
//! generators, and writes the resulting test plan to a file or stdout.

use std::fs;
use std::path::PathBuf;

use apisec_core::generator::overlay::{self, UserData};
use apisec_core::{generate_all, normalize, VulnClass};
use clap::ValueEnum;
use indexmap::IndexMap;

use crate::error::{CliError, CliResult};
use crate::load::load_document;

/// Output serialization format for a generated test plan.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `serde_json`, pretty-printed.
    Json,
    /// `serde_yaml`.
    Yaml,
}

/// Arguments for the `generate` command.
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Path to the OpenAPI v3 / Swagger v2 spec file (YAML or JSON).
    #[clap(long)]
    pub spec: PathBuf,

    /// Vulnerability classes to run; defaults to every class.
    #[clap(long = "class", value_name = "NAME")]
    pub classes: Vec<String>,

    /// Path to a JSON file of request headers, merged in before missing-auth
    /// stripping (e.g. `{"Authorization": "Bearer x"}`).
    #[clap(long)]
    pub headers_file: Option<PathBuf>,

    /// Path to a JSON file of actor credentials/attributes
    /// (`{"actors": [{"actor1": {...}}, {"actor2": {...}}]}`). When given,
    /// the test plan additionally includes an actor-overlaid copy of every
    /// generated descriptor per actor present in the file.
    #[clap(long)]
    pub user_data: Option<PathBuf>,

    /// Path to write the test plan to; defaults to stdout.
    #[clap(long)]
    pub out: Option<PathBuf>,

    /// Output serialization format.
    #[clap(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

fn parse_classes(names: &[String]) -> CliResult<Vec<VulnClass>> {
    if names.is_empty() {
        return Ok(VulnClass::ALL.to_vec());
    }
    names
        .iter()
        .map(|name| {
            VulnClass::parse(name)
                .ok_or_else(|| CliError::General(format!("Unrecognized vulnerability class: {name}")))
        })
        .collect()
}

fn load_headers(path: Option<&PathBuf>) -> CliResult<Option<IndexMap<String, String>>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let content = fs::read_to_string(path)?;
    let headers: IndexMap<String, String> = serde_json::from_str(&content).map_err(CliError::Serialize)?;
    Ok(Some(headers))
}

fn load_user_data(path: Option<&PathBuf>) -> CliResult<Option<UserData>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let content = fs::read_to_string(path)?;
    let user_data: UserData = serde_json::from_str(&content).map_err(CliError::Serialize)?;
    Ok(Some(user_data))
}

/// Executes the `generate` command.
pub fn execute(args: &GenerateArgs) -> CliResult<()> {
    let document = load_document(&args.spec)?;
    let normalized = normalize(&document).map_err(CliError::Core)?;
    let classes = parse_classes(&args.classes)?;
    let headers = load_headers(args.headers_file.as_ref())?;
    let user_data = load_user_data(args.user_data.as_ref())?;

    let mut descriptors = generate_all(&normalized, &classes, headers.clone());

    if let Some(user_data) = user_data {
        let test_for_actor1 = !user_data.actors.is_empty();
        let test_for_actor2 = user_data.actors.len() > 1;
        let overlaid = overlay::with_actor(
            &normalized,
            &user_data,
            |s| generate_all(s, &classes, headers.clone()),
            test_for_actor1,
            test_for_actor2,
        );
        descriptors.extend(overlaid);
    }

    let rendered = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&descriptors).map_err(CliError::Serialize)?,
        OutputFormat::Yaml => serde_yaml::to_string(&descriptors).map_err(CliError::Parse)?,
    };

    match &args.out {
        Some(path) => fs::write(path, rendered)?,
        None => println!("{rendered}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn sample_spec() -> &'static str {
        r#"{
            "openapi": "3.0.0",
            "servers": [{"url": "http://h"}],
            "paths": {"/users/{id}": {"get": {"responses": {"200": {}}}}}
        }"#
    }

    #[test]
    fn generates_json_test_plan_to_file() {
        let dir = tempdir().unwrap();
        let spec_path = dir.path().join("spec.json");
        let out_path = dir.path().join("plan.json");
        fs::write(&spec_path, sample_spec()).unwrap();

        let args = GenerateArgs {
            spec: spec_path,
            classes: vec!["bola-trailing-slash".into()],
            headers_file: None,
            user_data: None,
            out: Some(out_path.clone()),
            format: OutputFormat::Json,
        };
        execute(&args).unwrap();

        let written = fs::read_to_string(out_path).unwrap();
        assert!(written.contains("\"method\": \"GET\""));
    }

    #[test]
    fn rejects_unknown_vulnerability_class() {
        let dir = tempdir().unwrap();
        let spec_path = dir.path().join("spec.json");
        fs::write(&spec_path, sample_spec()).unwrap();

        let args = GenerateArgs {
            spec: spec_path,
            classes: vec!["not-a-real-class".into()],
            headers_file: None,
            user_data: None,
            out: None,
            format: OutputFormat::Json,
        };
        let err = execute(&args).unwrap_err();
        assert!(format!("{err}").contains("Unrecognized vulnerability class"));
    }

    #[test]
    fn user_data_overlay_appends_actor_variants() {
        let dir = tempdir().unwrap();
        let spec_path = dir.path().join("spec.json");
        let user_data_path = dir.path().join("user_data.json");
        let out_path = dir.path().join("plan.json");
        fs::write(&spec_path, sample_spec()).unwrap();
        fs::write(
            &user_data_path,
            r#"{"actors": [{"actor1": {"headers": {"Authorization": "Bearer actor1-token"}}}]}"#,
        )
        .unwrap();

        let args = GenerateArgs {
            spec: spec_path,
            classes: vec!["bola-trailing-slash".into()],
            headers_file: None,
            user_data: Some(user_data_path),
            out: Some(out_path.clone()),
            format: OutputFormat::Json,
        };
        execute(&args).unwrap();

        let written = fs::read_to_string(out_path).unwrap();
        assert!(written.contains("actor1-token"));
    }
}
