//! Dependency manifest reading
//!
//! Only the repository root is probed, in the fixed order of
//! [`MANIFEST_PROBES`]. A manifest that fails to parse counts as absent.

use super::types::DependencySummary;
use crate::utils::Logger;
use anyhow::{Context, Result, anyhow};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Dependencies reported by one manifest
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManifestReport {
    pub dependencies: BTreeMap<String, String>,
    pub dev_dependencies: BTreeMap<String, String>,
    pub count: u64,
    /// Whether name/version mappings were extracted, not just a count
    pub structured: bool,
}

impl ManifestReport {
    fn structured(
        dependencies: BTreeMap<String, String>,
        dev_dependencies: BTreeMap<String, String>,
    ) -> Self {
        let count = (dependencies.len() + dev_dependencies.len()) as u64;
        Self {
            dependencies,
            dev_dependencies,
            count,
            structured: true,
        }
    }

    fn counted(count: u64) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }
}

pub struct ManifestProbe {
    pub file_name: &'static str,
    pub manager: &'static str,
    parse: fn(&str) -> Result<ManifestReport>,
}

pub const MANIFEST_PROBES: &[ManifestProbe] = &[
    ManifestProbe {
        file_name: "package.json",
        manager: "npm",
        parse: parse_package_json,
    },
    ManifestProbe {
        file_name: "requirements.txt",
        manager: "pip",
        parse: parse_requirements_txt,
    },
    ManifestProbe {
        file_name: "Cargo.toml",
        manager: "cargo",
        parse: parse_cargo_toml,
    },
    ManifestProbe {
        file_name: "pyproject.toml",
        manager: "pyproject",
        parse: parse_pyproject_toml,
    },
    ManifestProbe {
        file_name: "go.mod",
        manager: "go modules",
        parse: parse_go_mod,
    },
    ManifestProbe {
        file_name: "Gemfile",
        manager: "bundler",
        parse: parse_gemfile,
    },
];

fn json_string_map(value: Option<&serde_json::Value>) -> Result<BTreeMap<String, String>> {
    let Some(value) = value else {
        return Ok(BTreeMap::new());
    };
    let object = value
        .as_object()
        .ok_or_else(|| anyhow!("dependency section is not an object"))?;

    Ok(object
        .iter()
        .map(|(name, version)| {
            let version = version
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| version.to_string());
            (name.clone(), version)
        })
        .collect())
}

pub fn parse_package_json(content: &str) -> Result<ManifestReport> {
    let pkg: serde_json::Value = serde_json::from_str(content).context("Invalid package.json")?;
    if !pkg.is_object() {
        anyhow::bail!("package.json is not an object");
    }

    Ok(ManifestReport::structured(
        json_string_map(pkg.get("dependencies"))?,
        json_string_map(pkg.get("devDependencies"))?,
    ))
}

/// Non-empty, non-comment lines
pub fn parse_requirements_txt(content: &str) -> Result<ManifestReport> {
    let count = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .count();
    Ok(ManifestReport::counted(count as u64))
}

/// Version of a TOML dependency entry: `"1.0"`, `{ version = "1.0" }`, or `*`
fn toml_version(value: &toml::Value) -> String {
    match value {
        toml::Value::String(version) => version.clone(),
        toml::Value::Table(table) => table
            .get("version")
            .and_then(|v| v.as_str())
            .unwrap_or("*")
            .to_string(),
        other => other.to_string(),
    }
}

fn toml_dependency_map(table: Option<&toml::Value>) -> BTreeMap<String, String> {
    table
        .and_then(|t| t.as_table())
        .map(|t| {
            t.iter()
                .map(|(name, value)| (name.clone(), toml_version(value)))
                .collect()
        })
        .unwrap_or_default()
}

pub fn parse_cargo_toml(content: &str) -> Result<ManifestReport> {
    let manifest: toml::Table = toml::from_str(content).context("Invalid Cargo.toml")?;
    Ok(ManifestReport::structured(
        toml_dependency_map(manifest.get("dependencies")),
        toml_dependency_map(manifest.get("dev-dependencies")),
    ))
}

/// Split a PEP 508 requirement such as `requests>=2.0` into name and version
fn split_requirement(requirement: &str) -> (String, String) {
    let requirement = requirement.trim();
    match requirement.find(|c: char| "<>=!~;[ (".contains(c)) {
        Some(idx) => {
            let version = requirement[idx..].trim();
            let version = if version.is_empty() { "*" } else { version };
            (requirement[..idx].to_string(), version.to_string())
        }
        None => (requirement.to_string(), "*".to_string()),
    }
}

fn requirement_list(value: Option<&toml::Value>) -> BTreeMap<String, String> {
    value
        .and_then(|v| v.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str())
                .map(split_requirement)
                .collect()
        })
        .unwrap_or_default()
}

/// Poetry tables when present, otherwise the `[project]` requirement lists
pub fn parse_pyproject_toml(content: &str) -> Result<ManifestReport> {
    let manifest: toml::Table = toml::from_str(content).context("Invalid pyproject.toml")?;

    if let Some(poetry) = manifest
        .get("tool")
        .and_then(|tool| tool.get("poetry"))
    {
        let mut dependencies = toml_dependency_map(poetry.get("dependencies"));
        dependencies.remove("python");

        let mut dev_dependencies = toml_dependency_map(poetry.get("dev-dependencies"));
        let group_dev = poetry
            .get("group")
            .and_then(|g| g.get("dev"))
            .and_then(|dev| dev.get("dependencies"));
        dev_dependencies.extend(toml_dependency_map(group_dev));

        return Ok(ManifestReport::structured(dependencies, dev_dependencies));
    }

    let project = manifest.get("project");
    let dependencies = requirement_list(project.and_then(|p| p.get("dependencies")));
    let dev_dependencies = requirement_list(
        project
            .and_then(|p| p.get("optional-dependencies"))
            .and_then(|optional| optional.get("dev")),
    );

    Ok(ManifestReport::structured(dependencies, dev_dependencies))
}

/// Count `require` entries, both single-line and block form
pub fn parse_go_mod(content: &str) -> Result<ManifestReport> {
    if !content
        .lines()
        .any(|line| line.trim_start().starts_with("module "))
    {
        anyhow::bail!("go.mod has no module directive");
    }

    let mut count = 0u64;
    let mut in_block = false;
    for line in content.lines().map(str::trim) {
        if in_block {
            if line == ")" {
                in_block = false;
            } else if !line.is_empty() && !line.starts_with("//") {
                count += 1;
            }
        } else if line.starts_with("require (") || line == "require(" {
            in_block = true;
        } else if line.starts_with("require ") {
            count += 1;
        }
    }

    if in_block {
        anyhow::bail!("go.mod has an unterminated require block");
    }

    Ok(ManifestReport::counted(count))
}

/// Count `gem` declarations
pub fn parse_gemfile(content: &str) -> Result<ManifestReport> {
    let count = content
        .lines()
        .map(str::trim_start)
        .filter(|line| line.starts_with("gem ") || line.starts_with("gem("))
        .count();
    Ok(ManifestReport::counted(count as u64))
}

/// Probe the root for known manifests.
///
/// Every parsed manifest contributes its manager and count. The name/version
/// mappings come from the first structured manifest only.
pub fn read_manifests(root: &Path, logger: &Logger) -> DependencySummary {
    let mut summary = DependencySummary::default();
    let mut mappings_taken = false;

    for probe in MANIFEST_PROBES {
        let path = root.join(probe.file_name);
        if !path.is_file() {
            continue;
        }

        let parsed = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", probe.file_name))
            .and_then(|content| (probe.parse)(&content));

        let report = match parsed {
            Ok(report) => report,
            Err(e) => {
                logger.warn(&format!("Skipping {}: {:#}", probe.file_name, e));
                continue;
            }
        };

        summary.package_managers.push(probe.manager.to_string());
        summary.total_deps += report.count;

        if report.structured && !mappings_taken {
            summary.dependencies = report.dependencies;
            summary.dev_dependencies = report.dev_dependencies;
            mappings_taken = true;
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PACKAGE_JSON: &str = r#"{
        "name": "demo",
        "dependencies": {
            "react": "^18.2.0",
            "react-dom": "^18.2.0",
            "axios": "1.6.0",
            "lodash": "4.17.21",
            "zod": "3.22.0"
        },
        "devDependencies": {
            "jest": "^29.0.0",
            "typescript": "5.3.0"
        }
    }"#;

    #[test]
    fn test_package_json_counts_both_sections() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("package.json"), PACKAGE_JSON).unwrap();

        let summary = read_manifests(temp.path(), &Logger::quiet());

        assert_eq!(summary.package_managers, vec!["npm"]);
        assert_eq!(summary.total_deps, 7);
        assert_eq!(summary.dependencies.len(), 5);
        assert_eq!(summary.dev_dependencies["jest"], "^29.0.0");
    }

    #[test]
    fn test_malformed_manifest_is_treated_as_absent() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("package.json"), "{ not json").unwrap();
        fs::write(temp.path().join("requirements.txt"), "flask==3.0\n# pinned\n\nrequests\n")
            .unwrap();

        let summary = read_manifests(temp.path(), &Logger::quiet());

        assert_eq!(summary.package_managers, vec!["pip"]);
        assert_eq!(summary.total_deps, 2);
        assert!(summary.dependencies.is_empty());
    }

    #[test]
    fn test_first_structured_manifest_owns_mappings() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("package.json"), PACKAGE_JSON).unwrap();
        fs::write(
            temp.path().join("Cargo.toml"),
            "[package]\nname = \"x\"\n\n[dependencies]\nserde = \"1.0\"\n",
        )
        .unwrap();

        let summary = read_manifests(temp.path(), &Logger::quiet());

        assert_eq!(summary.package_managers, vec!["npm", "cargo"]);
        assert_eq!(summary.total_deps, 8);
        assert!(!summary.dependencies.contains_key("serde"));
    }

    #[test]
    fn test_no_manifests() {
        let temp = TempDir::new().unwrap();
        let summary = read_manifests(temp.path(), &Logger::quiet());
        assert_eq!(summary, DependencySummary::default());
    }

    #[test]
    fn test_parse_cargo_toml_versions() {
        let report = parse_cargo_toml(
            r#"
[dependencies]
anyhow = "1.0"
tokio = { version = "1", features = ["full"] }
local = { path = "../local" }

[dev-dependencies]
tempfile = "3"
"#,
        )
        .unwrap();

        assert_eq!(report.dependencies["anyhow"], "1.0");
        assert_eq!(report.dependencies["tokio"], "1");
        assert_eq!(report.dependencies["local"], "*");
        assert_eq!(report.dev_dependencies["tempfile"], "3");
        assert_eq!(report.count, 4);
    }

    #[test]
    fn test_parse_pyproject_poetry_and_pep621() {
        let poetry = parse_pyproject_toml(
            r#"
[tool.poetry.dependencies]
python = "^3.11"
fastapi = "^0.110"

[tool.poetry.group.dev.dependencies]
pytest = "^8.0"
"#,
        )
        .unwrap();
        assert_eq!(poetry.count, 2);
        assert!(!poetry.dependencies.contains_key("python"));
        assert_eq!(poetry.dev_dependencies["pytest"], "^8.0");

        let pep621 = parse_pyproject_toml(
            r#"
[project]
name = "demo"
dependencies = ["requests>=2.31", "rich"]

[project.optional-dependencies]
dev = ["pytest >= 8"]
"#,
        )
        .unwrap();
        assert_eq!(pep621.dependencies["requests"], ">=2.31");
        assert_eq!(pep621.dependencies["rich"], "*");
        assert_eq!(pep621.dev_dependencies["pytest"], ">= 8");
    }

    #[test]
    fn test_parse_go_mod() {
        let report = parse_go_mod(
            "module example.com/app\n\ngo 1.22\n\nrequire (\n\tgithub.com/a/b v1.0.0\n\t// note\n\tgithub.com/c/d v0.2.0 // indirect\n)\n\nrequire golang.org/x/sync v0.6.0\n",
        )
        .unwrap();
        assert_eq!(report.count, 3);
        assert!(!report.structured);

        assert!(parse_go_mod("require x v1\n").is_err());
        assert!(parse_go_mod("module m\nrequire (\n a v1\n").is_err());
    }

    #[test]
    fn test_parse_gemfile() {
        let report =
            parse_gemfile("source 'https://rubygems.org'\n\ngem 'rails', '~> 7.1'\n  gem 'pg'\n# gem 'old'\n")
                .unwrap();
        assert_eq!(report.count, 2);
    }
}
