//! `.cweb` module descriptor.
//!
//! JSON document describing a compiled module for the package tooling. Every
//! key but the name, version and symbol list is fixed.
use crate::{annotation::AnnotationLog, config::DEFAULT_MODULE_VERSION};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@version")]
    pub version: String,
    #[serde(rename = "@description")]
    pub description: String,
    #[serde(rename = "@license")]
    pub license: String,
    #[serde(rename = "@source")]
    pub source: Source,
    #[serde(rename = "@build")]
    pub build: Build,
    #[serde(rename = "@dependencies")]
    pub dependencies: Dependencies,
    #[serde(rename = "@ai")]
    pub ai: Ai,
    #[serde(rename = "@split")]
    pub split: Split,
    /// Snapshot of the annotation log at build time.
    #[serde(rename = "@symbols")]
    pub symbols: AnnotationLog,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    #[serde(rename = "type")]
    pub kind: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Build {
    pub system: String,
    pub flags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dependencies {
    pub runtime: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Ai {
    pub optimize: bool,
    pub entropy_feedback: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Split {
    pub enabled: bool,
    pub max_size_mb: u32,
}

impl ModuleDescriptor {
    pub fn new(name: &str, version: Option<&str>, symbols: &AnnotationLog) -> Self {
        Self {
            name: name.to_owned(),
            version: version.unwrap_or(DEFAULT_MODULE_VERSION).to_owned(),
            description: format!("Auto-generated from T81Lang parser ({})", name),
            license: "GPL-3.0".to_owned(),
            source: Source {
                kind: "local".to_owned(),
                path: format!("./{}/", name),
            },
            build: Build {
                system: "custom".to_owned(),
                flags: vec!["-DUSE_AXION".to_owned()],
            },
            dependencies: Dependencies::default(),
            ai: Ai {
                optimize: true,
                entropy_feedback: true,
            },
            split: Split {
                enabled: false,
                max_size_mb: 50,
            },
            symbols: symbols.clone(),
        }
    }

    /// Pretty printed JSON, two space indentation.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
