//! Compiler configuration.
use crate::error::T81Result;
use log::debug;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Version written into module descriptors when none is configured.
pub const DEFAULT_MODULE_VERSION: &str = "0.1.0";

/// How the front end treats input it doesn't recognise.
///
/// - *Lenient*: unknown characters are dropped, unrecognised statements and
///   parameter tokens are skipped, and unsupported expression shapes become
///   [`Expr::Unknown`](crate::parsing::Expr::Unknown).
/// - *Strict*: each of those is reported as an error.
///
/// Structural problems like a missing semicolon or unbalanced braces are
/// errors under both policies.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strictness {
    #[default]
    Lenient,
    Strict,
}

impl Strictness {
    #[inline]
    pub fn is_strict(self) -> bool {
        self == Strictness::Strict
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CompileOptions {
    pub strictness: Strictness,
    /// Version stamped into the module descriptor.
    pub module_version: String,
}

impl CompileOptions {
    /// Load options from a YAML file. Missing fields keep their defaults.
    pub fn from_file(filepath: impl AsRef<Path>) -> T81Result<Self> {
        let filepath = filepath.as_ref();
        let text = fs::read_to_string(filepath)?;
        let options = Self::from_yaml(&text)?;
        debug!(
            "loaded compile options from {}: {:?}",
            filepath.display(),
            options
        );
        Ok(options)
    }

    pub fn from_yaml(text: &str) -> T81Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn strict() -> Self {
        Self {
            strictness: Strictness::Strict,
            ..Default::default()
        }
    }
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            strictness: Strictness::default(),
            module_version: DEFAULT_MODULE_VERSION.to_owned(),
        }
    }
}
