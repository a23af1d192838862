//! Output files of a compilation.
use crate::{config::CompileOptions, cweb::ModuleDescriptor, error::T81Result};
use crate::{Compilation, SOURCE_EXTENSION};
use log::{debug, warn};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Module name of a source file, its file name without the extension.
pub fn module_name(path: impl AsRef<Path>) -> T81Result<String> {
    let path = path.as_ref();

    if path.extension().and_then(|ext| ext.to_str()) != Some(SOURCE_EXTENSION) {
        warn!(
            "{} does not have the .{} extension",
            path.display(),
            SOURCE_EXTENSION
        );
    }

    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("cannot derive a module name from {}", path.display()),
            )
        })?;

    Ok(stem.to_owned())
}

/// Write the artifacts of a compilation into `out_dir`, creating it if needed.
///
/// - `<module>.ast.json` syntax tree
/// - `<module>.tisc` generated code
/// - `<module>.entropy.json` annotation log
/// - `<module>.cweb` module descriptor, only when `emit_cweb` is set
///
/// Returns the paths written, in that order.
pub fn write_artifacts(
    out_dir: impl AsRef<Path>,
    module: &str,
    compilation: &Compilation,
    options: &CompileOptions,
    emit_cweb: bool,
) -> T81Result<Vec<PathBuf>> {
    let out_dir = out_dir.as_ref();
    fs::create_dir_all(out_dir)?;

    let mut written = vec![];
    let mut write = |extension: &str, contents: String| -> T81Result<()> {
        let path = out_dir.join(format!("{}.{}", module, extension));
        fs::write(&path, contents)?;
        debug!("wrote {}", path.display());
        written.push(path);
        Ok(())
    };

    write(
        "ast.json",
        serde_json::to_string_pretty(&compilation.program)?,
    )?;
    write("tisc", compilation.ir.clone())?;
    write(
        "entropy.json",
        serde_json::to_string_pretty(&compilation.annotations)?,
    )?;

    if emit_cweb {
        let descriptor = ModuleDescriptor::new(
            module,
            Some(&options.module_version),
            &compilation.annotations,
        );
        write("cweb", descriptor.to_json()?)?;
    }

    Ok(written)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_module_name() {
        assert_eq!(module_name("src/math.t81").unwrap(), "math");
        assert_eq!(module_name("notes.txt").unwrap(), "notes");
        assert!(module_name("/").is_err());
    }
}
