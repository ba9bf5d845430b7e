// blazestd - app/vm.rs
//
// BlazeVM launcher stub. It does not execute bytecode: it identifies the
// compiled file it was handed and prints the VM banner.

use crate::platform::fs;
use crate::util::constants;
use crate::util::error::VmError;
use std::io::Write;
use std::path::Path;

/// What the banner reports about the compiled file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerInfo {
    pub name: String,
    pub content: String,
}

impl BannerInfo {
    /// Read `bze_name` and `bze_content` from the process environment.
    pub fn from_env() -> Result<Self, VmError> {
        Self::from_lookup(|var| std::env::var(var))
    }

    /// Build from an arbitrary variable lookup (the environment, or a map
    /// in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, VmError>
    where
        F: Fn(&'static str) -> Result<String, std::env::VarError>,
    {
        let get = |var: &'static str| match lookup(var) {
            Ok(v) => Ok(v),
            Err(std::env::VarError::NotPresent) => Err(VmError::MissingEnv { var }),
            Err(std::env::VarError::NotUnicode(_)) => Err(VmError::InvalidEnv { var }),
        };
        Ok(Self {
            name: get(constants::ENV_FILE_NAME)?,
            content: get(constants::ENV_FILE_CONTENT)?,
        })
    }

    /// Name the file as given and load its content from disk.
    pub fn from_file(path: &Path) -> Result<Self, VmError> {
        let content = fs::read_file(path).map_err(VmError::Source)?;
        Ok(Self {
            name: path.display().to_string(),
            content,
        })
    }
}

/// Write the VM banner for `info` to `out`.
pub fn render_banner<W: Write>(out: &mut W, info: &BannerInfo) -> Result<(), VmError> {
    write!(
        out,
        "{}\nVersion: {}\nFile: {}\nContent: {}\n",
        constants::VM_BANNER_TITLE,
        constants::VM_VERSION,
        info.name,
        info.content
    )
    .and_then(|_| out.flush())
    .map_err(|source| VmError::Io { source })?;

    tracing::debug!(file = %info.name, bytes = info.content.len(), "Banner written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::env::VarError;

    fn lookup_in(
        vars: HashMap<&'static str, &'static str>,
    ) -> impl Fn(&'static str) -> Result<String, VarError> {
        move |k: &'static str| vars.get(k).map(|v| v.to_string()).ok_or(VarError::NotPresent)
    }

    #[test]
    fn test_banner_format() {
        let info = BannerInfo {
            name: "main.bze".to_string(),
            content: "0x01 0x00 0x00".to_string(),
        };
        let mut out = Vec::new();
        render_banner(&mut out, &info).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "---Blaze Virtual Machine---\n\
             Version: 0.0.1\n\
             File: main.bze\n\
             Content: 0x01 0x00 0x00\n"
        );
    }

    #[test]
    fn test_from_lookup_reads_both_vars() {
        let vars = HashMap::from([("bze_name", "a.bze"), ("bze_content", "abc")]);
        let info = BannerInfo::from_lookup(lookup_in(vars)).unwrap();
        assert_eq!(info.name, "a.bze");
        assert_eq!(info.content, "abc");
    }

    #[test]
    fn test_missing_content_var_is_reported() {
        let vars = HashMap::from([("bze_name", "a.bze")]);
        let err = BannerInfo::from_lookup(lookup_in(vars)).unwrap_err();
        assert!(matches!(err, VmError::MissingEnv { var: "bze_content" }));
    }

    #[test]
    fn test_from_file_uses_path_and_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prog.bze");
        std::fs::write(&path, "compiled").unwrap();
        let info = BannerInfo::from_file(&path).unwrap();
        assert_eq!(info.name, path.display().to_string());
        assert_eq!(info.content, "compiled");
    }

    #[test]
    fn test_from_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = BannerInfo::from_file(&dir.path().join("nope.bze")).unwrap_err();
        assert!(matches!(err, VmError::Source(_)));
    }
}
