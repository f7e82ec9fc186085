// Kernel module blacklist management

use crate::error::Result;
use crate::utils::fs::atomic_write;
use std::path::Path;

/// Ensures each module has a `blacklist <name>` line in the given modprobe
/// file, appending only the missing ones. Existing content is preserved.
/// Returns the modules that were newly added.
pub fn ensure_blacklisted(file: &Path, modules: &[String]) -> Result<Vec<String>> {
    let existing = if file.exists() {
        std::fs::read_to_string(file)?
    } else {
        String::new()
    };

    let mut content = existing.clone();
    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }

    let mut added = Vec::new();
    for module in modules {
        let line = format!("blacklist {}", module);
        let present = existing.lines().any(|l| l.trim() == line);
        if !present {
            content.push_str(&line);
            content.push('\n');
            added.push(module.clone());
        }
    }

    if !added.is_empty() {
        atomic_write(file, &content)?;
    }

    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modules() -> Vec<String> {
        ["dvb_usb_rtl28xxu", "rtl2832", "rtl2830"]
            .map(String::from)
            .to_vec()
    }

    #[test]
    fn creates_file_with_one_line_per_module() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("rtl-sdr-blacklist.conf");

        let added = ensure_blacklisted(&file, &modules()).unwrap();

        assert_eq!(added, modules());
        let content = std::fs::read_to_string(&file).unwrap();
        assert_eq!(
            content,
            "blacklist dvb_usb_rtl28xxu\nblacklist rtl2832\nblacklist rtl2830\n"
        );
    }

    #[test]
    fn repeated_runs_never_duplicate_lines() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("rtl-sdr-blacklist.conf");

        ensure_blacklisted(&file, &modules()).unwrap();
        let first = std::fs::read_to_string(&file).unwrap();

        let added = ensure_blacklisted(&file, &modules()).unwrap();
        assert!(added.is_empty());
        assert_eq!(std::fs::read_to_string(&file).unwrap(), first);

        let lines: Vec<_> = first.lines().collect();
        let mut deduped = lines.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(lines.len(), deduped.len());
    }

    #[test]
    fn preserves_unrelated_lines_and_appends_missing() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("rtl-sdr-blacklist.conf");
        std::fs::write(&file, "# managed by sdrhub\nblacklist rtl2832").unwrap();

        let added = ensure_blacklisted(&file, &modules()).unwrap();

        assert_eq!(added, vec!["dvb_usb_rtl28xxu", "rtl2830"]);
        let content = std::fs::read_to_string(&file).unwrap();
        assert!(content.starts_with("# managed by sdrhub\nblacklist rtl2832\n"));
        assert_eq!(
            content.lines().filter(|l| *l == "blacklist rtl2832").count(),
            1
        );
    }
}
