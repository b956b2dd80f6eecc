//! Keeps `tests/unit` a mirror of `src` and every test file non-empty

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    const SRC_DIR: &str = "src";
    const UNIT_DIR: &str = "tests/unit";
    const TESTS_DIR: &str = "tests";

    // Entry points and module organization files don't need their own test file
    fn is_exempt(relative: &str) -> bool {
        relative == "main.rs" || relative == "lib.rs" || relative.ends_with("mod.rs")
    }

    fn relative_paths(dir: &Path, base: &Path, paths: &mut BTreeSet<String>) -> io::Result<()> {
        if !dir.is_dir() {
            return Ok(());
        }

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let relative = path
                .strip_prefix(base)
                .map_err(|_stripped| io::Error::other("path outside base directory"))?
                .to_string_lossy()
                .replace('\\', "/");

            if path.is_dir() {
                paths.insert(relative);
                relative_paths(&path, base, paths)?;
            } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                paths.insert(relative);
            }
        }

        Ok(())
    }

    fn collect(dir: &str) -> BTreeSet<String> {
        let mut paths = BTreeSet::new();
        let root = Path::new(dir);
        if let Err(error) = relative_paths(root, root, &mut paths) {
            panic!("Failed to scan {dir}: {error}");
        }
        paths
    }

    // Tests every source file has a unit test file at the same relative path
    // Verified by adding a source file without a test counterpart
    #[test]
    fn test_all_src_files_have_unit_tests() {
        let src_paths = collect(SRC_DIR);
        let unit_paths = collect(UNIT_DIR);

        let missing: Vec<_> = src_paths
            .iter()
            .filter(|path| !is_exempt(path) && !unit_paths.contains(*path))
            .map(|path| format!("  - {SRC_DIR}/{path} -> {UNIT_DIR}/{path}"))
            .collect();

        assert!(
            missing.is_empty(),
            "Source files without unit tests:\n{}",
            missing.join("\n")
        );
    }

    // Tests no unit test file outlives its source file
    // Verified by renaming a source module
    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let src_paths = collect(SRC_DIR);
        let unit_paths = collect(UNIT_DIR);

        let orphaned: Vec<_> = unit_paths
            .iter()
            .filter(|path| !path.ends_with("mod.rs") && !src_paths.contains(*path))
            .map(|path| format!("  - {UNIT_DIR}/{path} (no {SRC_DIR}/{path})"))
            .collect();

        assert!(
            orphaned.is_empty(),
            "Unit tests without source files:\n{}",
            orphaned.join("\n")
        );
    }

    // Tests every test file actually declares tests
    // Verified by emptying a unit test file
    #[test]
    fn test_all_test_files_contain_tests() {
        let test_paths = collect(TESTS_DIR);

        let empty: Vec<_> = test_paths
            .iter()
            .filter(|path| {
                path.ends_with(".rs") && *path != "main.rs" && !path.ends_with("mod.rs")
            })
            .filter(|path| {
                fs::read_to_string(Path::new(TESTS_DIR).join(path))
                    .map(|content| !content.contains("#[test]"))
                    .unwrap_or(true)
            })
            .map(|path| format!("  - {TESTS_DIR}/{path}"))
            .collect();

        assert!(
            empty.is_empty(),
            "Test files without any #[test] function:\n{}",
            empty.join("\n")
        );
    }
}
