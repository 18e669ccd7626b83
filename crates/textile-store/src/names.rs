use std::path::Path;

/// Reduce a client-supplied file name to its final path component so
/// `../../etc/passwd` becomes `passwd` and can never escape the upload
/// directory when joined to it.
pub fn sanitize_name(raw: &str) -> String {
    Path::new(raw)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Derive a collision-free on-disk name: stem, underscore, a uuid-v4
/// token, then the original extension.
pub fn unique_name(original: &str) -> String {
    let path = Path::new(original);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let token = uuid::Uuid::new_v4();
    match path.extension() {
        Some(ext) => format!("{stem}_{token}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{token}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_directory_segments() {
        assert_eq!(sanitize_name("report.txt"), "report.txt");
        assert_eq!(sanitize_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_name("/var/log/syslog"), "syslog");
        assert_eq!(sanitize_name("dir/sub/file.pdf"), "file.pdf");
    }

    #[test]
    fn sanitize_degenerate_names_are_empty() {
        assert_eq!(sanitize_name(""), "");
        assert_eq!(sanitize_name(".."), "");
        assert_eq!(sanitize_name("/"), "");
    }

    #[test]
    fn unique_name_preserves_extension() {
        let name = unique_name("report.txt");
        assert!(name.starts_with("report_"));
        assert!(name.ends_with(".txt"));
        assert!(name.len() > "report.txt".len());
    }

    #[test]
    fn unique_name_without_extension() {
        let name = unique_name("README");
        assert!(name.starts_with("README_"));
        assert!(!name.contains('.'));
    }

    #[test]
    fn unique_names_do_not_collide() {
        let a = unique_name("data.csv");
        let b = unique_name("data.csv");
        assert_ne!(a, b);
    }

    #[test]
    fn unique_name_contains_no_separators() {
        let name = unique_name("notes.md");
        assert!(!name.contains('/'));
        assert!(!name.contains('\\'));
    }
}
