use std::path::Path;

/// Languages the editor offers, keyed by the tag used in code fences.
pub const SUPPORTED: &[&str] = &["javascript", "python", "java", "cpp"];

/// Fence tag for a source file, from its extension.
pub fn from_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let lang = match ext.as_str() {
        "js" | "jsx" | "mjs" | "cjs" | "ts" | "tsx" => "javascript",
        "py" | "pyw" => "python",
        "java" => "java",
        "cc" | "cpp" | "cxx" | "hpp" | "hh" | "h" => "cpp",
        _ => return None,
    };
    Some(lang)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions() {
        assert_eq!(from_path(Path::new("a/b/main.py")), Some("python"));
        assert_eq!(from_path(Path::new("App.JSX")), Some("javascript"));
        assert_eq!(from_path(Path::new("Main.java")), Some("java"));
        assert_eq!(from_path(Path::new("vec.hpp")), Some("cpp"));
    }

    #[test]
    fn unknown_or_missing_extension() {
        assert_eq!(from_path(Path::new("Makefile")), None);
        assert_eq!(from_path(Path::new("notes.txt")), None);
    }

    #[test]
    fn every_mapping_is_supported() {
        for p in ["x.js", "x.py", "x.java", "x.cpp"] {
            let lang = from_path(Path::new(p)).unwrap();
            assert!(SUPPORTED.contains(&lang));
        }
    }
}
