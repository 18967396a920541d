/// Editor language id for a file name, `plaintext` when unknown.
pub fn detect_language(file_name: &str) -> &'static str {
    let Some((_, ext)) = file_name.rsplit_once('.') else {
        return "plaintext";
    };

    match ext.to_ascii_lowercase().as_str() {
        "java" => "java",
        "ts" | "tsx" => "typescript",
        "js" | "jsx" => "javascript",
        "json" => "json",
        "css" => "css",
        "html" | "htm" => "html",
        "md" => "markdown",
        "yaml" | "yml" => "yaml",
        "sh" | "bash" => "shell",
        "py" => "python",
        "go" => "go",
        "xml" => "xml",
        "c" | "h" => "c",
        "cpp" | "hpp" | "cc" => "cpp",
        "cs" => "csharp",
        "kt" => "kotlin",
        "php" => "php",
        "rb" => "ruby",
        "rs" => "rust",
        _ => "plaintext",
    }
}

/// Framework hint for a project-relative path, empty when nothing matches.
///
/// Checks `backend` first, so a path containing both words counts as backend.
pub fn infer_framework(path: &str) -> &'static str {
    if path.contains("backend") {
        "Spring Boot"
    } else if path.contains("frontend") {
        "React + Vite"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions() {
        assert_eq!(detect_language("App.TSX"), "typescript");
        assert_eq!(detect_language("main.rs"), "rust");
        assert_eq!(detect_language("util.h"), "c");
        assert_eq!(detect_language("run.sh"), "shell");
    }

    #[test]
    fn unknown_or_missing_extension_falls_back() {
        assert_eq!(detect_language("Makefile"), "plaintext");
        assert_eq!(detect_language("archive.zip"), "plaintext");
        assert_eq!(detect_language("trailing."), "plaintext");
    }

    #[test]
    fn framework_follows_project_half() {
        assert_eq!(infer_framework("backend/src/Main.java"), "Spring Boot");
        assert_eq!(infer_framework("frontend/src/App.jsx"), "React + Vite");
        assert_eq!(infer_framework("frontend/backend-mock.js"), "Spring Boot");
        assert_eq!(infer_framework("src/calc.py"), "");
    }
}
