//! Turns pasted clipboard text into shortcut paths.

const FILE_SCHEME: &str = "file://";

/// Extracts every shortcut path from pasted text, one candidate per line.
pub fn paths_from_paste(text: &str) -> Vec<String> {
    text.lines().filter_map(path_from_line).collect()
}

fn path_from_line(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if let Some(rest) = line.strip_prefix(FILE_SCHEME) {
        let decoded = urlencoding::decode(rest).ok()?.into_owned();
        // file:///C:/x decodes to /C:/x
        let path = match decoded.strip_prefix('/') {
            Some(tail) if has_drive_prefix(tail) => tail.to_string(),
            _ => decoded,
        };
        return is_absolute(&path).then_some(path);
    }

    is_absolute(line).then(|| line.to_string())
}

fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes[2] == b'\\' || bytes[2] == b'/')
}

fn is_absolute(path: &str) -> bool {
    path.starts_with('/') || path.starts_with(r"\\") || has_drive_prefix(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_paths_are_accepted() {
        assert_eq!(paths_from_paste("/usr/bin/vim"), ["/usr/bin/vim"]);
        assert_eq!(
            paths_from_paste(r"C:\Tools\putty.exe"),
            [r"C:\Tools\putty.exe"]
        );
        assert_eq!(
            paths_from_paste(r"\\server\share\run.bat"),
            [r"\\server\share\run.bat"]
        );
    }

    #[test]
    fn file_urls_are_decoded() {
        assert_eq!(
            paths_from_paste("file:///home/me/My%20Notes.txt"),
            ["/home/me/My Notes.txt"]
        );
        assert_eq!(
            paths_from_paste("file:///C:/Program%20Files/app.exe"),
            ["C:/Program Files/app.exe"]
        );
    }

    #[test]
    fn relative_paths_and_prose_are_ignored() {
        assert!(paths_from_paste("hello world").is_empty());
        assert!(paths_from_paste("bin/vim").is_empty());
        assert!(paths_from_paste("https://example.com").is_empty());
        assert!(paths_from_paste("").is_empty());
    }

    #[test]
    fn each_line_is_a_candidate() {
        let pasted = "/usr/bin/vim\n\nnot a path\r\nfile:///opt/run.sh\n";
        assert_eq!(paths_from_paste(pasted), ["/usr/bin/vim", "/opt/run.sh"]);
    }
}
