//! Diagnostic capture persistence
//!
//! Writes a screenshot and a page-text excerpt under the configured debug
//! directory. Callers treat failures as non-fatal; the session logs and
//! swallows any error returned from here.

use std::fs;
use std::io;
use std::path::Path;

use chrono::Utc;

/// Persist one capture. `screenshot` may be absent when the grab itself
/// failed; the text excerpt is always written.
pub fn write_capture(
    dir: &Path,
    tag: &str,
    screenshot: Option<&[u8]>,
    excerpt: &str,
) -> io::Result<()> {
    fs::create_dir_all(dir)?;

    let stem = format!("{}-{}", Utc::now().format("%Y%m%d-%H%M%S"), sanitize_tag(tag));

    if let Some(png) = screenshot {
        fs::write(dir.join(format!("{}.png", stem)), png)?;
    }
    fs::write(dir.join(format!("{}.txt", stem)), excerpt)?;

    Ok(())
}

/// Keep tags filesystem-safe.
fn sanitize_tag(tag: &str) -> String {
    tag.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_tag() {
        assert_eq!(sanitize_tag("step-3-timeout"), "step-3-timeout");
        assert_eq!(sanitize_tag("grid timeout!"), "grid-timeout-");
    }

    #[test]
    fn test_write_capture_creates_files() {
        let dir = tempfile::tempdir().unwrap();

        write_capture(dir.path(), "grid-timeout", Some(b"\x89PNG"), "page text").unwrap();

        let mut names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();

        assert_eq!(names.len(), 2);
        assert!(names[0].ends_with("grid-timeout.png"));
        assert!(names[1].ends_with("grid-timeout.txt"));
    }

    #[test]
    fn test_write_capture_without_screenshot() {
        let dir = tempfile::tempdir().unwrap();

        write_capture(dir.path(), "open-failed", None, "excerpt").unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names.len(), 1);
        assert!(names[0].ends_with("open-failed.txt"));
    }
}
