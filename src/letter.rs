use crate::error::Result;
use crate::types::LegislatorLookup;
use askama::Template;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Form letter rendered once per attendee. The context carries the
/// normalized fields plus the lookup outcome; the template decides how each
/// variant reads.
#[derive(Template)]
#[template(path = "letter.html")]
pub struct LetterTemplate<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub zipcode: &'a str,
    pub phone: Option<&'a str>,
    pub legislators: &'a LegislatorLookup,
}

/// Writes one letter into `letters_dir` as `letter_<id>.html`, creating the
/// directory if it does not exist yet.
pub fn save_letter(letters_dir: &Path, id: &str, content: &str) -> Result<PathBuf> {
    fs::create_dir_all(letters_dir)?;
    let filepath = letters_dir.join(format!("letter_{id}.html"));
    fs::write(&filepath, content)?;
    debug!("wrote {}", filepath.display());
    Ok(filepath)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_letter(legislators: &LegislatorLookup) -> LetterTemplate<'_> {
        LetterTemplate {
            id: "1",
            name: "Allison",
            zipcode: "20010",
            phone: Some("6154385000"),
            legislators,
        }
    }

    #[test]
    fn renders_officials_as_a_list() {
        let legislators = LegislatorLookup::Officials(vec![
            "Maria Cantwell".to_string(),
            "Patty Murray".to_string(),
        ]);
        let html = sample_letter(&legislators).render().unwrap();

        assert!(html.contains("Allison"));
        assert!(html.contains("20010"));
        assert!(html.contains("<li>Maria Cantwell</li>"));
        assert!(html.contains("<li>Patty Murray</li>"));
    }

    #[test]
    fn renders_fallback_message_verbatim() {
        let legislators = LegislatorLookup::Fallback("visit example.org".to_string());
        let html = sample_letter(&legislators).render().unwrap();

        assert!(html.contains("visit example.org"));
        assert!(!html.contains("<li>"));
    }

    #[test]
    fn renders_without_a_phone_number() {
        let legislators = LegislatorLookup::Officials(vec!["Maria Cantwell".to_string()]);
        let letter = LetterTemplate {
            phone: None,
            ..sample_letter(&legislators)
        };
        let html = letter.render().unwrap();
        assert!(html.contains("Allison"));
        assert!(!html.contains("6154385000"));
    }

    #[test]
    fn save_letter_creates_directory_and_file() {
        let dir = tempdir().unwrap();
        let letters_dir = dir.path().join("output");

        let path = save_letter(&letters_dir, "42", "<html></html>").unwrap();

        assert_eq!(path, letters_dir.join("letter_42.html"));
        assert_eq!(fs::read_to_string(path).unwrap(), "<html></html>");
    }
}
