//! Special-file detection and folder/file partitioning.

use crate::drive::DriveFile;

/// MIME prefix a banner must carry.
pub const IMAGE_MIME_PREFIX: &str = "image/";

/// Readme and banner records found on a page.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpecialFiles<'a> {
    /// First record named exactly like the readme.
    pub readme: Option<&'a DriveFile>,
    /// First image whose name starts with the banner prefix.
    pub banner: Option<&'a DriveFile>,
}

/// Locate the readme and banner in provider order.
///
/// Folders and hidden files take part in the search; the readme match
/// ignores the MIME type.
pub fn find_special_files<'a>(
    files: &'a [DriveFile],
    readme_name: &str,
    banner_prefix: &str,
) -> SpecialFiles<'a> {
    let mut found = SpecialFiles::default();

    for file in files {
        if found.readme.is_none() && file.name.as_deref() == Some(readme_name) {
            found.readme = Some(file);
        }
        if found.banner.is_none() && is_banner(file, banner_prefix) {
            found.banner = Some(file);
        }
        if found.readme.is_some() && found.banner.is_some() {
            break;
        }
    }

    found
}

fn is_banner(file: &DriveFile, banner_prefix: &str) -> bool {
    let name_matches = file
        .name
        .as_deref()
        .is_some_and(|name| name.starts_with(banner_prefix));
    let is_image = file
        .mime_type
        .as_deref()
        .is_some_and(|mime| mime.starts_with(IMAGE_MIME_PREFIX));
    name_matches && is_image
}

/// Whether the record's name starts with one of the hidden prefixes.
pub fn is_hidden(file: &DriveFile, hidden_prefixes: &[String]) -> bool {
    file.name.as_deref().is_some_and(|name| {
        hidden_prefixes
            .iter()
            .any(|prefix| name.starts_with(prefix.as_str()))
    })
}

/// Split records into folders and visible files.
///
/// Hidden prefixes only apply to files; a folder is never dropped.
pub fn partition(
    files: Vec<DriveFile>,
    hidden_prefixes: &[String],
) -> (Vec<DriveFile>, Vec<DriveFile>) {
    let (folders, others): (Vec<_>, Vec<_>) = files.into_iter().partition(DriveFile::is_folder);
    let visible = others
        .into_iter()
        .filter(|file| !is_hidden(file, hidden_prefixes))
        .collect();
    (folders, visible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drive::FOLDER_MIME_TYPE;

    fn record(id: &str, name: &str, mime: &str) -> DriveFile {
        DriveFile {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            mime_type: Some(mime.to_string()),
            ..Default::default()
        }
    }

    fn hidden() -> Vec<String> {
        vec![".password".to_string(), "_".to_string()]
    }

    #[test]
    fn test_readme_ignores_mime_type() {
        let files = vec![
            record("1", "notes.txt", "text/plain"),
            record("2", "README.md", "application/octet-stream"),
        ];
        let found = find_special_files(&files, "README.md", "banner");
        assert_eq!(found.readme.and_then(|f| f.id.as_deref()), Some("2"));
        assert!(found.banner.is_none());
    }

    #[test]
    fn test_readme_exact_name_only() {
        let files = vec![record("1", "README.md.bak", "text/markdown")];
        let found = find_special_files(&files, "README.md", "banner");
        assert!(found.readme.is_none());
    }

    #[test]
    fn test_banner_requires_image() {
        let files = vec![
            record("1", "banner.txt", "text/plain"),
            record("2", "banner.png", "image/png"),
            record("3", "banner.jpg", "image/jpeg"),
        ];
        let found = find_special_files(&files, "README.md", "banner");
        assert_eq!(found.banner.and_then(|f| f.id.as_deref()), Some("2"));
    }

    #[test]
    fn test_first_match_wins() {
        let files = vec![
            record("1", "README.md", "text/markdown"),
            record("2", "README.md", "text/markdown"),
        ];
        let found = find_special_files(&files, "README.md", "banner");
        assert_eq!(found.readme.and_then(|f| f.id.as_deref()), Some("1"));
    }

    #[test]
    fn test_nameless_record_never_special() {
        let files = vec![DriveFile {
            mime_type: Some("image/png".to_string()),
            ..Default::default()
        }];
        let found = find_special_files(&files, "", "");
        assert!(found.readme.is_none());
        assert!(found.banner.is_none());
    }

    #[test]
    fn test_is_hidden() {
        assert!(is_hidden(&record("1", ".password", "text/plain"), &hidden()));
        assert!(is_hidden(&record("1", "_draft.md", "text/plain"), &hidden()));
        assert!(!is_hidden(&record("1", "draft_.md", "text/plain"), &hidden()));
        assert!(!is_hidden(&DriveFile::default(), &hidden()));
    }

    #[test]
    fn test_partition() {
        let files = vec![
            record("d1", "_archive", FOLDER_MIME_TYPE),
            record("f1", "photo.jpg", "image/jpeg"),
            record("f2", ".password", "text/plain"),
            record("d2", "docs", FOLDER_MIME_TYPE),
        ];

        let (folders, visible) = partition(files, &hidden());

        let folder_ids: Vec<_> = folders.iter().filter_map(|f| f.id.as_deref()).collect();
        let file_ids: Vec<_> = visible.iter().filter_map(|f| f.id.as_deref()).collect();
        assert_eq!(folder_ids, vec!["d1", "d2"]);
        assert_eq!(file_ids, vec!["f1"]);
    }
}
