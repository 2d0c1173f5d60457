//! Filename derivation for uploaded audio.
//!
//! An upload carries the client's original filename. From it we derive:
//! - the *safe name* used on disk (slugified stem + lowercased extension)
//! - the *display filename* stored in the database (lowercased stem)
//! - the *filetype* (lowercased extension without the dot)

const SEPARATORS: &[char] = &['/', '\\'];

/// Names derived from an uploaded file's original filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedName {
    pub safe_name: String,
    pub filename: String,
    pub filetype: String,
}

impl DerivedName {
    /// Derive all names from the client-supplied filename.
    ///
    /// Only the last path component is considered, with both `/` and `\` treated as
    /// separators. The extension starts at the last `.` of that component.
    ///
    /// A stem without any alphanumeric characters slugifies to an empty string, so
    /// e.g. `!!!.mp3` and `???.mp3` share the safe name `.mp3`.
    pub fn from_original(original: &str) -> Self {
        let base = base_name(original).trim();
        let (stem, ext) = split_extension(base);
        let ext = ext.to_lowercase();

        let mut safe_name = slug::slugify(stem);
        if !ext.is_empty() {
            safe_name.push('.');
            safe_name.push_str(&ext);
        }

        DerivedName {
            safe_name,
            filename: stem.to_lowercase(),
            filetype: ext,
        }
    }
}

/// Error returned when a requested stream filename cannot name a stored file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamNameError {
    Empty,
    Traversal,
    NullByte,
}

impl StreamNameError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "Filename cannot be empty",
            Self::Traversal => "Invalid filename: '.' and '..' are not allowed",
            Self::NullByte => "Invalid filename: null bytes are not allowed",
        }
    }
}

/// Reduce a requested stream filename to its last path component.
pub fn stream_name(requested: &str) -> Result<&str, StreamNameError> {
    let name = base_name(requested.trim_end_matches(SEPARATORS));

    if name.contains('\0') {
        return Err(StreamNameError::NullByte);
    }
    if name.trim().is_empty() {
        return Err(StreamNameError::Empty);
    }
    if name == "." || name == ".." {
        return Err(StreamNameError::Traversal);
    }

    Ok(name)
}

fn base_name(path: &str) -> &str {
    match path.rfind(SEPARATORS) {
        Some(pos) => &path[pos + 1..],
        None => path,
    }
}

/// Split `name` at its last `.` into (stem, extension-without-dot).
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(pos) => (&name[..pos], &name[pos + 1..]),
        None => (name, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_names_for_spaced_title() {
        let derived = DerivedName::from_original("Ponto De Abertura.mp3");
        assert_eq!(derived.safe_name, "ponto-de-abertura.mp3");
        assert_eq!(derived.filename, "ponto de abertura");
        assert_eq!(derived.filetype, "mp3");
    }

    #[test]
    fn lowercases_extension_everywhere() {
        let derived = DerivedName::from_original("Saudação.MP3");
        assert_eq!(derived.safe_name, "saudacao.mp3");
        assert_eq!(derived.filename, "saudação");
        assert_eq!(derived.filetype, "mp3");
    }

    #[test]
    fn keeps_only_base_component() {
        let derived = DerivedName::from_original("C:\\Users\\ana\\Music\\Canto.ogg");
        assert_eq!(derived.safe_name, "canto.ogg");
        assert_eq!(derived.filename, "canto");

        let derived = DerivedName::from_original("../../etc/hino.wav");
        assert_eq!(derived.safe_name, "hino.wav");
        assert_eq!(derived.filename, "hino");
    }

    #[test]
    fn no_extension_yields_empty_filetype() {
        let derived = DerivedName::from_original("Ogum Beira-Mar");
        assert_eq!(derived.safe_name, "ogum-beira-mar");
        assert_eq!(derived.filename, "ogum beira-mar");
        assert_eq!(derived.filetype, "");
    }

    #[test]
    fn only_last_dot_starts_extension() {
        let derived = DerivedName::from_original("Live 2024.06.flac");
        assert_eq!(derived.safe_name, "live-2024-06.flac");
        assert_eq!(derived.filename, "live 2024.06");
        assert_eq!(derived.filetype, "flac");
    }

    #[test]
    fn symbol_only_stems_share_a_safe_name() {
        let a = DerivedName::from_original("!!!.mp3");
        let b = DerivedName::from_original("???.mp3");
        assert_eq!(a.safe_name, ".mp3");
        assert_eq!(a.safe_name, b.safe_name);
        assert_ne!(a.filename, b.filename);
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let derived = DerivedName::from_original("  Exu.mp3  ");
        assert_eq!(derived.safe_name, "exu.mp3");
        assert_eq!(derived.filename, "exu");
        assert_eq!(derived.filetype, "mp3");
    }

    #[test]
    fn stream_name_accepts_plain_names() {
        assert_eq!(stream_name("ponto-de-abertura.mp3"), Ok("ponto-de-abertura.mp3"));
    }

    #[test]
    fn stream_name_strips_directories() {
        assert_eq!(stream_name("../../etc/passwd"), Ok("passwd"));
        assert_eq!(stream_name("..\\secret.mp3"), Ok("secret.mp3"));
        assert_eq!(stream_name("nested/dir/"), Ok("dir"));
    }

    #[test]
    fn stream_name_rejects_traversal_and_empty() {
        assert_eq!(stream_name(".."), Err(StreamNameError::Traversal));
        assert_eq!(stream_name("a/.."), Err(StreamNameError::Traversal));
        assert_eq!(stream_name("."), Err(StreamNameError::Traversal));
        assert_eq!(stream_name(""), Err(StreamNameError::Empty));
        assert_eq!(stream_name("/"), Err(StreamNameError::Empty));
        assert_eq!(stream_name("a\0b"), Err(StreamNameError::NullByte));
    }
}
