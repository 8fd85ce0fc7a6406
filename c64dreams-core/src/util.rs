/// Number of characters (not bytes) in `s`.
pub fn char_count(s: &str) -> usize {
    s.chars().count()
}

/// Cut `s` down to at most `max` characters.
///
/// Always splits on a character boundary, never inside a multi-byte sequence.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Reduce a string to its lower-case ASCII alphanumerics.
///
/// `"Jumpman Jr."` and `"jumpman_jr"` both become `"jumpmanjr"`.
pub fn slug(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Whether `candidate` fuzzily matches any of `targets`.
///
/// Two slugs match when they are equal or one contains the other. Empty
/// slugs on either side never match.
pub fn slug_matches<S: AsRef<str>>(candidate: &str, targets: &[S]) -> bool {
    if candidate.is_empty() {
        return false;
    }
    targets.iter().any(|target| {
        let target: &str = target.as_ref();
        !target.is_empty() && (candidate.contains(target) || target.contains(candidate))
    })
}

/// Lower-cased, dash-joined alphanumeric runs: `"Test Game!"` → `"test-game"`.
pub fn slugify(s: &str) -> String {
    s.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Sanitize a name for use as a single path component.
///
/// Lower-cases, drops apostrophes, maps every other non-alphanumeric,
/// non-space character to `-`, collapses runs of spaces and dashes to their
/// first character and trims spaces and dashes from both ends.
pub fn sanitize_name(name: &str) -> String {
    fold_name(name, false)
}

/// Sanitize a file name, keeping (and lower-casing) its extension.
///
/// Same rules as [`sanitize_name`] applied to the stem, except underscores
/// count as spaces.
pub fn sanitize_file_name(name: &str) -> String {
    let trimmed = name.trim();
    let (stem, ext) = split_extension(trimmed);
    let clean = fold_name(stem, true);
    match ext {
        Some(ext) => format!("{}.{}", clean, ext.to_lowercase()),
        None => clean,
    }
}

/// Split a file name at its last dot.
///
/// A leading dot (`.hidden`) or a trailing one (`name.`) is not treated as
/// an extension separator.
pub fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < name.len() => (&name[..idx], Some(&name[idx + 1..])),
        _ => (name, None),
    }
}

fn fold_name(name: &str, underscore_as_space: bool) -> String {
    let is_sep = |c: char| c == ' ' || c == '-';
    let mut out = String::with_capacity(name.len());
    let mut last: Option<char> = None;

    for ch in name.trim().chars() {
        let c = match ch {
            '\'' => continue,
            '_' if underscore_as_space => ' ',
            ' ' => ' ',
            c if c.is_ascii_alphanumeric() => c.to_ascii_lowercase(),
            _ => '-',
        };
        if is_sep(c) && last.is_some_and(is_sep) {
            continue;
        }
        out.push(c);
        last = Some(c);
    }

    out.trim_matches(is_sep).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("Jumpman", 4), "Jump");
        assert_eq!(truncate_chars("Jumpman", 7), "Jumpman");
        assert_eq!(truncate_chars("Jumpman", 20), "Jumpman");
        assert_eq!(truncate_chars("Jumpman", 0), "");
        // multi-byte characters count once
        assert_eq!(truncate_chars("Ünïcödé", 3), "Ünï");
        assert_eq!(char_count("Ünïcödé"), 7);
    }

    #[test]
    fn test_slug() {
        assert_eq!(slug("Jumpman Jr."), "jumpmanjr");
        assert_eq!(slug("jumpman_jr"), "jumpmanjr");
        assert_eq!(slug("Summer Games II (1985)"), "summergamesii1985");
        assert_eq!(slug("!!!"), "");
    }

    #[test]
    fn test_slug_matches() {
        assert!(slug_matches("jumpman", &["jumpman"]));
        assert!(slug_matches("jumpmanjr", &["jumpman"]));
        assert!(slug_matches("jump", &["", "jumpman"]));
        assert!(!slug_matches("elite", &["jumpman"]));
        assert!(!slug_matches("", &["jumpman"]));
        assert!(!slug_matches("jumpman", &[""]));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Test Game"), "test-game");
        assert_eq!(slugify("  Boulder Dash: Part II! "), "boulder-dash-part-ii");
        assert_eq!(slugify("***"), "");
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("Jumpman"), "jumpman");
        assert_eq!(sanitize_name("Impossible Mission 2"), "impossible mission 2");
        assert_eq!(sanitize_name("Archon: The Light"), "archon-the light");
        assert_eq!(sanitize_name("Ghosts 'n Goblins"), "ghosts n goblins");
        assert_eq!(sanitize_name("  --Disk~1--  "), "disk-1");
        assert_eq!(sanitize_name("a  -  b"), "a b");
        assert_eq!(sanitize_name("Side_A"), "side-a");
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("Disk_1.D64"), "disk 1.d64");
        assert_eq!(sanitize_file_name("Bruce Lee's Quest.tap"), "bruce lees quest.tap");
        assert_eq!(sanitize_file_name("Side (A).d64"), "side a.d64");
        assert_eq!(sanitize_file_name("README"), "readme");
    }

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("game.d64"), ("game", Some("d64")));
        assert_eq!(split_extension("game.tar.zip"), ("game.tar", Some("zip")));
        assert_eq!(split_extension("game"), ("game", None));
        assert_eq!(split_extension(".hidden"), (".hidden", None));
        assert_eq!(split_extension("game."), ("game.", None));
    }
}
