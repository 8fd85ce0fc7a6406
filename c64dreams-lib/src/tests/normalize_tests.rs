use super::*;
use c64dreams_core::{ContentType, Variant};

fn game(id: &str, title: &str, labels: &[&str]) -> Game {
    Game {
        id: id.to_string(),
        title: title.to_string(),
        region: Region::Both,
        variants: labels
            .iter()
            .map(|label| Variant {
                label: label.to_string(),
                region: None,
                preferred_target: TargetDevice::Ultimate,
                content_type: ContentType::Disk,
                source_path: None,
                notes: String::new(),
            })
            .collect(),
    }
}

#[test]
fn test_roman_numerals_fold_to_digits() {
    let name = normalize_name("Impossible Mission II", 0);
    assert_eq!(name.normalized, "Impossible Mission 2");
    assert!(!name.truncated);
    assert_eq!(name.original, "Impossible Mission II");
}

#[test]
fn test_every_numeral_in_the_table() {
    let name = normalize_name("i ii iii iv v vi vii viii ix x xi", 0);
    assert_eq!(name.normalized, "1 2 3 4 5 6 7 8 9 10 Xi");
}

#[test]
fn test_truncates_to_budget() {
    let name = normalize_name("The Great Giana Sisters", 8);
    assert!(name.truncated);
    assert_eq!(name.normalized.chars().count(), 8);
    assert_eq!(name.normalized, "Great Gi");
}

#[test]
fn test_stop_words_are_dropped() {
    let name = normalize_name("Lord of the Rings: The Fellowship", 0);
    assert_eq!(name.normalized, "Lord Rings Fellowship");
}

#[test]
fn test_apostrophes_vanish_without_a_space() {
    let name = normalize_name("Bruce Lee's Quest", 0);
    assert_eq!(name.normalized, "Bruce Lees Quest");
}

#[test]
fn test_punctuation_runs_become_one_space() {
    let name = normalize_name("  Boulder---Dash!!  Construction...Kit ", 0);
    assert_eq!(name.normalized, "Boulder Dash Construction Kit");
}

#[test]
fn test_words_are_title_cased() {
    let name = normalize_name("PARADROID mEGA edition", 0);
    assert_eq!(name.normalized, "Paradroid Mega Edition");
}

#[test]
fn test_empty_and_stopword_only_input() {
    assert_eq!(normalize_name("", 16).normalized, "");
    assert_eq!(normalize_name("   ", 16).normalized, "");
    let name = normalize_name("The Of And", 16);
    assert_eq!(name.normalized, "");
    assert!(!name.truncated);
}

#[test]
fn test_non_ascii_letters_are_treated_as_punctuation() {
    let name = normalize_name("Die Schatzinsel Über Alles", 0);
    assert_eq!(name.normalized, "Die Schatzinsel Ber Alles");
}

#[test]
fn test_length_never_exceeds_budget() {
    let inputs = [
        "The Great Giana Sisters",
        "ABCDEFGHIJKLMNOPQRSTUVWXABCDEFGHIJKLMNOPQRSTUVWX",
        "Zak McKracken and the Alien Mindbenders",
        "x",
        "",
    ];
    for input in inputs {
        for max in 1..20 {
            let name = normalize_name(input, max);
            assert!(
                name.normalized.chars().count() <= max,
                "'{}' at {} gave '{}'",
                input,
                max,
                name.normalized
            );
        }
    }
}

#[test]
fn test_effective_max_len_prefers_override() {
    let opts = NormalizeOptions::new(TargetDevice::Ultimate);
    assert_eq!(opts.effective_max_len(), 255);
    assert_eq!(opts.max_name_len(10).effective_max_len(), 10);
    assert_eq!(NormalizeOptions::new(TargetDevice::Pi1541).effective_max_len(), 16);
}

#[test]
fn test_target_specific_lengths() {
    let long_title = "ABCDEFGHIJKLMNOPQRSTUVWXABCDEFGHIJKLMNOPQRSTUVWX";
    let g = game("g", long_title, &[]);

    for target in [TargetDevice::Sd2iec, TargetDevice::Pi1541] {
        let ng = normalize_game(&g, &NormalizeOptions::new(target));
        assert_eq!(ng.name.normalized.chars().count(), 16, "{}", target);
        assert!(ng.name.truncated);
    }
    for target in [TargetDevice::KungFuFlash, TargetDevice::Ultimate] {
        let ng = normalize_game(&g, &NormalizeOptions::new(target));
        assert!(ng.name.normalized.chars().count() > 16, "{}", target);
        assert!(!ng.name.truncated);
    }
}

#[test]
fn test_normalize_game_carries_variant_fields() {
    let mut g = game("jumpman", "Jumpman", &["Disk 1", "Tape"]);
    g.region = Region::Pal;
    g.variants[1].region = Some(Region::Ntsc);
    g.variants[1].content_type = ContentType::Tape;
    g.variants[1].source_path = Some("tapes/Jumpman.tap".to_string());
    g.variants[1].notes = "Needs turbo".to_string();

    let ng = normalize_game(&g, &NormalizeOptions::new(TargetDevice::Sd2iec));
    assert_eq!(ng.id, "jumpman");
    assert_eq!(ng.target, TargetDevice::Sd2iec);
    assert_eq!(ng.name.normalized, "Jumpman");
    assert_eq!(ng.variants.len(), 2);
    assert_eq!(ng.variants[0].label.normalized, "Disk 1");
    assert_eq!(ng.variants[0].region, Region::Pal, "inherits game region");
    assert_eq!(ng.variants[1].region, Region::Ntsc);
    assert_eq!(ng.variants[1].content_type, ContentType::Tape);
    assert_eq!(ng.variants[1].source_path.as_deref(), Some("tapes/Jumpman.tap"));
    assert_eq!(ng.variants[1].notes, "Needs turbo");
}

#[test]
fn test_normalize_games_applies_region_filter() {
    let mut pal = game("a", "Pal Game", &["Disk"]);
    pal.region = Region::Pal;
    let mut ntsc = game("b", "Ntsc Game", &["Disk"]);
    ntsc.region = Region::Ntsc;
    let both = game("c", "Any Game", &["Disk"]);
    let games = vec![pal, ntsc, both];
    let opts = NormalizeOptions::new(TargetDevice::Ultimate);

    let ids = |filter| -> Vec<String> {
        normalize_games(&games, filter, &opts)
            .into_iter()
            .map(|g| g.id)
            .collect()
    };
    assert_eq!(ids(Region::Both), vec!["a", "b", "c"]);
    assert_eq!(ids(Region::Pal), vec!["a", "c"]);
    assert_eq!(ids(Region::Ntsc), vec!["b", "c"]);
}
