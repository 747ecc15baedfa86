/// Compound genre names that must survive tokenization instead of being
/// split on the dash or space between their halves.
const PROTECTED_COMPOUNDS: &[(&str, &[&str])] = &[
    ("Sci-Fi", &["sci-fi", "sci fi"]),
    ("Third-Person", &["third-person", "third person"]),
    ("First-Person", &["first-person", "first person"]),
    ("Open-World", &["open-world", "open world"]),
    ("Turn-Based", &["turn-based", "turn based"]),
    ("Co-Op", &["co-op", "co op"]),
];

/// Platform-ish or vague words that make poor game-type filters.
const GENRE_BLACKLIST: &[&str] = &[
    "ps3",
    "nintendo",
    "sega",
    "xbox",
    "playstation",
    "wii",
    "art",
    "and",
    "&",
];

fn matches_at(chars: &[char], at: usize, needle: &[char]) -> bool {
    if at + needle.len() > chars.len() {
        return false;
    }
    chars[at..at + needle.len()]
        .iter()
        .zip(needle)
        .all(|(a, b)| a.to_lowercase().eq(b.to_lowercase()))
}

fn is_boundary(chars: &[char], index: Option<usize>) -> bool {
    match index {
        Some(i) => chars.get(i).map_or(true, |c| !c.is_alphanumeric()),
        None => true,
    }
}

/// Case-insensitive whole-word replacement, used to shield the protected
/// compounds before splitting.
fn replace_word_ci(text: &str, needle: &str, replacement: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let needle: Vec<char> = needle.to_lowercase().chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        let before_ok = i == 0 || is_boundary(&chars, i.checked_sub(1));
        if before_ok
            && matches_at(&chars, i, &needle)
            && is_boundary(&chars, Some(i + needle.len()))
        {
            out.push_str(replacement);
            i += needle.len();
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

fn placeholder(index: usize) -> String {
    format!("__COMPOUND{}__", index)
}

/// Splits a free-text genre field into normalized game-type tokens.
pub fn genre_tokens(genre: &str) -> Vec<String> {
    let mut text = genre.replace(',', " ").replace('/', " ");
    for (index, (_, variants)) in PROTECTED_COMPOUNDS.iter().enumerate() {
        for variant in *variants {
            text = replace_word_ci(&text, variant, &placeholder(index));
        }
    }
    let text = text.replace('-', " ");

    let mut tokens = Vec::new();
    for word in text.split_whitespace() {
        let word = match PROTECTED_COMPOUNDS
            .iter()
            .enumerate()
            .find(|(index, _)| word == placeholder(*index))
        {
            Some((_, (canonical, _))) => canonical.to_string(),
            None => word.to_string(),
        };
        if word.chars().count() <= 1 {
            continue;
        }
        if GENRE_BLACKLIST.contains(&word.to_lowercase().as_str()) {
            continue;
        }
        let word = if !word.contains('_') && !word.contains('-') {
            title_case(&word)
        } else {
            word
        };
        tokens.push(word);
    }
    tokens
}

/// "2010s" -> (2010, 2019); anything else is ignored by the caller.
pub fn parse_decade(token: &str) -> Option<(i32, i32)> {
    let years = token.strip_suffix('s')?;
    let start: i32 = years.parse().ok()?;
    Some((start, start + 9))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_separators_and_title_cases() {
        assert_eq!(
            genre_tokens("action, adventure/puzzle"),
            vec!["Action", "Adventure", "Puzzle"]
        );
        assert_eq!(genre_tokens("Action-Adventure"), vec!["Action", "Adventure"]);
    }

    #[test]
    fn protects_compound_genres() {
        assert_eq!(genre_tokens("Sci-Fi Action"), vec!["Sci-Fi", "Action"]);
        assert_eq!(genre_tokens("sci fi shooter"), vec!["Sci-Fi", "Shooter"]);
        assert_eq!(
            genre_tokens("Open World, turn based RPG"),
            vec!["Open-World", "Turn-Based", "Rpg"]
        );
    }

    #[test]
    fn drops_blacklisted_and_single_letter_words() {
        assert_eq!(genre_tokens("Xbox Action & Art"), vec!["Action"]);
        assert_eq!(genre_tokens("a Action"), vec!["Action"]);
    }

    #[test]
    fn compound_is_not_replaced_inside_another_word() {
        // "wii" is blacklisted, "artful" is not the word "art"
        assert_eq!(genre_tokens("artful"), vec!["Artful"]);
    }

    #[test]
    fn parses_decade_tokens() {
        assert_eq!(parse_decade("2010s"), Some((2010, 2019)));
        assert_eq!(parse_decade("1990s"), Some((1990, 1999)));
        assert_eq!(parse_decade("2010"), None);
        assert_eq!(parse_decade("recent"), None);
    }
}
