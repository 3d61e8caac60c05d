//! Typographic punctuation cleanup.
//!
//! The PDF fonts only cover WinAnsi, so curly quotes and long dashes are
//! rewritten to their ASCII forms before layout.

/// Characters replaced before layout, with their ASCII stand-ins.
const REPLACEMENTS: &[(char, &str)] = &[
    ('\u{2018}', "'"),
    ('\u{2019}', "'"),
    ('\u{201c}', "\""),
    ('\u{201d}', "\""),
    ('\u{2013}', "-"),
    ('\u{2014}', "-"),
];

/// Replace typographic punctuation and collapse whitespace.
///
/// Every whitespace run (including newlines and tabs) becomes one space and
/// the result is trimmed. Applying it twice gives the same result as once.
pub fn normalize(text: &str) -> String {
    let mut replaced = String::with_capacity(text.len());
    for c in text.chars() {
        match REPLACEMENTS.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => replaced.push_str(to),
            None => replaced.push(c),
        }
    }

    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Map a character to its WinAnsiEncoding byte, if the encoding has one.
pub fn winansi_byte(c: char) -> Option<u8> {
    let byte = match c {
        ' '..='~' | '\u{a0}'..='\u{ff}' => c as u8,
        '\u{20ac}' => 0x80,
        '\u{201a}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201e}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02c6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8a,
        '\u{2039}' => 0x8b,
        '\u{0152}' => 0x8c,
        '\u{017d}' => 0x8e,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201c}' => 0x93,
        '\u{201d}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02dc}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9a,
        '\u{203a}' => 0x9b,
        '\u{0153}' => 0x9c,
        '\u{017e}' => 0x9e,
        '\u{0178}' => 0x9f,
        _ => return None,
    };
    Some(byte)
}

/// Characters in `text` that the PDF fonts cannot show.
pub fn unencodable_chars(text: &str) -> Vec<char> {
    let mut found: Vec<char> = Vec::new();
    for c in text.chars() {
        if winansi_byte(c).is_none() && !found.contains(&c) {
            found.push(c);
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_typographic_punctuation() {
        assert_eq!(
            normalize("It\u{2019}s a \u{201c}test\u{201d} \u{2014} really"),
            "It's a \"test\" - really"
        );
        assert_eq!(normalize("\u{2018}rei\u{2019} \u{2013} bow"), "'rei' - bow");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize("  a   b  "), "a b");
        assert_eq!(normalize("line one\n\tline two\r\n"), "line one line two");
        assert_eq!(normalize("non\u{a0}breaking"), "non breaking");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t "), "");
    }

    #[test]
    fn idempotent() {
        let inputs = [
            "It\u{2019}s a \u{201c}test\u{201d} \u{2014} really",
            "  a   b  ",
            "Is  seiken\nthe correct fist?",
            "already clean",
            "\u{2014}\u{2014}",
            "",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn winansi_mapping() {
        assert_eq!(winansi_byte('A'), Some(b'A'));
        assert_eq!(winansi_byte('\u{e9}'), Some(0xe9));
        assert_eq!(winansi_byte('\u{20ac}'), Some(0x80));
        assert_eq!(winansi_byte('\u{2026}'), Some(0x85));
        assert_eq!(winansi_byte('\n'), None);
        assert_eq!(winansi_byte('\u{14d}'), None);
        assert_eq!(winansi_byte('空'), None);
    }

    #[test]
    fn reports_unencodable_once() {
        assert_eq!(unencodable_chars("Jōdan and chūdan ō"), vec!['ō', 'ū']);
        assert!(unencodable_chars("Gedan barai").is_empty());
    }

    #[test]
    fn leaves_other_characters_alone() {
        assert_eq!(normalize("Jōdan tsuki"), "Jōdan tsuki");
        assert_eq!(normalize("a - b 'c' \"d\""), "a - b 'c' \"d\"");
    }
}
