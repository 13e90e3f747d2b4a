//! Unicode lookup oracles backing `\p{Name}` / `\P{Name}` classes.
//!
//! A class name resolves, in order, as a short category (`L`), a short
//! subcategory (`Lu`), a long category or subcategory (`Letter`,
//! `Uppercase_Letter`), a block (static table; names compare with case,
//! spaces, hyphens, and underscores ignored, plus an optional `In`/`Is`
//! prefix), and finally a script full name (`Greek`).

use unicode_general_category::{GeneralCategory, get_general_category};
use unicode_script::{Script, UnicodeScript};

/// Resolved `\p{...}` predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ClassMatcher {
    /// Set of two-letter general-category codes.
    Categories(Vec<&'static str>),
    /// Inclusive code-point range of a named block.
    Block { lo: u32, hi: u32 },
    /// Script membership.
    Script(Script),
}

impl ClassMatcher {
    pub(crate) fn matches(&self, c: char) -> bool {
        match self {
            ClassMatcher::Categories(codes) => codes.contains(&category_of(c)),
            ClassMatcher::Block { lo, hi } => (*lo..=*hi).contains(&(c as u32)),
            ClassMatcher::Script(script) => c.script() == *script,
        }
    }
}

/// Name lookup across the category/block/script namespaces.
pub(crate) fn resolve_class(name: &str) -> Option<ClassMatcher> {
    if let Some(codes) = category_hierarchy(name) {
        return Some(ClassMatcher::Categories(codes.to_vec()));
    }
    if let Some(code) = SHORT_SUBCATEGORIES.iter().copied().find(|code| *code == name) {
        return Some(ClassMatcher::Categories(vec![code]));
    }
    if let Some(short) = long_to_short(name) {
        let codes = match category_hierarchy(short) {
            Some(codes) => codes.to_vec(),
            None => vec![short],
        };
        return Some(ClassMatcher::Categories(codes));
    }
    if let Some((lo, hi)) = block_range(name) {
        return Some(ClassMatcher::Block { lo, hi });
    }
    Script::from_full_name(name).map(ClassMatcher::Script)
}

const SHORT_SUBCATEGORIES: &[&str] = &[
    "Lu", "Ll", "Lt", "Lm", "Lo", "Mn", "Mc", "Me", "Nd", "Nl", "No", "Pc", "Pd", "Ps", "Pe",
    "Pi", "Pf", "Po", "Sm", "Sc", "Sk", "So", "Zs", "Zl", "Zp", "Cc", "Cf", "Cs", "Co", "Cn",
];

/// Short category → its subcategory codes.
pub(crate) fn category_hierarchy(short: &str) -> Option<&'static [&'static str]> {
    Some(match short {
        "L" => &["Lu", "Ll", "Lt", "Lm", "Lo"],
        "M" => &["Mn", "Mc", "Me"],
        "N" => &["Nd", "Nl", "No"],
        "P" => &["Pc", "Pd", "Ps", "Pe", "Pi", "Pf", "Po"],
        "S" => &["Sm", "Sc", "Sk", "So"],
        "Z" => &["Zs", "Zl", "Zp"],
        "C" => &["Cc", "Cf", "Cs", "Co", "Cn"],
        _ => return None,
    })
}

fn long_to_short(name: &str) -> Option<&'static str> {
    Some(match name {
        "Letter" => "L",
        "Mark" => "M",
        "Number" => "N",
        "Punctuation" => "P",
        "Symbol" => "S",
        "Separator" => "Z",
        "Other" => "C",
        "Uppercase_Letter" => "Lu",
        "Lowercase_Letter" => "Ll",
        "Titlecase_Letter" => "Lt",
        "Modifier_Letter" => "Lm",
        "Other_Letter" => "Lo",
        "Nonspacing_Mark" => "Mn",
        "Spacing_Mark" => "Mc",
        "Enclosing_Mark" => "Me",
        "Decimal_Number" => "Nd",
        "Letter_Number" => "Nl",
        "Other_Number" => "No",
        "Connector_Punctuation" => "Pc",
        "Dash_Punctuation" => "Pd",
        "Open_Punctuation" => "Ps",
        "Close_Punctuation" => "Pe",
        "Initial_Punctuation" => "Pi",
        "Final_Punctuation" => "Pf",
        "Other_Punctuation" => "Po",
        "Math_Symbol" => "Sm",
        "Currency_Symbol" => "Sc",
        "Modifier_Symbol" => "Sk",
        "Other_Symbol" => "So",
        "Space_Separator" => "Zs",
        "Line_Separator" => "Zl",
        "Paragraph_Separator" => "Zp",
        "Control" => "Cc",
        "Format" => "Cf",
        "Surrogate" => "Cs",
        "Private_Use" => "Co",
        "Unassigned" => "Cn",
        _ => return None,
    })
}

/// Two-letter general-category code of a character.
pub(crate) fn category_of(c: char) -> &'static str {
    match get_general_category(c) {
        GeneralCategory::UppercaseLetter => "Lu",
        GeneralCategory::LowercaseLetter => "Ll",
        GeneralCategory::TitlecaseLetter => "Lt",
        GeneralCategory::ModifierLetter => "Lm",
        GeneralCategory::OtherLetter => "Lo",
        GeneralCategory::NonspacingMark => "Mn",
        GeneralCategory::SpacingMark => "Mc",
        GeneralCategory::EnclosingMark => "Me",
        GeneralCategory::DecimalNumber => "Nd",
        GeneralCategory::LetterNumber => "Nl",
        GeneralCategory::OtherNumber => "No",
        GeneralCategory::ConnectorPunctuation => "Pc",
        GeneralCategory::DashPunctuation => "Pd",
        GeneralCategory::OpenPunctuation => "Ps",
        GeneralCategory::ClosePunctuation => "Pe",
        GeneralCategory::InitialPunctuation => "Pi",
        GeneralCategory::FinalPunctuation => "Pf",
        GeneralCategory::OtherPunctuation => "Po",
        GeneralCategory::MathSymbol => "Sm",
        GeneralCategory::CurrencySymbol => "Sc",
        GeneralCategory::ModifierSymbol => "Sk",
        GeneralCategory::OtherSymbol => "So",
        GeneralCategory::SpaceSeparator => "Zs",
        GeneralCategory::LineSeparator => "Zl",
        GeneralCategory::ParagraphSeparator => "Zp",
        GeneralCategory::Control => "Cc",
        GeneralCategory::Format => "Cf",
        GeneralCategory::Surrogate => "Cs",
        GeneralCategory::PrivateUse => "Co",
        GeneralCategory::Unassigned => "Cn",
    }
}

/// Inclusive code-point range of a named block. Names compare with case,
/// spaces, hyphens, and underscores ignored, with an optional `In`/`Is`
/// prefix.
pub(crate) fn block_range(name: &str) -> Option<(u32, u32)> {
    fn normalize(name: &str) -> String {
        name.chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .map(|c| c.to_ascii_lowercase())
            .collect()
    }
    let key = normalize(name);
    let lookup = |key: &str| {
        BLOCKS
            .iter()
            .find(|(block, _, _)| normalize(block) == key)
            .map(|(_, lo, hi)| (*lo, *hi))
    };
    lookup(&key)
        .or_else(|| key.strip_prefix("in").and_then(|rest| lookup(rest)))
        .or_else(|| key.strip_prefix("is").and_then(|rest| lookup(rest)))
}

const BLOCKS: &[(&str, u32, u32)] = &[
    ("Basic_Latin", 0x0000, 0x007F),
    ("Latin_1_Supplement", 0x0080, 0x00FF),
    ("Latin_Extended_A", 0x0100, 0x017F),
    ("Latin_Extended_B", 0x0180, 0x024F),
    ("IPA_Extensions", 0x0250, 0x02AF),
    ("Spacing_Modifier_Letters", 0x02B0, 0x02FF),
    ("Combining_Diacritical_Marks", 0x0300, 0x036F),
    ("Greek_and_Coptic", 0x0370, 0x03FF),
    ("Cyrillic", 0x0400, 0x04FF),
    ("Cyrillic_Supplement", 0x0500, 0x052F),
    ("Armenian", 0x0530, 0x058F),
    ("Hebrew", 0x0590, 0x05FF),
    ("Arabic", 0x0600, 0x06FF),
    ("Devanagari", 0x0900, 0x097F),
    ("Bengali", 0x0980, 0x09FF),
    ("Tamil", 0x0B80, 0x0BFF),
    ("Thai", 0x0E00, 0x0E7F),
    ("Georgian", 0x10A0, 0x10FF),
    ("Hangul_Jamo", 0x1100, 0x11FF),
    ("Latin_Extended_Additional", 0x1E00, 0x1EFF),
    ("Greek_Extended", 0x1F00, 0x1FFF),
    ("General_Punctuation", 0x2000, 0x206F),
    ("Superscripts_and_Subscripts", 0x2070, 0x209F),
    ("Currency_Symbols", 0x20A0, 0x20CF),
    ("Letterlike_Symbols", 0x2100, 0x214F),
    ("Number_Forms", 0x2150, 0x218F),
    ("Arrows", 0x2190, 0x21FF),
    ("Mathematical_Operators", 0x2200, 0x22FF),
    ("Box_Drawing", 0x2500, 0x257F),
    ("Geometric_Shapes", 0x25A0, 0x25FF),
    ("Miscellaneous_Symbols", 0x2600, 0x26FF),
    ("Dingbats", 0x2700, 0x27BF),
    ("CJK_Symbols_and_Punctuation", 0x3000, 0x303F),
    ("Hiragana", 0x3040, 0x309F),
    ("Katakana", 0x30A0, 0x30FF),
    ("CJK_Unified_Ideographs", 0x4E00, 0x9FFF),
    ("Hangul_Syllables", 0xAC00, 0xD7AF),
    ("Arabic_Presentation_Forms_A", 0xFB50, 0xFDFF),
    ("Halfwidth_and_Fullwidth_Forms", 0xFF00, 0xFFEF),
];
