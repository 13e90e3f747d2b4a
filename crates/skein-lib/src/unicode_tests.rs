use unicode_script::Script;

use crate::unicode::{ClassMatcher, block_range, category_of, resolve_class};

#[test]
fn category_codes() {
    assert_eq!(category_of('A'), "Lu");
    assert_eq!(category_of('a'), "Ll");
    assert_eq!(category_of('7'), "Nd");
    assert_eq!(category_of(' '), "Zs");
    assert_eq!(category_of('\n'), "Cc");
    assert_eq!(category_of('+'), "Sm");
}

#[test]
fn resolves_category_names() {
    let short = resolve_class("L").expect("short category");
    assert!(short.matches('a') && short.matches('Ω') && !short.matches('7'));

    let sub = resolve_class("Lu").expect("short subcategory");
    assert!(sub.matches('A') && !sub.matches('a'));

    let long = resolve_class("Letter").expect("long category");
    assert_eq!(long, short);

    let long_sub = resolve_class("Uppercase_Letter").expect("long subcategory");
    assert_eq!(long_sub, sub);
}

#[test]
fn resolves_blocks_with_name_normalization() {
    assert_eq!(block_range("Basic_Latin"), Some((0x0000, 0x007F)));
    assert_eq!(block_range("basic latin"), Some((0x0000, 0x007F)));
    assert_eq!(block_range("IsBasicLatin"), Some((0x0000, 0x007F)));
    assert_eq!(block_range("InGreek-and-Coptic"), Some((0x0370, 0x03FF)));
    assert_eq!(block_range("Nope"), None);

    let greek = resolve_class("Greek_and_Coptic").expect("block");
    assert!(greek.matches('Ω') && !greek.matches('a'));
}

#[test]
fn resolves_scripts() {
    let greek = resolve_class("Greek").expect("script");
    assert_eq!(greek, ClassMatcher::Script(Script::Greek));
    assert!(greek.matches('Ω') && !greek.matches('a'));
}

#[test]
fn unknown_names_do_not_resolve() {
    assert!(resolve_class("NotAClass").is_none());
    assert!(resolve_class("").is_none());
}
