//! Property tests for the scanner and rewrite engine.

use proptest::prelude::*;
use regex::Regex;
use unembed_engine::{
    ExtensionSet, Replacement, ResolvedTarget, RewriteConfig, Rewriter, apply_replacements,
    compute_rewrites, scan,
};

/// The combined embed pattern the scanner must agree with.
const EMBED_PATTERN: &str = r"!\[\[([^\]]+)\]\]|!\[([^\]]*)\]\(([^)]+)\)";

fn markup() -> impl Strategy<Value = String> {
    let pieces = vec![
        "!", "[", "]", "(", ")", "![[", "]]", "![", "](", "a", "b.pdf", "c.png", "d.PNG",
        "%20", " ", "\n", "é", "|x", "#h",
    ];
    prop::collection::vec(prop::sample::select(pieces), 0..40).prop_map(|v| v.concat())
}

/// Prose made of well-formed links only: no `!` directly before an embed
/// and no link syntax inside alt text or paths.
fn document() -> impl Strategy<Value = String> {
    let pieces = vec![
        "word", " ", "\n", "Wow! ", "[[b.pdf]]", "[x](c.png)", "![[b.pdf]]", "![[c.png]]",
        "![](d.pdf)", "![cap](e%20f.pdf)", "![[g.docx|alias]]", "![[h.PNG]]", "![](i.jpeg)",
    ];
    prop::collection::vec(prop::sample::select(pieces), 0..30).prop_map(|v| v.concat())
}

/// Every path exists; extension taken from the path itself.
fn flat(path: &str, _context: &str) -> Option<ResolvedTarget> {
    Some(ResolvedTarget::from_path(path))
}

fn plan(text: &str) -> Vec<Replacement> {
    Rewriter::default().plan(text, "n.md", &flat).unwrap()
}

proptest! {
    #[test]
    fn scanner_agrees_with_combined_pattern(text in markup()) {
        let re = Regex::new(EMBED_PATTERN).unwrap();
        let expected: Vec<_> = re
            .captures_iter(&text)
            .map(|c| {
                let m = c.get(0).unwrap();
                match c.get(1) {
                    Some(path) => (m.start(), m.end(), path.as_str(), None),
                    None => (
                        m.start(),
                        m.end(),
                        c.get(3).unwrap().as_str(),
                        Some(c.get(2).unwrap().as_str()),
                    ),
                }
            })
            .collect();
        let actual: Vec<_> = scan(&text)
            .map(|o| (o.span.start, o.span.end, o.target, o.alt_text))
            .collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn occurrences_are_ordered_and_match_their_text(text in markup()) {
        let occs: Vec<_> = scan(&text).collect();
        for occ in &occs {
            prop_assert_eq!(&text[occ.span.range()], occ.raw);
            prop_assert_eq!(occ.span.len(), occ.raw.len());
        }
        for pair in occs.windows(2) {
            prop_assert!(pair[0].span.end <= pair[1].span.start);
        }
    }

    #[test]
    fn replacements_are_sorted_and_disjoint(text in markup()) {
        let out = plan(&text);
        for pair in out.windows(2) {
            prop_assert!(pair[0].span.end <= pair[1].span.start);
        }
        for r in &out {
            prop_assert_ne!(&text[r.span.range()], r.new_text.as_str());
        }
    }

    #[test]
    fn second_pass_is_a_no_op(text in document()) {
        let first = apply_replacements(&text, &plan(&text)).unwrap();
        prop_assert!(plan(&first.text).is_empty());
    }

    #[test]
    fn image_targets_are_never_touched(text in markup()) {
        let as_image = |_: &str, _: &str| Some(ResolvedTarget {
            exists: true,
            extension: "png".to_string(),
            display_name: "img".to_string(),
        });
        let extensions = ExtensionSet::default();
        let config = RewriteConfig { image_extensions: &extensions, auto_fill_alt_text: true };
        let out = compute_rewrites(&text, "n.md", scan(&text), &as_image, config).unwrap();
        prop_assert!(out.is_empty());
    }

    #[test]
    fn unresolved_targets_are_never_touched(text in markup()) {
        let nothing = |_: &str, _: &str| -> Option<ResolvedTarget> { None };
        let extensions = ExtensionSet::default();
        let config = RewriteConfig { image_extensions: &extensions, auto_fill_alt_text: true };
        let out = compute_rewrites(&text, "n.md", scan(&text), &nothing, config).unwrap();
        prop_assert!(out.is_empty());
    }

    #[test]
    fn text_outside_replacements_is_preserved(text in markup()) {
        let out = plan(&text);
        let edit = apply_replacements(&text, &out).unwrap();
        let mut kept_before = 0;
        let mut kept_after = 0;
        for (r, changed) in out.iter().zip(&edit.changed) {
            prop_assert_eq!(
                &text[kept_before..r.span.start],
                &edit.text[kept_after..changed.start]
            );
            kept_before = r.span.end;
            kept_after = changed.end;
        }
        prop_assert_eq!(&text[kept_before..], &edit.text[kept_after..]);
    }
}
