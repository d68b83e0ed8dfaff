use adl_parser::{Value, parse_str};

#[cfg(test)]
mod coercion_tests {
    use super::*;

    #[test]
    fn bare_number_becomes_f64() {
        let root = parse_str("key=123.5\n").unwrap();
        assert_eq!(root.get("key"), Some(&Value::Number(123.5)));
    }

    #[test]
    fn boolean_words_in_any_case() {
        let root = parse_str("a=true b=yes c=FALSE d=No\n").unwrap();
        assert_eq!(root.get_boolean("a"), Some(true));
        assert_eq!(root.get_boolean("b"), Some(true));
        assert_eq!(root.get_boolean("c"), Some(false));
        assert_eq!(root.get_boolean("d"), Some(false));
    }

    #[test]
    fn bareword_is_stored_lowercased() {
        let root = parse_str("biome=Highlands\n").unwrap();
        assert_eq!(root.get_str("biome"), Some("highlands"));
    }

    #[test]
    fn quoted_string_preserves_case() {
        let root = parse_str("name=\"MixedCase\"\n").unwrap();
        assert_eq!(root.get_str("name"), Some("MixedCase"));
    }

    #[test]
    fn quoted_token_is_never_coerced() {
        let root = parse_str("a=\"123.5\" b=\"true\"\n").unwrap();
        assert_eq!(root.get_str("a"), Some("123.5"));
        assert_eq!(root.get_str("b"), Some("true"));
        assert_eq!(root.get_number("a"), None);
        assert_eq!(root.get_boolean("b"), None);
    }

    #[test]
    fn negative_and_exponent_numbers() {
        let root = parse_str("a=-4 b=1e3 c=.5\n").unwrap();
        assert_eq!(root.get_number("a"), Some(-4.0));
        assert_eq!(root.get_number("b"), Some(1000.0));
        assert_eq!(root.get_number("c"), Some(0.5));
    }

    #[test]
    fn number_like_word_stays_a_string() {
        let root = parse_str("version=1.2.3\n").unwrap();
        assert_eq!(root.get_str("version"), Some("1.2.3"));
    }
}

#[cfg(test)]
mod comment_tests {
    use super::*;

    #[test]
    fn full_line_comment_is_ignored() {
        let root = parse_str("# header comment\nkey=1\n").unwrap();
        assert_eq!(root.get_number("key"), Some(1.0));
        assert_eq!(root.len(), 1);
    }

    #[test]
    fn comment_interrupts_bare_token() {
        // The comment check runs before the state dispatch, so a '#' may
        // cut a bare value short; the newline then finalizes it
        let commented = parse_str("key=1#comment\n").unwrap();
        let plain = parse_str("key=1\n").unwrap();
        assert_eq!(commented, plain);
        assert_eq!(commented.get_number("key"), Some(1.0));
    }

    #[test]
    fn comment_between_pairs() {
        let root = parse_str("a=1\n# middle\nb=2\n").unwrap();
        assert_eq!(root.get_number("a"), Some(1.0));
        assert_eq!(root.get_number("b"), Some(2.0));
    }

    #[test]
    fn unescaped_hash_starts_comment_even_inside_quotes() {
        // The rest of the line vanishes; the terminating newline is
        // delivered to the string instead
        let root = parse_str("s=\"a#ignored\nb\"\n").unwrap();
        assert_eq!(root.get_str("s"), Some("a\nb"));
    }

    #[test]
    fn escaped_hash_is_a_literal_character() {
        let root = parse_str("s=\"a\\#b\"\n").unwrap();
        assert_eq!(root.get_str("s"), Some("a#b"));
    }

    #[test]
    fn comment_at_end_of_input_without_newline() {
        let root = parse_str("key=1\n# trailing").unwrap();
        assert_eq!(root.get_number("key"), Some(1.0));
    }
}

#[cfg(test)]
mod duplicate_key_tests {
    use super::*;

    #[test]
    fn later_declaration_wins_silently() {
        let root = parse_str("a=1 a=2\n").unwrap();
        assert_eq!(root.get_number("a"), Some(2.0));
        assert_eq!(root.len(), 1);
    }

    #[test]
    fn overwrite_may_change_the_value_kind() {
        let root = parse_str("a=\"text\" a=5\n").unwrap();
        assert_eq!(root.get_number("a"), Some(5.0));
        assert_eq!(root.get_str("a"), None);
    }

    #[test]
    fn overwritten_subentry_leaves_iteration_too() {
        let root = parse_str("s={ x=1 } s=2\n").unwrap();
        assert_eq!(root.get_number("s"), Some(2.0));
        assert_eq!(root.subentries().count(), 0);
    }

    #[test]
    fn first_declaration_keeps_its_position() {
        let root = parse_str("a=1 b=2 a=3\n").unwrap();
        let keys: Vec<&str> = root.primitives().keys().map(String::as_str).collect();
        assert_eq!(keys, ["a", "b"]);
    }
}

#[cfg(test)]
mod list_tests {
    use super::*;

    fn items(root: &adl_parser::Entry, key: &str) -> Vec<String> {
        root.get_list(key).unwrap().iter().cloned().collect()
    }

    #[test]
    fn mixed_bare_and_quoted_elements() {
        let root = parse_str("tags=[a \"B\" c]\n").unwrap();
        assert_eq!(items(&root, "tags"), ["a", "B", "c"]);
    }

    #[test]
    fn bare_elements_are_lowercased() {
        let root = parse_str("t=[ABC Def]\n").unwrap();
        assert_eq!(items(&root, "t"), ["abc", "def"]);
    }

    #[test]
    fn empty_list() {
        let root = parse_str("t=[]\n").unwrap();
        assert!(root.get_list("t").unwrap().is_empty());
    }

    #[test]
    fn elements_may_span_lines() {
        let root = parse_str("t=[one\ntwo\n three]\n").unwrap();
        assert_eq!(items(&root, "t"), ["one", "two", "three"]);
    }

    #[test]
    fn quoted_element_resolves_escapes() {
        let root = parse_str("t=[\"a\\\"b\"]\n").unwrap();
        assert_eq!(items(&root, "t"), ["a\"b"]);
    }

    #[test]
    fn hash_is_literal_inside_a_list() {
        // Comments are not recognized by the list scanner
        let root = parse_str("t=[a#b]\n").unwrap();
        assert_eq!(items(&root, "t"), ["a#b"]);
    }

    #[test]
    fn list_elements_skip_coercion() {
        let root = parse_str("t=[1 true no]\n").unwrap();
        assert_eq!(items(&root, "t"), ["1", "true", "no"]);
    }
}

#[cfg(test)]
mod structure_tests {
    use super::*;

    #[test]
    fn nested_entry_is_typed_by_its_key() {
        let root = parse_str("outer={ inner=1 }\n").unwrap();
        assert_eq!(root.subentries().count(), 1);

        let outer = root.subentries().next().unwrap();
        assert_eq!(outer.type_name(), Some("outer"));
        assert_eq!(outer.get_number("inner"), Some(1.0));
    }

    #[test]
    fn root_entry_has_no_type() {
        let root = parse_str("a=1\n").unwrap();
        assert_eq!(root.type_name(), None);
    }

    #[test]
    fn subentry_is_reachable_by_key_and_by_iteration() {
        let root = parse_str("a={ x=1 } b={ x=2 } c=3\n").unwrap();
        let by_key = root.get_entry("a").unwrap();
        let by_iter = root.subentries().next().unwrap();
        assert_eq!(by_key, by_iter);

        let names: Vec<&str> = root.subentries().filter_map(|e| e.type_name()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn entries_iterate_in_declaration_order() {
        let root = parse_str("z={ n=1 } a={ n=2 } m={ n=3 }\n").unwrap();
        let order: Vec<f64> = (&root).into_iter().filter_map(|e| e.get_number("n")).collect();
        assert_eq!(order, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn nesting_to_several_levels() {
        let root = parse_str("l1={ l2={ l3={ v=9 } } }\n").unwrap();
        let v = root
            .get_entry("l1")
            .and_then(|e| e.get_entry("l2"))
            .and_then(|e| e.get_entry("l3"))
            .and_then(|e| e.get_number("v"));
        assert_eq!(v, Some(9.0));
    }

    #[test]
    fn typed_getters_return_none_on_mismatch() {
        let root = parse_str("a=1 b=\"two\"\n").unwrap();
        assert_eq!(root.get_str("a"), None);
        assert_eq!(root.get_number("b"), None);
        assert_eq!(root.get_entry("a"), None);
        assert_eq!(root.get("missing"), None);
    }

    #[test]
    fn keys_may_be_empty() {
        // '=' with an empty buffer latches an empty key
        let root = parse_str("=5\n").unwrap();
        assert_eq!(root.get_number(""), Some(5.0));
    }

    #[test]
    fn close_brace_at_root_ends_the_document() {
        let root = parse_str("a=1\n}").unwrap();
        assert_eq!(root.get_number("a"), Some(1.0));
    }

    #[test]
    fn missing_close_brace_is_closed_by_eof() {
        let root = parse_str("s={ a=1 ").unwrap();
        assert_eq!(root.get_entry("s").unwrap().get_number("a"), Some(1.0));
    }
}
