//! Text helpers for provider payloads.

use quick_xml::escape::{resolve_html5_entity, unescape_with};

/// Decode HTML entities (named HTML5 entities and numeric references).
///
/// Each `&…;` reference is decoded on its own. A reference that cannot be
/// resolved, or a bare `&`, is kept verbatim, the way a browser text node
/// treats it.
#[must_use]
pub fn decode_entities(raw: &str) -> String {
    let mut decoded = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(amp) = rest.find('&') {
        decoded.push_str(&rest[..amp]);
        let tail = &rest[amp..];

        let reference = tail[1..]
            .find(|c: char| c == ';' || c == '&' || c.is_whitespace())
            .filter(|end| tail.as_bytes()[end + 1] == b';')
            .map(|end| &tail[..end + 2]);
        let resolved = reference.and_then(|reference| {
            unescape_with(reference, resolve_html5_entity)
                .ok()
                .map(|text| (reference.len(), text))
        });

        match resolved {
            Some((consumed, text)) => {
                decoded.push_str(&text);
                rest = &tail[consumed..];
            }
            None => {
                decoded.push('&');
                rest = &tail[1..];
            }
        }
    }

    decoded.push_str(rest);
    decoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_named_and_numeric_entities() {
        assert_eq!(
            decode_entities("Who wrote &quot;Hamlet&quot;?"),
            "Who wrote \"Hamlet\"?"
        );
        assert_eq!(decode_entities("It&#039;s"), "It's");
        assert_eq!(decode_entities("&#x41;BC"), "ABC");
        assert_eq!(decode_entities("Pok&eacute;mon"), "Pokémon");
        assert_eq!(decode_entities("Tom &amp; Jerry"), "Tom & Jerry");
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(decode_entities("Paris"), "Paris");
        assert_eq!(decode_entities(""), "");
    }

    #[test]
    fn undecodable_text_is_kept_verbatim() {
        assert_eq!(decode_entities("R&D"), "R&D");
        assert_eq!(decode_entities("trailing &"), "trailing &");
        assert_eq!(decode_entities("&;"), "&;");
    }

    #[test]
    fn bad_references_do_not_block_good_ones() {
        assert_eq!(decode_entities("AT&T &amp; Verizon"), "AT&T & Verizon");
        assert_eq!(
            decode_entities("Caf&eacute; &foo; &quot;x&quot;"),
            "Café &foo; \"x\""
        );
        assert_eq!(decode_entities("&&amp;"), "&&");
    }

    #[test]
    fn decodes_only_once() {
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
    }
}
