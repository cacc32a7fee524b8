// collation/wild.rs - LIKE pattern matching
// One recursive matcher shared by every handler; callers supply the
// decoder and the character equality of their collation.

use crate::ctype::{LikePattern, WcT, WILDCMP_MAX_DEPTH, WILD_ABORT, WILD_MATCH, WILD_NOMATCH};

/// Matches `s` against the LIKE pattern `wild`.
///
/// Returns `WILD_MATCH` (0), `WILD_NOMATCH` (1) or `WILD_ABORT` (-1) when
/// the string ran out inside a `%` search and no later position can
/// match. Undecodable input never matches. Patterns nesting `%` deeper
/// than `WILDCMP_MAX_DEPTH` do not match.
pub fn wildcmp_generic<D, E>(s: &[u8], wild: &[u8], like: &LikePattern, decode: D, eq: E) -> i32
where
    D: Fn(&[u8]) -> Option<(WcT, usize)>,
    E: Fn(WcT, WcT) -> bool,
{
    Matcher { like, decode: &decode, eq: &eq }.matches(s, wild, 1)
}

struct Matcher<'a, D, E> {
    like: &'a LikePattern,
    decode: &'a D,
    eq: &'a E,
}

impl<D, E> Matcher<'_, D, E>
where
    D: Fn(&[u8]) -> Option<(WcT, usize)>,
    E: Fn(WcT, WcT) -> bool,
{
    fn matches(&self, s: &[u8], wild: &[u8], depth: usize) -> i32 {
        if depth > WILDCMP_MAX_DEPTH {
            return WILD_NOMATCH;
        }
        let like = self.like;
        let (mut si, mut wi) = (0, 0);

        while wi < wild.len() {
            // Literal characters and `_`.
            loop {
                let Some((mut w_wc, w_len)) = (self.decode)(&wild[wi..]) else { return WILD_NOMATCH };
                if w_wc == like.w_many {
                    break;
                }
                wi += w_len;
                let mut escaped = false;
                if w_wc == like.escape && wi < wild.len() {
                    let Some((next, len)) = (self.decode)(&wild[wi..]) else { return WILD_NOMATCH };
                    w_wc = next;
                    wi += len;
                    escaped = true;
                }

                if si >= s.len() {
                    return WILD_ABORT;
                }
                let Some((s_wc, s_len)) = (self.decode)(&s[si..]) else { return WILD_NOMATCH };
                si += s_len;
                if (escaped || w_wc != like.w_one) && !(self.eq)(s_wc, w_wc) {
                    return WILD_NOMATCH;
                }
                if wi >= wild.len() {
                    return if si < s.len() { WILD_NOMATCH } else { WILD_MATCH };
                }
            }

            // `%`: skip runs of `%` and `_`, each `_` eating one character.
            while wi < wild.len() {
                let Some((w_wc, w_len)) = (self.decode)(&wild[wi..]) else { return WILD_NOMATCH };
                if w_wc == like.w_many {
                    wi += w_len;
                    continue;
                }
                if w_wc == like.w_one {
                    wi += w_len;
                    if si >= s.len() {
                        return WILD_ABORT;
                    }
                    let Some((_, s_len)) = (self.decode)(&s[si..]) else { return WILD_NOMATCH };
                    si += s_len;
                    continue;
                }
                break;
            }
            if wi >= wild.len() {
                return WILD_MATCH;
            }
            if si >= s.len() {
                return WILD_ABORT;
            }

            // The character after `%` anchors the search.
            let Some((mut w_wc, mut w_len)) = (self.decode)(&wild[wi..]) else { return WILD_NOMATCH };
            if w_wc == like.escape && wi + w_len < wild.len() {
                let Some((next, len)) = (self.decode)(&wild[wi + w_len..]) else { return WILD_NOMATCH };
                w_wc = next;
                w_len += len;
            }
            let rest = &wild[wi + w_len..];

            loop {
                loop {
                    if si >= s.len() {
                        return WILD_ABORT;
                    }
                    let Some((s_wc, s_len)) = (self.decode)(&s[si..]) else { return WILD_NOMATCH };
                    si += s_len;
                    if (self.eq)(s_wc, w_wc) {
                        break;
                    }
                }
                let r = self.matches(&s[si..], rest, depth + 1);
                if r <= 0 {
                    return r;
                }
            }
        }
        if si < s.len() {
            WILD_NOMATCH
        } else {
            WILD_MATCH
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn byte_cmp(s: &str, wild: &str) -> i32 {
        wildcmp_generic(
            s.as_bytes(),
            wild.as_bytes(),
            &LikePattern::default(),
            |b| b.first().map(|&c| (c as WcT, 1)),
            |a, b| a == b,
        )
    }

    fn nocase_cmp(s: &str, wild: &str) -> i32 {
        wildcmp_generic(
            s.as_bytes(),
            wild.as_bytes(),
            &LikePattern::default(),
            |b| b.first().map(|&c| (c as WcT, 1)),
            |a, b| (a as u8).eq_ignore_ascii_case(&(b as u8)),
        )
    }

    #[test]
    fn literals_and_one() {
        assert_eq!(byte_cmp("abc", "abc"), WILD_MATCH);
        assert_eq!(byte_cmp("abc", "a_c"), WILD_MATCH);
        assert_eq!(byte_cmp("abc", "ab"), WILD_NOMATCH);
        assert_eq!(byte_cmp("ab", "abc"), WILD_ABORT);
        assert_eq!(byte_cmp("abd", "abc"), WILD_NOMATCH);
        assert_eq!(byte_cmp("", ""), WILD_MATCH);
    }

    #[test]
    fn many() {
        assert_eq!(byte_cmp("abc", "%"), WILD_MATCH);
        assert_eq!(byte_cmp("", "%"), WILD_MATCH);
        assert_eq!(byte_cmp("abc", "a%"), WILD_MATCH);
        assert_eq!(byte_cmp("abc", "%c"), WILD_MATCH);
        assert_eq!(byte_cmp("abcabc", "%b%c"), WILD_MATCH);
        assert_eq!(byte_cmp("abcabd", "%bc"), WILD_ABORT);
        assert_eq!(byte_cmp("abc", "%_%_%_"), WILD_MATCH);
        assert_ne!(byte_cmp("ab", "%_%_%_"), WILD_MATCH);
        assert_eq!(byte_cmp("xaay", "%a_y"), WILD_MATCH);
    }

    #[test]
    fn escape() {
        assert_eq!(byte_cmp("a%c", "a\\%c"), WILD_MATCH);
        assert_eq!(byte_cmp("abc", "a\\%c"), WILD_NOMATCH);
        assert_eq!(byte_cmp("a_", "%\\_"), WILD_MATCH);
        assert_ne!(byte_cmp("ab", "%\\_"), WILD_MATCH);
        // A trailing escape matches itself.
        assert_eq!(byte_cmp("a\\", "a\\"), WILD_MATCH);
    }

    #[test]
    fn collation_equality() {
        assert_eq!(nocase_cmp("ABC", "a%"), WILD_MATCH);
        assert_eq!(nocase_cmp("xABC", "%bc"), WILD_MATCH);
    }

    #[test]
    fn deep_patterns_stop() {
        let s = "a".repeat(260);
        let wild = "%a".repeat(260);
        assert_ne!(byte_cmp(&s, &wild), WILD_MATCH);
    }

    #[test]
    fn custom_wildcards() {
        let like = LikePattern { escape: b'!' as WcT, w_one: b'?' as WcT, w_many: b'*' as WcT };
        let r = wildcmp_generic(b"abc", b"a?*", &like, |b| b.first().map(|&c| (c as WcT, 1)), |a, b| a == b);
        assert_eq!(r, WILD_MATCH);
    }
}
