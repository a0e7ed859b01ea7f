//! Rewriting of JVM field and method descriptors.
//!
//! The descriptor grammar is walked character-wise: primitive codes, array
//! markers and the `(`/`)` of a method descriptor are copied through, and
//! every embedded `L<internal name>;` object type is rewritten through the
//! supplied mapping function. Input that does not follow the grammar is
//! copied through verbatim rather than rejected.

/// Rewrites every class name embedded in a field or method descriptor.
///
/// The mapping function receives slash-separated internal names without the
/// surrounding `L`/`;`, e.g. `java/lang/String`.
///
/// # Examples
///
/// ```
/// use kotlin_metadata_remap::remap_descriptor;
///
/// let mapped = remap_descriptor("(La/B;I)La/B;", |name| {
///     if name == "a/B" { "x/Y".into() } else { name.into() }
/// });
/// assert_eq!(mapped, "(Lx/Y;I)Lx/Y;");
/// ```
pub fn remap_descriptor<F>(descriptor: &str, mut map: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut out = String::with_capacity(descriptor.len());
    let mut i = 0;

    while let Some(token) = descriptor[i..].chars().next() {
        if token != 'L' {
            // primitives, `[`, `(` and `)` carry no names
            out.push(token);
            i += token.len_utf8();
            continue;
        }

        let rest = &descriptor[i + 1..];
        match rest.find(';') {
            Some(end) => {
                out.push('L');
                out.push_str(&map(&rest[..end]));
                out.push(';');
                i += 1 + end + 1;
            }
            None => {
                // unterminated object type, copy the tail through untouched
                out.push_str(&descriptor[i..]);
                break;
            }
        }
    }

    out
}
